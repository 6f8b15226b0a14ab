use crate::builtin::BuiltinTable;
use anyhow::Result;
use std::io::Write;

/// What the interpreter loop should do after a command.
///
/// Maps onto the conventional integer status where 0 stops the loop and any
/// other value keeps it going.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopStatus {
    Terminate,
    Continue,
}

impl LoopStatus {
    /// Interprets an integer status: 0 terminates, anything else continues.
    pub fn from_code(code: i32) -> Self {
        if code == 0 {
            LoopStatus::Terminate
        } else {
            LoopStatus::Continue
        }
    }

    pub fn code(self) -> i32 {
        match self {
            LoopStatus::Terminate => 0,
            LoopStatus::Continue => 1,
        }
    }

    pub fn should_continue(self) -> bool {
        self == LoopStatus::Continue
    }
}

/// Output streams a command writes to.
///
/// Builtins write through these; external programs inherit the real
/// descriptors, so the streams are only flushed before a child is started.
pub struct Streams<'a> {
    pub stdout: &'a mut dyn Write,
    pub stderr: &'a mut dyn Write,
}

impl Streams<'_> {
    pub fn flush(&mut self) -> std::io::Result<()> {
        self.stdout.flush()?;
        self.stderr.flush()
    }
}

/// State a builtin can look at while it runs.
pub struct Context<'a, 'b> {
    pub streams: &'a mut Streams<'b>,
    /// The table the builtin was found in.
    pub builtins: &'a BuiltinTable,
}

/// A command executed inside the interpreter process.
pub trait Builtin {
    /// Name the command is invoked by, e.g. "cd".
    fn name(&self) -> &'static str;

    /// Runs the command. `args[0]` is the command name as typed.
    ///
    /// An `Err` is reported to standard error by the caller and the loop
    /// goes on.
    fn execute(&self, args: &[&str], ctx: &mut Context<'_, '_>) -> Result<LoopStatus>;
}
