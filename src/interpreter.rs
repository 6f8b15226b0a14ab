use crate::builtin::BuiltinTable;
use crate::command::{Context, LoopStatus, Streams};
use crate::external;
use crate::reader::LineSource;
use crate::tokenizer::tokenize;
use std::fmt::Display;

/// Prompt written before each line is read.
pub const DEFAULT_PROMPT: &str = "> ";

/// A minimal shell-like interpreter that runs builtins in-process and
/// everything else as a child process.
///
/// Example
/// ```
/// use lsh::{Interpreter, LoopStatus, Streams};
/// let sh = Interpreter::default();
/// let (mut out, mut err) = (Vec::<u8>::new(), Vec::<u8>::new());
/// let mut streams = Streams { stdout: &mut out, stderr: &mut err };
/// assert_eq!(sh.execute(&["exit"], &mut streams), LoopStatus::Terminate);
/// assert_eq!(sh.execute(&[], &mut streams), LoopStatus::Continue);
/// ```
pub struct Interpreter {
    builtins: BuiltinTable,
    prompt: String,
}

impl Interpreter {
    /// Create a new interpreter with a custom builtin table.
    pub fn new(builtins: BuiltinTable) -> Self {
        Self {
            builtins,
            prompt: DEFAULT_PROMPT.to_owned(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Run one tokenized command.
    ///
    /// An empty command does nothing. Otherwise `args[0]` is looked up in
    /// the builtin table and, failing that, run as an external program.
    /// Failures are reported on `streams.stderr`; only the `exit` builtin
    /// returns [`LoopStatus::Terminate`].
    pub fn execute(&self, args: &[&str], streams: &mut Streams<'_>) -> LoopStatus {
        let Some(name) = args.first() else {
            return LoopStatus::Continue;
        };

        if let Some(builtin) = self.builtins.get(name) {
            log::debug!("running builtin {name}");
            let mut ctx = Context {
                streams: &mut *streams,
                builtins: &self.builtins,
            };
            return match builtin.execute(args, &mut ctx) {
                Ok(status) => status,
                Err(e) => {
                    report(streams, format_args!("{e:#}"));
                    LoopStatus::Continue
                }
            };
        }

        self.launch(args, streams)
    }

    fn launch(&self, args: &[&str], streams: &mut Streams<'_>) -> LoopStatus {
        // The child shares our descriptors; anything still buffered must go out first.
        if let Err(e) = streams.flush() {
            log::warn!("flush before launching {}: {e}", args[0]);
        }
        match external::spawn_and_wait(args) {
            Ok(outcome) => log::info!("{} {outcome}", args[0]),
            Err(e) => report(streams, format_args!("{e}")),
        }
        LoopStatus::Continue
    }

    /// Read–tokenize–execute until `exit` or end of input.
    ///
    /// Each line and its tokens live for exactly one iteration. Errors from
    /// commands never stop the loop; only a failure of `source` does.
    pub fn repl(
        &self,
        source: &mut dyn LineSource,
        streams: &mut Streams<'_>,
    ) -> anyhow::Result<()> {
        log::info!("session started");
        loop {
            let Some(line) = source.read_line(&self.prompt)? else {
                log::info!("end of input");
                break;
            };
            let tokens = tokenize(&line);
            if !self.execute(&tokens, streams).should_continue() {
                log::info!("exit requested");
                break;
            }
        }
        streams.flush()?;
        Ok(())
    }
}

impl Default for Interpreter {
    /// Create an interpreter with the standard builtins and prompt.
    fn default() -> Self {
        Self::new(BuiltinTable::default())
    }
}

fn report(streams: &mut Streams<'_>, message: impl Display) {
    log::warn!("{message}");
    let _ = writeln!(streams.stderr, "lsh: {message}");
}
