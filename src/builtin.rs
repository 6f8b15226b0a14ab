use crate::command::{Builtin, Context, LoopStatus};
use anyhow::{Context as _, Result, anyhow};
use std::env;

/// Ordered set of the builtins the dispatcher knows about.
///
/// Lookup walks the entries in order and the first name that matches wins.
pub struct BuiltinTable {
    entries: Vec<Box<dyn Builtin>>,
}

impl BuiltinTable {
    pub fn new(entries: Vec<Box<dyn Builtin>>) -> Self {
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Builtin> {
        self.entries
            .iter()
            .find(|b| b.name() == name)
            .map(|b| b.as_ref())
    }

    /// Names of all entries, in table order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|b| b.name())
    }
}

impl Default for BuiltinTable {
    /// The standard table: `cd`, `help`, `exit`.
    fn default() -> Self {
        Self::new(vec![Box::new(Cd), Box::new(Help), Box::new(Exit)])
    }
}

/// Change the current working directory of the interpreter.
///
/// Takes exactly one meaningful operand; anything after it is ignored. The
/// new directory is inherited by every program started afterwards.
pub struct Cd;

impl Builtin for Cd {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn execute(&self, args: &[&str], _ctx: &mut Context<'_, '_>) -> Result<LoopStatus> {
        let target = args
            .get(1)
            .ok_or_else(|| anyhow!("expected argument to \"cd\""))?;
        env::set_current_dir(target).with_context(|| format!("cd: {target}"))?;
        log::debug!("working directory is now {target}");
        Ok(LoopStatus::Continue)
    }
}

/// Print usage and the list of builtins.
pub struct Help;

impl Builtin for Help {
    fn name(&self) -> &'static str {
        "help"
    }

    fn execute(&self, _args: &[&str], ctx: &mut Context<'_, '_>) -> Result<LoopStatus> {
        let out = &mut *ctx.streams.stdout;
        writeln!(out, "Type program names and arguments, and hit enter.")?;
        writeln!(out, "The following are built in:")?;
        for name in ctx.builtins.names() {
            writeln!(out, "  {name}")?;
        }
        writeln!(out, "Use the man command for information on other programs.")?;
        Ok(LoopStatus::Continue)
    }
}

/// Leave the interpreter. Arguments are ignored.
pub struct Exit;

impl Builtin for Exit {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn execute(&self, _args: &[&str], _ctx: &mut Context<'_, '_>) -> Result<LoopStatus> {
        Ok(LoopStatus::Terminate)
    }
}
