//! A minimal interactive command interpreter.
//!
//! Each prompt cycle reads one line, splits it on whitespace, and either runs
//! one of the builtins (`cd`, `help`, `exit`) in-process or forks and execs
//! the named program, waiting until it exits or is killed by a signal. There
//! is no quoting, expansion, redirection or piping: a line is a flat list of
//! words and the first word is the command.
//!
//! The main entry point is [`Interpreter`]. Lines come from a
//! [`reader::LineSource`], either the plain stream reader or the rustyline
//! editor.

mod buffer;
pub mod builtin;
pub mod command;
pub mod config;
pub mod external;
mod interpreter;
pub mod logger;
pub mod reader;
pub mod tokenizer;

pub use command::{LoopStatus, Streams};
/// Just a convenient re-export of the interactive command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::{DEFAULT_PROMPT, Interpreter};
