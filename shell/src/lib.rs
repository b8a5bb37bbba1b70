//! A small interactive shell built around a command dispatcher.
//!
//! Each input line is split on spaces and classified as one of the builtins
//! (`exit`, `echo`, `type`, `cd`), an executable found on the search path, or an
//! unknown command. Everything that goes wrong is turned into a line of text
//! for the user; only `exit` ends the session.
//!
//! The main entry point is [`Interpreter`]. The [`env`] module holds the
//! execution context (variables, working directory, search-path variable) and
//! [`external`] resolves and spawns programs.

pub mod builtin;
pub mod command;
pub mod env;
pub mod error;
pub mod external;
mod interpreter;
mod lexer;
#[cfg(test)]
mod test_utils;

pub use command::{ExitCode, Outcome};
pub use error::ShellError;
/// Just a convenient re-export of the interactive command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::Interpreter;
