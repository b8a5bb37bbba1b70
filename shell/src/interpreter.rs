use crate::builtin::Builtin;
use crate::command::{ExitCode, Outcome};
use crate::env::Environment;
use crate::error::ShellError;
use crate::external::{ExternalCommand, find_command_path};
use crate::lexer;
use anyhow::Context;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, Write};
use tracing::debug;

/// A minimal shell-like interpreter that can execute built-in and external commands.
///
/// The interpreter owns an [`Environment`] and classifies each input line in a
/// fixed order:
///
/// 1. an empty line does nothing;
/// 2. a [`Builtin`] name runs in-process;
/// 3. a name found on the search path is spawned;
/// 4. anything else is reported as `"<line>: command not found"`.
///
/// Builtins always win over an executable of the same name on the search path.
///
/// Example
/// ```
/// use path_shell::{Interpreter, Outcome};
/// let mut sh = Interpreter::default();
/// assert_eq!(sh.dispatch("echo hello world"), Outcome::Output("hello world".into()));
/// ```
pub struct Interpreter {
    env: Environment,
}

impl Interpreter {
    pub fn new(env: Environment) -> Self {
        Self { env }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Classify and execute one trimmed input line.
    ///
    /// Failures never escape: they come back as [`Outcome::Output`] carrying
    /// the error message.
    pub fn dispatch(&mut self, line: &str) -> Outcome {
        match self.try_dispatch(line) {
            Ok(outcome) => outcome,
            Err(err) => {
                debug!(line, error = ?err, "dispatch failed");
                err.into()
            }
        }
    }

    fn try_dispatch(&mut self, line: &str) -> Result<Outcome, ShellError> {
        if line.trim().is_empty() {
            return Ok(Outcome::Silent);
        }

        let tokens = lexer::split_into_tokens(line);
        let Some((&name, args)) = tokens.split_first() else {
            return Ok(Outcome::Silent);
        };

        if let Some(builtin) = Builtin::from_name(name) {
            return builtin.execute(line, args, &mut self.env);
        }

        match find_command_path(&self.env, name)? {
            Some(program) => {
                ExternalCommand::new(program, args).execute(&self.env)?;
                Ok(Outcome::Silent)
            }
            None => Ok(Outcome::text(format!("{line}: command not found"))),
        }
    }

    /// Trim, dispatch and print one line of input.
    ///
    /// Returns the requested status when the line asked the shell to exit.
    pub fn run_line(&mut self, line: &str, out: &mut dyn Write) -> io::Result<Option<ExitCode>> {
        let outcome = self.dispatch(line.trim());
        if let Outcome::Exit(code) = outcome {
            return Ok(Some(code));
        }
        if let Some(message) = outcome.message() {
            writeln!(out, "{message}")?;
        }
        out.flush()?;
        Ok(None)
    }

    /// Read-Eval-Print Loop over the terminal.
    ///
    /// Ends with the status given to `exit`, or 0 at end of input. Ctrl-C drops
    /// the current line and prompts again. Nothing is kept in history.
    pub fn repl(&mut self, prompt: &str) -> anyhow::Result<ExitCode> {
        let mut rl = DefaultEditor::new().context("initializing line reader")?;
        let mut stdout = io::stdout();

        loop {
            match rl.readline(prompt) {
                Ok(line) => {
                    if let Some(code) = self.run_line(&line, &mut stdout)? {
                        return Ok(code);
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => return Ok(0),
                Err(err) => return Err(err).context("reading line"),
            }
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(Environment::new())
    }
}
