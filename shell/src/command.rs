use crate::error::ShellError;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// This mirrors the convention used by POSIX shells and many command-line tools.
pub type ExitCode = i32;

/// What dispatching one input line produced.
///
/// The dispatcher never terminates the process itself. An `exit` builtin comes
/// back as [`Outcome::Exit`] and the read loop decides how to honor it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to print.
    Silent,
    /// A line of text for the output sink. May be empty (`echo` with no text).
    Output(String),
    /// The shell should terminate with this status.
    Exit(ExitCode),
}

impl Outcome {
    pub(crate) fn text(text: impl Into<String>) -> Self {
        Outcome::Output(text.into())
    }

    /// The text to show the user, if the outcome carries any non-empty text.
    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Output(text) if !text.is_empty() => Some(text),
            _ => None,
        }
    }
}

impl From<ShellError> for Outcome {
    fn from(err: ShellError) -> Self {
        Outcome::Output(err.to_string())
    }
}
