use std::io;
use thiserror::Error;

/// Every failure the dispatcher can hit while handling a line.
///
/// The `Display` output of each variant is the exact text shown to the user,
/// so a caller only needs `err.to_string()` to produce the dispatch result.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The search-path variable is not set in the environment.
    #[error("{0} not set")]
    SearchPathNotSet(String),

    #[error("invalid number of arguments")]
    InvalidArgumentCount,

    /// `exit` got a status that is not an integer in `0..=255`.
    #[error("invalid exit status: {0}")]
    InvalidExitStatus(String),

    /// The message is the same whatever the underlying cause was.
    #[error("{path}: No such file or directory")]
    ChangeDir {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("{program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// A child process exited with a non-zero status.
    #[error("exit status {0}")]
    ExitStatus(i32),

    /// A child process was terminated by a signal.
    #[error("signal: {0}")]
    Signal(i32),
}
