use crate::env::Environment;
use crate::error::ShellError;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use tracing::{debug, trace};

/// Command that is not a builtin.
pub struct ExternalCommand {
    program: PathBuf,
    args: Vec<OsString>,
}

impl ExternalCommand {
    pub fn new<S: AsRef<OsStr>>(program: PathBuf, args: &[S]) -> Self {
        Self {
            program,
            args: args.iter().map(|arg| arg.as_ref().to_owned()).collect(),
        }
    }

    /// Runs the program to completion.
    ///
    /// Standard output and standard error are the shell's own, standard input
    /// is the null device. There is no timeout: a child that never exits
    /// blocks the caller forever.
    pub fn execute(&self, env: &Environment) -> Result<(), ShellError> {
        let program = env.current_dir.join(&self.program);
        debug!(program = %program.display(), args = ?self.args, "spawning");
        let exit_status = Command::new(&program)
            .args(&self.args)
            .envs(&env.vars)
            .current_dir(&env.current_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| ShellError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;
        debug!(program = %self.program.display(), status = %exit_status, "child finished");

        if exit_status.success() {
            return Ok(());
        }
        match exit_status.code() {
            Some(code) => Err(ShellError::ExitStatus(code)),
            None => Err(terminated_by_signal(exit_status)),
        }
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> ShellError {
    use std::os::unix::process::ExitStatusExt;
    match exit_status.signal() {
        Some(signal) => ShellError::Signal(signal),
        None => ShellError::ExitStatus(-1),
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> ShellError {
    ShellError::ExitStatus(-1)
}

/// Resolve a command name against the search path.
///
/// Behavior:
/// - The search-path variable is read from `env` on every call; if it is unset
///   the lookup fails with [`ShellError::SearchPathNotSet`].
/// - Directories are visited in search-path order. Each one is listed
///   (non-recursively) and the first entry whose file name equals `name`
///   exactly and which is not a directory wins.
/// - Relative entries are listed against `env.current_dir`, the same directory
///   the child is later started in. The returned path keeps the entry as
///   written, so a `bin` entry resolves to `bin/<name>`.
/// - Directories that cannot be listed are skipped, as are empty entries.
/// - Executability and symlink targets are not checked.
///
/// Returns `Ok(None)` when no directory holds a match.
pub fn find_command_path(env: &Environment, name: &str) -> Result<Option<PathBuf>, ShellError> {
    let search_paths = env.search_path()?;
    for dir in std::env::split_paths(&search_paths) {
        if dir.as_os_str().is_empty() {
            continue;
        }
        if has_file_named(&env.current_dir.join(&dir), OsStr::new(name)) {
            let path = dir.join(name);
            debug!(name, path = %path.display(), "resolved on search path");
            return Ok(Some(path));
        }
    }
    Ok(None)
}

fn has_file_named(dir: &Path, name: &OsStr) -> bool {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            trace!(dir = %dir.display(), error = %err, "skipping unreadable search directory");
            return false;
        }
    };

    entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name() == name)
        .any(|entry| !entry.file_type().is_ok_and(|kind| kind.is_dir()))
}
