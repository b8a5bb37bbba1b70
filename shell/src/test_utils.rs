//! Helpers shared by the unit tests.

use crate::env::Environment;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock};

/// Serializes tests that change the process working directory.
pub fn lock_current_dir() -> MutexGuard<'static, ()> {
    static MUTEX: OnceLock<Mutex<()>> = OnceLock::new();
    MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// An environment whose search path and working directory are both `dir`.
pub fn session_env(dir: &Path) -> Environment {
    let mut env = Environment::new();
    env.set_var("PATH", dir.to_string_lossy().to_string());
    env.current_dir = dir.to_path_buf();
    env
}

/// Writes a `/bin/sh` script called `name` into `dir` and marks it executable.
#[cfg(unix)]
pub fn make_executable(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod script");
    path
}
