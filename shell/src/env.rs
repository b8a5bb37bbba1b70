use crate::error::ShellError;
use std::collections::HashMap;
use std::env as stdenv;
use std::ffi::OsString;
use std::path::PathBuf;

/// Name of the variable that holds the command search path unless configured otherwise.
pub const DEFAULT_SEARCH_PATH_VAR: &str = "PATH";

/// Mutable, user-level view of the process environment used by the interpreter.
///
/// The environment contains:
/// - `vars`: variables set explicitly on this shell. They shadow the process
///   environment and are exported to every spawned command.
/// - `current_dir`: the working directory for relative `cd` targets and for
///   spawned commands.
/// - `search_path_var`: the variable consulted when resolving command names.
///
/// Lookups that miss `vars` read the live process environment every time, so a
/// change made to it is visible on the very next command.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Explicit variable overrides (e.g. PATH for an isolated session).
    pub vars: HashMap<String, String>,
    /// The current working directory for command execution.
    pub current_dir: PathBuf,
    /// Name of the search-path variable, `PATH` by default.
    pub search_path_var: String,
}

impl Environment {
    /// Create an environment bound to the process working directory, with no overrides.
    pub fn new() -> Self {
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            vars: HashMap::new(),
            current_dir,
            search_path_var: DEFAULT_SEARCH_PATH_VAR.to_string(),
        }
    }

    /// Use `name` instead of `PATH` as the search-path variable.
    pub fn with_search_path_var(mut self, name: impl Into<String>) -> Self {
        self.search_path_var = name.into();
        self
    }

    /// Get the value of a variable.
    ///
    /// Looks up the key in `self.vars` first, falling back to the live process
    /// environment through `std::env::var_os`.
    pub fn get_var(&self, key: &str) -> Option<OsString> {
        self.vars
            .get(key)
            .map(OsString::from)
            .or_else(|| stdenv::var_os(key))
    }

    /// Set or override a variable in `self.vars`.
    pub fn set_var(&mut self, key: impl Into<String>, val: impl Into<String>) {
        self.vars.insert(key.into(), val.into());
    }

    /// Raw value of the search-path variable, read fresh on each call.
    pub fn search_path(&self) -> Result<OsString, ShellError> {
        self.get_var(&self.search_path_var)
            .ok_or_else(|| ShellError::SearchPathNotSet(self.search_path_var.clone()))
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
