use crate::command::{ExitCode, Outcome};
use crate::env::Environment;
use crate::error::ShellError;
use crate::external::find_command_path;
use std::fmt;
use std::fs;
use tracing::debug;

/// Built-in commands known to the shell at compile time.
///
/// The set is closed: a name either maps to one of these variants or it is
/// looked up on the search path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Exit,
    Echo,
    Type,
    Cd,
}

impl Builtin {
    pub const ALL: [Builtin; 4] = [Builtin::Exit, Builtin::Echo, Builtin::Type, Builtin::Cd];

    /// Canonical name of the command, e.g. "echo" or "cd".
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Exit => "exit",
            Builtin::Echo => "echo",
            Builtin::Type => "type",
            Builtin::Cd => "cd",
        }
    }

    /// Exact, case-sensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|builtin| builtin.name() == name)
    }

    pub fn is_builtin(name: &str) -> bool {
        Self::from_name(name).is_some()
    }

    /// Executes the builtin in-process.
    ///
    /// `line` is the whole trimmed input line and `args` are the tokens after
    /// the command name. Only `echo` looks at `line`, since it prints the raw
    /// text verbatim.
    pub fn execute(
        self,
        line: &str,
        args: &[&str],
        env: &mut Environment,
    ) -> Result<Outcome, ShellError> {
        match self {
            Builtin::Exit => exit(args),
            Builtin::Echo => Ok(echo(line)),
            Builtin::Type => type_of(args, env),
            Builtin::Cd => cd(args, env),
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn exit(args: &[&str]) -> Result<Outcome, ShellError> {
    match args {
        [] => Ok(Outcome::Exit(0)),
        [status] => parse_exit_status(status).map(Outcome::Exit),
        _ => Err(ShellError::InvalidArgumentCount),
    }
}

fn parse_exit_status(arg: &str) -> Result<ExitCode, ShellError> {
    arg.parse::<i64>()
        .ok()
        .filter(|status| (0..=255).contains(status))
        .map(|status| status as ExitCode)
        .ok_or_else(|| ShellError::InvalidExitStatus(arg.to_string()))
}

fn echo(line: &str) -> Outcome {
    let prefix = format!("{} ", Builtin::Echo);
    Outcome::text(line.strip_prefix(prefix.as_str()).unwrap_or_default())
}

fn type_of(args: &[&str], env: &Environment) -> Result<Outcome, ShellError> {
    let [name] = args else {
        return Err(ShellError::InvalidArgumentCount);
    };
    if Builtin::is_builtin(name) {
        return Ok(Outcome::text(format!("{name} is a shell builtin")));
    }
    Ok(match find_command_path(env, name)? {
        Some(path) => Outcome::text(format!("{name} is {}", path.display())),
        None => Outcome::text(format!("{name}: not found")),
    })
}

fn cd(args: &[&str], env: &mut Environment) -> Result<Outcome, ShellError> {
    let [target] = args else {
        return Err(ShellError::InvalidArgumentCount);
    };

    let new_dir = env.current_dir.join(target);
    if let Err(source) = std::env::set_current_dir(&new_dir) {
        debug!(dir = %new_dir.display(), error = %source, "cd failed");
        return Err(ShellError::ChangeDir {
            path: target.to_string(),
            source,
        });
    }

    env.current_dir = fs::canonicalize(&new_dir).unwrap_or(new_dir);
    Ok(Outcome::Silent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::lock_current_dir;
    #[cfg(unix)]
    use crate::test_utils::{make_executable, session_env};
    use std::env as stdenv;

    fn run(builtin: Builtin, line: &str, env: &mut Environment) -> Result<Outcome, ShellError> {
        let args: Vec<&str> = line.split(' ').skip(1).collect();
        builtin.execute(line, &args, env)
    }

    #[test]
    fn names_round_trip() {
        for builtin in Builtin::ALL {
            assert_eq!(Builtin::from_name(builtin.name()), Some(builtin));
        }
        assert_eq!(Builtin::from_name("ECHO"), None);
        assert_eq!(Builtin::from_name("pwd"), None);
    }

    #[test]
    fn test_exit_statuses() {
        let mut env = Environment::new();
        assert_eq!(run(Builtin::Exit, "exit", &mut env).unwrap(), Outcome::Exit(0));
        assert_eq!(run(Builtin::Exit, "exit 0", &mut env).unwrap(), Outcome::Exit(0));
        assert_eq!(run(Builtin::Exit, "exit 7", &mut env).unwrap(), Outcome::Exit(7));
        assert_eq!(run(Builtin::Exit, "exit 255", &mut env).unwrap(), Outcome::Exit(255));
    }

    #[test]
    fn test_exit_rejects_bad_status() {
        let mut env = Environment::new();
        for arg in ["999", "abc", "-1", "256", "99999999999999999999"] {
            let err = run(Builtin::Exit, &format!("exit {arg}"), &mut env).unwrap_err();
            assert_eq!(err.to_string(), format!("invalid exit status: {arg}"));
        }
    }

    #[test]
    fn test_exit_with_extra_arguments() {
        let mut env = Environment::new();
        let err = run(Builtin::Exit, "exit 1 2", &mut env).unwrap_err();
        assert!(matches!(err, ShellError::InvalidArgumentCount));
    }

    #[test]
    fn test_echo_is_verbatim() {
        let mut env = Environment::new();
        assert_eq!(
            run(Builtin::Echo, "echo hello world", &mut env).unwrap(),
            Outcome::text("hello world")
        );
        assert_eq!(
            run(Builtin::Echo, "echo  spaced   out", &mut env).unwrap(),
            Outcome::text(" spaced   out")
        );
        assert_eq!(run(Builtin::Echo, "echo", &mut env).unwrap(), Outcome::text(""));
    }

    #[test]
    fn test_type_reports_every_builtin() {
        let mut env = Environment::new();
        for builtin in Builtin::ALL {
            let out = run(Builtin::Type, &format!("type {builtin}"), &mut env).unwrap();
            assert_eq!(out, Outcome::text(format!("{builtin} is a shell builtin")));
        }
    }

    #[test]
    fn test_type_argument_count() {
        let mut env = Environment::new();
        for line in ["type", "type a b"] {
            let err = run(Builtin::Type, line, &mut env).unwrap_err();
            assert_eq!(err.to_string(), "invalid number of arguments");
        }
    }

    #[test]
    #[cfg(unix)]
    fn test_type_resolves_on_search_path() {
        let dir = tempfile::tempdir().unwrap();
        let foo = make_executable(dir.path(), "foo", "exit 0");
        let mut env = session_env(dir.path());

        let out = run(Builtin::Type, "type foo", &mut env).unwrap();
        assert_eq!(out, Outcome::text(format!("foo is {}", foo.display())));

        let out = run(Builtin::Type, "type nonexistent_cmd_xyz", &mut env).unwrap();
        assert_eq!(out, Outcome::text("nonexistent_cmd_xyz: not found"));
    }

    #[test]
    fn test_type_without_search_path() {
        let mut env = Environment::new().with_search_path_var("PATH_SHELL_TEST_NO_SUCH_VAR");
        let err = run(Builtin::Type, "type foo", &mut env).unwrap_err();
        assert_eq!(err.to_string(), "PATH_SHELL_TEST_NO_SUCH_VAR not set");

        // builtins never need the search path
        let out = run(Builtin::Type, "type echo", &mut env).unwrap();
        assert_eq!(out, Outcome::text("echo is a shell builtin"));
    }

    #[test]
    fn test_cd_to_absolute_then_relative() {
        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();
        let temp = tempfile::tempdir().unwrap();
        let canonical_temp = fs::canonicalize(temp.path()).unwrap();
        fs::create_dir(canonical_temp.join("nested")).unwrap();

        let mut env = Environment::new();
        let line = format!("cd {}", canonical_temp.display());
        assert_eq!(run(Builtin::Cd, &line, &mut env).unwrap(), Outcome::Silent);
        assert_eq!(env.current_dir, canonical_temp);
        assert_eq!(fs::canonicalize(stdenv::current_dir().unwrap()).unwrap(), canonical_temp);

        assert_eq!(run(Builtin::Cd, "cd nested", &mut env).unwrap(), Outcome::Silent);
        assert_eq!(env.current_dir, canonical_temp.join("nested"));

        stdenv::set_current_dir(orig).expect("failed to restore cwd");
    }

    #[test]
    fn test_cd_nonexistent_path_errors() {
        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();
        let mut env = Environment::new();

        let name = format!("nonexistent_dir_for_cd_test_{}", std::process::id());
        let err = run(Builtin::Cd, &format!("cd {name}"), &mut env).unwrap_err();

        assert_eq!(err.to_string(), format!("{name}: No such file or directory"));
        assert_eq!(stdenv::current_dir().unwrap(), orig);
        assert_eq!(env.current_dir, orig);
    }

    #[test]
    fn test_cd_into_a_file_uses_the_same_message() {
        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain");
        fs::write(&file, "x").unwrap();

        let mut env = Environment::new();
        let line = format!("cd {}", file.display());
        let err = run(Builtin::Cd, &line, &mut env).unwrap_err();

        assert_eq!(err.to_string(), format!("{}: No such file or directory", file.display()));
        assert_eq!(stdenv::current_dir().unwrap(), orig);
    }

    #[test]
    fn test_cd_argument_count() {
        let mut env = Environment::new();
        for line in ["cd", "cd a b"] {
            let err = run(Builtin::Cd, line, &mut env).unwrap_err();
            assert_eq!(err.to_string(), "invalid number of arguments");
        }
    }
}
