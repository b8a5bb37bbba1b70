use anyhow::{Context, Result};
use argh::FromArgs;
use path_shell::env::{DEFAULT_SEARCH_PATH_VAR, Environment};
use path_shell::{ExitCode, Interpreter};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `PSH_LOG=debug`.
const LOG_FILTER_VAR: &str = "PSH_LOG";

#[derive(FromArgs)]
/// A small interactive shell with builtins and search-path command lookup.
struct Args {
    #[argh(option, short = 'c')]
    /// run a single command line and exit instead of prompting
    command: Option<String>,

    #[argh(option, default = "String::from(\"$ \")")]
    /// prompt printed before each line is read
    prompt: String,

    #[argh(option, default = "String::from(DEFAULT_SEARCH_PATH_VAR)")]
    /// environment variable holding the command search path
    path_var: String,

    #[argh(option)]
    /// write diagnostics to this file instead of standard error
    log_file: Option<PathBuf>,
}

fn main() {
    let args: Args = argh::from_env();
    match run(args) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("psh: {err:#}");
            process::exit(1);
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    init_tracing(args.log_file.as_deref())?;

    let env = Environment::new().with_search_path_var(args.path_var);
    let mut sh = Interpreter::new(env);

    match args.command {
        Some(line) => {
            let code = sh.run_line(&line, &mut io::stdout())?;
            Ok(code.unwrap_or(0))
        }
        None => sh.repl(&args.prompt),
    }
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_FILTER_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            builder.with_writer(Arc::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}
