mod cli;

use std::io;
use std::process::ExitCode;

use clap::Parser;

use cli::{run, Cli};

fn main() -> ExitCode {
    // Logs go to stderr so stdout stays clean for code and diffs
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    match run(cli, &mut io::stdout().lock(), &mut io::stderr()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("gfc: {}", e);
            ExitCode::FAILURE
        }
    }
}
