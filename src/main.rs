use std::io::{self, BufWriter};
use std::process::ExitCode;

use clap::Parser;
use context_generator::cli::{self, Cli};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli::run(cli, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Anything already rendered must reach stdout before the error.
            drop(out);
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; stdout carries the rendered document.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("warn,context_generator=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
