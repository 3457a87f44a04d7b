use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use matdup::args::Args;
use matdup::commands;
use matdup::visuals;

fn init_tracing(args: &Args) {
    let default_level = if args.output.verbose {
        "debug"
    } else if args.output.quiet {
        "error"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args);

    match commands::run(&args) {
        Ok(stats) => {
            if args.output.stats {
                visuals::print_detailed(&stats);
            } else if !args.output.quiet {
                visuals::print_summary(&stats);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            debug!(error = ?e, "request failed");
            eprintln!("⚠ {e}");
            ExitCode::FAILURE
        }
    }
}
