//! pm - Project Manager CLI
//!
//! Tracks users, projects, and tasks in JSON files in a data directory.

use clap::Parser;
use pm::cli::Cli;
use pm::output::{emit_error, infer_command_name_from_args};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    // Tracing is opt-in via RUST_LOG and always goes to stderr.
    // Ignore invalid/huge filters so a bad env var never blocks a command.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() || raw.len() > 4096 {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let command = infer_command_name_from_args();
    let cli = Cli::parse();
    let json = cli.json;
    if let Err(err) = cli.run() {
        if let Err(emit_err) = emit_error(&command, &err, json) {
            eprintln!("error: {err}");
            eprintln!("error: could not write error output: {emit_err}");
        }
        std::process::exit(err.exit_code());
    }
}
