use clap::Parser;
use eyre::{Context, Result};
use log::debug;
use std::io::{self, BufRead, ErrorKind, Write};

mod cli;
mod event;
mod format;

use cli::Cli;
use format::prefix;

/// Environment variable carrying the iteration label shown in every prefix
const ITERATION_VAR: &str = "STREAMLOG_ITERATION";

fn setup_logging() {
    // stdout is the data channel, so diagnostics go to stderr.
    // Silent unless RUST_LOG is set.
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stderr)
        .init();
}

/// Resolve the iteration label once at startup. Unset or empty → "?".
fn iteration_label() -> String {
    match std::env::var(ITERATION_VAR) {
        Ok(val) if !val.is_empty() => val,
        _ => "?".to_string(),
    }
}

/// Write one formatted line. The prefix timestamp is computed here, at the
/// moment of emission, never earlier.
fn emit(output: &mut impl Write, iteration: &str, body: &str) -> io::Result<()> {
    writeln!(output, "{} {}", prefix(iteration), body)
}

/// Process the stream line by line until EOF, then emit the end marker.
///
/// A broken output pipe means the downstream consumer went away; that is a
/// normal shutdown, not an error.
fn run(input: impl BufRead, mut output: impl Write, iteration: &str) -> Result<()> {
    for line in input.lines() {
        let line = line.context("Failed to read line from stdin")?;
        for body in event::render_line(&line) {
            match emit(&mut output, iteration, &body) {
                Ok(()) => {}
                Err(err) if err.kind() == ErrorKind::BrokenPipe => {
                    debug!("stdout closed, exiting");
                    return Ok(());
                }
                Err(err) => return Err(err).context("Failed to write to stdout"),
            }
        }
    }

    // Marker line; a closed pipe at this point is still a clean exit.
    match emit(&mut output, iteration, "--- Stream ended ---") {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::BrokenPipe => Ok(()),
        Err(err) => Err(err).context("Failed to write to stdout"),
    }
}

fn main() -> Result<()> {
    let _cli = Cli::parse();

    setup_logging();

    let iteration = iteration_label();
    debug!("Starting streamlog, iteration={}", iteration);

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    run(stdin, stdout, &iteration)
}
