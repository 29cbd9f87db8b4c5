use clap::Parser;

/// streamlog is a pure filter: stream-json on stdin, log lines on stdout.
/// No flags or subcommands beyond the standard help/version surface.
#[derive(Parser)]
#[command(
    name = "streamlog",
    about = "Format Claude stream-json output into readable log lines",
    version,
    after_help = "Reads newline-delimited JSON events on stdin and writes one short\n\
                  prefixed line per event to stdout. Set STREAMLOG_ITERATION to tag\n\
                  every line with an iteration number."
)]
pub struct Cli {}
