use tracing_subscriber::filter::{EnvFilter, ParseError};

use crate::config;

/// Install the global subscriber, logging this crate and the ledger core at a
/// level set by the number of `-v` flags. Everything else logs warnings only.
///
/// Logs go to stderr, leaving stdout to the bank's own output.
pub fn set_up(verbosity: u8) -> Result<(), ParseError> {
    let formatter =
        tracing_subscriber::fmt::format::debug_fn(|writer, field, value| {
            if field.name() == "message" {
                write!(writer, "{:?}", value)
            } else {
                write!(writer, " {}={:?}", field, value)
            }
        });

    let level = max_level(verbosity);
    let filter = EnvFilter::new("warn")
        .add_directive(format!("{}={}", config::BIN_NAME, level).parse()?)
        .add_directive(format!("bankist_lib={}", level).parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(true)
        .fmt_fields(formatter)
        .init();

    Ok(())
}

fn max_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
