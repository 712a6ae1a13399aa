#![deny(
    clippy::all,
    missing_debug_implementations,
    missing_copy_implementations
)]
#![warn(clippy::pedantic)]

mod app;
mod command;
mod config;
mod logging;
mod terminal;

use app::App;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load config")]
    Load(#[from] confy::ConfyError),

    #[error("invalid logging directive")]
    Logging(#[from] tracing_subscriber::filter::ParseError),

    #[error("failed to read commands")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let app = App::from_cli();
    app.run().await
}
