use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{config, logging, Error};

mod run;
use run::Run;
mod show;
use show::Show;

/// A terminal front end for the Bankist demo bank
#[derive(Debug, Parser)]
#[clap(version)]
pub struct App {
    /// Log more detail to stderr (-v, -vv, -vvv)
    #[clap(long, short, parse(from_occurrences), global = true)]
    verbose: u8,

    /// Read the configuration from this file instead of the default location
    #[clap(long, short, global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open the bank and read commands from stdin (the default)
    Run(Run),

    /// Print the configured settings and accounts
    Show(Show),
}

impl App {
    pub fn from_cli() -> Self {
        Self::parse()
    }

    pub async fn run(self) -> Result<(), Error> {
        logging::set_up(self.verbose)?;
        let config = config::load(self.config.as_deref())?;

        match self.command.unwrap_or(Command::Run(Run)) {
            Command::Run(run) => run.run(config).await?,
            Command::Show(show) => show.run(&config),
        }

        Ok(())
    }
}
