use bankist_lib::{runtime, Ledger, Session};
use clap::Parser;
use tracing::{instrument, Level};

use crate::{command, config::Config, terminal::Terminal, Error};

#[derive(Debug, Parser, Clone, Copy)]
pub struct Run;

impl Run {
    #[instrument(skip_all)]
    pub async fn run(self, config: Config) -> Result<(), Error> {
        let ledger = Ledger::new(config.accounts);
        tracing::event!(Level::DEBUG, accounts = ledger.len(), "ledger loaded");

        let mut session = Session::new(ledger, Terminal::default(), config.settings);

        println!("Log in to get started");
        println!("{}", command::USAGE);

        runtime::run(&mut session, command::stdin()).await?;

        Ok(())
    }
}
