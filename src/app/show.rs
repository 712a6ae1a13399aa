use bankist_lib::Ledger;
use clap::Parser;

use crate::{config::Config, terminal};

#[derive(Debug, Default, Parser, Clone, Copy)]
pub struct Show;

impl Show {
    pub fn run(self, config: &Config) {
        println!("{:#?}", config.settings);

        let ledger = Ledger::new(config.accounts.iter().cloned());
        for account in ledger.iter() {
            println!(
                "{:<6} {:<24} {:>16}",
                account.username(),
                account.owner,
                terminal::money(account.balance(), &account.currency),
            );
        }
    }
}
