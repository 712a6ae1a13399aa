use std::path::Path;

use bankist_lib::{seed, Account, Settings};
use serde::{Deserialize, Serialize};

pub static BIN_NAME: &str = std::env!("CARGO_PKG_NAME");

/// Everything needed to open the bank
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,

    #[serde(default = "seed::accounts")]
    pub accounts: Vec<Account>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            accounts: seed::accounts(),
        }
    }
}

/// Load the configuration from the given file, or from the default location
/// if none is given.
///
/// A missing file is created with the demo accounts in it.
pub fn load(path: Option<&Path>) -> Result<Config, confy::ConfyError> {
    match path {
        Some(path) => confy::load_path(path),
        None => confy::load(BIN_NAME, "config"),
    }
}

#[cfg(test)]
mod tests {
    use bankist_lib::Ledger;
    use rust_decimal_macros::dec;

    use super::Config;

    #[test]
    fn deserialise_yaml() {
        let raw = r#"
        settings:
          logout_after_secs: 60

        accounts:
          - owner: Jonas Schmedtmann
            pin: 1111
            interest_rate: 1.2
            currency: EUR
            locale: pt-PT
            movements:
              - amount: 200
                date: 2019-11-18T21:31:17.178Z
              - amount: -400
                date: 2019-12-23T07:42:02.383Z
          - owner: Jessica Davis
            pin: 2222
            currency: USD
            locale: en-US
        "#;

        let config: Config = serde_yaml::from_str(raw).unwrap();

        assert_eq!(config.settings.logout_after_secs, 60);
        assert_eq!(config.settings.loan_delay_ms, 2500);

        let ledger = Ledger::new(config.accounts);
        assert_eq!(ledger.authenticate("js", 1111).unwrap().balance(), dec!(-200));
        assert!(ledger.find_by_username("jd").is_some());
    }

    #[test]
    fn defaults_to_demo_accounts() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.accounts.len(), 4);
        assert_eq!(config.settings, bankist_lib::Settings::default());
    }
}
