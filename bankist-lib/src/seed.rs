//! The demo accounts the bank opens with

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::Account;

/// The four demo accounts, in provisioning order
#[must_use]
pub fn accounts() -> Vec<Account> {
    vec![
        account(
            Account::new("Jonas Schmedtmann", 1111)
                .with_interest_rate(Decimal::new(12, 1))
                .with_currency("EUR", "pt-PT"),
            &[
                (Decimal::new(200, 0), "2019-11-18T21:31:17.178Z"),
                (Decimal::new(45523, 2), "2019-12-23T07:42:02.383Z"),
                (Decimal::new(-3065, 1), "2020-01-28T09:15:04.904Z"),
                (Decimal::new(25000, 0), "2020-04-01T10:17:24.185Z"),
                (Decimal::new(-64221, 2), "2020-05-08T14:11:59.604Z"),
                (Decimal::new(-1339, 1), "2020-05-27T17:01:17.194Z"),
                (Decimal::new(7997, 2), "2020-07-11T23:36:17.929Z"),
                (Decimal::new(1300, 0), "2020-07-12T10:51:36.790Z"),
            ],
        ),
        account(
            Account::new("Jessica Davis", 2222)
                .with_interest_rate(Decimal::new(15, 1))
                .with_currency("USD", "en-US"),
            &[
                (Decimal::new(5000, 0), "2019-11-01T13:15:33.035Z"),
                (Decimal::new(3400, 0), "2019-11-30T09:48:16.867Z"),
                (Decimal::new(-150, 0), "2019-12-25T06:04:23.907Z"),
                (Decimal::new(-790, 0), "2020-01-25T14:18:46.235Z"),
                (Decimal::new(-3210, 0), "2020-02-05T16:33:06.386Z"),
                (Decimal::new(-1000, 0), "2020-04-10T14:43:26.374Z"),
                (Decimal::new(8500, 0), "2020-06-25T18:49:59.371Z"),
                (Decimal::new(-30, 0), "2020-07-26T12:01:20.894Z"),
            ],
        ),
        account(
            Account::new("Steven Thomas Williams", 3333)
                .with_interest_rate(Decimal::new(7, 1))
                .with_currency("GBP", "en-GB"),
            &[
                (Decimal::new(200, 0), "2019-10-02T09:12:40.112Z"),
                (Decimal::new(-200, 0), "2019-10-30T17:45:03.861Z"),
                (Decimal::new(340, 0), "2019-12-11T11:20:55.530Z"),
                (Decimal::new(-300, 0), "2020-01-14T08:02:19.004Z"),
                (Decimal::new(-20, 0), "2020-02-29T19:33:48.276Z"),
                (Decimal::new(50, 0), "2020-04-17T13:07:11.719Z"),
                (Decimal::new(400, 0), "2020-06-03T10:58:26.443Z"),
                (Decimal::new(-460, 0), "2020-07-20T15:24:37.985Z"),
            ],
        ),
        account(
            Account::new("Sarah Smith", 4444)
                .with_interest_rate(Decimal::ONE)
                .with_currency("EUR", "de-DE"),
            &[
                (Decimal::new(430, 0), "2019-12-05T10:00:00.000Z"),
                (Decimal::new(1000, 0), "2020-02-18T14:30:12.500Z"),
                (Decimal::new(700, 0), "2020-04-22T09:45:31.250Z"),
                (Decimal::new(50, 0), "2020-06-09T16:12:44.875Z"),
                (Decimal::new(90, 0), "2020-07-28T08:27:05.625Z"),
            ],
        ),
    ]
}

fn account(account: Account, movements: &[(Decimal, &str)]) -> Account {
    movements.iter().fold(account, |account, (amount, date)| {
        account.with_movement(*amount, timestamp(date))
    })
}

fn timestamp(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .map(|date| date.with_timezone(&Utc))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::Ledger;

    #[test]
    fn seed_accounts() {
        let ledger = Ledger::new(super::accounts());

        let usernames: Vec<_> = ledger.iter().map(crate::Account::username).collect();
        assert_eq!(usernames, vec!["js", "jd", "stw", "ss"]);

        let jonas = ledger.authenticate("js", 1111).unwrap();
        assert_eq!(jonas.balance(), dec!(25952.59));
        assert_eq!(jonas.currency, "EUR");
    }

    #[test]
    fn seed_dates_are_valid() {
        for account in super::accounts() {
            assert!(account
                .movement_dates()
                .all(|date| date > chrono::DateTime::<chrono::Utc>::default()));
        }
    }
}
