//! Bank accounts and their movements

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

mod summary;
pub use summary::Summary;

/// A single deposit (positive) or withdrawal (negative), and when it was
/// recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    /// The signed amount of the movement
    pub amount: Decimal,

    /// The instant the movement was recorded
    pub date: DateTime<Utc>,
}

impl Movement {
    /// Create a new [`Movement`]
    #[must_use]
    pub fn new(amount: Decimal, date: DateTime<Utc>) -> Self {
        Self { amount, date }
    }

    /// Whether this movement adds money to the account
    #[must_use]
    pub fn is_deposit(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

/// A customer account
///
/// The username is always derived from the owner's name and cannot be set
/// directly. Movements are stored in the order they were recorded; that order
/// is never changed, sorting only ever happens on a copy (see
/// [`Account::sorted_view`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// The full name of the account holder
    pub owner: String,

    #[serde(skip)]
    username: String,

    pin: u32,

    #[serde(default)]
    movements: Vec<Movement>,

    /// The interest rate, as a percentage, paid on each deposit
    #[serde(default)]
    pub interest_rate: Decimal,

    /// ISO 4217 currency code used when displaying amounts
    pub currency: String,

    /// BCP 47 locale tag used when displaying amounts and dates
    pub locale: String,
}

impl Account {
    /// Create an account with no movements and no interest.
    ///
    /// Amounts are displayed in euros with a `pt-PT` locale until overridden
    /// with [`Account::with_currency`].
    #[must_use]
    pub fn new(owner: impl Into<String>, pin: u32) -> Self {
        let owner = owner.into();
        let username = initials(&owner);
        Self {
            owner,
            username,
            pin,
            movements: Vec::default(),
            interest_rate: Decimal::ZERO,
            currency: "EUR".to_string(),
            locale: "pt-PT".to_string(),
        }
    }

    /// Set the interest rate (percent)
    #[must_use]
    pub fn with_interest_rate(mut self, interest_rate: Decimal) -> Self {
        self.interest_rate = interest_rate;
        self
    }

    /// Set the display currency and locale
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>, locale: impl Into<String>) -> Self {
        self.currency = currency.into();
        self.locale = locale.into();
        self
    }

    /// Append a historical movement
    #[must_use]
    pub fn with_movement(mut self, amount: Decimal, date: DateTime<Utc>) -> Self {
        self.movements.push(Movement::new(amount, date));
        self
    }

    /// The login name, derived from the owner's initials
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The first word of the owner's name
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.owner.split_whitespace().next().unwrap_or_default()
    }

    /// Movements in the order they were recorded
    #[must_use]
    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    /// The signed amounts of every movement, in recorded order
    pub fn amounts(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.movements.iter().map(|movement| movement.amount)
    }

    /// The dates of every movement, index-aligned with [`Account::amounts`]
    pub fn movement_dates(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.movements.iter().map(|movement| movement.date)
    }

    /// The current balance: the sum of every movement
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.amounts().fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Compute the balance, incomings, outgoings and interest of the account
    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary::of(self)
    }

    /// A copy of the movements, sorted by amount if `ascending` is set.
    ///
    /// Sorting is stable, and each amount keeps the date it was recorded with.
    #[must_use]
    pub fn sorted_view(&self, ascending: bool) -> Vec<Movement> {
        let mut view = self.movements.clone();
        if ascending {
            view.sort_by(|a, b| a.amount.cmp(&b.amount));
        }
        view
    }

    pub(crate) fn pin_matches(&self, pin: u32) -> bool {
        self.pin == pin
    }

    /// Whether `amount` can be recorded without the sum of the account's
    /// deposits (or of its withdrawals) leaving the range of a [`Decimal`].
    ///
    /// Every running total the account derives is bounded by those two sums.
    pub(crate) fn can_record(&self, amount: Decimal) -> bool {
        self.amounts()
            .filter(|existing| existing.is_sign_negative() == amount.is_sign_negative())
            .try_fold(amount, Decimal::checked_add)
            .is_some()
    }

    pub(crate) fn push(&mut self, amount: Decimal, date: DateTime<Utc>) {
        self.movements.push(Movement::new(amount, date));
    }
}

/// Set the username of every account from its owner's initials.
///
/// Where two owners share the same initials, the first account (in the given
/// order) keeps the bare initials and each later one gets the smallest free
/// numeric suffix, starting from 2 (`js`, `js2`, `js3`, ...). Running this
/// again over the same accounts produces the same usernames.
pub fn derive_usernames(accounts: &mut [Account]) {
    let mut taken: Vec<String> = Vec::with_capacity(accounts.len());

    for account in accounts.iter_mut() {
        let base = initials(&account.owner);
        let mut username = base.clone();
        let mut suffix = 2;
        while taken.contains(&username) {
            username = format!("{base}{suffix}");
            suffix += 1;
        }
        taken.push(username.clone());
        account.username = username;
    }
}

fn initials(owner: &str) -> String {
    owner
        .to_lowercase()
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use test_case::test_case;

    use super::*;
    use crate::testing::day;

    #[test_case("Jonas Schmedtmann" => "js"; "two words")]
    #[test_case("Steven Thomas Williams" => "stw"; "three words")]
    #[test_case("  Sarah   Smith " => "ss"; "extra whitespace")]
    #[test_case("Madonna" => "m"; "single word")]
    #[test_case("" => ""; "empty")]
    fn initials(owner: &str) -> String {
        super::super::initials(owner)
    }

    #[test]
    fn colliding_usernames_get_suffixes() {
        let mut accounts = vec![
            Account::new("Jonas Schmedtmann", 1111),
            Account::new("Jessica Davis", 2222),
            Account::new("Jane Smith", 3333),
            Account::new("Jack Sparrow", 4444),
        ];

        derive_usernames(&mut accounts);

        let usernames: Vec<_> = accounts.iter().map(Account::username).collect();
        assert_eq!(usernames, vec!["js", "jd", "js2", "js3"]);
    }

    #[test]
    fn deriving_usernames_is_idempotent() {
        let mut accounts = vec![
            Account::new("Jonas Schmedtmann", 1111),
            Account::new("Jane Smith", 3333),
        ];

        derive_usernames(&mut accounts);
        let first: Vec<_> = accounts.iter().map(|a| a.username().to_string()).collect();
        derive_usernames(&mut accounts);
        let second: Vec<_> = accounts.iter().map(|a| a.username().to_string()).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn balance_is_sum_of_movements() {
        let account = Account::new("Jonas Schmedtmann", 1111)
            .with_movement(dec!(200), day(1))
            .with_movement(dec!(455.23), day(2))
            .with_movement(dec!(-306.5), day(3));

        assert_eq!(account.balance(), dec!(348.73));
    }

    #[test]
    fn sorted_view_keeps_dates_paired() {
        let account = Account::new("Jonas Schmedtmann", 1111)
            .with_movement(dec!(200), day(1))
            .with_movement(dec!(-400), day(2))
            .with_movement(dec!(450), day(3));

        let sorted = account.sorted_view(true);

        assert_eq!(
            sorted,
            vec![
                Movement::new(dec!(-400), day(2)),
                Movement::new(dec!(200), day(1)),
                Movement::new(dec!(450), day(3)),
            ]
        );
        assert_eq!(account.sorted_view(false), account.movements());
    }

    #[test]
    fn sorted_view_is_stable() {
        let account = Account::new("Jonas Schmedtmann", 1111)
            .with_movement(dec!(100), day(1))
            .with_movement(dec!(-5), day(2))
            .with_movement(dec!(100), day(3));

        let dates: Vec<_> = account.sorted_view(true).iter().map(|m| m.date).collect();

        assert_eq!(dates, vec![day(2), day(1), day(3)]);
    }

    #[test]
    fn sorting_does_not_reorder_storage() {
        let account = Account::new("Jonas Schmedtmann", 1111)
            .with_movement(dec!(3000), day(1))
            .with_movement(dec!(-650), day(2));

        let _ = account.sorted_view(true);

        let amounts: Vec<_> = account.amounts().collect();
        assert_eq!(amounts, vec![dec!(3000), dec!(-650)]);
    }

    #[test]
    fn recording_is_bounded_by_decimal_range() {
        let account = Account::new("Jonas Schmedtmann", 1111)
            .with_movement(Decimal::MAX - dec!(100), day(1))
            .with_movement(dec!(-50), day(2));

        assert!(account.can_record(dec!(100)));
        assert!(!account.can_record(dec!(101)));
        // withdrawals are totalled separately from deposits
        assert!(account.can_record(-(Decimal::MAX - dec!(50))));
        assert!(!account.can_record(-(Decimal::MAX - dec!(49))));
    }

    #[test]
    fn first_name() {
        assert_eq!(Account::new("Jonas Schmedtmann", 1111).first_name(), "Jonas");
    }

    #[test]
    fn deserialise_yaml() {
        let raw = r#"
        owner: Jessica Davis
        pin: 2222
        interest_rate: 1.5
        currency: USD
        locale: en-US
        movements:
          - amount: 5000
            date: 2019-11-01T13:15:33.035Z
          - amount: -150
            date: 2019-12-25T06:04:23.907Z
        "#;

        let account: Account = serde_yaml::from_str(raw).unwrap();

        assert_eq!(account.balance(), dec!(4850));
        assert_eq!(account.movement_dates().count(), 2);
    }
}
