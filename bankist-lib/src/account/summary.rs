use rust_decimal::Decimal;

use super::Account;

/// The headline figures shown alongside an account's movements
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// The sum of every movement
    pub balance: Decimal,

    /// The sum of every deposit
    pub total_in: Decimal,

    /// The absolute value of the sum of every withdrawal
    pub total_out: Decimal,

    /// The interest earned on deposits.
    ///
    /// Interest is computed per deposit, and any single deposit earning less
    /// than 1 is left out of the total.
    pub interest: Decimal,
}

impl Summary {
    /// Summarise the movements of the given [`Account`]
    #[must_use]
    pub fn of(account: &Account) -> Self {
        let deposits = || account.amounts().filter(|amount| *amount > Decimal::ZERO);

        let total_in = deposits().fold(Decimal::ZERO, Decimal::saturating_add);
        let total_out = account
            .amounts()
            .filter(|amount| *amount < Decimal::ZERO)
            .fold(Decimal::ZERO, Decimal::saturating_add)
            .abs();
        let interest = deposits()
            .map(|deposit| {
                deposit
                    .checked_mul(account.interest_rate)
                    .map_or(Decimal::MAX, |interest| interest / Decimal::ONE_HUNDRED)
            })
            .filter(|interest| *interest >= Decimal::ONE)
            .fold(Decimal::ZERO, Decimal::saturating_add);

        Self {
            balance: account.balance(),
            total_in,
            total_out,
            interest,
        }
    }
}
