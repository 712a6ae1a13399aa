//! The bank's accounts, and the rules for moving money between them

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use tracing::{instrument, Level};

use crate::account::{derive_usernames, Account};

/// A loan is only granted if some existing movement is at least this share of
/// the requested amount
const LOAN_QUALIFYING_PERCENT: Decimal = Decimal::TEN;

/// Errors that can occur when applying an operation to the [`Ledger`]
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The username and PIN do not identify an account
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The transfer was declined. Nothing was moved.
    #[error("invalid transfer: {0}")]
    InvalidTransfer(#[from] TransferError),

    /// The loan was declined. Nothing was deposited.
    #[error("invalid loan: {0}")]
    InvalidLoan(#[from] LoanError),

    /// No account exists with the given username
    #[error("account not found: {0}")]
    AccountNotFound(String),
}

/// The reason a transfer was declined
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TransferError {
    /// Only positive amounts can be transferred
    #[error("amount must be positive")]
    NonPositiveAmount,

    /// The sender's balance does not cover the amount
    #[error("insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// The sender's balance at the time of the request
        balance: Decimal,
        /// The amount that was requested
        requested: Decimal,
    },

    /// There is no account with the receiver's username
    #[error("no such receiver: {0}")]
    UnknownReceiver(String),

    /// The sender and receiver are the same account
    #[error("cannot transfer to the same account")]
    SelfTransfer,

    /// One of the accounts cannot hold the amount
    #[error("amount exceeds what the account can hold")]
    ExceedsLimit,
}

/// The reason a loan was declined
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
pub enum LoanError {
    /// Only positive amounts can be borrowed
    #[error("amount must be positive")]
    NonPositiveAmount,

    /// No movement in the account is large enough to justify the loan
    #[error("no movement of at least 10% of the requested amount")]
    NoQualifyingDeposit,

    /// The account cannot hold the amount
    #[error("amount exceeds what the account can hold")]
    ExceedsLimit,
}

/// An approved loan, waiting to be paid into its account.
///
/// Produced by [`Ledger::approve_loan`] and consumed by
/// [`Ledger::disburse_loan`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Loan {
    id: u64,
    username: String,
    amount: Decimal,
}

impl Loan {
    /// The account the loan will be paid into
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The amount of the loan
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// An identifier distinguishing this loan from others approved by the same
    /// [`Ledger`]
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// The set of all accounts, in the order they were provisioned.
///
/// Every mutation is all-or-nothing: if an operation returns an error, no
/// account has changed.
#[derive(Debug, Default)]
pub struct Ledger {
    accounts: IndexMap<String, Account>,
    loans_approved: u64,
}

impl Ledger {
    /// Build a ledger from a set of accounts, deriving each account's username
    #[must_use]
    pub fn new(accounts: impl IntoIterator<Item = Account>) -> Self {
        let mut accounts: Vec<_> = accounts.into_iter().collect();
        derive_usernames(&mut accounts);

        let accounts = accounts
            .into_iter()
            .map(|account| (account.username().to_string(), account))
            .collect();

        Self {
            accounts,
            loans_approved: 0,
        }
    }

    /// The number of open accounts
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Checks whether every account has been closed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Iterate over the accounts in provisioning order
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Look up an account by its exact username
    #[must_use]
    pub fn find_by_username(&self, username: &str) -> Option<&Account> {
        self.accounts.get(username)
    }

    /// Return the account identified by the username, provided the PIN also
    /// matches.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidCredentials`] if either the username or the PIN is
    /// wrong. The two cases are deliberately indistinguishable.
    pub fn authenticate(&self, username: &str, pin: u32) -> Result<&Account, Error> {
        self.find_by_username(username)
            .filter(|account| account.pin_matches(pin))
            .ok_or(Error::InvalidCredentials)
    }

    /// Move `amount` from the sender to the receiver, dating both movements
    /// `now`.
    ///
    /// # Errors
    ///
    /// The transfer is declined, leaving both accounts untouched, if the
    /// amount is not positive, exceeds the sender's balance, or the receiver
    /// does not exist or is the sender. It is also declined if either account
    /// would no longer be able to total its movements.
    #[instrument(skip(self, now))]
    pub fn transfer(
        &mut self,
        sender: &str,
        receiver: &str,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> Result<(), Error> {
        let balance = self
            .find_by_username(sender)
            .ok_or_else(|| Error::AccountNotFound(sender.to_string()))?
            .balance();

        if amount <= Decimal::ZERO {
            return Err(TransferError::NonPositiveAmount.into());
        }

        if amount > balance {
            return Err(TransferError::InsufficientFunds {
                balance,
                requested: amount,
            }
            .into());
        }

        if !self.accounts.contains_key(receiver) {
            return Err(TransferError::UnknownReceiver(receiver.to_string()).into());
        }

        if receiver == sender {
            return Err(TransferError::SelfTransfer.into());
        }

        let fits = |username: &str, amount: Decimal| {
            self.find_by_username(username)
                .is_some_and(|account| account.can_record(amount))
        };
        if !fits(sender, -amount) || !fits(receiver, amount) {
            return Err(TransferError::ExceedsLimit.into());
        }

        // both accounts are known to exist; nothing below can fail
        if let Some(account) = self.accounts.get_mut(sender) {
            account.push(-amount, now);
        }
        if let Some(account) = self.accounts.get_mut(receiver) {
            account.push(amount, now);
        }

        tracing::event!(Level::DEBUG, "transfer complete");

        Ok(())
    }

    /// Check whether the account qualifies for a loan of `amount`.
    ///
    /// Nothing is deposited until the returned [`Loan`] is passed to
    /// [`Ledger::disburse_loan`].
    ///
    /// # Errors
    ///
    /// The loan is declined if the amount is not positive, if no existing
    /// movement is at least 10% of the amount, or if the account could not
    /// hold it.
    #[instrument(skip(self))]
    pub fn approve_loan(&mut self, username: &str, amount: Decimal) -> Result<Loan, Error> {
        let account = self
            .find_by_username(username)
            .ok_or_else(|| Error::AccountNotFound(username.to_string()))?;

        if amount <= Decimal::ZERO {
            return Err(LoanError::NonPositiveAmount.into());
        }

        // divide first so that no amount can overflow
        let threshold = amount / Decimal::ONE_HUNDRED * LOAN_QUALIFYING_PERCENT;
        if !account.amounts().any(|movement| movement >= threshold) {
            return Err(LoanError::NoQualifyingDeposit.into());
        }

        if !account.can_record(amount) {
            return Err(LoanError::ExceedsLimit.into());
        }

        self.loans_approved += 1;

        Ok(Loan {
            id: self.loans_approved,
            username: username.to_string(),
            amount,
        })
    }

    /// Pay an approved loan into its account, dated `now`
    ///
    /// # Errors
    ///
    /// [`Error::AccountNotFound`] if the account was closed after the loan
    /// was approved, or [`LoanError::ExceedsLimit`] if the account has since
    /// grown too large to hold it.
    #[instrument(skip(self, now))]
    pub fn disburse_loan(&mut self, loan: &Loan, now: DateTime<Utc>) -> Result<(), Error> {
        let account = self
            .accounts
            .get_mut(&loan.username)
            .ok_or_else(|| Error::AccountNotFound(loan.username.clone()))?;

        if !account.can_record(loan.amount) {
            return Err(LoanError::ExceedsLimit.into());
        }

        account.push(loan.amount, now);

        tracing::event!(Level::DEBUG, "loan disbursed");

        Ok(())
    }

    /// Approve and immediately disburse a loan
    ///
    /// # Errors
    ///
    /// See [`Ledger::approve_loan`].
    pub fn request_loan(
        &mut self,
        username: &str,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> Result<(), Error> {
        let loan = self.approve_loan(username, amount)?;
        self.disburse_loan(&loan, now)
    }

    /// Permanently remove the active account, returning it.
    ///
    /// The given username and PIN must be the active account's own.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidCredentials`] if the username or PIN do not match the
    /// active account. The ledger is left unchanged.
    #[instrument(skip(self, pin))]
    pub fn close_account(&mut self, active: &str, username: &str, pin: u32) -> Result<Account, Error> {
        if username != active {
            return Err(Error::InvalidCredentials);
        }

        self.authenticate(username, pin)?;

        let account = self
            .accounts
            .shift_remove(username)
            .ok_or_else(|| Error::AccountNotFound(username.to_string()))?;

        tracing::event!(Level::INFO, "account closed");

        Ok(account)
    }
}
