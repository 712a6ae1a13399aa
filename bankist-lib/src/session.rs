//! The session of the (single) logged-in user
//!
//! A [`Session`] takes raw user input, applies it to the [`Ledger`], and tells
//! its [`Renderer`] what changed. It also owns the inactivity [`Countdown`] and
//! any loans waiting to be paid out, both of which are dropped as soon as the
//! user is logged out.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{instrument, Level};

use crate::{
    ledger::{self, LoanError, TransferError},
    Account, Ledger, Loan, Renderer,
};

mod countdown;
pub use countdown::Countdown;

const WELCOME_LOGGED_OUT: &str = "Log in to get started";
const WELCOME_INVALID: &str = "Invalid user!";

/// Errors that can occur when acting on a [`Session`]
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The action needs a logged-in user
    #[error("not logged in")]
    NotLoggedIn,

    /// The loan was approved, but the session it was approved in has ended
    #[error("loan {0} was cancelled")]
    LoanCancelled(u64),

    /// The ledger declined the action
    #[error(transparent)]
    Ledger(#[from] ledger::Error),
}

/// Tunable timings of a [`Session`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How long a session may sit idle before it is logged out
    pub logout_after_secs: u32,

    /// How long an approved loan takes to be paid in
    pub loan_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            logout_after_secs: 300,
            loan_delay_ms: 2500,
        }
    }
}

impl Settings {
    /// The loan delay as a [`Duration`]
    #[must_use]
    pub fn loan_delay(&self) -> Duration {
        Duration::from_millis(self.loan_delay_ms)
    }
}

#[derive(Debug)]
enum State {
    LoggedOut,
    LoggedIn(Active),
}

#[derive(Debug)]
struct Active {
    username: String,
    countdown: Countdown,
    pending_loans: Vec<u64>,
}

/// Drives a single user through the [`Ledger`].
///
/// Every successful action re-renders the account and restarts the
/// inactivity countdown; a failed action changes nothing at all.
#[derive(Debug)]
pub struct Session<R> {
    ledger: Ledger,
    renderer: R,
    settings: Settings,
    state: State,
    sorted: bool,
    countdowns_started: u64,
}

impl<R: Renderer> Session<R> {
    /// Create a logged-out session over the given ledger
    pub fn new(ledger: Ledger, renderer: R, settings: Settings) -> Self {
        Self {
            ledger,
            renderer,
            settings,
            state: State::LoggedOut,
            sorted: false,
            countdowns_started: 0,
        }
    }

    /// The underlying ledger
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// The renderer the session reports to
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The session's timings
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Whether a user is logged in
    pub fn is_logged_in(&self) -> bool {
        matches!(self.state, State::LoggedIn(_))
    }

    /// Whether movements are currently displayed sorted by amount
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// The logged-in user's account
    pub fn active_account(&self) -> Option<&Account> {
        match &self.state {
            State::LoggedIn(active) => self.ledger.find_by_username(&active.username),
            State::LoggedOut => None,
        }
    }

    /// The running inactivity countdown, if logged in
    pub fn countdown(&self) -> Option<Countdown> {
        match &self.state {
            State::LoggedIn(active) => Some(active.countdown),
            State::LoggedOut => None,
        }
    }

    /// How many times a countdown has been (re)started over the lifetime of
    /// the session.
    ///
    /// A change in this number means the countdown went back to its full
    /// duration.
    pub fn countdowns_started(&self) -> u64 {
        self.countdowns_started
    }

    /// Attempt to log in.
    ///
    /// Any existing session is ended first, whether or not the attempt
    /// succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`ledger::Error::InvalidCredentials`] if the username is unknown
    /// or the PIN is wrong or not a number.
    #[instrument(skip(self, pin, now))]
    pub fn login(&mut self, username: &str, pin: &str, now: DateTime<Utc>) -> Result<(), Error> {
        self.state = State::LoggedOut;
        self.sorted = false;

        let authenticated = parse_pin(pin)
            .ok_or(ledger::Error::InvalidCredentials)
            .and_then(|pin| self.ledger.authenticate(username.trim(), pin));

        let account = match authenticated {
            Ok(account) => account,
            Err(e) => {
                self.renderer.set_welcome_message(WELCOME_INVALID);
                self.renderer.hide_logged_in_chrome();
                return Err(e.into());
            }
        };

        self.renderer
            .set_welcome_message(&format!("Welcome back, {}", account.first_name()));
        self.renderer.set_current_date_display(now, &account.locale);
        self.renderer.show_logged_in_chrome();

        self.state = State::LoggedIn(Active {
            username: account.username().to_string(),
            countdown: Countdown::start(self.settings.logout_after_secs),
            pending_loans: Vec::default(),
        });

        tracing::event!(Level::INFO, "logged in");

        self.refresh();
        self.restart_countdown();

        Ok(())
    }

    /// End the session
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotLoggedIn`] if there is no session to end.
    pub fn logout(&mut self) -> Result<(), Error> {
        self.active_username()?;
        self.end_session();
        Ok(())
    }

    /// Transfer money from the logged-in account to another.
    ///
    /// The amount is given as typed by the user.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, if the amount isn't a number, or if the ledger
    /// declines the transfer.
    #[instrument(skip(self, now))]
    pub fn transfer(&mut self, receiver: &str, amount: &str, now: DateTime<Utc>) -> Result<(), Error> {
        let sender = self.active_username()?.to_string();
        let amount =
            parse_amount(amount).ok_or(ledger::Error::from(TransferError::NonPositiveAmount))?;

        self.ledger.transfer(&sender, receiver.trim(), amount, now)?;

        self.refresh();
        self.restart_countdown();

        Ok(())
    }

    /// Ask for a loan.
    ///
    /// The amount is rounded down to a whole number. Eligibility is checked
    /// straight away, but the money is only paid in once the returned [`Loan`]
    /// is handed back to [`Session::disburse_loan`] (normally after
    /// [`Settings::loan_delay`]).
    ///
    /// # Errors
    ///
    /// Fails if not logged in, if the amount isn't a number, or if the ledger
    /// declines the loan.
    #[instrument(skip(self))]
    pub fn request_loan(&mut self, amount: &str) -> Result<Loan, Error> {
        let username = self.active_username()?.to_string();
        let amount = parse_amount(amount)
            .map(|amount| amount.floor())
            .ok_or(ledger::Error::from(LoanError::NonPositiveAmount))?;

        let loan = self.ledger.approve_loan(&username, amount)?;

        if let State::LoggedIn(active) = &mut self.state {
            active.pending_loans.push(loan.id());
        }

        self.restart_countdown();

        Ok(loan)
    }

    /// Pay in a loan approved by [`Session::request_loan`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::LoanCancelled`] if the session the loan was approved
    /// in has since ended. Nothing is paid in.
    #[instrument(skip(self, now))]
    pub fn disburse_loan(&mut self, loan: &Loan, now: DateTime<Utc>) -> Result<(), Error> {
        let pending = match &mut self.state {
            State::LoggedIn(active) if active.username == loan.username() => active
                .pending_loans
                .iter()
                .position(|id| *id == loan.id())
                .map(|index| active.pending_loans.swap_remove(index))
                .is_some(),
            _ => false,
        };

        if !pending {
            return Err(Error::LoanCancelled(loan.id()));
        }

        self.ledger.disburse_loan(loan, now)?;

        self.refresh();
        self.restart_countdown();

        Ok(())
    }

    /// Close the logged-in account, then log out.
    ///
    /// # Errors
    ///
    /// Fails, leaving the session logged in and the account open, unless the
    /// username and PIN are those of the logged-in account.
    #[instrument(skip(self, pin))]
    pub fn close_account(&mut self, username: &str, pin: &str) -> Result<Account, Error> {
        let active = self.active_username()?.to_string();
        let pin = parse_pin(pin).ok_or(ledger::Error::InvalidCredentials)?;

        let account = self.ledger.close_account(&active, username.trim(), pin)?;

        self.end_session();

        Ok(account)
    }

    /// Switch between displaying movements in recorded order and sorted by
    /// amount
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotLoggedIn`] if there is nothing to sort.
    pub fn toggle_sort(&mut self) -> Result<(), Error> {
        self.active_username()?;

        self.sorted = !self.sorted;
        self.refresh();
        self.restart_countdown();

        Ok(())
    }

    /// Count one second off the inactivity countdown, logging out when it
    /// reaches zero.
    ///
    /// Does nothing while logged out.
    pub fn tick(&mut self) {
        let State::LoggedIn(active) = &mut self.state else {
            return;
        };

        active.countdown.tick();
        let countdown = active.countdown;

        let (minutes, seconds) = countdown.display();
        self.renderer.set_countdown_display(minutes, seconds);

        if countdown.is_expired() {
            tracing::event!(Level::INFO, "session expired");
            self.end_session();
        }
    }

    fn active_username(&self) -> Result<&str, Error> {
        match &self.state {
            State::LoggedIn(active) => Ok(&active.username),
            State::LoggedOut => Err(Error::NotLoggedIn),
        }
    }

    fn refresh(&mut self) {
        let State::LoggedIn(active) = &self.state else {
            return;
        };

        if let Some(account) = self.ledger.find_by_username(&active.username) {
            let movements = account.sorted_view(self.sorted);
            self.renderer.render(account, &movements, &account.summary());
        }
    }

    fn restart_countdown(&mut self) {
        if let State::LoggedIn(active) = &mut self.state {
            active.countdown = Countdown::start(self.settings.logout_after_secs);
            self.countdowns_started += 1;

            let (minutes, seconds) = active.countdown.display();
            self.renderer.set_countdown_display(minutes, seconds);
        }
    }

    fn end_session(&mut self) {
        if let State::LoggedIn(active) = &self.state {
            if !active.pending_loans.is_empty() {
                tracing::event!(
                    Level::DEBUG,
                    cancelled = active.pending_loans.len(),
                    "cancelling pending loans"
                );
            }
        }

        self.state = State::LoggedOut;
        self.sorted = false;
        self.renderer.hide_logged_in_chrome();
        self.renderer.set_welcome_message(WELCOME_LOGGED_OUT);

        tracing::event!(Level::INFO, "logged out");
    }
}

/// Amounts may be plain (`1000.50`) or in exponent form (`1e3`)
fn parse_amount(text: &str) -> Option<Decimal> {
    let text = text.trim();
    text.parse()
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

fn parse_pin(text: &str) -> Option<u32> {
    text.trim().parse().ok()
}
