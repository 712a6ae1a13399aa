//! The event loop that drives a [`Session`] in real time
//!
//! User commands, the one-second countdown tick and delayed loan payments are
//! all fed into the one [`Session`] from a single task, so nothing in the
//! session ever runs concurrently with anything else.

use std::time::Duration;

use chrono::Utc;
use futures_util::{Stream, StreamExt};
use tokio::{
    task::JoinSet,
    time::{self, Instant, MissedTickBehavior},
};
use tracing::{instrument, Level};

use crate::{session, Loan, Renderer, Session};

const TICK: Duration = Duration::from_secs(1);

/// A request from the user, with numbers still as the text they typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Log in as `username`
    Login {
        /// The username to log in as
        username: String,
        /// The PIN, as typed
        pin: String,
    },

    /// Transfer money to another account
    Transfer {
        /// The receiver's username
        to: String,
        /// The amount, as typed
        amount: String,
    },

    /// Request a loan
    Loan {
        /// The amount, as typed
        amount: String,
    },

    /// Close the logged-in account
    Close {
        /// The username of the logged-in account
        username: String,
        /// The PIN, as typed
        pin: String,
    },

    /// Toggle sorting of movements
    Sort,

    /// End the session
    Logout,

    /// Stop the event loop
    Quit,
}

/// Feed `commands` into the session until the stream ends, a
/// [`Command::Quit`] arrives, or the stream yields an error.
///
/// While logged in, the session's countdown is ticked once a second; the tick
/// is re-aligned whenever the countdown restarts. Approved loans are paid in
/// after [`Settings::loan_delay`](crate::Settings::loan_delay), unless the
/// session ends first, in which case they are dropped.
///
/// # Errors
///
/// Returns the first error yielded by `commands`. Loans still waiting to be
/// paid in are dropped.
#[instrument(skip_all)]
pub async fn run<R, S, E>(session: &mut Session<R>, mut commands: S) -> Result<(), E>
where
    R: Renderer,
    S: Stream<Item = Result<Command, E>> + Unpin,
{
    let mut ticker = time::interval_at(Instant::now() + TICK, TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut loans: JoinSet<Loan> = JoinSet::new();
    let mut countdowns_started = session.countdowns_started();

    let outcome = loop {
        tokio::select! {
            command = commands.next() => {
                match command {
                    None | Some(Ok(Command::Quit)) => break Ok(()),
                    Some(Err(e)) => break Err(e),
                    Some(Ok(command)) => {
                        if let Some(loan) = apply(session, command) {
                            let delay = session.settings().loan_delay();
                            loans.spawn(async move {
                                time::sleep(delay).await;
                                loan
                            });
                        }
                    }
                }
            }

            _ = ticker.tick(), if session.is_logged_in() => session.tick(),

            Some(joined) = loans.join_next() => {
                if let Ok(loan) = joined {
                    if let Err(e) = session.disburse_loan(&loan, Utc::now()) {
                        tracing::event!(Level::INFO, "loan not paid in: {}", e);
                    }
                }
            }
        }

        if !session.is_logged_in() && !loans.is_empty() {
            loans.abort_all();
        }

        if session.countdowns_started() != countdowns_started {
            countdowns_started = session.countdowns_started();
            ticker.reset();
        }
    };

    loans.shutdown().await;

    outcome
}

/// Apply a single command, returning the loan to pay in later if one was
/// approved
fn apply<R: Renderer>(session: &mut Session<R>, command: Command) -> Option<Loan> {
    let now = Utc::now();

    let result: Result<Option<Loan>, session::Error> = match command {
        Command::Login { username, pin } => session.login(&username, &pin, now).map(|()| None),
        Command::Transfer { to, amount } => session.transfer(&to, &amount, now).map(|()| None),
        Command::Loan { amount } => session.request_loan(&amount).map(Some),
        Command::Close { username, pin } => session.close_account(&username, &pin).map(|_| None),
        Command::Sort => session.toggle_sort().map(|()| None),
        Command::Logout => session.logout().map(|()| None),
        Command::Quit => Ok(None),
    };

    result.unwrap_or_else(|e| {
        tracing::event!(Level::INFO, "command declined: {}", e);
        None
    })
}
