use chrono::{DateTime, Utc};

use crate::{Account, Movement, Summary};

/// Displays the state of a [`Session`](crate::Session).
///
/// The session only hands over raw values and timestamps. Formatting amounts
/// in the account's currency, and turning dates into something readable, is up
/// to the implementation.
pub trait Renderer {
    /// Display an account's movements (already in display order) and its
    /// summary figures
    fn render(&mut self, account: &Account, movements: &[Movement], summary: &Summary);

    /// Reveal the parts of the interface that only make sense when logged in
    fn show_logged_in_chrome(&mut self);

    /// Hide the parts of the interface that only make sense when logged in
    fn hide_logged_in_chrome(&mut self);

    /// Replace the greeting line
    fn set_welcome_message(&mut self, text: &str);

    /// Show the time left before the session is logged out
    fn set_countdown_display(&mut self, minutes: u32, seconds: u32);

    /// Show the current date, formatted for the given locale
    fn set_current_date_display(&mut self, now: DateTime<Utc>, locale: &str);
}
