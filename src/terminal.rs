use bankist_lib::{Account, Movement, Renderer, Summary};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rusty_money::{iso, Money};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Prints the bank to stdout
#[derive(Debug, Default)]
pub struct Terminal {
    logged_in: bool,
}

impl Renderer for Terminal {
    fn render(&mut self, account: &Account, movements: &[Movement], summary: &Summary) {
        let now = Utc::now();
        let fmt = |amount| money(amount, &account.currency);

        println!("{}", "-".repeat(56));

        // newest at the top
        for (index, movement) in movements.iter().enumerate().rev() {
            let kind = if movement.is_deposit() {
                "DEPOSIT"
            } else {
                "WITHDRAWAL"
            };
            println!(
                "{:>3} {:<10}  {:<12} {:>24}",
                index + 1,
                kind,
                movement_date(movement.date, now, &account.locale),
                fmt(movement.amount),
            );
        }

        println!("{}", "-".repeat(56));
        println!("Balance   {:>46}", fmt(summary.balance));
        println!(
            "In {}   Out {}   Interest {}",
            fmt(summary.total_in),
            fmt(summary.total_out),
            fmt(summary.interest),
        );
    }

    fn show_logged_in_chrome(&mut self) {
        self.logged_in = true;
    }

    fn hide_logged_in_chrome(&mut self) {
        if self.logged_in {
            println!("{}", "=".repeat(56));
        }
        self.logged_in = false;
    }

    fn set_welcome_message(&mut self, text: &str) {
        println!("{}", text);
    }

    fn set_countdown_display(&mut self, minutes: u32, seconds: u32) {
        // every tick would flood the terminal
        if seconds == 0 || (minutes == 0 && seconds <= 10) {
            println!("You will be logged out in {:02}:{:02}", minutes, seconds);
        }
    }

    fn set_current_date_display(&mut self, now: DateTime<Utc>, locale: &str) {
        println!(
            "Current balance as of {}",
            now.format(&format!("{}, %H:%M", date_pattern(locale)))
        );
    }
}

/// Format an amount in the given ISO currency, or as a plain number followed
/// by the code if the currency is unknown
pub fn money(amount: Decimal, currency: &str) -> String {
    match iso::find(currency) {
        Some(currency) => Money::from_decimal(amount, currency).to_string(),
        None => format!("{:.2} {}", amount, currency),
    }
}

/// Describe when a movement happened, relative to `now` for the past week
fn movement_date(date: DateTime<Utc>, now: DateTime<Utc>, locale: &str) -> String {
    // whole days, rounded to the nearest
    let days = ((now - date).num_seconds().abs() + SECONDS_PER_DAY / 2) / SECONDS_PER_DAY;

    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=7 => format!("{} days ago", days),
        _ => date.format(date_pattern(locale)).to_string(),
    }
}

fn date_pattern(locale: &str) -> &'static str {
    match locale {
        "en-US" => "%m/%d/%Y",
        "de-DE" | "de-AT" | "de-CH" => "%d.%m.%Y",
        _ => "%d/%m/%Y",
    }
}
