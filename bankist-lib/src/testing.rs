use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::{Account, Movement, Renderer, Summary};

/// Midday on the given day of January 2020
pub fn day(n: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 1, 12, 0, 0).unwrap() + Duration::days(i64::from(n) - 1)
}

/// Everything a [`Renderer`] was asked to do, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Account {
        username: String,
        movements: Vec<Movement>,
        summary: Summary,
    },
    ShowChrome,
    HideChrome,
    Welcome(String),
    Countdown(u32, u32),
    Date(DateTime<Utc>),
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub events: Vec<Rendered>,
}

impl RecordingRenderer {
    pub fn last_welcome(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|event| match event {
            Rendered::Welcome(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn last_countdown(&self) -> Option<(u32, u32)> {
        self.events.iter().rev().find_map(|event| match event {
            Rendered::Countdown(minutes, seconds) => Some((*minutes, *seconds)),
            _ => None,
        })
    }

    pub fn last_render(&self) -> Option<&[Movement]> {
        self.events.iter().rev().find_map(|event| match event {
            Rendered::Account { movements, .. } => Some(movements.as_slice()),
            _ => None,
        })
    }

    pub fn renders(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, Rendered::Account { .. }))
            .count()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, account: &Account, movements: &[Movement], summary: &Summary) {
        self.events.push(Rendered::Account {
            username: account.username().to_string(),
            movements: movements.to_vec(),
            summary: *summary,
        });
    }

    fn show_logged_in_chrome(&mut self) {
        self.events.push(Rendered::ShowChrome);
    }

    fn hide_logged_in_chrome(&mut self) {
        self.events.push(Rendered::HideChrome);
    }

    fn set_welcome_message(&mut self, text: &str) {
        self.events.push(Rendered::Welcome(text.to_string()));
    }

    fn set_countdown_display(&mut self, minutes: u32, seconds: u32) {
        self.events.push(Rendered::Countdown(minutes, seconds));
    }

    fn set_current_date_display(&mut self, now: DateTime<Utc>, _locale: &str) {
        self.events.push(Rendered::Date(now));
    }
}
