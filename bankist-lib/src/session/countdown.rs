/// The time left before an idle session is logged out, in whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    /// Start a countdown from the given number of seconds
    #[must_use]
    pub fn start(seconds: u32) -> Self {
        Self { remaining: seconds }
    }

    /// Seconds left
    #[must_use]
    pub fn remaining(self) -> u32 {
        self.remaining
    }

    /// The remaining time split into minutes and seconds, for display
    #[must_use]
    pub fn display(self) -> (u32, u32) {
        (self.remaining / 60, self.remaining % 60)
    }

    /// Whether the countdown has run out
    #[must_use]
    pub fn is_expired(self) -> bool {
        self.remaining == 0
    }

    /// Count down one second, stopping at zero
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::Countdown;

    #[test_case(300 => (5, 0); "full")]
    #[test_case(299 => (4, 59); "after one tick")]
    #[test_case(61 => (1, 1); "just over a minute")]
    #[test_case(0 => (0, 0); "expired")]
    fn display(seconds: u32) -> (u32, u32) {
        Countdown::start(seconds).display()
    }

    #[test]
    fn expires_after_every_second_has_elapsed() {
        let mut countdown = Countdown::start(3);
        for _ in 0..2 {
            countdown.tick();
            assert!(!countdown.is_expired());
        }
        countdown.tick();
        assert!(countdown.is_expired());
        countdown.tick();
        assert_eq!(countdown.remaining(), 0);
    }
}
