use std::time::Duration;

/// Debounce timer for one gesture channel.
///
/// Only accepted emissions move the timer; a rejected candidate leaves it
/// untouched, so a steady stream of attempts cannot keep the gate shut.
#[derive(Debug, Clone)]
pub struct CooldownGate {
    window: Duration,
    last_accepted: Option<Duration>,
}

impl CooldownGate {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    pub fn try_emit(&mut self, now: Duration) -> bool {
        let open = match self.last_accepted {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.window,
        };
        if open {
            self.last_accepted = Some(now);
        }
        open
    }

    /// Time left before the gate reopens (zero when open)
    pub fn remaining(&self, now: Duration) -> Duration {
        match self.last_accepted {
            None => Duration::ZERO,
            Some(last) => self.window.saturating_sub(now.saturating_sub(last)),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn last_accepted(&self) -> Option<Duration> {
        self.last_accepted
    }
}
