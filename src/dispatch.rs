use crate::gesture::GestureEvent;
use crate::transport::Transport;
use std::time::Duration;
use tracing::{info, warn};

/// What the HUD shows about the most recent gesture
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Feedback {
    pub last_gesture: Option<GestureEvent>,
    pub last_at: Option<Duration>,
}

impl Feedback {
    /// Label to display, if the gesture happened within `linger` of `now`
    pub fn label(&self, now: Duration, linger: Duration) -> Option<&'static str> {
        let (gesture, at) = (self.last_gesture?, self.last_at?);
        (now.saturating_sub(at) < linger).then(|| gesture.label())
    }
}

/// Forwards accepted gestures to the transport, once each
pub struct Dispatcher {
    transport: Box<dyn Transport>,
    feedback: Feedback,
    delivered: usize,
    failed: usize,
}

impl Dispatcher {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            feedback: Feedback::default(),
            delivered: 0,
            failed: 0,
        }
    }

    /// Send the event's command. Delivery failures are logged, never retried,
    /// and never stop the caller. Returns whether the transport took it.
    pub fn dispatch(&mut self, event: GestureEvent, now: Duration) -> bool {
        let command = event.command();
        info!("[GESTURE] {} -> {}", event, command);

        self.feedback = Feedback {
            last_gesture: Some(event),
            last_at: Some(now),
        };

        match self.transport.send(command) {
            Ok(()) => {
                self.delivered += 1;
                true
            }
            Err(e) => {
                self.failed += 1;
                warn!("{} transport failed to deliver {}: {}", self.transport.name(), command, e);
                false
            }
        }
    }

    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    pub fn delivered(&self) -> usize {
        self.delivered
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }
}
