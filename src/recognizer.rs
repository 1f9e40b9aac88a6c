//! Per-frame gesture recognition
//!
//! Owns the swipe tracker and one cooldown gate per channel. The caller owns
//! the frame loop and the clock: each call to [`GestureRecognizer::process`]
//! is one frame, stamped with its capture time.

use crate::config::Config;
use crate::cooldown::CooldownGate;
use crate::extension::is_index_extended;
use crate::gesture::{Channel, GestureEvent};
use crate::landmarks::LandmarkSnapshot;
use crate::swipe::{Sample, SwipeParams, SwipeTracker};
use crate::thumbs_up::is_thumbs_up;
use std::collections::VecDeque;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct RecognizerSettings {
    pub swipe: SwipeParams,
    pub swipe_cooldown: Duration,
    pub index_extend_threshold: f32,
    pub thumb_rise_min: f32,
    pub thumbs_up_cooldown: Duration,
}

impl Default for RecognizerSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for RecognizerSettings {
    fn from(config: &Config) -> Self {
        Self {
            swipe: config.swipe.params(),
            swipe_cooldown: config.swipe.cooldown(),
            index_extend_threshold: config.swipe.index_extend_threshold,
            thumb_rise_min: config.thumbs_up.thumb_rise_min,
            thumbs_up_cooldown: config.thumbs_up.cooldown(),
        }
    }
}

pub struct GestureRecognizer {
    index_extend_threshold: f32,
    thumb_rise_min: f32,
    tracker: SwipeTracker,
    swipe_gate: CooldownGate,
    thumbs_up_gate: CooldownGate,
    index_extended: bool,
}

impl GestureRecognizer {
    pub fn new(settings: RecognizerSettings) -> Self {
        Self {
            index_extend_threshold: settings.index_extend_threshold,
            thumb_rise_min: settings.thumb_rise_min,
            tracker: SwipeTracker::new(settings.swipe),
            swipe_gate: CooldownGate::new(settings.swipe_cooldown),
            thumbs_up_gate: CooldownGate::new(settings.thumbs_up_cooldown),
            index_extended: false,
        }
    }

    /// Process one frame. `snapshot` is `None` when no hand was detected.
    ///
    /// Swipe and thumbs-up are independent channels, so a single frame can
    /// yield both; thumbs-up comes first in the returned list.
    #[hotpath::measure]
    pub fn process(
        &mut self,
        snapshot: Option<&LandmarkSnapshot>,
        now: Duration,
    ) -> Vec<GestureEvent> {
        let mut events = Vec::new();

        let Some(snapshot) = snapshot else {
            self.index_extended = false;
            self.tracker.clear();
            return events;
        };

        self.index_extended = is_index_extended(snapshot, self.index_extend_threshold);

        if is_thumbs_up(snapshot, self.thumb_rise_min) {
            if self.thumbs_up_gate.try_emit(now) {
                events.push(GestureEvent::ThumbsUp);
            } else {
                debug!("thumbs-up suppressed by cooldown");
            }
        }

        let tip = self.index_extended.then(|| snapshot.index_tip());
        if let Some(direction) = self.tracker.observe(tip, now) {
            let event = GestureEvent::from(direction);
            if self.swipe_gate.try_emit(now) {
                events.push(event);
            } else {
                debug!("{} dropped during cooldown", event);
            }
        }

        events
    }

    pub fn index_extended(&self) -> bool {
        self.index_extended
    }

    /// Fingertip samples of the current extension, oldest first
    pub fn history(&self) -> &VecDeque<Sample> {
        self.tracker.history()
    }

    pub fn swipe_cooldown_remaining(&self, now: Duration) -> Duration {
        self.swipe_gate.remaining(now)
    }

    pub fn thumbs_up_cooldown_remaining(&self, now: Duration) -> Duration {
        self.thumbs_up_gate.remaining(now)
    }

    pub fn cooldown_window(&self, channel: Channel) -> Duration {
        match channel {
            Channel::Swipe => self.swipe_gate.window(),
            Channel::ThumbsUp => self.thumbs_up_gate.window(),
        }
    }
}
