//! Swipe tracker - turns a run of extended-finger fingertip positions into a
//! single directional flick
//!
//! History only ever holds samples from one continuous stretch of extension.
//! Retracting the finger, losing the hand, or firing a swipe all clear it, so
//! the return journey of a flick can never be read as a second flick.

use crate::gesture::SwipeDirection;
use crate::landmarks::Point2D;
use std::collections::VecDeque;
use std::time::Duration;

/// Thresholds for the fire condition
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeParams {
    /// Minimum fingertip displacement (normalized units)
    pub min_distance: f32,
    /// Minimum average speed between oldest and newest sample (units/s)
    pub min_velocity: f32,
    /// Share of |dx|+|dy| the dominant axis must carry
    pub directionality_ratio: f32,
    /// Samples older than this, relative to the newest, are dropped
    pub history_window: Duration,
    pub min_samples: usize,
    pub max_samples: usize,
}

impl Default for SwipeParams {
    fn default() -> Self {
        Self {
            min_distance: 0.12,
            min_velocity: 0.35,
            directionality_ratio: 0.70,
            history_window: Duration::from_millis(350),
            min_samples: 2,
            max_samples: 64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub position: Point2D,
    pub time: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    Idle,
    Accumulating,
}

pub struct SwipeTracker {
    params: SwipeParams,
    history: VecDeque<Sample>,
}

impl SwipeTracker {
    pub fn new(params: SwipeParams) -> Self {
        let capacity = params.max_samples.max(2);
        Self {
            params,
            history: VecDeque::with_capacity(capacity),
        }
    }

    /// Feed one frame.
    ///
    /// `tip` is the index fingertip when the finger is extended, `None` when
    /// it is not (or no hand was seen). Returns the swipe direction when this
    /// frame completes a flick. History is empty after a fire whatever the
    /// caller's cooldown gate decides.
    pub fn observe(&mut self, tip: Option<Point2D>, now: Duration) -> Option<SwipeDirection> {
        let Some(position) = tip else {
            self.clear();
            return None;
        };

        self.push(Sample { position, time: now });

        let direction = self.evaluate()?;
        self.clear();
        Some(direction)
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    pub fn state(&self) -> TrackerState {
        if self.history.is_empty() {
            TrackerState::Idle
        } else {
            TrackerState::Accumulating
        }
    }

    pub fn history(&self) -> &VecDeque<Sample> {
        &self.history
    }

    fn push(&mut self, sample: Sample) {
        self.history.push_back(sample);

        let cutoff = sample.time.saturating_sub(self.params.history_window);
        while self.history.front().is_some_and(|s| s.time < cutoff) {
            self.history.pop_front();
        }

        let cap = self.params.max_samples.max(2);
        while self.history.len() > cap {
            self.history.pop_front();
        }
    }

    /// Oldest vs newest retained sample against the fire condition
    fn evaluate(&self) -> Option<SwipeDirection> {
        if self.history.len() < self.params.min_samples.max(2) {
            return None;
        }
        let first = self.history.front()?;
        let last = self.history.back()?;

        let dt = last.time.checked_sub(first.time)?.as_secs_f32();
        if dt <= 0.0 {
            return None;
        }

        classify(
            last.position.x - first.position.x,
            last.position.y - first.position.y,
            dt,
            &self.params,
        )
    }
}

/// Distance, velocity and directionality checks on one displacement
pub fn classify(dx: f32, dy: f32, dt: f32, params: &SwipeParams) -> Option<SwipeDirection> {
    let dist = (dx * dx + dy * dy).sqrt();
    if dist < params.min_distance || dist / dt < params.min_velocity {
        return None;
    }

    let (adx, ady) = (dx.abs(), dy.abs());
    let total = adx + ady;
    if total == 0.0 {
        return None;
    }

    if adx >= ady {
        if adx / total < params.directionality_ratio {
            return None;
        }
        Some(if dx > 0.0 { SwipeDirection::Right } else { SwipeDirection::Left })
    } else {
        if ady / total < params.directionality_ratio {
            return None;
        }
        // image y grows downwards
        Some(if dy > 0.0 { SwipeDirection::Down } else { SwipeDirection::Up })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    fn p(x: f32, y: f32) -> Option<Point2D> {
        Some(Point2D::new(x, y))
    }

    #[test]
    fn test_stationary_finger_never_fires() {
        let mut tracker = SwipeTracker::new(SwipeParams::default());
        assert_eq!(tracker.observe(p(0.5, 0.5), secs(10.0)), None);
        assert_eq!(tracker.observe(p(0.5, 0.5), secs(10.05)), None);
        assert_eq!(tracker.state(), TrackerState::Accumulating);
    }

    #[test]
    fn test_right_swipe_fires_and_clears() {
        let mut tracker = SwipeTracker::new(SwipeParams::default());
        assert_eq!(tracker.observe(p(0.40, 0.50), secs(10.0)), None);
        assert_eq!(
            tracker.observe(p(0.58, 0.50), secs(10.3)),
            Some(SwipeDirection::Right)
        );
        assert!(tracker.history().is_empty());
        assert_eq!(tracker.state(), TrackerState::Idle);
    }

    #[test]
    fn test_each_direction() {
        let cases = [
            ((0.60, 0.5), (0.40, 0.5), SwipeDirection::Left),
            ((0.40, 0.5), (0.60, 0.5), SwipeDirection::Right),
            ((0.5, 0.60), (0.5, 0.40), SwipeDirection::Up),
            ((0.5, 0.40), (0.5, 0.60), SwipeDirection::Down),
        ];
        for (from, to, expected) in cases {
            let mut tracker = SwipeTracker::new(SwipeParams::default());
            tracker.observe(p(from.0, from.1), secs(1.0));
            assert_eq!(tracker.observe(p(to.0, to.1), secs(1.2)), Some(expected));
        }
    }

    #[test]
    fn test_single_sample_never_fires() {
        let mut tracker = SwipeTracker::new(SwipeParams::default());
        assert_eq!(tracker.observe(p(0.9, 0.9), secs(0.0)), None);
    }

    #[test]
    fn test_slow_drift_rejected() {
        let params = SwipeParams {
            history_window: secs(5.0),
            ..SwipeParams::default()
        };
        let mut tracker = SwipeTracker::new(params);
        tracker.observe(p(0.30, 0.5), secs(0.0));
        // 0.2 units over 1 second = 0.2/s, under 0.35/s
        assert_eq!(tracker.observe(p(0.50, 0.5), secs(1.0)), None);
    }

    #[test]
    fn test_diagonal_rejected() {
        let mut tracker = SwipeTracker::new(SwipeParams::default());
        tracker.observe(p(0.30, 0.30), secs(0.0));
        assert_eq!(tracker.observe(p(0.50, 0.50), secs(0.1)), None);
        assert_eq!(tracker.observe(p(0.70, 0.69), secs(0.2)), None);
    }

    #[test]
    fn test_retraction_clears_history() {
        let mut tracker = SwipeTracker::new(SwipeParams::default());
        tracker.observe(p(0.40, 0.5), secs(0.0));
        tracker.observe(p(0.45, 0.5), secs(0.05));
        assert_eq!(tracker.observe(None, secs(0.1)), None);
        assert_eq!(tracker.state(), TrackerState::Idle);
        // the earlier samples no longer count towards a swipe
        assert_eq!(tracker.observe(p(0.58, 0.5), secs(0.15)), None);
    }

    #[test]
    fn test_no_ghost_after_fire() {
        let mut tracker = SwipeTracker::new(SwipeParams::default());
        tracker.observe(p(0.40, 0.5), secs(0.0));
        assert!(tracker.observe(p(0.58, 0.5), secs(0.2)).is_some());
        // same spot again, then the return journey
        assert_eq!(tracker.observe(p(0.58, 0.5), secs(0.25)), None);
        assert_eq!(tracker.history().len(), 1);
    }

    #[test]
    fn test_old_samples_age_out() {
        let mut tracker = SwipeTracker::new(SwipeParams::default());
        tracker.observe(p(0.30, 0.5), secs(0.0));
        tracker.observe(p(0.31, 0.5), secs(0.30));
        tracker.observe(p(0.32, 0.5), secs(0.60));
        assert_eq!(tracker.history().len(), 2);
        assert_eq!(tracker.history().front().unwrap().time, secs(0.30));
    }

    #[test]
    fn test_sample_cap() {
        let params = SwipeParams {
            max_samples: 4,
            ..SwipeParams::default()
        };
        let mut tracker = SwipeTracker::new(params);
        for i in 0..10 {
            tracker.observe(p(0.5, 0.5), Duration::from_millis(i * 10));
        }
        assert_eq!(tracker.history().len(), 4);
    }

    #[test]
    fn test_min_samples() {
        let params = SwipeParams {
            min_samples: 3,
            ..SwipeParams::default()
        };
        let mut tracker = SwipeTracker::new(params);
        tracker.observe(p(0.40, 0.5), secs(0.0));
        assert_eq!(tracker.observe(p(0.60, 0.5), secs(0.1)), None);
        assert_eq!(
            tracker.observe(p(0.62, 0.5), secs(0.15)),
            Some(SwipeDirection::Right)
        );
    }

    #[test]
    fn test_zero_elapsed_time_never_fires() {
        let mut tracker = SwipeTracker::new(SwipeParams::default());
        tracker.observe(p(0.2, 0.5), secs(1.0));
        assert_eq!(tracker.observe(p(0.8, 0.5), secs(1.0)), None);
    }

    #[test]
    fn test_distance_threshold_monotonic() {
        let displacements = [0.05, 0.11, 0.12, 0.13, 0.2, 0.4];
        let thresholds = [0.05, 0.1, 0.12, 0.15, 0.3, 0.5];
        for &d in &displacements {
            let mut accepted_before = true;
            for &min_distance in &thresholds {
                let params = SwipeParams {
                    min_distance,
                    ..SwipeParams::default()
                };
                let accepted = classify(d, 0.0, 0.1, &params).is_some();
                assert!(
                    accepted_before || !accepted,
                    "d={} accepted at {} after a reject",
                    d,
                    min_distance
                );
                accepted_before = accepted;
            }
        }
    }

    #[test]
    fn test_equal_axes_never_fire() {
        let params = SwipeParams::default();
        for mag in [0.1_f32, 0.2, 0.5, 0.9] {
            for (sx, sy) in [(1.0, 1.0), (-1.0, 1.0), (1.0, -1.0), (-1.0, -1.0)] {
                assert_eq!(classify(mag * sx, mag * sy, 0.05, &params), None);
            }
        }
    }
}
