//! Frame and gesture counters, summarized at shutdown

use crate::gesture::GestureEvent;
use std::time::{Duration, Instant};

#[derive(Clone, Default)]
pub struct FrameStats {
    pub frames: usize,
    pub no_hand: usize,
    pub rejected: usize,
    pub events: [usize; 5],
    pub delivered: usize,
    pub failed: usize,
    processing: Timing,
}

#[derive(Clone, Default)]
struct Timing {
    count: u32,
    total: Duration,
    min: Option<Duration>,
    max: Duration,
}

fn event_slot(event: GestureEvent) -> usize {
    match event {
        GestureEvent::SwipeLeft => 0,
        GestureEvent::SwipeRight => 1,
        GestureEvent::SwipeUp => 2,
        GestureEvent::SwipeDown => 3,
        GestureEvent::ThumbsUp => 4,
    }
}

impl FrameStats {
    pub fn record_event(&mut self, event: GestureEvent, delivered: bool) {
        self.events[event_slot(event)] += 1;
        if delivered {
            self.delivered += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn event_count(&self, event: GestureEvent) -> usize {
        self.events[event_slot(event)]
    }

    pub fn total_events(&self) -> usize {
        self.events.iter().sum()
    }

    fn record_processing(&mut self, elapsed: Duration) {
        let t = &mut self.processing;
        t.count += 1;
        t.total += elapsed;
        t.min = Some(t.min.map_or(elapsed, |m| m.min(elapsed)));
        t.max = t.max.max(elapsed);
    }

    pub fn summary(&self) -> String {
        let mut out = format!(
            "Frames: {} processed, {} without a hand, {} rejected\n",
            self.frames, self.no_hand, self.rejected
        );

        if self.total_events() > 0 {
            let counts: Vec<String> = GestureEvent::ALL
                .iter()
                .filter(|e| self.event_count(**e) > 0)
                .map(|e| format!("{}={}", e, self.event_count(*e)))
                .collect();
            out.push_str(&format!(
                "Gestures (n={}): {}; delivered={} failed={}\n",
                self.total_events(),
                counts.join(" "),
                self.delivered,
                self.failed
            ));
        } else {
            out.push_str("No gestures recognized.\n");
        }

        let t = &self.processing;
        if t.count > 0 {
            let avg = t.total / t.count;
            out.push_str(&format!(
                "Processing: avg={:.1}us min={:.1}us max={:.1}us\n",
                avg.as_secs_f64() * 1e6,
                t.min.unwrap_or_default().as_secs_f64() * 1e6,
                t.max.as_secs_f64() * 1e6
            ));
        }
        out
    }
}

/// Measures one frame's processing time
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn finish(self, stats: &mut FrameStats) {
        stats.frames += 1;
        stats.record_processing(self.start.elapsed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_summary() {
        let stats = FrameStats::default();
        let summary = stats.summary();
        assert!(summary.contains("Frames: 0 processed"));
        assert!(summary.contains("No gestures recognized."));
        assert!(!summary.contains("Processing"));
    }

    #[test]
    fn test_event_counts() {
        let mut stats = FrameStats::default();
        stats.record_event(GestureEvent::SwipeLeft, true);
        stats.record_event(GestureEvent::SwipeLeft, false);
        stats.record_event(GestureEvent::ThumbsUp, true);
        assert_eq!(stats.event_count(GestureEvent::SwipeLeft), 2);
        assert_eq!(stats.total_events(), 3);
        assert_eq!(stats.delivered, 2);
        assert_eq!(stats.failed, 1);
        let summary = stats.summary();
        assert!(summary.contains("swipe-left=2"));
        assert!(summary.contains("thumbs-up=1"));
        assert!(!summary.contains("swipe-up"));
    }

    #[test]
    fn test_timer_counts_frames() {
        let mut stats = FrameStats::default();
        Timer::start().finish(&mut stats);
        Timer::start().finish(&mut stats);
        assert_eq!(stats.frames, 2);
        assert!(stats.summary().contains("Processing: avg="));
    }
}
