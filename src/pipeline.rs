use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::gesture::{Channel, GestureEvent};
use crate::hud::{self, HudState};
use crate::recognizer::{GestureRecognizer, RecognizerSettings};
use crate::source::{FrameResult, open_input, spawn_reader};
use crate::stats::{FrameStats, Timer};
use crate::transport::Transport;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::info;

/// Frames buffered between the reader and the frame loop
const FRAME_QUEUE: usize = 64;

/// How long the big gesture label stays on the status line
const LABEL_LINGER: Duration = Duration::from_secs(1);

/// Single owner of all detector state: one frame in, events out
pub struct FrameLoop {
    recognizer: GestureRecognizer,
    dispatcher: Dispatcher,
    stats: FrameStats,
    hud: bool,
}

impl FrameLoop {
    pub fn new(settings: RecognizerSettings, dispatcher: Dispatcher, hud: bool) -> Self {
        Self {
            recognizer: GestureRecognizer::new(settings),
            dispatcher,
            stats: FrameStats::default(),
            hud,
        }
    }

    /// Handle one frame from the source. Rejected frames touch nothing but
    /// the rejection counter.
    pub fn handle(&mut self, frame: FrameResult) -> Vec<GestureEvent> {
        let frame = match frame {
            Ok(frame) => frame,
            Err(_) => {
                self.stats.rejected += 1;
                return Vec::new();
            }
        };

        let now = frame.timestamp;
        if frame.snapshot.is_none() {
            self.stats.no_hand += 1;
        }

        let timer = Timer::start();
        let events = self.recognizer.process(frame.snapshot.as_ref(), now);
        timer.finish(&mut self.stats);

        for &event in &events {
            let delivered = self.dispatcher.dispatch(event, now);
            self.stats.record_event(event, delivered);
        }

        if self.hud {
            let feedback = self.dispatcher.feedback();
            hud::draw(&HudState {
                hand_present: frame.snapshot.is_some(),
                index_extended: self.recognizer.index_extended(),
                swipe_remaining: self.recognizer.swipe_cooldown_remaining(now),
                swipe_window: self.recognizer.cooldown_window(Channel::Swipe),
                thumbs_up_remaining: self.recognizer.thumbs_up_cooldown_remaining(now),
                label: feedback.label(now, LABEL_LINGER),
                trail_len: self.recognizer.history().len(),
            });
        }

        events
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn finish(self) -> FrameStats {
        if self.hud {
            hud::clear_line();
        }
        self.stats
    }
}

/// Read landmark frames from `input` until EOF or Ctrl+C, dispatching every
/// accepted gesture through `transport`
pub fn run_pipeline(
    config: &Config,
    input: &str,
    transport: Box<dyn Transport>,
    hud: bool,
) -> anyhow::Result<FrameStats> {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || r.store(false, Ordering::SeqCst))?;

    let reader = open_input(input)?;
    let (frame_tx, frame_rx) = flume::bounded::<FrameResult>(FRAME_QUEUE);
    let reader_handle = spawn_reader(reader, frame_tx, running.clone());

    let dispatcher = Dispatcher::new(transport);
    info!(
        "reading landmarks from {}, sending via {}",
        if input == "-" { "stdin" } else { input },
        dispatcher.transport_name()
    );
    let mut frame_loop = FrameLoop::new(RecognizerSettings::from(config), dispatcher, hud);

    while running.load(Ordering::SeqCst) {
        match frame_rx.recv_timeout(Duration::from_millis(100)) {
            Ok(frame) => {
                frame_loop.handle(frame);
            }
            Err(flume::RecvTimeoutError::Timeout) => continue,
            Err(flume::RecvTimeoutError::Disconnected) => break,
        }
    }

    // a reader blocked on stdin is left behind on Ctrl+C
    if reader_handle.is_finished() {
        let _ = reader_handle.join();
    }

    Ok(frame_loop.finish())
}
