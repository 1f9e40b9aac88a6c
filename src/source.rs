//! Landmark frames from the hand tracker, one JSON object per line
//!
//! ```text
//! {"t": 0.033, "hand": [[0.51, 0.72, 0.0], ... 21 points]}
//! {"t": 0.066, "hand": null}
//! ```
//!
//! `t` is seconds since the stream started; without it the frame is stamped
//! by arrival time, counted from the previous frame. Points may also be
//! written as `{"x": .., "y": .., "z": ..}`.

use crate::landmarks::{LandmarkSnapshot, SnapshotError};
use anyhow::Context;
use flume::Sender;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPoint {
    Array([f32; 3]),
    Object {
        x: f32,
        y: f32,
        #[serde(default)]
        z: f32,
    },
}

impl RawPoint {
    fn xyz(&self) -> [f32; 3] {
        match *self {
            RawPoint::Array(p) => p,
            RawPoint::Object { x, y, z } => [x, y, z],
        }
    }
}

#[derive(Debug, Deserialize)]
struct FrameRecord {
    #[serde(default)]
    t: Option<f64>,
    #[serde(default)]
    hand: Option<Vec<RawPoint>>,
}

/// One tracker frame: a capture time and at most one hand
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub timestamp: Duration,
    pub snapshot: Option<LandmarkSnapshot>,
}

pub type FrameResult = Result<Frame, SnapshotError>;

/// Stateful line parser; remembers the last timestamp to reject regressions.
///
/// A frame without `t` is stamped with the last accepted timestamp plus the
/// wall time since that frame arrived, so streams may mix both forms.
pub struct FrameParser {
    last_arrival: Instant,
    last: Option<Duration>,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    pub fn new() -> Self {
        Self {
            last_arrival: Instant::now(),
            last: None,
        }
    }

    /// `None` for blank lines
    pub fn parse_line(&mut self, line: &str) -> Option<FrameResult> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        Some(self.parse_record(line))
    }

    fn parse_record(&mut self, line: &str) -> FrameResult {
        let record: FrameRecord =
            serde_json::from_str(line).map_err(|e| SnapshotError::Parse(e.to_string()))?;

        let timestamp = match record.t {
            Some(t) => Duration::try_from_secs_f64(t)
                .map_err(|_| SnapshotError::Parse(format!("invalid timestamp {}", t)))?,
            None => self
                .last
                .unwrap_or_default()
                .checked_add(self.last_arrival.elapsed())
                .ok_or_else(|| SnapshotError::Parse("arrival time overflow".into()))?,
        };
        if let Some(previous) = self.last {
            if timestamp < previous {
                return Err(SnapshotError::TimestampRegressed {
                    previous,
                    current: timestamp,
                });
            }
        }

        let snapshot = match record.hand {
            Some(points) => {
                let raw: Vec<[f32; 3]> = points.iter().map(RawPoint::xyz).collect();
                Some(LandmarkSnapshot::from_points(&raw, timestamp)?)
            }
            None => None,
        };

        self.last = Some(timestamp);
        self.last_arrival = Instant::now();
        Ok(Frame {
            timestamp,
            snapshot,
        })
    }
}

/// `-` is stdin, anything else a file path
pub fn open_input(path: &str) -> anyhow::Result<Box<dyn BufRead + Send>> {
    if path == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path).with_context(|| format!("opening landmark input {}", path))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Read frames on a background thread until EOF, a read error, shutdown, or
/// the receiver going away. Rejected lines are forwarded as errors so the
/// frame loop can count them.
pub fn spawn_reader(
    reader: Box<dyn BufRead + Send>,
    tx: Sender<FrameResult>,
    running: Arc<AtomicBool>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut parser = FrameParser::new();
        for (n, line) in reader.lines().enumerate() {
            if !running.load(Ordering::SeqCst) {
                break;
            }
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!("landmark input read error: {}", e);
                    break;
                }
            };
            let Some(result) = parser.parse_line(&line) else {
                continue;
            };
            if let Err(e) = &result {
                warn!("line {}: rejected frame: {}", n + 1, e);
            }
            if tx.send(result).is_err() {
                break;
            }
        }
        debug!("landmark reader finished");
    })
}
