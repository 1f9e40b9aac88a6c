//! Hand landmark snapshot - one detected hand for one frame
//!
//! Coordinates follow the MediaPipe hand landmarker convention: x and y are
//! normalized to the image (0.0 to 1.0, smaller y is higher), z is depth
//! relative to the wrist.

use std::time::Duration;

/// Number of landmarks the tracker reports per hand
pub const LANDMARK_COUNT: usize = 21;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point2D) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3D {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn xy(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f32; 3]> for Point3D {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

// ============================================================================
// Landmark indices
// ============================================================================

/// The 21 hand landmarks, in tracker output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Landmark {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexMcp = 5,
    IndexPip = 6,
    IndexDip = 7,
    IndexTip = 8,
    MiddleMcp = 9,
    MiddlePip = 10,
    MiddleDip = 11,
    MiddleTip = 12,
    RingMcp = 13,
    RingPip = 14,
    RingDip = 15,
    RingTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

impl Landmark {
    pub fn index(self) -> usize {
        self as usize
    }

    /// (tip, PIP joint) pairs for the four non-thumb fingers
    pub fn finger_tip_pip_pairs() -> [(Landmark, Landmark); 4] {
        [
            (Landmark::IndexTip, Landmark::IndexPip),
            (Landmark::MiddleTip, Landmark::MiddlePip),
            (Landmark::RingTip, Landmark::RingPip),
            (Landmark::PinkyTip, Landmark::PinkyPip),
        ]
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Reasons a frame from the tracker is rejected before any detector runs
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotError {
    WrongLandmarkCount(usize),
    NonFiniteCoordinate(usize),
    TimestampRegressed { previous: Duration, current: Duration },
    Parse(String),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::WrongLandmarkCount(n) => {
                write!(f, "expected {} landmarks, got {}", LANDMARK_COUNT, n)
            }
            SnapshotError::NonFiniteCoordinate(i) => {
                write!(f, "landmark {} has a non-finite coordinate", i)
            }
            SnapshotError::TimestampRegressed { previous, current } => write!(
                f,
                "timestamp went backwards ({:.3}s -> {:.3}s)",
                previous.as_secs_f64(),
                current.as_secs_f64()
            ),
            SnapshotError::Parse(msg) => write!(f, "unparseable frame: {}", msg),
        }
    }
}

impl std::error::Error for SnapshotError {}

// ============================================================================
// Snapshot
// ============================================================================

/// All 21 landmarks of one hand, stamped with the frame's capture time
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkSnapshot {
    points: [Point3D; LANDMARK_COUNT],
    timestamp: Duration,
}

impl LandmarkSnapshot {
    pub fn new(points: [Point3D; LANDMARK_COUNT], timestamp: Duration) -> Self {
        Self { points, timestamp }
    }

    /// Build a snapshot from raw tracker output, rejecting malformed frames
    pub fn from_points(raw: &[[f32; 3]], timestamp: Duration) -> Result<Self, SnapshotError> {
        if raw.len() != LANDMARK_COUNT {
            return Err(SnapshotError::WrongLandmarkCount(raw.len()));
        }

        let mut points = [Point3D::default(); LANDMARK_COUNT];
        for (i, (slot, p)) in points.iter_mut().zip(raw).enumerate() {
            let point = Point3D::from(*p);
            if !point.is_finite() {
                return Err(SnapshotError::NonFiniteCoordinate(i));
            }
            *slot = point;
        }

        Ok(Self { points, timestamp })
    }

    pub fn get(&self, landmark: Landmark) -> Point3D {
        self.points[landmark.index()]
    }

    pub fn points(&self) -> &[Point3D; LANDMARK_COUNT] {
        &self.points
    }

    pub fn timestamp(&self) -> Duration {
        self.timestamp
    }

    pub fn index_tip(&self) -> Point2D {
        self.get(Landmark::IndexTip).xy()
    }
}
