//! Waypoint data model and traversal state machine

use crate::common::types::Point2D;
use thiserror::Error;

/// A navigation goal: a target position plus an acceptance radius.
///
/// The robot is considered to have reached the waypoint once its position
/// lies strictly inside the disc of `radius` centered at `position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub position: Point2D,
    pub radius: f64,
}

impl Waypoint {
    /// Create a new waypoint
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Waypoint {
            position: (x, y),
            radius,
        }
    }
}

/// An ordered list of waypoints. Insertion order is the traversal order.
pub type WaypointSequence = Vec<Waypoint>;

/// Error raised when the cursor is read or advanced past the end of the
/// sequence. This is a caller bug: `is_end()` must be checked first.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SequenceError {
    #[error("cursor is past the end of the waypoint sequence; check is_end() first")]
    PastEnd,
}

/// Owns the waypoint sequence and the traversal cursor.
///
/// The cursor is an explicit index ranging over `[0, sequence.len()]`,
/// where `len` is the end marker. Sequence and cursor are only ever
/// replaced together, so the cursor can never alias into a sequence it
/// was not derived from.
pub struct WaypointManager {
    sequence: WaypointSequence,
    cursor: usize,
}

impl WaypointManager {
    /// Create a manager with an empty sequence; the cursor starts at the end.
    pub fn new() -> Self {
        WaypointManager {
            sequence: Vec::new(),
            cursor: 0,
        }
    }

    /// True once every waypoint has been traversed (or none was ever loaded).
    pub fn is_end(&self) -> bool {
        self.cursor == self.sequence.len()
    }

    /// The waypoint the robot is currently driving toward.
    pub fn active(&self) -> Result<&Waypoint, SequenceError> {
        self.sequence.get(self.cursor).ok_or(SequenceError::PastEnd)
    }

    /// Move the cursor to the next waypoint.
    ///
    /// Returns `Ok(false)` if the waypoint just left behind was the last
    /// one, `Ok(true)` if another waypoint is now active.
    pub fn advance(&mut self) -> Result<bool, SequenceError> {
        if self.is_end() {
            return Err(SequenceError::PastEnd);
        }
        self.cursor += 1;
        Ok(!self.is_end())
    }

    /// Replace the whole sequence and restart traversal from its first
    /// waypoint (or straight to the end, if `sequence` is empty).
    ///
    /// May be called at any point, including mid-traversal.
    pub fn reload(&mut self, sequence: WaypointSequence) {
        self.sequence = sequence;
        self.cursor = 0;
    }

    /// Number of waypoints in the current sequence
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Index of the active waypoint; equals `len()` once traversal is done.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Default for WaypointManager {
    fn default() -> Self {
        WaypointManager::new()
    }
}
