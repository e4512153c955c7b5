//! Waypoint traversal core for a mobile robot.
//!
//! Sequences the robot through an ordered list of waypoints: each control
//! tick compares the robot's current position against the active waypoint's
//! acceptance radius and advances the traversal once the robot is inside it.
//! Goal lists can be replaced wholesale at any time, resetting traversal.

pub mod common;
pub mod goal_sender;
pub mod position;
pub mod waypoint;

pub use goal_sender::GoalSender;
pub use position::{PositionSource, TransformUnavailable};
pub use waypoint::{SequenceError, Waypoint, WaypointManager, WaypointSequence};
