//! Position lookup for the goal sender
//!
//! The traversal logic never talks to the transform system directly; it
//! asks a [`PositionSource`] where the robot currently is. The ROS node
//! backs this with a [`tf_tree::TfTree`] fed from `/tf`; tests back it
//! with whatever scripted source they need.

pub mod tf_tree;

use crate::common::types::Point2D;
use thiserror::Error;

/// The transform graph has no path between the two frames right now.
///
/// Expected and recoverable (transforms not yet received, or timed out);
/// the control tick treats it as "not yet reached" and retries next tick.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("transform from '{reference_frame}' to '{body_frame}' is unavailable")]
pub struct TransformUnavailable {
    pub reference_frame: String,
    pub body_frame: String,
}

impl TransformUnavailable {
    pub fn new(reference_frame: &str, body_frame: &str) -> Self {
        TransformUnavailable {
            reference_frame: reference_frame.to_string(),
            body_frame: body_frame.to_string(),
        }
    }
}

/// Source of the robot's current 2D position.
///
/// `locate` re-queries the underlying transform source on every call;
/// nothing is cached here.
pub trait PositionSource {
    /// Current position of `body_frame` expressed in `reference_frame`.
    fn locate(&self, reference_frame: &str, body_frame: &str)
        -> Result<Point2D, TransformUnavailable>;
}
