//! Minimal transform-graph buffer
//!
//! Keeps the latest parent→child transform per child frame and answers 2D
//! position queries by composing transforms up the parent chain. This is
//! the planar slice of a TF listener: translation in x/y plus yaw.

use super::{PositionSource, TransformUnavailable};
use crate::common::types::Point2D;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Latest known transform of a child frame relative to its parent
#[derive(Debug, Clone)]
struct FrameEdge {
    parent: String,
    x: f64,
    y: f64,
    yaw: f64,
}

/// Buffer of the latest transform per child frame.
///
/// Each frame has at most one parent, so the buffer is a forest; a lookup
/// succeeds when the reference frame is an ancestor of the body frame.
#[derive(Debug, Default)]
pub struct TfTree {
    edges: HashMap<String, FrameEdge>,
}

impl TfTree {
    /// Create an empty buffer
    pub fn new() -> Self {
        TfTree {
            edges: HashMap::new(),
        }
    }

    /// Record the latest transform of `child` relative to `parent`.
    ///
    /// Overwrites any previous transform for `child`; only the newest
    /// sample is kept.
    pub fn set_transform(&mut self, parent: &str, child: &str, x: f64, y: f64, yaw: f64) {
        self.edges.insert(
            child.to_string(),
            FrameEdge {
                parent: parent.to_string(),
                x,
                y,
                yaw,
            },
        );
    }

    /// Position of `body_frame`'s origin expressed in `reference_frame`.
    ///
    /// Walks from the body frame up the parent chain, composing each
    /// transform, until the reference frame is met. Fails if the chain
    /// breaks before reaching it.
    pub fn position_of(
        &self,
        reference_frame: &str,
        body_frame: &str,
    ) -> Result<Point2D, TransformUnavailable> {
        let mut point: Point2D = (0.0, 0.0);
        let mut frame = body_frame;

        // Walking more edges than the buffer holds means a cycle.
        for _ in 0..=self.edges.len() {
            if frame == reference_frame {
                return Ok(point);
            }
            let edge = self
                .edges
                .get(frame)
                .ok_or_else(|| TransformUnavailable::new(reference_frame, body_frame))?;
            let (sin, cos) = edge.yaw.sin_cos();
            point = (
                edge.x + cos * point.0 - sin * point.1,
                edge.y + sin * point.0 + cos * point.1,
            );
            frame = &edge.parent;
        }
        Err(TransformUnavailable::new(reference_frame, body_frame))
    }
}

impl PositionSource for Arc<Mutex<TfTree>> {
    fn locate(
        &self,
        reference_frame: &str,
        body_frame: &str,
    ) -> Result<Point2D, TransformUnavailable> {
        self.lock().unwrap().position_of(reference_frame, body_frame)
    }
}
