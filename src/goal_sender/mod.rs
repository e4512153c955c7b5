//! Reach detection and waypoint advancement
//!
//! One `GoalSender` tick checks whether the robot has entered the active
//! waypoint's acceptance disc and, if so, moves the traversal on to the
//! next waypoint. It decides *when* a goal is satisfied and *which* goal
//! is active; it plans nothing.

use crate::common::squared_distance;
use crate::position::PositionSource;
use crate::waypoint::WaypointManager;
use std::sync::{Arc, Mutex};

/// Drives the waypoint traversal from a periodic control tick.
///
/// The manager is shared with the goal-update channel; both sides go
/// through the same mutex, so a reload can never interleave with the
/// read-then-advance of a tick.
pub struct GoalSender<P: PositionSource> {
    manager: Arc<Mutex<WaypointManager>>,
    position_source: P,
    reference_frame: String,
    body_frame: String,
}

impl<P: PositionSource> GoalSender<P> {
    /// Create a new goal sender
    pub fn new(
        manager: Arc<Mutex<WaypointManager>>,
        position_source: P,
        reference_frame: &str,
        body_frame: &str,
    ) -> Self {
        GoalSender {
            manager,
            position_source,
            reference_frame: reference_frame.to_string(),
            body_frame: body_frame.to_string(),
        }
    }

    /// Run one control tick.
    ///
    /// No-op once the sequence is exhausted. A failed position lookup
    /// skips the tick: the transform is simply not available yet, the
    /// cursor stays put and the next tick retries.
    pub fn once(&self) {
        let mut manager = self.manager.lock().unwrap();
        if manager.is_end() {
            return;
        }

        let robot = match self
            .position_source
            .locate(&self.reference_frame, &self.body_frame)
        {
            Ok(point) => point,
            Err(_) => return,
        };

        // Cursor was checked above and the lock is still held, so the
        // active waypoint read cannot fail.
        let waypoint = match manager.active() {
            Ok(waypoint) => *waypoint,
            Err(_) => return,
        };

        let sqr_distance = squared_distance(robot, waypoint.position);
        let sqr_radius = waypoint.radius * waypoint.radius;

        // Strictly inside the disc; sitting exactly on the boundary does
        // not count as arrived.
        if sqr_distance < sqr_radius {
            match manager.advance() {
                Ok(true) => println!(
                    "Waypoint {} reached, heading to waypoint {}",
                    manager.cursor() - 1,
                    manager.cursor()
                ),
                Ok(false) => println!("Waypoint {} reached, sequence complete", manager.cursor() - 1),
                Err(e) => eprintln!("Failed to advance waypoint cursor: {}", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::Point2D;
    use crate::position::TransformUnavailable;
    use crate::waypoint::Waypoint;

    /// Position source that always reports the same point
    struct FixedPosition(Point2D);

    impl PositionSource for FixedPosition {
        fn locate(&self, _: &str, _: &str) -> Result<Point2D, TransformUnavailable> {
            Ok(self.0)
        }
    }

    /// Position source whose transform is never available
    struct NoPosition;

    impl PositionSource for NoPosition {
        fn locate(
            &self,
            reference_frame: &str,
            body_frame: &str,
        ) -> Result<Point2D, TransformUnavailable> {
            Err(TransformUnavailable::new(reference_frame, body_frame))
        }
    }

    fn manager_with(waypoints: Vec<Waypoint>) -> Arc<Mutex<WaypointManager>> {
        let mut manager = WaypointManager::new();
        manager.reload(waypoints);
        Arc::new(Mutex::new(manager))
    }

    #[test]
    fn robot_inside_radius_advances_to_end() {
        let manager = manager_with(vec![Waypoint::new(0.0, 0.0, 1.0)]);
        let sender = GoalSender::new(Arc::clone(&manager), FixedPosition((0.5, 0.0)), "map", "base_link");

        sender.once();
        assert!(manager.lock().unwrap().is_end());

        // Exhausted; further ticks are no-ops.
        sender.once();
        assert!(manager.lock().unwrap().is_end());
    }

    #[test]
    fn robot_outside_radius_does_not_advance() {
        let manager = manager_with(vec![Waypoint::new(0.0, 0.0, 1.0)]);
        let sender = GoalSender::new(Arc::clone(&manager), FixedPosition((2.0, 0.0)), "map", "base_link");

        sender.once();
        assert_eq!(manager.lock().unwrap().cursor(), 0);
    }

    #[test]
    fn robot_exactly_on_boundary_has_not_arrived() {
        let manager = manager_with(vec![Waypoint::new(0.0, 0.0, 1.0)]);
        let sender = GoalSender::new(Arc::clone(&manager), FixedPosition((1.0, 0.0)), "map", "base_link");

        sender.once();
        assert_eq!(manager.lock().unwrap().cursor(), 0);
    }

    #[test]
    fn one_tick_advances_at_most_one_waypoint() {
        let manager = manager_with(vec![
            Waypoint::new(0.0, 0.0, 1.0),
            Waypoint::new(5.0, 5.0, 0.5),
        ]);
        let sender = GoalSender::new(Arc::clone(&manager), FixedPosition((0.0, 0.0)), "map", "base_link");

        // First tick satisfies waypoint 0 and moves on; the robot is not
        // within waypoint 1's radius, so the next tick holds position.
        sender.once();
        assert_eq!(manager.lock().unwrap().cursor(), 1);
        sender.once();
        assert_eq!(manager.lock().unwrap().cursor(), 1);
    }

    #[test]
    fn unavailable_transform_skips_the_tick() {
        let manager = manager_with(vec![Waypoint::new(0.0, 0.0, 1.0)]);
        let sender = GoalSender::new(Arc::clone(&manager), NoPosition, "map", "base_link");

        sender.once();
        assert_eq!(manager.lock().unwrap().cursor(), 0);
        assert!(!manager.lock().unwrap().is_end());
    }

    #[test]
    fn zero_radius_waypoint_is_never_satisfied_nearby() {
        let manager = manager_with(vec![Waypoint::new(0.0, 0.0, 0.0)]);
        let sender = GoalSender::new(Arc::clone(&manager), FixedPosition((0.0, 1e-9)), "map", "base_link");

        sender.once();
        assert_eq!(manager.lock().unwrap().cursor(), 0);
    }

    #[test]
    fn reload_to_empty_sequence_makes_ticks_no_ops() {
        let manager = manager_with(vec![Waypoint::new(0.0, 0.0, 1.0)]);
        let sender = GoalSender::new(Arc::clone(&manager), FixedPosition((0.0, 0.0)), "map", "base_link");

        manager.lock().unwrap().reload(Vec::new());
        assert!(manager.lock().unwrap().is_end());
        sender.once();
        assert!(manager.lock().unwrap().is_end());
    }

    #[test]
    fn reload_mid_traversal_restarts_from_the_new_sequence() {
        let manager = manager_with(vec![
            Waypoint::new(0.0, 0.0, 1.0),
            Waypoint::new(5.0, 5.0, 1.0),
        ]);
        let sender = GoalSender::new(Arc::clone(&manager), FixedPosition((0.0, 0.0)), "map", "base_link");

        sender.once();
        assert_eq!(manager.lock().unwrap().cursor(), 1);

        // A new goal list arrives between ticks.
        manager
            .lock()
            .unwrap()
            .reload(vec![Waypoint::new(0.0, 0.0, 2.0), Waypoint::new(8.0, 8.0, 1.0)]);
        assert_eq!(manager.lock().unwrap().cursor(), 0);

        sender.once();
        assert_eq!(manager.lock().unwrap().cursor(), 1);
    }
}
