use goal_sender_core::common::types::Point2D;
use goal_sender_core::position::{PositionSource, TransformUnavailable};
use goal_sender_core::{GoalSender, Waypoint, WaypointManager};
use std::sync::{Arc, Mutex};

/// Scripted position source: replays a fixed series of robot positions,
/// then keeps reporting the last one.
struct ScriptedPosition {
    positions: Mutex<Vec<Point2D>>,
    index: Mutex<usize>,
}

impl ScriptedPosition {
    fn new(positions: Vec<Point2D>) -> Self {
        ScriptedPosition {
            positions: Mutex::new(positions),
            index: Mutex::new(0),
        }
    }
}

impl PositionSource for ScriptedPosition {
    fn locate(&self, _: &str, _: &str) -> Result<Point2D, TransformUnavailable> {
        let positions = self.positions.lock().unwrap();
        let mut index = self.index.lock().unwrap();
        let point = positions[(*index).min(positions.len() - 1)];
        *index += 1;
        Ok(point)
    }
}

fn main() {
    println!("Initializing goal sender test drive...");

    let manager = Arc::new(Mutex::new(WaypointManager::new()));

    // A short patrol: origin, then out to (2, 2), then back near origin.
    manager.lock().unwrap().reload(vec![
        Waypoint::new(0.0, 0.0, 0.5),
        Waypoint::new(2.0, 2.0, 0.5),
        Waypoint::new(0.0, 1.0, 0.5),
    ]);

    // The "robot" drifts toward each waypoint over a few ticks.
    let source = ScriptedPosition::new(vec![
        (1.0, 1.0),
        (0.4, 0.4),
        (0.1, 0.1), // inside waypoint 0
        (1.0, 1.0),
        (1.9, 1.9), // inside waypoint 1
        (1.0, 1.5),
        (0.2, 1.1), // inside waypoint 2
    ]);

    let goal_sender = GoalSender::new(Arc::clone(&manager), source, "map", "base_link");

    for tick in 0..10 {
        goal_sender.once();
        let manager = manager.lock().unwrap();
        println!(
            "tick {}: cursor={}/{}, done={}",
            tick,
            manager.cursor(),
            manager.len(),
            manager.is_end()
        );
    }

    if manager.lock().unwrap().is_end() {
        println!("All waypoints reached!");
    } else {
        println!("Traversal incomplete");
    }
}
