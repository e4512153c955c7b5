use anyhow::{Error, Result};
use goal_sender_core::position::tf_tree::TfTree;
use goal_sender_core::{GoalSender, Waypoint, WaypointManager};
use rclrs::{Context, CreateBasicExecutor, Node, RclrsErrorFilter, SpinOptions, QOS_PROFILE_DEFAULT};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

// Import the message types directly from the crates
use nav_msgs::msg::Path;
use tf2_msgs::msg::TFMessage;

struct GoalSenderNode {
    node: Arc<Node>,
    manager: Arc<Mutex<WaypointManager>>,
    tf_tree: Arc<Mutex<TfTree>>,
    goal_subscription: Mutex<Option<Arc<rclrs::Subscription<Path>>>>,
    tf_subscription: Mutex<Option<Arc<rclrs::Subscription<TFMessage>>>>,
    tf_static_subscription: Mutex<Option<Arc<rclrs::Subscription<TFMessage>>>>,
    running: Arc<Mutex<bool>>,
    default_radius: f64,
}

impl GoalSenderNode {
    pub fn new(executor: &rclrs::Executor, name: &str) -> Result<Arc<Self>, rclrs::RclrsError> {
        // Create a node using the executor
        let node = executor.create_node(name)?;

        // Default parameters
        let reference_frame = "map".to_string();
        let body_frame = "base_link".to_string();
        let goal_topic = "goal_waypoints".to_string();
        let default_radius = 0.3;
        let tick_period = Duration::from_millis(100); // 10 Hz

        println!(
            "Using parameters: reference_frame={}, body_frame={}, default_radius={}",
            reference_frame, body_frame, default_radius
        );
        println!("Topics: goals={}, tf=/tf, tf_static=/tf_static", goal_topic);

        let manager = Arc::new(Mutex::new(WaypointManager::new()));
        let tf_tree = Arc::new(Mutex::new(TfTree::new()));

        let running = Arc::new(Mutex::new(true));

        let goal_sender_node = Arc::new(GoalSenderNode {
            node,
            manager: Arc::clone(&manager),
            tf_tree: Arc::clone(&tf_tree),
            goal_subscription: None.into(),
            tf_subscription: None.into(),
            tf_static_subscription: None.into(),
            running,
            default_radius,
        });

        // Set up the goal-list subscription
        let goal_sender_node_clone = Arc::clone(&goal_sender_node);
        let goal_subscription = goal_sender_node.node.create_subscription::<Path, _>(
            &goal_topic,
            QOS_PROFILE_DEFAULT,
            move |msg: Path| {
                goal_sender_node_clone.goal_callback(msg);
            },
        )?;
        *goal_sender_node.goal_subscription.lock().unwrap() = Some(goal_subscription);

        // Set up the transform subscriptions
        let goal_sender_node_clone = Arc::clone(&goal_sender_node);
        let tf_subscription = goal_sender_node.node.create_subscription::<TFMessage, _>(
            "/tf",
            QOS_PROFILE_DEFAULT,
            move |msg: TFMessage| {
                goal_sender_node_clone.tf_callback(msg);
            },
        )?;
        *goal_sender_node.tf_subscription.lock().unwrap() = Some(tf_subscription);

        let goal_sender_node_clone = Arc::clone(&goal_sender_node);
        let tf_static_subscription = goal_sender_node.node.create_subscription::<TFMessage, _>(
            "/tf_static",
            QOS_PROFILE_DEFAULT,
            move |msg: TFMessage| {
                goal_sender_node_clone.tf_callback(msg);
            },
        )?;
        *goal_sender_node.tf_static_subscription.lock().unwrap() = Some(tf_static_subscription);

        // Start the control tick at a fixed rate
        let goal_sender = GoalSender::new(
            Arc::clone(&manager),
            Arc::clone(&tf_tree),
            &reference_frame,
            &body_frame,
        );
        let running_clone = Arc::clone(&goal_sender_node.running);

        thread::spawn(move || {
            while *running_clone.lock().unwrap() {
                goal_sender.once();
                thread::sleep(tick_period);
            }
        });

        Ok(goal_sender_node)
    }

    fn goal_callback(&self, msg: Path) {
        // nav_msgs/Path carries no radius field; a positive z is read as a
        // per-waypoint acceptance radius, anything else takes the default.
        let waypoints: Vec<Waypoint> = msg
            .poses
            .iter()
            .map(|pose_stamped| {
                let position = &pose_stamped.pose.position;
                let radius = if position.z > 0.0 {
                    position.z
                } else {
                    self.default_radius
                };
                Waypoint::new(position.x, position.y, radius)
            })
            .collect();

        println!("Received goal list with {} waypoints", waypoints.len());

        // The list is applied as-is; no content validation here.
        self.manager.lock().unwrap().reload(waypoints);
    }

    fn tf_callback(&self, msg: TFMessage) {
        let mut tf_tree = self.tf_tree.lock().unwrap();
        for ts in &msg.transforms {
            let translation = &ts.transform.translation;
            let q = &ts.transform.rotation;

            // Convert quaternion to Euler angles (we only need yaw/theta)
            let yaw = 2.0 * (q.w * q.z + q.x * q.y).atan2(1.0 - 2.0 * (q.y * q.y + q.z * q.z));

            tf_tree.set_transform(
                &ts.header.frame_id,
                &ts.child_frame_id,
                translation.x,
                translation.y,
                yaw,
            );
        }
    }
}

impl Drop for GoalSenderNode {
    fn drop(&mut self) {
        // Stop the tick thread when the node is dropped
        if let Ok(mut running) = self.running.lock() {
            *running = false;
        }
    }
}

fn main() -> Result<(), Error> {
    println!("Initializing Goal Sender Node...");

    // Create the ROS 2 context and executor
    let mut executor = Context::default_from_env()?.create_basic_executor();

    let _goal_sender_node = GoalSenderNode::new(&executor, "goal_sender")?;

    println!("Goal Sender Node initialized. Starting to spin...");

    // Spin the executor to process callbacks
    executor
        .spin(SpinOptions::default())
        .first_error()
        .map_err(|err| err.into())
}
