//! Point masses linked by rigid sticks, falling under gravity.
//!
//! # Example
//! ```rust
//!use glam::Vec2;
//!use stickbox::{properties::Node, simulator::SimulatorBuilder};
//!
//!let mut simulator = SimulatorBuilder::new().paused(false).build();
//!let anchor = simulator.add_node(Node::new(Vec2::new(100.0, 100.0)).with_new(false).with_locked(true));
//!let weight = simulator.add_node(Node::new(Vec2::new(150.0, 100.0)).with_new(false));
//!simulator.add_stick(anchor, weight).unwrap();
//!
//!for _ in 0..100 {
//!    simulator.update(0.016);
//!}
//!assert_eq!(simulator.stick_count(), 1);
//! ```

pub mod error;
pub mod geometry;
pub mod interaction;
pub mod properties;
pub mod renderer;
pub mod scene;
pub mod simulator;
