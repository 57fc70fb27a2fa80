use glam::Vec2;
use log::{debug, info};
use rand::Rng;

use crate::{
    properties::Node,
    scene,
    simulator::{NodeHandle, Simulator, StickHandle},
};

/// Pointer snaps to nodes closer than this
pub const SNAP_RADIUS: f32 = 20.0;
pub const DELETE_RADIUS: f32 = 10.0;
pub const STICK_WIDTH: f32 = 5.0;

/// Requests that act on the whole simulation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    /// Remove everything and pause
    Clear,
    /// Remove everything, pause and load the sample scene
    Reset,
}

/// Turns pointer gestures into changes of the simulation.
///
/// A left drag links the node under the press with the node under the release,
/// creating nodes where the pointer does not snap to one. Pressing and releasing
/// on the same finished node toggles its lock. Erasing removes the node under the
/// pointer and any stick whose center is close to it.
pub struct Interaction {
    anchor: Option<NodeHandle>,
    snap_radius: f32,
    erase_radius: f32,
}

impl Interaction {
    pub fn new() -> Self {
        Self {
            anchor: None,
            snap_radius: SNAP_RADIUS,
            erase_radius: DELETE_RADIUS + STICK_WIDTH,
        }
    }

    /// The node the pointer snaps to
    pub fn hovered(&self, sim: &Simulator, cursor: Vec2) -> Option<NodeHandle> {
        sim.nearest_node(cursor, self.snap_radius)
    }

    /// Where a node placed now would end up
    pub fn snap_point(&self, sim: &Simulator, cursor: Vec2) -> Vec2 {
        self.hovered(sim, cursor)
            .and_then(|n| sim.node(n))
            .map_or(cursor, |node| node.position)
    }

    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn anchor(&self) -> Option<NodeHandle> {
        self.anchor
    }

    /// The stick that would be created if the drag ended now
    pub fn preview(&self, sim: &Simulator, cursor: Vec2) -> Option<(Vec2, Vec2)> {
        let anchor = sim.node(self.anchor?)?;
        Some((anchor.position, self.snap_point(sim, cursor)))
    }

    /// Starts a drag at the hovered node or at a new node under the pointer
    pub fn press(&mut self, sim: &mut Simulator, cursor: Vec2) -> NodeHandle {
        let anchor = match self.hovered(sim, cursor) {
            Some(n) => n,
            None => sim.add_node(Node::new(cursor)),
        };
        self.anchor = Some(anchor);
        anchor
    }

    /// Ends the drag. Returns the stick it created, if any.
    pub fn release(&mut self, sim: &mut Simulator, cursor: Vec2) -> Option<StickHandle> {
        let anchor = self.anchor.take()?;
        let target = match self.hovered(sim, cursor) {
            Some(n) => n,
            None => sim.add_node(Node::new(cursor)),
        };

        let mut created = None;
        if !sim.contains_node(anchor) {
            debug!("Drag anchor {} vanished before release", anchor.index());
        } else if anchor != target {
            match sim.add_stick(anchor, target) {
                Ok(s) => created = Some(s),
                Err(e) => debug!("Stick not created: {}", e),
            }
        } else if let Some(node) = sim.node_mut(anchor) {
            if !node.is_new {
                node.locked = !node.locked;
            }
        }

        for n in [anchor, target] {
            if let Some(node) = sim.node_mut(n) {
                node.is_new = false;
            }
        }
        created
    }

    /// Forgets the current drag without touching the simulation
    pub fn cancel(&mut self) {
        self.anchor = None;
    }

    /// Removes the hovered node and every stick centered near the pointer.
    /// Does nothing while dragging. Returns how many items were removed.
    pub fn erase(&mut self, sim: &mut Simulator, cursor: Vec2) -> usize {
        if self.is_dragging() {
            return 0;
        }

        let mut removed = 0;
        if let Some(n) = self.hovered(sim, cursor) {
            if sim.remove_node(n).is_ok() {
                removed += 1;
            }
        }
        for s in sim.sticks_near(cursor, self.erase_radius) {
            if sim.remove_stick(s).is_ok() {
                removed += 1;
            }
        }
        removed
    }

    pub fn apply<R: Rng + ?Sized>(&mut self, sim: &mut Simulator, command: Command, rng: &mut R) {
        match command {
            Command::TogglePause => {
                let paused = sim.toggle_paused();
                info!("{}", if paused { "Paused" } else { "Running" });
            }
            Command::Clear => {
                self.cancel();
                sim.clear();
                sim.set_paused(true);
                info!("Cleared simulation");
            }
            Command::Reset => {
                self.cancel();
                sim.clear();
                sim.set_paused(true);
                scene::sample(sim, rng);
            }
        }
    }
}
