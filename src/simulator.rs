use glam::Vec2;
use log::debug;
use petgraph::{
    stable_graph::{EdgeIndex, NodeIndex, StableGraph},
    visit::{EdgeRef, IntoEdgeReferences},
    Undirected,
};

use crate::{
    error::SimulationError,
    geometry::distance,
    properties::{Node, Stick},
};

/// Stable handle of a node. Stays valid until the node itself is removed.
pub type NodeHandle = NodeIndex<u32>;
/// Stable handle of a stick. Stays valid until the stick or one of its nodes is removed.
pub type StickHandle = EdgeIndex<u32>;

type Mesh = StableGraph<Node, Stick, Undirected, u32>;

/// What the renderer needs to know about a stick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StickView {
    pub handle: StickHandle,
    pub a: Vec2,
    pub b: Vec2,
    pub stress: f32,
    pub color: [u8; 3],
}

/// Owns every node and stick and advances them in time.
///
/// Sticks are the edges of the node graph, so the adjacency list of a node
/// doubles as its list of incident sticks.
#[derive(Clone, Debug)]
pub struct Simulator {
    mesh: Mesh,
    paused: bool,
    stress: bool,
    gravity: f32,
    floor: f32,
    node_radius: f32,
    max_stress: f32,
    min_delta_time: f32,
}

impl Simulator {
    pub fn builder() -> SimulatorBuilder {
        SimulatorBuilder::default()
    }

    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        self.mesh.add_node(node)
    }

    /// Links `a` and `b` with a stick whose rest length is their current distance.
    pub fn add_stick(
        &mut self,
        a: NodeHandle,
        b: NodeHandle,
    ) -> Result<StickHandle, SimulationError> {
        if a == b {
            return Err(SimulationError::SelfLink(a));
        }
        let node_a = self
            .mesh
            .node_weight(a)
            .ok_or(SimulationError::MissingNode(a))?;
        let node_b = self
            .mesh
            .node_weight(b)
            .ok_or(SimulationError::MissingNode(b))?;
        if let Some(existing) = self.mesh.find_edge(a, b) {
            return Err(SimulationError::DuplicateStick(existing));
        }

        let stick = Stick::new(node_a, node_b);
        Ok(self.mesh.add_edge(a, b, stick))
    }

    /// Removes the node together with every stick attached to it.
    pub fn remove_node(&mut self, n: NodeHandle) -> Result<Node, SimulationError> {
        if !self.mesh.contains_node(n) {
            return Err(SimulationError::MissingNode(n));
        }
        let attached = self.mesh.edges(n).count();
        let node = self
            .mesh
            .remove_node(n)
            .ok_or(SimulationError::MissingNode(n))?;
        debug!("Removed node {} and {} sticks", n.index(), attached);
        Ok(node)
    }

    pub fn remove_stick(&mut self, s: StickHandle) -> Result<Stick, SimulationError> {
        self.mesh
            .remove_edge(s)
            .ok_or(SimulationError::MissingStick(s))
    }

    /// Drops all nodes and sticks
    pub fn clear(&mut self) {
        self.mesh.clear();
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_paused(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// All nodes are integrated first, then each stick is either broken (if it is
    /// stretched past `max_stress`) or relaxed, in stick order.
    /// `dt` is raised to `min_delta_time` if smaller.
    pub fn update(&mut self, dt: f32) {
        if self.paused {
            return;
        }
        let dt = dt.max(self.min_delta_time);
        let ground = self.ground();

        let nodes: Vec<NodeHandle> = self.mesh.node_indices().collect();
        for n in nodes {
            self.mesh[n].integrate(dt, self.gravity, ground);
        }

        // Work on a snapshot so sticks can be dropped while walking them
        let sticks: Vec<StickHandle> = self.mesh.edge_indices().collect();
        let mut broken = 0;
        for s in sticks {
            let Some((a, b)) = self.mesh.edge_endpoints(s) else {
                continue;
            };
            let mut node_a = self.mesh[a];
            let mut node_b = self.mesh[b];
            let stick = &self.mesh[s];

            if self.stress && stick.stress(&node_a, &node_b) > self.max_stress {
                self.mesh.remove_edge(s);
                broken += 1;
                continue;
            }

            if stick.relax(&mut node_a, &mut node_b) {
                self.mesh[a] = node_a;
                self.mesh[b] = node_b;
            }
        }

        if broken > 0 {
            debug!("{} sticks broke under stress", broken);
        }
    }

    pub fn node(&self, n: NodeHandle) -> Option<&Node> {
        self.mesh.node_weight(n)
    }

    pub fn node_mut(&mut self, n: NodeHandle) -> Option<&mut Node> {
        self.mesh.node_weight_mut(n)
    }

    pub fn contains_node(&self, n: NodeHandle) -> bool {
        self.mesh.contains_node(n)
    }

    pub fn stick(&self, s: StickHandle) -> Option<&Stick> {
        self.mesh.edge_weight(s)
    }

    pub fn stick_endpoints(&self, s: StickHandle) -> Option<(NodeHandle, NodeHandle)> {
        self.mesh.edge_endpoints(s)
    }

    /// The stick linking `a` and `b` in either direction
    pub fn find_stick(&self, a: NodeHandle, b: NodeHandle) -> Option<StickHandle> {
        self.mesh.find_edge(a, b)
    }

    /// Handles of all sticks attached to `n`
    pub fn incident_sticks(&self, n: NodeHandle) -> Vec<StickHandle> {
        self.mesh.edges(n).map(|e| e.id()).collect()
    }

    pub fn stress(&self, s: StickHandle) -> Option<f32> {
        let (a, b) = self.mesh.edge_endpoints(s)?;
        Some(self.mesh[s].stress(&self.mesh[a], &self.mesh[b]))
    }

    pub fn node_count(&self) -> usize {
        self.mesh.node_count()
    }

    pub fn stick_count(&self) -> usize {
        self.mesh.edge_count()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeHandle, &Node)> + '_ {
        self.mesh.node_indices().map(move |n| (n, &self.mesh[n]))
    }

    pub fn sticks(&self) -> impl Iterator<Item = StickView> + '_ {
        self.mesh.edge_references().map(move |e| {
            let a = &self.mesh[e.source()];
            let b = &self.mesh[e.target()];
            let stick = e.weight();
            StickView {
                handle: e.id(),
                a: a.position,
                b: b.position,
                stress: stick.stress(a, b),
                color: stick.stress_color(a, b, self.max_stress),
            }
        })
    }

    /// Closest node strictly closer than `radius` to `position`
    pub fn nearest_node(&self, position: Vec2, radius: f32) -> Option<NodeHandle> {
        let mut nearest = None;
        let mut nearest_dist = radius;
        for (n, node) in self.nodes() {
            let dist = distance(position, node.position);
            if dist < nearest_dist {
                nearest = Some(n);
                nearest_dist = dist;
            }
        }
        nearest
    }

    /// Sticks whose center lies strictly closer than `radius` to `position`
    pub fn sticks_near(&self, position: Vec2, radius: f32) -> Vec<StickHandle> {
        self.mesh
            .edge_references()
            .filter(|e| {
                let center = Stick::center(&self.mesh[e.source()], &self.mesh[e.target()]);
                distance(position, center) < radius
            })
            .map(|e| e.id())
            .collect()
    }

    /// Lowest y a node center can reach
    pub fn ground(&self) -> f32 {
        self.floor - self.node_radius
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn floor(&self) -> f32 {
        self.floor
    }

    pub fn node_radius(&self) -> f32 {
        self.node_radius
    }

    pub fn max_stress(&self) -> f32 {
        self.max_stress
    }

    pub fn stress_enabled(&self) -> bool {
        self.stress
    }

    pub fn min_delta_time(&self) -> f32 {
        self.min_delta_time
    }
}

impl Default for Simulator {
    fn default() -> Self {
        SimulatorBuilder::default().build()
    }
}

/// Builder for `Simulator`
pub struct SimulatorBuilder {
    paused: bool,
    stress: bool,
    gravity: f32,
    floor: f32,
    node_radius: f32,
    max_stress: f32,
    min_delta_time: f32,
}

impl SimulatorBuilder {
    /// Get a Instance of `SimulatorBuilder` with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// If the simulation starts paused
    pub fn paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    /// If sticks should break when stretched too far
    pub fn stress(mut self, stress: bool) -> Self {
        self.stress = stress;
        self
    }

    /// Downward acceleration in world units per second squared.
    /// Positive values pull towards larger y.
    pub fn gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// The y coordinate of the ground nodes bounce off
    pub fn floor(mut self, floor: f32) -> Self {
        self.floor = floor;
        self
    }

    /// Radius of a node, nodes rest on the floor with their edge
    pub fn node_radius(mut self, node_radius: f32) -> Self {
        self.node_radius = node_radius;
        self
    }

    /// How far a stick may be stretched past its rest length before it breaks.
    /// Compression never breaks a stick.
    pub fn max_stress(mut self, max_stress: f32) -> Self {
        self.max_stress = max_stress;
        self
    }

    /// Smallest time step a single update simulates.
    /// `delta_time` is in seconds
    pub fn min_delta_time(mut self, min_delta_time: f32) -> Self {
        self.min_delta_time = min_delta_time;
        self
    }

    /// Constructs a empty `Simulator`
    pub fn build(self) -> Simulator {
        Simulator {
            mesh: Mesh::default(),
            paused: self.paused,
            stress: self.stress,
            gravity: self.gravity,
            floor: self.floor,
            node_radius: self.node_radius,
            max_stress: self.max_stress,
            min_delta_time: self.min_delta_time,
        }
    }
}

impl Default for SimulatorBuilder {
    /// Get a Instance of `SimulatorBuilder` with default values
    fn default() -> Self {
        Self {
            paused: true,
            stress: true,
            gravity: 500.0,
            floor: 720.0,
            node_radius: 3.0,
            max_stress: 15.0,
            min_delta_time: 0.01,
        }
    }
}
