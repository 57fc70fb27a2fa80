//! Ready made structures to play with.
//!
//! Every builder adds finished nodes (not new) to the simulator. Builders that
//! need a random orientation take the random source as an argument, so a seeded
//! `StdRng` reproduces the exact same geometry.

use std::f32::consts::PI;

use glam::Vec2;
use log::{info, warn};
use rand::Rng;

use crate::{
    properties::Node,
    simulator::{NodeHandle, Simulator},
};

pub const TEXTILE_MASS: f32 = 0.6;

/// Upper bound (exclusive) of the random orientation in degrees
const MAX_ANGLE_DEGREES: f32 = 359.9;

/// Builds a `width` x `height` lattice spaced `pad` apart with `origin` at the top left.
/// The two top corners are locked, every node is linked to its right and lower neighbour.
///
/// Returns the node handles row by row.
pub fn textile(
    sim: &mut Simulator,
    origin: Vec2,
    width: usize,
    height: usize,
    pad: f32,
) -> Vec<NodeHandle> {
    let mut grid = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let position = origin + Vec2::new(x as f32, y as f32) * pad;
            let node = Node::new(position)
                .with_new(false)
                .with_mass(TEXTILE_MASS)
                .with_locked(y == 0 && (x == 0 || x + 1 == width));
            grid.push(sim.add_node(node));
        }
    }

    let at = |x: usize, y: usize| grid[y * width + x];
    for y in 0..height {
        for x in 0..width.saturating_sub(1) {
            link(sim, at(x, y), at(x + 1, y));
        }
    }
    for y in 0..height.saturating_sub(1) {
        for x in 0..width {
            link(sim, at(x, y), at(x, y + 1));
        }
    }

    grid
}

/// Hangs a chain from a locked anchor at `origin` in a random direction.
/// `length - 2` free nodes follow the anchor, `pad` apart.
///
/// Returns the anchor followed by the chain.
pub fn rope<R: Rng + ?Sized>(
    sim: &mut Simulator,
    rng: &mut R,
    origin: Vec2,
    length: usize,
    pad: f32,
) -> Vec<NodeHandle> {
    let heading = direction(random_angle(rng));

    let mut chain = vec![sim.add_node(Node::new(origin).with_new(false).with_locked(true))];
    for i in 1..length.saturating_sub(1) {
        let node = Node::new(origin + heading * pad * i as f32).with_new(false);
        let n = sim.add_node(node);
        link(sim, chain[i - 1], n);
        chain.push(n);
    }

    chain
}

/// Drops a randomly rotated square with side `width`, braced by both diagonals.
///
/// Corner `a` sits on `origin`, `b` and `d` are one side away at right angles,
/// `c` is the diagonal away between them. Returns `[a, b, c, d]`.
pub fn square<R: Rng + ?Sized>(
    sim: &mut Simulator,
    rng: &mut R,
    origin: Vec2,
    width: f32,
) -> [NodeHandle; 4] {
    let angle = random_angle(rng);
    let mut corner = |offset: f32, reach: f32| {
        let node = Node::new(origin + direction(angle + offset) * reach).with_new(false);
        sim.add_node(node)
    };
    let a = corner(0.0, 0.0);
    let b = corner(0.0, width);
    let c = corner(PI * 0.25, 2.0_f32.sqrt() * width);
    let d = corner(PI * 0.5, width);

    for (from, to) in [(a, b), (b, c), (c, d), (d, a), (a, c), (d, b)] {
        link(sim, from, to);
    }

    [a, b, c, d]
}

/// The scene the playground starts with: a textile, a rope and three squares.
pub fn sample<R: Rng + ?Sized>(sim: &mut Simulator, rng: &mut R) {
    textile(sim, Vec2::new(50.0, 200.0), 17, 15, 20.0);
    rope(sim, rng, Vec2::new(600.0, 200.0), 15, 20.0);
    for origin in [
        Vec2::new(900.0, 300.0),
        Vec2::new(1000.0, 200.0),
        Vec2::new(1100.0, 350.0),
    ] {
        square(sim, rng, origin, 50.0);
    }
    info!(
        "Loaded sample scene with {} nodes and {} sticks",
        sim.node_count(),
        sim.stick_count()
    );
}

fn link(sim: &mut Simulator, a: NodeHandle, b: NodeHandle) {
    // Builders only link fresh, distinct nodes
    if let Err(e) = sim.add_stick(a, b) {
        warn!("Scene builder could not link nodes: {}", e);
    }
}

fn random_angle<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen_range(0.0..MAX_ANGLE_DEGREES).to_radians()
}

/// Unit vector for `angle`, measured from the +y axis towards +x
fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.sin(), angle.cos())
}
