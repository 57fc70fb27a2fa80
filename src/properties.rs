use glam::Vec2;

use crate::geometry::{clamp_channel, distance};

/// A point mass moved by Verlet integration.
/// The velocity is implicit in the difference between `position` and `previous`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub position: Vec2,
    pub previous: Vec2,
    pub mass: f32,
    /// Locked nodes are never moved by integration or by sticks
    pub locked: bool,
    /// Set while a drag gesture is still creating the node, excludes it from integration
    pub is_new: bool,
}

impl Node {
    /// A free node at rest with unit mass that is still being placed.
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            previous: position,
            mass: 1.0,
            locked: false,
            is_new: true,
        }
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn with_new(mut self, is_new: bool) -> Self {
        self.is_new = is_new;
        self
    }

    /// If the node takes part in integration
    pub fn is_simulated(&self) -> bool {
        !self.locked && !self.is_new
    }

    /// Advances the node by one Störmer-Verlet step.
    ///
    /// `ground` is the lowest y the node's center may reach (floor minus node radius).
    /// Crossing it clamps the node onto the ground and rewrites `previous` so the
    /// node bounces back with half its vertical speed.
    pub fn integrate(&mut self, dt: f32, gravity: f32, ground: f32) {
        if !self.is_simulated() {
            return;
        }

        let current = self.position;
        let mut next = Vec2::new(
            2.0 * current.x - self.previous.x,
            2.0 * current.y - self.previous.y + gravity * dt * dt * self.mass,
        );
        let mut previous = current;

        if next.y > ground {
            let excess = next.y - ground;
            previous.y = next.y + 0.5 * (next.y - previous.y) - excess;
            next.y = ground;
        }

        self.position = next;
        self.previous = previous;
    }
}

/// Distance constraint between two nodes.
/// The endpoints are kept by the simulator, a `Stick` only knows its rest length.
#[derive(Debug, Clone)]
pub struct Stick {
    len: f32,
    half_len: f32,
}

impl Stick {
    /// Rest length is taken from the current distance between `a` and `b`
    pub fn new(a: &Node, b: &Node) -> Self {
        let len = distance(a.position, b.position);
        Self {
            len,
            half_len: len * 0.5,
        }
    }

    pub fn rest_len(&self) -> f32 {
        self.len
    }

    pub fn half_len(&self) -> f32 {
        self.half_len
    }

    pub fn dist(a: &Node, b: &Node) -> f32 {
        distance(a.position, b.position)
    }

    pub fn center(a: &Node, b: &Node) -> Vec2 {
        (a.position + b.position) * 0.5
    }

    /// Positive when stretched, negative when compressed
    pub fn stress(&self, a: &Node, b: &Node) -> f32 {
        Self::dist(a, b) - self.len
    }

    /// Red grows with stretch, green shrinks with it. Blue is fixed.
    pub fn stress_color(&self, a: &Node, b: &Node, max_stress: f32) -> [u8; 3] {
        let stress = self.stress(a, b);
        [
            clamp_channel(30.0 + stress * 225.0 / max_stress) as u8,
            clamp_channel(120.0 - stress * 8.0) as u8,
            50,
        ]
    }

    /// Moves both endpoints so they sit `len` apart around their current center.
    /// Locked endpoints stay put. Returns `false` if the endpoints coincide,
    /// in which case there is no direction to push along and nothing moves.
    pub fn relax(&self, a: &mut Node, b: &mut Node) -> bool {
        let dist = Self::dist(a, b);
        if dist == 0.0 {
            return false;
        }

        let center = Self::center(a, b);
        let direction = (a.position - b.position) / dist;

        if !a.locked {
            a.position = center + direction * self.half_len;
        }
        if !b.locked {
            b.position = center - direction * self.half_len;
        }
        true
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn free_node(x: f32, y: f32) -> Node {
        Node::new(Vec2::new(x, y)).with_new(false)
    }

    #[test]
    fn test_integrate_at_rest_without_forces() {
        let mut node = free_node(10.0, 20.0);
        for _ in 0..10 {
            node.integrate(0.0, 0.0, 717.0);
        }
        assert_eq!(node.position, Vec2::new(10.0, 20.0));
        assert_eq!(node.previous, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_integrate_from_rest_under_gravity() {
        let mut node = free_node(0.0, 100.0).with_mass(2.0);
        node.integrate(0.1, 500.0, 717.0);

        assert!((node.position.y - (100.0 + 500.0 * 0.1 * 0.1 * 2.0)).abs() < EPSILON);
        assert_eq!(node.position.x, 0.0);
        assert_eq!(node.previous, Vec2::new(0.0, 100.0));
    }

    #[test]
    fn test_integrate_keeps_velocity() {
        let mut node = free_node(5.0, 5.0);
        node.previous = Vec2::new(3.0, 4.0);
        node.integrate(0.5, 0.0, 717.0);
        assert_eq!(node.position, Vec2::new(7.0, 6.0));
        assert_eq!(node.previous, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_integrate_bounces_off_ground() {
        let mut node = free_node(0.0, 716.0);
        node.previous = Vec2::new(0.0, 700.0);
        // 2 * 716 - 700 + 500 * 0.1² = 737, 20 below the ground at 720 - 3
        node.integrate(0.1, 500.0, 720.0 - 3.0);

        assert_eq!(node.position.y, 717.0);
        // 737 + 0.5 * (737 - 716) - 20
        assert!((node.previous.y - 727.5).abs() < EPSILON);
        assert_eq!(node.previous.x, 0.0);
    }

    #[test]
    fn test_integrate_skips_locked_and_new() {
        let mut locked = free_node(1.0, 1.0).with_locked(true);
        locked.previous = Vec2::new(0.0, 0.0);
        locked.integrate(0.1, 500.0, 717.0);
        assert_eq!(locked.position, Vec2::new(1.0, 1.0));

        let mut new = Node::new(Vec2::new(1.0, 1.0));
        new.integrate(0.1, 500.0, 717.0);
        assert_eq!(new.position, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_stick_has_no_stress_when_created() {
        let pairs = [
            ((0.0, 0.0), (3.0, 4.0)),
            ((-12.5, 7.0), (100.0, -3.25)),
            ((1.0, 1.0), (1.0, 1.0)),
        ];
        for ((ax, ay), (bx, by)) in pairs {
            let a = free_node(ax, ay);
            let b = free_node(bx, by);
            let stick = Stick::new(&a, &b);
            assert_eq!(stick.stress(&a, &b), 0.0);
            assert_eq!(stick.half_len(), stick.rest_len() * 0.5);
        }
    }

    #[test]
    fn test_stress_sign() {
        let a = free_node(0.0, 0.0);
        let mut b = free_node(10.0, 0.0);
        let stick = Stick::new(&a, &b);

        b.position.x = 12.0;
        assert!((stick.stress(&a, &b) - 2.0).abs() < EPSILON);
        b.position.x = 7.0;
        assert!((stick.stress(&a, &b) + 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_stress_color() {
        let a = free_node(0.0, 0.0);
        let mut b = free_node(10.0, 0.0);
        let stick = Stick::new(&a, &b);
        assert_eq!(stick.stress_color(&a, &b, 15.0), [30, 120, 50]);

        // stress 15 saturates red, 120 - 120 leaves no green
        b.position.x = 25.0;
        assert_eq!(stick.stress_color(&a, &b, 15.0), [255, 0, 50]);

        b.position.x = 5.0;
        assert_eq!(stick.stress_color(&a, &b, 15.0), [0, 160, 50]);
    }

    #[test]
    fn test_relax_both_free() {
        let mut a = free_node(0.0, 0.0);
        let mut b = free_node(10.0, 0.0);
        let stick = Stick::new(&a, &b);

        a.position = Vec2::new(-2.0, 0.0);
        b.position = Vec2::new(12.0, 0.0);
        assert!(stick.relax(&mut a, &mut b));

        assert!((a.position - Vec2::new(0.0, 0.0)).length() < EPSILON);
        assert!((b.position - Vec2::new(10.0, 0.0)).length() < EPSILON);
        assert!(stick.stress(&a, &b).abs() < EPSILON);
    }

    #[test]
    fn test_relax_with_locked_endpoint() {
        let mut a = free_node(0.0, 0.0).with_locked(true);
        let mut b = free_node(0.0, 10.0);
        let stick = Stick::new(&a, &b);

        b.position = Vec2::new(0.0, 20.0);
        assert!(stick.relax(&mut a, &mut b));

        // center is (0, 10), b lands half a rest length below it
        assert_eq!(a.position, Vec2::new(0.0, 0.0));
        assert!((b.position - Vec2::new(0.0, 15.0)).length() < EPSILON);
    }

    #[test]
    fn test_relax_coincident_endpoints() {
        let mut a = free_node(0.0, 0.0);
        let mut b = free_node(4.0, 0.0);
        let stick = Stick::new(&a, &b);

        b.position = Vec2::new(0.0, 0.0);
        assert!(!stick.relax(&mut a, &mut b));
        assert_eq!(a.position, Vec2::ZERO);
        assert_eq!(b.position, Vec2::ZERO);
    }
}
