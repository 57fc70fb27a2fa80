use std::f32::consts::PI;

use glam::Vec2;

use super::Vertex;

/// Axis aligned rectangle with its top left corner at `pos`
pub fn rectangle(pos: [f32; 3], color: [f32; 4], width: f32, height: f32) -> Vec<Vertex> {
    let [x, y, z] = pos;
    let corners = [
        [x, y, z],
        [x + width, y, z],
        [x, y + height, z],
        [x + width, y + height, z],
    ];
    quad(corners, color)
}

pub fn circle(pos: [f32; 3], color: [f32; 4], r: f32, res: usize) -> Vec<Vertex> {
    let mut shape = Vec::with_capacity(3 * res);
    let a = 2.0 * PI / res as f32;

    for i in 0..res {
        let i = i as f32;
        shape.push(Vertex {
            position: pos,
            color,
        });
        shape.push(Vertex {
            position: [
                pos[0] + (r * f32::sin(a * i)),
                pos[1] + (r * f32::cos(a * i)),
                pos[2],
            ],
            color,
        });
        shape.push(Vertex {
            position: [
                pos[0] + (r * f32::sin(a * (i + 1.0))),
                pos[1] + (r * f32::cos(a * (i + 1.0))),
                pos[2],
            ],
            color,
        });
    }

    shape
}

/// Line from `p1` to `p2` as a band of `width`.
/// Degenerate lines produce no vertices.
pub fn thick_line(p1: Vec2, p2: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let Some(direction) = (p2 - p1).try_normalize() else {
        return vec![];
    };
    let offset = direction.perp() * (width * 0.5);

    let corners = [p1 + offset, p2 + offset, p1 - offset, p2 - offset].map(|c| [c.x, c.y, 0.0]);
    quad(corners, color)
}

/// Two triangles covering `[a, b, c, d]` where `a`-`d` and `b`-`c` are diagonals
fn quad(corners: [[f32; 3]; 4], color: [f32; 4]) -> Vec<Vertex> {
    [0, 1, 2, 3, 1, 2]
        .into_iter()
        .map(|i| Vertex {
            position: corners[i],
            color,
        })
        .collect()
}
