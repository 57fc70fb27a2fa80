use glium::{
    glutin::surface::WindowSurface, implement_vertex, uniforms::Uniforms, Display,
    DrawParameters, Frame, Program, Surface,
};

use crate::{interaction::STICK_WIDTH, simulator::Simulator};

use super::{rgb, shapes, Vertex, LOCKED_NODE_COLOR, NODE_COLOR};

static VERTEX_SHADER_SRC: &str = r#"
#version 150

in vec3 position;
in vec4 color;
out vec4 vertex_color;

uniform mat4 projection;

void main() {
    vertex_color = color;
    gl_Position = projection * vec4(position, 1.0);
}
"#;

static INSTANCE_SHADER_SRC: &str = r#"
#version 150

in vec3 position;
in vec3 color_attr;
in vec3 world_position;
in float scale;

out vec4 vertex_color;

uniform mat4 projection;

void main() {
    vertex_color = vec4(color_attr, 1.0);
    gl_Position = projection * vec4((position*scale)+world_position, 1.0);
}
"#;

static FRAGMENT_SHADER_SRC: &str = r#"
#version 140

in vec4 vertex_color;
out vec4 color;

void main() {
    color = vec4(vertex_color);
}
"#;

/// Segments of the circle every node instance is drawn with
const NODE_RESOLUTION: usize = 10;

#[derive(Copy, Clone)]
struct Attr {
    color_attr: [f32; 3],
    world_position: [f32; 3],
    scale: f32,
}
implement_vertex!(Attr, color_attr, world_position, scale);

/// Shader programs, compiled once per window
pub struct Programs {
    flat: Program,
    instanced: Program,
}

impl Programs {
    pub fn new(display: &Display<WindowSurface>) -> Self {
        Self {
            flat: Program::from_source(display, VERTEX_SHADER_SRC, FRAGMENT_SHADER_SRC, None)
                .expect("failed to compile flat shader"),
            instanced: Program::from_source(
                display,
                INSTANCE_SHADER_SRC,
                FRAGMENT_SHADER_SRC,
                None,
            )
            .expect("failed to compile instance shader"),
        }
    }
}

/// Draws a triangle list
pub fn draw_shapes<U: Uniforms>(
    shape: &[Vertex],
    target: &mut Frame,
    display: &Display<WindowSurface>,
    programs: &Programs,
    uniforms: &U,
    params: &DrawParameters,
) {
    if shape.is_empty() {
        return;
    }

    let vertex_buffer =
        glium::VertexBuffer::new(display, shape).expect("failed to create vertex buffer");
    let indices = glium::index::NoIndices(glium::index::PrimitiveType::TrianglesList);

    target
        .draw(&vertex_buffer, indices, &programs.flat, uniforms, params)
        .expect("failed to draw shapes");
}

/// Draws every stick as a band colored by its stress
pub fn draw_sticks<U: Uniforms>(
    simulator: &Simulator,
    target: &mut Frame,
    display: &Display<WindowSurface>,
    programs: &Programs,
    uniforms: &U,
    params: &DrawParameters,
) {
    let mut shape: Vec<Vertex> = vec![];

    for stick in simulator.sticks() {
        shape.append(&mut shapes::thick_line(
            stick.a,
            stick.b,
            STICK_WIDTH,
            rgb(stick.color),
        ));
    }

    draw_shapes(&shape, target, display, programs, uniforms, params);
}

/// Draws every node as a circle, locked nodes stand out in red
pub fn draw_nodes<U: Uniforms>(
    simulator: &Simulator,
    target: &mut Frame,
    display: &Display<WindowSurface>,
    programs: &Programs,
    uniforms: &U,
    params: &DrawParameters,
) {
    if simulator.node_count() == 0 {
        return;
    }

    let shape = shapes::circle([0.0, 0.0, 0.0], [0.0, 0.0, 0.0, 0.0], 1.0, NODE_RESOLUTION);

    let attr_list: Vec<Attr> = simulator
        .nodes()
        .map(|(_, node)| {
            let color = if node.locked {
                rgb(LOCKED_NODE_COLOR)
            } else {
                rgb(NODE_COLOR)
            };
            Attr {
                color_attr: [color[0], color[1], color[2]],
                world_position: [node.position.x, node.position.y, 0.0],
                scale: simulator.node_radius(),
            }
        })
        .collect();

    let vertex_buffer =
        glium::VertexBuffer::new(display, &shape).expect("failed to create vertex buffer");
    let instance_buffer = glium::vertex::VertexBuffer::dynamic(display, &attr_list)
        .expect("failed to create instance buffer");
    let indices = glium::index::NoIndices(glium::index::PrimitiveType::TrianglesList);

    target
        .draw(
            (
                &vertex_buffer,
                instance_buffer
                    .per_instance()
                    .expect("instancing is not supported"),
            ),
            indices,
            &programs.instanced,
            uniforms,
            params,
        )
        .expect("failed to draw nodes");
}
