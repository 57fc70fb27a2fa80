use std::time::{Duration, Instant};

use glam::{Mat4, Vec2};
use glium::{glutin::surface::WindowSurface, implement_vertex, uniform, Display, Surface};
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, Event, MouseButton, VirtualKeyCode, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::Window,
};

use crate::{
    interaction::{Command, Interaction, DELETE_RADIUS, STICK_WIDTH},
    simulator::Simulator,
};
use draw::Programs;
use event::EventManager;

mod draw;
mod event;
mod shapes;

pub const WINDOW_WIDTH: u32 = 1280;
pub const WINDOW_HEIGHT: u32 = 720;

const FRAME_INTERVAL: Duration = Duration::from_millis(10);
const TITLE_INTERVAL_MS: u128 = 500;

const WHITE: [u8; 3] = [255, 255, 255];
const NODE_COLOR: [u8; 3] = [255, 255, 255];
const LOCKED_NODE_COLOR: [u8; 3] = [255, 75, 75];
const NODE_PREVIEW_COLOR: [u8; 3] = [85, 85, 160];
const DELETING_COLOR: [u8; 3] = [255, 105, 105];

const COMMAND_KEYS: [(VirtualKeyCode, Command); 3] = [
    (VirtualKeyCode::Space, Command::TogglePause),
    (VirtualKeyCode::R, Command::Clear),
    (VirtualKeyCode::E, Command::Reset),
];

#[derive(Copy, Clone, Debug)]
struct Vertex {
    position: [f32; 3],
    color: [f32; 4],
}
implement_vertex!(Vertex, position, color);

/// Opaque color from 0-255 channels
fn rgb(color: [u8; 3]) -> [f32; 4] {
    [
        color[0] as f32 / 255.0,
        color[1] as f32 / 255.0,
        color[2] as f32 / 255.0,
        1.0,
    ]
}

/// Window that shows the simulation and lets the user edit it with the mouse.
///
/// Left drag links nodes, right hold erases, Space pauses, R clears and E
/// reloads the sample scene.
pub struct Renderer {
    simulator: Simulator,
    interaction: Interaction,
    events: EventManager,
    rng: StdRng,
}

impl Renderer {
    pub fn new(simulator: Simulator) -> Self {
        Self {
            simulator,
            interaction: Interaction::new(),
            events: EventManager::new(),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn create_window(self) {
        let event_loop = winit::event_loop::EventLoopBuilder::new().build();

        let (window, display) = glium::backend::glutin::SimpleWindowBuilder::new()
            .with_title("stickbox")
            .with_inner_size(WINDOW_WIDTH, WINDOW_HEIGHT)
            .build(&event_loop);

        self.run_render_loop(event_loop, display, window);
    }

    fn run_render_loop(
        mut self,
        event_loop: EventLoop<()>,
        display: Display<WindowSurface>,
        window: Window,
    ) {
        //Timing
        let mut last_frame = Instant::now();
        let mut last_title = Instant::now();

        let programs = Programs::new(&display);
        info!("Window opened, simulation is paused. Press space to start.");

        event_loop.run(move |event, _, control_flow| {
            *control_flow = ControlFlow::WaitUntil(last_frame + FRAME_INTERVAL);

            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                        *control_flow = ControlFlow::Exit;
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        self.events.set_cursor(to_world(position, &window));
                    }
                    WindowEvent::MouseInput { state, button, .. } => {
                        self.handle_mouse_button(state, button);
                    }
                    WindowEvent::KeyboardInput { input, .. } => {
                        if let Some(keycode) = input.virtual_keycode {
                            match input.state {
                                ElementState::Pressed => self.events.insert_key(keycode),
                                ElementState::Released => self.events.remove_key(&keycode),
                            }
                        }
                    }
                    _ => (),
                },
                Event::MainEventsCleared => {
                    if last_frame.elapsed() < FRAME_INTERVAL {
                        return;
                    }
                    let delta_time = last_frame.elapsed().as_secs_f32();
                    last_frame = Instant::now();

                    self.handle_held_input();
                    self.simulator.update(delta_time);
                    self.draw_scene(&display, &programs);

                    if last_title.elapsed().as_millis() >= TITLE_INTERVAL_MS {
                        last_title = Instant::now();
                        window.set_title(&format!("Fps: {}", (1.0 / delta_time) as u32));
                    }
                }
                _ => (),
            }
        });
    }

    fn handle_mouse_button(&mut self, state: ElementState, button: MouseButton) {
        let cursor = self.events.cursor();
        match (state, button) {
            (ElementState::Pressed, MouseButton::Left) => {
                self.events.insert_mouse_button(button);
                self.interaction.press(&mut self.simulator, cursor);
            }
            (ElementState::Released, MouseButton::Left) => {
                self.events.remove_mouse_button(&button);
                self.interaction.release(&mut self.simulator, cursor);
            }
            (ElementState::Pressed, _) => self.events.insert_mouse_button(button),
            (ElementState::Released, _) => self.events.remove_mouse_button(&button),
        }
    }

    fn handle_held_input(&mut self) {
        for (keycode, command) in COMMAND_KEYS {
            let fresh = self
                .events
                .get_key_event_mut(&keycode)
                .is_some_and(|e| e.is_initial_check());
            if fresh {
                self.interaction
                    .apply(&mut self.simulator, command, &mut self.rng);
            }
        }

        if self.is_erasing() {
            let cursor = self.events.cursor();
            self.interaction.erase(&mut self.simulator, cursor);
        }
    }

    fn is_erasing(&self) -> bool {
        !self.events.contains_mouse_button(&MouseButton::Left)
            && self.events.contains_mouse_button(&MouseButton::Right)
    }

    fn draw_scene(&self, display: &Display<WindowSurface>, programs: &Programs) {
        let mut target = display.draw();
        target.clear_color(0.0, 0.0, 0.0, 1.0);

        let uniforms = uniform! {
            projection: build_projection_matrix().to_cols_array_2d()
        };
        let params = glium::DrawParameters::default();

        let cursor = self.events.cursor();
        let mut underlay = vec![];
        if self.is_erasing() {
            underlay.append(&mut shapes::circle(
                [cursor.x, cursor.y, 0.0],
                rgb(DELETING_COLOR),
                DELETE_RADIUS,
                24,
            ));
        }
        if self.events.contains_mouse_button(&MouseButton::Left) {
            if let Some((from, to)) = self.interaction.preview(&self.simulator, cursor) {
                underlay.append(&mut shapes::thick_line(
                    from,
                    to,
                    STICK_WIDTH,
                    rgb(NODE_PREVIEW_COLOR),
                ));
            }
        }
        let snap = self.interaction.snap_point(&self.simulator, cursor);
        underlay.append(&mut shapes::circle(
            [snap.x, snap.y, 0.0],
            rgb(NODE_PREVIEW_COLOR),
            self.simulator.node_radius(),
            12,
        ));
        draw::draw_shapes(&underlay, &mut target, display, programs, &uniforms, &params);

        draw::draw_sticks(&self.simulator, &mut target, display, programs, &uniforms, &params);
        draw::draw_nodes(&self.simulator, &mut target, display, programs, &uniforms, &params);

        if self.simulator.is_paused() {
            let mut pause = shapes::rectangle([20.0, 20.0, 0.0], rgb(WHITE), 7.0, 25.0);
            pause.append(&mut shapes::rectangle(
                [33.0, 20.0, 0.0],
                rgb(WHITE),
                7.0,
                25.0,
            ));
            draw::draw_shapes(&pause, &mut target, display, programs, &uniforms, &params);
        }

        target.finish().expect("failed to swap buffers");
    }
}

/// Maps world coordinates (pixels of the default window, y down) to clip space
fn build_projection_matrix() -> Mat4 {
    Mat4::orthographic_rh_gl(
        0.0,
        WINDOW_WIDTH as f32,
        WINDOW_HEIGHT as f32,
        0.0,
        -1.0,
        1.0,
    )
}

/// Cursor position in world coordinates, independent of the current window size
fn to_world(position: PhysicalPosition<f64>, window: &Window) -> Vec2 {
    let size = window.inner_size();
    Vec2::new(
        position.x as f32 * WINDOW_WIDTH as f32 / size.width.max(1) as f32,
        position.y as f32 * WINDOW_HEIGHT as f32 / size.height.max(1) as f32,
    )
}
