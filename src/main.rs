use stickbox::{renderer::Renderer, scene, simulator::SimulatorBuilder};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut simulator = SimulatorBuilder::new().build();
    scene::sample(&mut simulator, &mut rand::thread_rng());

    let renderer = Renderer::new(simulator);
    renderer.create_window();
}
