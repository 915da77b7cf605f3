/*
 * Flocking Simulation
 *
 * Boids follow three local rules (separation, alignment, cohesion), flee a handful
 * of pursuing predators and are drawn towards the mouse pointer. Parameters are
 * adjusted with sliders and persisted to a JSON file between runs.
 *
 * Set RUST_LOG (e.g. RUST_LOG=flocksim=debug) to see simulation logs and
 * FLOCKSIM_PARAMS to choose the parameter file.
 */

use flocksim::app;

fn main() {
    init_tracing();
    nannou::app(app::model).update(app::update).run();
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
