/*
 * Application Module
 *
 * This module defines the main application model for the nannou front-end.
 * It wires the parameter store, the world, the egui controls and the input
 * handlers together and drives one simulation tick per frame.
 */

use std::env;
use std::path::PathBuf;

use nannou::prelude::*;
use nannou_egui::Egui;
use tracing::{error, info};

use crate::bounds::WorldBounds;
use crate::debug::DebugInfo;
use crate::input;
use crate::renderer;
use crate::store::ParameterStore;
use crate::ui::{self, UiState};
use crate::world::World;
use crate::{DEFAULT_WORLD_HEIGHT, DEFAULT_WORLD_WIDTH};

/// Environment variable naming the persisted parameter file.
pub const PARAMS_PATH_VAR: &str = "FLOCKSIM_PARAMS";
const DEFAULT_PARAMS_PATH: &str = "flocksim_params.json";

// Main model for the application
pub struct Model {
    pub world: World,
    pub store: ParameterStore,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub ui_state: UiState,
}

fn params_path() -> PathBuf {
    env::var_os(PARAMS_PATH_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PARAMS_PATH))
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let window_id = app
        .new_window()
        .title("Flocking Simulation")
        .size(DEFAULT_WORLD_WIDTH as u32, DEFAULT_WORLD_HEIGHT as u32)
        .resizable(false)
        .view(renderer::view)
        .raw_event(input::raw_window_event)
        .mouse_moved(input::mouse_moved)
        .mouse_exited(input::mouse_exited)
        .mouse_wheel(input::mouse_wheel)
        .build()
        .expect("Failed to create window");

    let window = app.window(window_id).expect("Window closed during startup");
    let egui = Egui::from_window(&window);

    let store = ParameterStore::open(params_path());

    let world = WorldBounds::new(DEFAULT_WORLD_WIDTH, DEFAULT_WORLD_HEIGHT)
        .and_then(|bounds| World::new(bounds, store.values()));
    let world = match world {
        Ok(world) => world,
        Err(err) => {
            error!(error = %err, "could not create world");
            std::process::exit(1);
        }
    };
    info!(params = ?store.values(), "starting simulation");

    Model {
        world,
        store,
        egui,
        debug_info: DebugInfo::default(),
        ui_state: UiState::default(),
    }
}

pub fn update(_app: &App, model: &mut Model, update: Update) {
    model.debug_info.mark_frame(
        update.since_last,
        model.world.boids().len(),
        model.world.predators().len(),
    );

    let respawn = ui::update_ui(
        &mut model.egui,
        &mut model.store,
        &mut model.ui_state,
        &model.debug_info,
    );

    // Handle respawn outside of the UI closure
    if respawn {
        let count = model.store.values().num_boids;
        model.world.set_boid_count(0);
        model.world.set_boid_count(count);
    }

    if model.ui_state.paused {
        model.world.apply_params(model.store.values());
    } else {
        model
            .world
            .tick(model.store.values(), update.since_last.as_secs_f32());
    }
}
