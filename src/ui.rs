/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui. Every slider writes through the ParameterStore, so values are
 * clamped, persisted and broadcast the same way no matter where they come from.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::{ParamName, SimulationParams};
use crate::store::ParameterStore;

/// View state that is not a simulation parameter and is never persisted.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiState {
    pub paused: bool,
    pub show_debug: bool,
}

const POPULATION: [ParamName; 5] = [
    ParamName::NumBoids,
    ParamName::MinSpeed,
    ParamName::MaxSpeed,
    ParamName::NumPredators,
    ParamName::PredatorSpeed,
];

const RADII: [ParamName; 5] = [
    ParamName::NeighborRadius,
    ParamName::CollisionRadius,
    ParamName::PointerRadius,
    ParamName::PredatorSafeRadius,
    ParamName::WallMargin,
];

const FLOCKING: [ParamName; 4] = [
    ParamName::SeparationWeight,
    ParamName::AlignmentWeight,
    ParamName::CohesionWeight,
    ParamName::TotalForceWeight,
];

const AVOIDANCE: [ParamName; 3] = [
    ParamName::PredatorAvoidanceWeight,
    ParamName::WallAvoidanceWeight,
    ParamName::PointerAttractionWeight,
];

fn param_slider(ui: &mut egui::Ui, store: &mut ParameterStore, name: ParamName) {
    let mut value = store.get(name);
    let response = ui.add(
        egui::Slider::new(&mut value, name.range())
            .step_by(f64::from(name.step()))
            .text(name.label()),
    );
    if response.changed() {
        store.set(name, value);
    }
}

// Update the UI and return whether the flock should be respawned
pub fn update_ui(
    egui: &mut Egui,
    store: &mut ParameterStore,
    state: &mut UiState,
    debug_info: &DebugInfo,
) -> bool {
    let mut respawn = false;
    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Population", |ui| {
                for name in POPULATION {
                    param_slider(ui, store, name);
                }
                if ui.button("Respawn Boids").clicked() {
                    respawn = true;
                }
            });

            ui.collapsing("Radii", |ui| {
                for name in RADII {
                    param_slider(ui, store, name);
                }
            });

            ui.collapsing("Flocking Behavior", |ui| {
                for name in FLOCKING {
                    param_slider(ui, store, name);
                }
            });

            ui.collapsing("Avoidance & Attraction", |ui| {
                for name in AVOIDANCE {
                    param_slider(ui, store, name);
                }
            });

            ui.separator();
            if ui.button("Reset Parameters").clicked() {
                store.replace_all(&SimulationParams::default());
            }
            ui.checkbox(&mut state.show_debug, "Show Debug Info");
            ui.checkbox(&mut state.paused, "Pause Simulation");
            ui.label(format!("FPS: {:.1}", debug_info.fps));
        });

    respawn
}

// Draw debug information on the screen
pub fn draw_debug_info(draw: &nannou::Draw, debug_info: &DebugInfo, window_rect: nannou::geom::Rect) {
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 200.0;
    let panel_height = line_height * 4.0 + margin;
    let panel_x = window_rect.right() - panel_width / 2.0;
    let panel_y = window_rect.top() - panel_height / 2.0;

    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.right() - panel_width + margin;
    let text_y = window_rect.top() - margin;

    let debug_texts = [
        format!("FPS: {:.1}", debug_info.fps),
        format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0),
        format!("Boids: {}", debug_info.boid_count),
        format!("Predators: {}", debug_info.predator_count),
    ];

    for (i, text) in debug_texts.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        // nannou centres text on its position; shift right by roughly half a line
        draw.text(text)
            .x_y(text_x + 70.0, y)
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
