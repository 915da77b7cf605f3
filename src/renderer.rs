/*
 * Renderer Module
 *
 * This module draws the simulation: boids as small triangles pointing along their
 * velocity, predators as larger red triangles, and the pointer attraction radius.
 * It only reads the world; all drawing goes through nannou.
 */

use nannou::prelude::*;
use tracing::error;

use crate::app::Model;
use crate::bounds::WorldBounds;
use crate::input::world_to_window;
use crate::ui;
use crate::vector::Vector2;
use crate::{BOID_SIZE, PREDATOR_SIZE};

fn draw_agent(
    draw: &Draw,
    bounds: &WorldBounds,
    position: Vector2,
    heading: Vector2,
    size: f32,
    color: Rgb<u8>,
) {
    let (x, y) = world_to_window(position, bounds);
    let points = [
        pt2(size, 0.0),
        pt2(-size, size * 0.6),
        pt2(-size, -size * 0.6),
    ];

    draw.polygon()
        .color(color)
        .points(points)
        .xy(pt2(x, y))
        .rotate(heading.angle());
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let bounds = model.world.bounds();
    for boid in model.world.boids() {
        draw_agent(&draw, bounds, boid.position, boid.velocity, BOID_SIZE, rgb(220, 220, 220));
    }

    for predator in model.world.predators() {
        draw_agent(&draw, bounds, predator.position, predator.velocity, PREDATOR_SIZE, RED);
    }

    // Pointer attraction area
    if let Some(pointer) = model.world.pointer() {
        let (x, y) = world_to_window(pointer, bounds);
        draw.ellipse()
            .xy(pt2(x, y))
            .radius(model.store.values().pointer_radius)
            .no_fill()
            .stroke(WHITE)
            .stroke_weight(1.0);
    }

    if model.ui_state.show_debug {
        ui::draw_debug_info(&draw, &model.debug_info, app.window_rect());
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        error!(error = ?err, "failed to draw frame");
    }

    // Draw the egui UI
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        error!(error = ?err, "failed to draw controls");
    }
}
