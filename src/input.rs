/*
 * Input Module
 *
 * This module handles pointer input for the simulation:
 * - The pointer position becomes the boids' attraction target
 * - Leaving the window removes the target
 * - Scrolling grows or shrinks the attraction radius (clamped by the store)
 *
 * The nannou event handlers are compiled with the `gui` feature; the conversions
 * they use are plain functions.
 */

use crate::bounds::WorldBounds;
use crate::params::ParamName;
use crate::store::ParameterStore;
use crate::vector::Vector2;

/// Radius change per scrolled pixel.
pub const RADIUS_PER_PIXEL: f32 = 0.2;
/// Radius change per scrolled line (one wheel notch).
pub const RADIUS_PER_LINE: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollDelta {
    Lines(f32),
    Pixels(f32),
}

/// Radius change for a vertical scroll. Scrolling down (negative) grows the radius.
pub fn scroll_to_radius_delta(delta: ScrollDelta) -> f32 {
    match delta {
        ScrollDelta::Lines(y) => -y * RADIUS_PER_LINE,
        ScrollDelta::Pixels(y) => -y * RADIUS_PER_PIXEL,
    }
}

/// Apply a scroll to the pointer radius. Ignored while there is no pointer target.
/// Returns the new radius when it was applied.
pub fn apply_scroll(
    store: &mut ParameterStore,
    pointer: Option<Vector2>,
    delta: ScrollDelta,
) -> Option<f32> {
    pointer?;
    Some(store.adjust(ParamName::PointerRadius, scroll_to_radius_delta(delta)))
}

/// Window coordinates (origin at the centre, y up) to world coordinates.
pub fn window_to_world(x: f32, y: f32, bounds: &WorldBounds) -> Vector2 {
    Vector2::xy(x + bounds.width / 2.0, y + bounds.height / 2.0)
}

/// World coordinates to window coordinates (origin at the centre, y up).
pub fn world_to_window(position: Vector2, bounds: &WorldBounds) -> (f32, f32) {
    (
        position.x - bounds.width / 2.0,
        position.y - bounds.height / 2.0,
    )
}

#[cfg(feature = "gui")]
pub use handlers::*;

#[cfg(feature = "gui")]
mod handlers {
    use nannou::prelude::*;
    use nannou::winit::event::{MouseScrollDelta, TouchPhase};

    use super::{apply_scroll, window_to_world, ScrollDelta};
    use crate::app::Model;

    // Mouse moved event handler
    pub fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
        let target = window_to_world(pos.x, pos.y, model.world.bounds());
        let inside = model.world.bounds().contains(target);
        model.world.set_pointer(inside.then_some(target));
    }

    // Pointer left the window: no attraction target
    pub fn mouse_exited(_app: &App, model: &mut Model) {
        model.world.set_pointer(None);
    }

    // Mouse wheel event handler for the attraction radius
    pub fn mouse_wheel(_app: &App, model: &mut Model, delta: MouseScrollDelta, _phase: TouchPhase) {
        // Scrolling over the control panel belongs to egui
        if model.egui.ctx().is_pointer_over_area() {
            return;
        }

        let delta = match delta {
            MouseScrollDelta::LineDelta(_, y) => ScrollDelta::Lines(y),
            MouseScrollDelta::PixelDelta(pos) => ScrollDelta::Pixels(pos.y as f32),
        };
        apply_scroll(&mut model.store, model.world.pointer(), delta);
    }

    // Handle raw window events for egui
    pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
        model.egui.handle_raw_event(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_down_grows_radius() {
        assert_eq!(scroll_to_radius_delta(ScrollDelta::Lines(-1.0)), 20.0);
        assert_eq!(scroll_to_radius_delta(ScrollDelta::Pixels(50.0)), -10.0);
    }

    #[test]
    fn scroll_needs_a_pointer() {
        let mut store = ParameterStore::default();
        assert_eq!(apply_scroll(&mut store, None, ScrollDelta::Lines(-1.0)), None);
        assert_eq!(store.get(ParamName::PointerRadius), 100.0);

        let pointer = Some(Vector2::xy(1.0, 1.0));
        assert_eq!(apply_scroll(&mut store, pointer, ScrollDelta::Lines(-1.0)), Some(120.0));
        assert_eq!(apply_scroll(&mut store, pointer, ScrollDelta::Lines(100.0)), Some(10.0));
    }

    #[test]
    fn window_and_world_coordinates_round_trip() {
        let bounds = WorldBounds::new(1280.0, 720.0).unwrap();
        assert_eq!(window_to_world(0.0, 0.0, &bounds), Vector2::xy(640.0, 360.0));
        assert_eq!(window_to_world(-640.0, -360.0, &bounds), Vector2::ZERO);
        assert_eq!(world_to_window(Vector2::xy(640.0, 360.0), &bounds), (0.0, 0.0));
    }
}
