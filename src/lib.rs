/*
 * Flocking Simulation - Module Definitions
 *
 * This file defines the module structure for the flocking simulation.
 * The simulation core (vector math, spatial grid, forces, predators, world,
 * parameters) has no graphics dependency; the window, renderer and egui
 * controls are compiled with the `gui` feature.
 */

// Re-export key components for easier access
pub use boid::{Boid, BoidId};
pub use bounds::WorldBounds;
pub use debug::{DebugInfo, RollingIntervalTimer};
pub use error::{PersistError, SimError};
pub use params::{ParamName, SimulationParams};
pub use predator::{Predator, PredatorState, PreyRef};
pub use spatial_grid::SpatialGrid;
pub use store::ParameterStore;
pub use vector::Vector2;
pub use world::World;

#[cfg(feature = "gui")]
pub use app::Model;

// Define modules
pub mod boid;
pub mod bounds;
pub mod debug;
pub mod error;
pub mod input;
pub mod params;
pub mod persistence;
pub mod physics;
pub mod predator;
pub mod spatial_grid;
pub mod store;
pub mod vector;
pub mod world;

#[cfg(feature = "gui")]
pub mod app;
#[cfg(feature = "gui")]
pub mod renderer;
#[cfg(feature = "gui")]
pub mod ui;

// Constants
pub const BOID_SIZE: f32 = 5.0;
pub const PREDATOR_SIZE: f32 = 8.0;
pub const DEFAULT_WORLD_WIDTH: f32 = 1280.0;
pub const DEFAULT_WORLD_HEIGHT: f32 = 720.0;
