/*
 * World Module
 *
 * The World owns every boid and predator and runs the per-tick pipeline:
 * 1. React to parameter changes since the last tick (population sizes, radius)
 * 2. Rebuild the spatial grid from current boid positions
 * 3. Compute every boid's force from the start-of-tick snapshot, then update velocities
 * 4. Move every boid with its new velocity and wrap it onto the torus
 * 5. Update predators against the moved flock
 *
 * Forces are all computed before any boid is changed, so the result does not depend
 * on the order boids are stored in.
 */

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::boid::{Boid, BoidId};
use crate::bounds::WorldBounds;
use crate::error::SimError;
use crate::params::{ParamName, SimulationParams};
use crate::physics;
use crate::predator::Predator;
use crate::spatial_grid::SpatialGrid;
use crate::vector::Vector2;

/// Largest deltaTime used for a single tick, in seconds.
pub const MAX_DELTA_TIME: f32 = 0.1;

/// Clamp a frame interval into `(0, MAX_DELTA_TIME]`. `None` means skip the tick.
pub fn clamp_delta_time(delta_time: f32) -> Option<f32> {
    if delta_time.is_finite() && delta_time > 0.0 {
        Some(delta_time.min(MAX_DELTA_TIME))
    } else {
        None
    }
}

/// Rescale `velocity` so its length lies in `[min_speed, max_speed]`. A zero velocity
/// keeps `fallback`'s direction (or +x).
pub fn clamp_speed(velocity: Vector2, fallback: Vector2, min_speed: f32, max_speed: f32) -> Vector2 {
    let mut direction = velocity.normalize();
    if direction == Vector2::ZERO {
        direction = fallback.normalize();
    }
    if direction == Vector2::ZERO {
        direction = Vector2::RIGHT;
    }
    direction * velocity.length().clamp(min_speed, max_speed)
}

pub struct World {
    bounds: WorldBounds,
    boids: Vec<Boid>,
    predators: Vec<Predator>,
    grid: SpatialGrid,
    params: SimulationParams,
    pointer: Option<Vector2>,
    rng: StdRng,
    next_boid_id: u64,
    // scratch buffers reused every tick
    forces: Vec<Vector2>,
    neighbor_indices: Vec<usize>,
}

impl World {
    /// A world seeded from the OS entropy source.
    pub fn new(bounds: WorldBounds, params: &SimulationParams) -> Result<Self, SimError> {
        Self::with_rng(bounds, params, StdRng::from_entropy())
    }

    /// A reproducible world.
    pub fn with_seed(
        bounds: WorldBounds,
        params: &SimulationParams,
        seed: u64,
    ) -> Result<Self, SimError> {
        Self::with_rng(bounds, params, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        bounds: WorldBounds,
        params: &SimulationParams,
        rng: StdRng,
    ) -> Result<Self, SimError> {
        let grid = SpatialGrid::new(bounds, params.neighbor_radius)?;

        let mut world = Self {
            bounds,
            boids: Vec::with_capacity(params.num_boids),
            predators: Vec::with_capacity(params.num_predators),
            grid,
            params: params.clone(),
            pointer: None,
            rng,
            next_boid_id: 0,
            forces: Vec::new(),
            neighbor_indices: Vec::new(),
        };
        world.set_boid_count(params.num_boids);
        world.set_predator_count(params.num_predators);

        info!(
            width = bounds.width,
            height = bounds.height,
            boids = world.boids.len(),
            predators = world.predators.len(),
            "created world"
        );
        Ok(world)
    }

    pub fn bounds(&self) -> &WorldBounds {
        &self.bounds
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn predators(&self) -> &[Predator] {
        &self.predators
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Parameters applied on the last tick.
    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn pointer(&self) -> Option<Vector2> {
        self.pointer
    }

    /// Pointer attraction target, or `None` when the pointer is away.
    pub fn set_pointer(&mut self, pointer: Option<Vector2>) {
        self.pointer = pointer;
    }

    /// Replace the flock. Intended for scripted scenarios and tests.
    pub fn set_boids(&mut self, boids: Vec<Boid>) {
        self.next_boid_id = boids
            .iter()
            .map(|boid| boid.id.0 + 1)
            .max()
            .unwrap_or(0)
            .max(self.next_boid_id);
        self.boids = boids;
        self.grid.rebuild(&self.boids);
    }

    /// Replace the predators. Intended for scripted scenarios and tests.
    pub fn set_predators(&mut self, predators: Vec<Predator>) {
        self.predators = predators;
    }

    /// Grow with freshly spawned boids or truncate the tail.
    pub fn set_boid_count(&mut self, count: usize) {
        let current = self.boids.len();
        let (min_speed, max_speed) = self.params.speed_limits();

        if count > current {
            self.boids.reserve(count - current);
            for _ in current..count {
                let id = BoidId(self.next_boid_id);
                self.next_boid_id += 1;
                self.boids
                    .push(Boid::spawn(&mut self.rng, id, &self.bounds, min_speed, max_speed));
            }
        } else {
            self.boids.truncate(count);
        }
        self.grid.rebuild(&self.boids);

        if count != current {
            debug!(from = current, to = count, "resized flock");
        }
    }

    /// Grow with freshly spawned predators or truncate the tail.
    pub fn set_predator_count(&mut self, count: usize) {
        let current = self.predators.len();
        let speed = self.params.predator_speed;

        if count > current {
            for _ in current..count {
                self.predators
                    .push(Predator::spawn(&mut self.rng, &self.bounds, speed));
            }
        } else {
            self.predators.truncate(count);
        }

        if count != current {
            debug!(from = current, to = count, "resized predators");
        }
    }

    /// Diff `params` against the last applied snapshot and react to what changed.
    pub fn apply_params(&mut self, params: &SimulationParams) {
        let changed = params.changed_since(&self.params);
        if changed.is_empty() {
            return;
        }
        self.params = params.clone();

        for name in changed {
            match name {
                ParamName::NumBoids => self.set_boid_count(params.num_boids),
                ParamName::NumPredators => self.set_predator_count(params.num_predators),
                ParamName::NeighborRadius => {
                    if let Err(err) = self.grid.set_detection_radius(params.neighbor_radius) {
                        warn!(error = %err, "rejected neighbor radius");
                    }
                }
                _ => {}
            }
        }
    }

    /// Advance the simulation by one frame.
    pub fn tick(&mut self, params: &SimulationParams, delta_time: f32) {
        self.apply_params(params);

        let Some(dt) = clamp_delta_time(delta_time) else {
            return;
        };

        self.grid.rebuild(&self.boids);
        self.compute_forces();
        self.integrate_velocities(dt);
        self.integrate_positions(dt);
        self.update_predators(dt);
    }

    /// Forces the next tick would apply (before deltaTime scaling), without moving anything.
    pub fn pending_forces(&mut self) -> &[Vector2] {
        self.grid.rebuild(&self.boids);
        self.compute_forces();
        &self.forces
    }

    /// Fill `self.forces` from the current (start-of-tick) boid state.
    fn compute_forces(&mut self) {
        self.forces.clear();
        self.forces.reserve(self.boids.len());

        let mut neighbors: Vec<&Boid> = Vec::new();
        for (i, boid) in self.boids.iter().enumerate() {
            self.grid.neighbors_into(i, &mut self.neighbor_indices);
            neighbors.clear();
            neighbors.extend(self.neighbor_indices.iter().map(|&j| &self.boids[j]));

            self.forces.push(physics::compute_force(
                boid,
                &neighbors,
                &self.predators,
                self.pointer,
                &self.bounds,
                &self.params,
            ));
        }
    }

    fn integrate_velocities(&mut self, dt: f32) {
        let (min_speed, max_speed) = self.params.speed_limits();
        for (boid, &force) in self.boids.iter_mut().zip(&self.forces) {
            let velocity = boid.velocity + force * dt;
            boid.velocity = clamp_speed(velocity, boid.velocity, min_speed, max_speed);
        }
    }

    fn integrate_positions(&mut self, dt: f32) {
        for boid in &mut self.boids {
            boid.position = self.bounds.wrap(boid.position + boid.velocity * dt);
        }
    }

    fn update_predators(&mut self, dt: f32) {
        let speed = self.params.predator_speed;
        for predator in &mut self.predators {
            predator.update(&self.boids, &self.bounds, speed, dt, &mut self.rng);
        }
    }
}
