/*
 * Boid Module
 *
 * This module defines the Boid struct, a single flocking agent.
 * Each boid follows three main rules (see the physics module):
 * 1. Separation: Avoid crowding neighbors
 * 2. Alignment: Steer towards the average heading of neighbors
 * 3. Cohesion: Steer towards the average position of neighbors
 *
 * Boids are owned by the World. Anything else that needs to remember a boid
 * (a predator chasing it) holds a BoidId, never a reference.
 */

use std::f32::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::bounds::WorldBounds;
use crate::vector::Vector2;

/// Identity of a boid, unique for the lifetime of a World.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoidId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Boid {
    pub id: BoidId,
    pub position: Vector2,
    pub velocity: Vector2,
}

impl Boid {
    pub fn new(id: BoidId, position: Vector2, velocity: Vector2) -> Self {
        Self {
            id,
            position,
            velocity,
        }
    }

    /// Random position inside `bounds`, random heading, speed in `[min_speed, max_speed]`.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        id: BoidId,
        bounds: &WorldBounds,
        min_speed: f32,
        max_speed: f32,
    ) -> Self {
        let position = Vector2::xy(
            rng.gen_range(0.0..bounds.width),
            rng.gen_range(0.0..bounds.height),
        );

        let speed = if max_speed > min_speed {
            rng.gen_range(min_speed..=max_speed)
        } else {
            min_speed
        };
        let velocity = Vector2::from_angle(rng.gen_range(0.0..TAU)) * speed;

        Self::new(id, position, velocity)
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn spawned_boids_start_inside_bounds_within_speed_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let bounds = WorldBounds::new(640.0, 480.0).unwrap();

        for i in 0..500 {
            let boid = Boid::spawn(&mut rng, BoidId(i), &bounds, 100.0, 300.0);
            assert!(bounds.contains(boid.position));
            let speed = boid.speed();
            assert!(speed >= 100.0 - 1e-3 && speed <= 300.0 + 1e-3, "speed {speed}");
            assert_eq!(boid.id, BoidId(i));
        }
    }

    #[test]
    fn equal_speed_limits_give_fixed_speed() {
        let mut rng = StdRng::seed_from_u64(1);
        let bounds = WorldBounds::new(100.0, 100.0).unwrap();
        let boid = Boid::spawn(&mut rng, BoidId(0), &bounds, 50.0, 50.0);
        assert!((boid.speed() - 50.0).abs() < 1e-3);
    }
}
