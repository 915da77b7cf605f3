/*
 * Physics Module
 *
 * This module computes the steering force acting on one boid. Every sub-force is a
 * pure function of the start-of-tick snapshot and is zero when it has nothing to
 * react to:
 * - Alignment: average heading of neighbors
 * - Cohesion: direction towards the neighbors' centroid
 * - Separation: push away from close neighbors, fading linearly with distance
 * - Predator avoidance: push away from predators inside the safe radius
 * - Pointer attraction: pull towards the pointer while inside its radius
 * - Wall avoidance: unit push inwards near the world margins
 *
 * compute_force combines them with the weight parameters and scales the sum by the
 * global force multiplier. The World scales the result by deltaTime.
 */

use crate::boid::Boid;
use crate::bounds::WorldBounds;
use crate::params::SimulationParams;
use crate::predator::Predator;
use crate::vector::Vector2;

/// Average heading of `neighbors` as a unit vector.
pub fn alignment(neighbors: &[&Boid]) -> Vector2 {
    if neighbors.is_empty() {
        return Vector2::ZERO;
    }

    let mut heading = Vector2::ZERO;
    for other in neighbors {
        heading += other.velocity;
    }
    heading.normalize()
}

/// Unit vector from `boid` towards the centroid of `neighbors`.
pub fn cohesion(boid: &Boid, neighbors: &[&Boid]) -> Vector2 {
    if neighbors.is_empty() {
        return Vector2::ZERO;
    }

    let mut centroid = Vector2::ZERO;
    for other in neighbors {
        centroid += other.position;
    }
    let centroid = centroid * (1.0 / neighbors.len() as f32);
    (centroid - boid.position).normalize()
}

/// Sum over neighbors of a vector pointing away from each, scaled by
/// `(collision_radius - distance) / collision_radius`. The factor is not clamped, so a
/// neighbor beyond the collision radius pulls slightly instead of pushing.
pub fn separation(boid: &Boid, neighbors: &[&Boid], collision_radius: f32) -> Vector2 {
    if collision_radius <= 0.0 {
        return Vector2::ZERO;
    }

    let mut force = Vector2::ZERO;
    for other in neighbors {
        let away = boid.position - other.position;
        let relative = (collision_radius - away.length()) / collision_radius;
        force += away.normalize() * relative;
    }
    force
}

/// Sum of pushes away from every predator closer than `safe_radius`.
pub fn predator_avoidance(boid: &Boid, predators: &[Predator], safe_radius: f32) -> Vector2 {
    let mut force = Vector2::ZERO;
    for predator in predators {
        let away = boid.position - predator.position;
        let distance = away.length();
        if distance < safe_radius {
            let strength = (safe_radius - distance) / safe_radius;
            force += away.normalize() * strength;
        }
    }
    force
}

/// Pull towards the pointer, `1 - distance / radius` strong, while within `radius`.
pub fn pointer_attraction(boid: &Boid, pointer: Option<Vector2>, radius: f32) -> Vector2 {
    let Some(target) = pointer else {
        return Vector2::ZERO;
    };
    if radius <= 0.0 {
        return Vector2::ZERO;
    }

    let to_pointer = target - boid.position;
    let distance = to_pointer.length();
    if distance > radius {
        return Vector2::ZERO;
    }
    to_pointer.normalize() * (1.0 - distance / radius)
}

/// Unit push inwards when within `margin` of an edge. Only the first matching edge
/// counts, x edges before y edges.
pub fn wall_avoidance(boid: &Boid, bounds: &WorldBounds, margin: f32) -> Vector2 {
    let p = boid.position;
    if p.x < margin {
        Vector2::RIGHT
    } else if p.x > bounds.width - margin {
        Vector2::LEFT
    } else if p.y < margin {
        Vector2::UP
    } else if p.y > bounds.height - margin {
        Vector2::DOWN
    } else {
        Vector2::ZERO
    }
}

/// Net steering force on `boid`: weighted sum of every sub-force times the global
/// force multiplier. Not yet scaled by deltaTime.
pub fn compute_force(
    boid: &Boid,
    neighbors: &[&Boid],
    predators: &[Predator],
    pointer: Option<Vector2>,
    bounds: &WorldBounds,
    params: &SimulationParams,
) -> Vector2 {
    let mut force = Vector2::ZERO;
    force += alignment(neighbors) * params.alignment_weight;
    force += cohesion(boid, neighbors) * params.cohesion_weight;
    force += separation(boid, neighbors, params.collision_radius) * params.separation_weight;
    force += predator_avoidance(boid, predators, params.predator_safe_radius)
        * params.predator_avoidance_weight;
    force += pointer_attraction(boid, pointer, params.pointer_radius)
        * params.pointer_attraction_weight;
    force += wall_avoidance(boid, bounds, params.wall_margin) * params.wall_avoidance_weight;
    force * params.total_force_weight
}
