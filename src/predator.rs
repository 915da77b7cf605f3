/*
 * Predator Module
 *
 * Predators chase a single prey boid at a constant speed. Each tick a predator
 * either keeps its prey or, with a small probability (always when it has none),
 * picks a new one uniformly from the live flock. Steering is direction-only: the
 * heading turns towards the prey along the shortest wrapped path, limited by a
 * maximum angular velocity derived from a fixed turn radius.
 *
 * The prey is remembered by a PreyRef (index + BoidId). If the boid at that index
 * is gone or has been replaced, the reference resolves to nothing and the
 * predator goes back to Idle.
 */

use std::f32::consts::TAU;

use rand::Rng;

use crate::boid::{Boid, BoidId};
use crate::bounds::WorldBounds;
use crate::vector::Vector2;

/// Radius of the tightest circle a predator can fly.
pub const TURN_RADIUS: f32 = 50.0;

/// Chance per tick of dropping the current prey for a new random one.
pub const PREY_REROLL_PROBABILITY: f64 = 0.01;

/// Non-owning handle to a boid in the World's collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreyRef {
    pub index: usize,
    pub id: BoidId,
}

impl PreyRef {
    pub fn at(boids: &[Boid], index: usize) -> Option<Self> {
        boids.get(index).map(|boid| Self { index, id: boid.id })
    }

    /// The referenced boid, if it still exists.
    pub fn resolve<'a>(&self, boids: &'a [Boid]) -> Option<&'a Boid> {
        boids.get(self.index).filter(|boid| boid.id == self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredatorState {
    Idle,
    Pursuing(PreyRef),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Predator {
    pub position: Vector2,
    pub velocity: Vector2,
    pub state: PredatorState,
}

impl Predator {
    pub fn new(position: Vector2, velocity: Vector2) -> Self {
        Self {
            position,
            velocity,
            state: PredatorState::Idle,
        }
    }

    /// Random position inside `bounds`, random heading at `speed`.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: &WorldBounds, speed: f32) -> Self {
        let position = Vector2::xy(
            rng.gen_range(0.0..bounds.width),
            rng.gen_range(0.0..bounds.height),
        );
        let velocity = Vector2::from_angle(rng.gen_range(0.0..TAU)) * speed;
        Self::new(position, velocity)
    }

    /// Current prey, if the reference is still valid.
    pub fn prey<'a>(&self, boids: &'a [Boid]) -> Option<&'a Boid> {
        match self.state {
            PredatorState::Pursuing(prey) => prey.resolve(boids),
            PredatorState::Idle => None,
        }
    }

    /// Largest heading change allowed in one tick.
    #[inline]
    pub fn max_turn(speed: f32, delta_time: f32) -> f32 {
        (speed / TURN_RADIUS) * delta_time
    }

    /// Pick or keep a prey, steer towards it, then move and wrap.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        boids: &[Boid],
        bounds: &WorldBounds,
        speed: f32,
        delta_time: f32,
        rng: &mut R,
    ) {
        self.select_prey(boids, rng);

        if let Some(prey) = self.prey(boids) {
            let to_prey = bounds.toroidal_delta(self.position, prey.position);
            self.steer_towards(to_prey, speed, delta_time);
        } else {
            // no prey: keep the heading but still fly at the configured speed
            self.velocity = self.heading() * speed;
        }

        self.position = bounds.wrap(self.position + self.velocity * delta_time);
    }

    fn select_prey<R: Rng + ?Sized>(&mut self, boids: &[Boid], rng: &mut R) {
        // a stale reference counts as having no prey
        if self.prey(boids).is_none() {
            self.state = PredatorState::Idle;
        }

        let reroll = match self.state {
            PredatorState::Idle => true,
            PredatorState::Pursuing(_) => rng.gen_bool(PREY_REROLL_PROBABILITY),
        };
        if reroll && !boids.is_empty() {
            if let Some(prey) = PreyRef::at(boids, rng.gen_range(0..boids.len())) {
                self.state = PredatorState::Pursuing(prey);
            }
        }
    }

    /// Unit direction of travel, +x while the velocity is zero.
    fn heading(&self) -> Vector2 {
        let heading = self.velocity.normalize();
        if heading == Vector2::ZERO {
            Vector2::RIGHT
        } else {
            heading
        }
    }

    /// Rotate the heading towards `desired` by at most the turn limit, then fly at
    /// exactly `speed`.
    pub fn steer_towards(&mut self, desired: Vector2, speed: f32, delta_time: f32) {
        let heading = self.heading();
        let angle = if desired.length_squared() > 0.0 {
            heading.angle_to(desired)
        } else {
            0.0
        };
        let max_turn = Self::max_turn(speed, delta_time);
        let turn = angle.clamp(-max_turn, max_turn);

        self.velocity = heading.rotate(turn) * speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f32::consts::PI;

    fn boid_at(id: u64, x: f32, y: f32) -> Boid {
        Boid::new(BoidId(id), Vector2::xy(x, y), Vector2::ZERO)
    }

    fn bounds() -> WorldBounds {
        WorldBounds::new(1000.0, 1000.0).unwrap()
    }

    #[test]
    fn idle_predator_picks_a_prey() {
        let mut rng = StdRng::seed_from_u64(9);
        let boids = vec![boid_at(1, 100.0, 100.0), boid_at(2, 200.0, 200.0)];
        let mut predator = Predator::new(Vector2::xy(500.0, 500.0), Vector2::RIGHT * 300.0);

        predator.update(&boids, &bounds(), 300.0, 0.016, &mut rng);
        assert!(matches!(predator.state, PredatorState::Pursuing(_)));
        assert!(predator.prey(&boids).is_some());
    }

    #[test]
    fn no_boids_keeps_predator_idle_but_moving() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut predator = Predator::new(Vector2::xy(500.0, 500.0), Vector2::xy(100.0, 0.0));
        predator.update(&[], &bounds(), 100.0, 0.1, &mut rng);
        assert_eq!(predator.state, PredatorState::Idle);
        assert!((predator.position.x - 510.0).abs() < 1e-3);
    }

    #[test]
    fn idle_predator_follows_speed_changes() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut predator = Predator::new(Vector2::xy(500.0, 500.0), Vector2::xy(0.0, 100.0));
        predator.update(&[], &bounds(), 250.0, 0.1, &mut rng);
        assert!((predator.velocity.length() - 250.0).abs() < 1e-3);
        assert!(predator.velocity.y > 0.0);

        let mut still = Predator::new(Vector2::xy(500.0, 500.0), Vector2::ZERO);
        still.update(&[], &bounds(), 80.0, 0.1, &mut rng);
        assert_eq!(still.velocity, Vector2::xy(80.0, 0.0));
    }

    #[test]
    fn removed_prey_invalidates_reference() {
        let boids = vec![boid_at(1, 100.0, 100.0), boid_at(2, 200.0, 200.0)];
        let mut predator = Predator::new(Vector2::ZERO, Vector2::RIGHT);
        predator.state = PredatorState::Pursuing(PreyRef::at(&boids, 1).unwrap());
        assert_eq!(predator.prey(&boids).map(|b| b.id), Some(BoidId(2)));

        // truncated collection
        assert!(predator.prey(&boids[..1]).is_none());

        // same slot now holds a different boid
        let replaced = vec![boid_at(1, 100.0, 100.0), boid_at(7, 200.0, 200.0)];
        assert!(predator.prey(&replaced).is_none());
    }

    #[test]
    fn stale_prey_is_replaced_on_update() {
        let mut rng = StdRng::seed_from_u64(1);
        let boids = vec![boid_at(10, 100.0, 100.0)];
        let mut predator = Predator::new(Vector2::xy(500.0, 500.0), Vector2::RIGHT * 300.0);
        predator.state = PredatorState::Pursuing(PreyRef { index: 3, id: BoidId(99) });

        predator.update(&boids, &bounds(), 300.0, 0.016, &mut rng);
        assert_eq!(predator.prey(&boids).map(|b| b.id), Some(BoidId(10)));
    }

    #[test]
    fn turn_is_limited_and_speed_is_exact() {
        let mut rng = StdRng::seed_from_u64(5);
        let speed = 300.0;
        let dt = 0.016;
        let max_turn = Predator::max_turn(speed, dt);

        for _ in 0..500 {
            let heading = rng.gen_range(-PI..PI);
            let desired = Vector2::from_angle(rng.gen_range(-PI..PI)) * rng.gen_range(0.1..500.0);
            let mut predator = Predator::new(Vector2::ZERO, Vector2::from_angle(heading) * 123.0);
            let before = predator.velocity;

            predator.steer_towards(desired, speed, dt);

            let turned = before.angle_to(predator.velocity).abs();
            assert!(turned <= max_turn + 1e-4, "turned {turned} > {max_turn}");
            assert!((predator.velocity.length() - speed).abs() < 1e-2);
        }
    }

    #[test]
    fn small_angles_are_matched_exactly() {
        let mut predator = Predator::new(Vector2::ZERO, Vector2::RIGHT * 300.0);
        let desired = Vector2::from_angle(0.01);
        predator.steer_towards(desired, 300.0, 0.1);
        assert!((predator.velocity.angle() - 0.01).abs() < 1e-4);
    }

    #[test]
    fn zero_velocity_steers_from_positive_x() {
        let mut predator = Predator::new(Vector2::ZERO, Vector2::ZERO);
        predator.steer_towards(Vector2::UP, 300.0, 0.016);
        let max_turn = Predator::max_turn(300.0, 0.016);
        assert!((predator.velocity.angle() - max_turn).abs() < 1e-4);
        assert!((predator.velocity.length() - 300.0).abs() < 1e-2);
        assert!(!predator.velocity.x.is_nan());
    }

    #[test]
    fn pursuit_goes_the_short_way_round() {
        let mut rng = StdRng::seed_from_u64(2);
        let boids = vec![boid_at(1, 990.0, 500.0)];
        // heading up; prey is 20 units to the left across the seam
        let mut predator = Predator::new(Vector2::xy(10.0, 500.0), Vector2::UP * 300.0);
        predator.update(&boids, &bounds(), 300.0, 0.016, &mut rng);
        // turned counter-clockwise, towards -x
        assert!(predator.velocity.x < 0.0);
    }

    #[test]
    fn position_wraps_around_world() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut predator = Predator::new(Vector2::xy(995.0, 3.0), Vector2::xy(100.0, -100.0));
        predator.update(&[], &bounds(), 100.0, 0.1, &mut rng);
        assert!((predator.position.x - 5.0).abs() < 1e-3);
        assert!((predator.position.y - 993.0).abs() < 1e-3);
    }
}
