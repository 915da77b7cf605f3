/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains all the
 * adjustable parameters for the simulation, plus ParamName, which names each
 * of them for the UI, the parameter store and the persisted file. It also
 * provides change detection between two snapshots.
 */

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

// Parameters for the simulation that can be adjusted via UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationParams {
    pub num_boids: usize,
    pub num_predators: usize,
    pub cohesion_weight: f32,
    pub alignment_weight: f32,
    pub separation_weight: f32,
    pub predator_avoidance_weight: f32,
    pub wall_avoidance_weight: f32,
    pub pointer_attraction_weight: f32,
    pub total_force_weight: f32,
    pub neighbor_radius: f32,
    pub collision_radius: f32,
    pub pointer_radius: f32,
    pub predator_safe_radius: f32,
    pub wall_margin: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub predator_speed: f32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_boids: 600,
            num_predators: 5,
            cohesion_weight: 1.0,
            alignment_weight: 1.0,
            separation_weight: 1.0,
            predator_avoidance_weight: 5.0,
            wall_avoidance_weight: 5.0,
            pointer_attraction_weight: 5.0,
            total_force_weight: 5_000.0,
            neighbor_radius: 50.0,
            collision_radius: 45.0,
            pointer_radius: 100.0,
            predator_safe_radius: 100.0,
            wall_margin: 100.0,
            min_speed: 100.0,
            max_speed: 300.0,
            predator_speed: 300.0,
        }
    }
}

/// Every tunable parameter, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamName {
    NumBoids,
    NumPredators,
    CohesionWeight,
    AlignmentWeight,
    SeparationWeight,
    PredatorAvoidanceWeight,
    WallAvoidanceWeight,
    PointerAttractionWeight,
    TotalForceWeight,
    NeighborRadius,
    CollisionRadius,
    PointerRadius,
    PredatorSafeRadius,
    WallMargin,
    MinSpeed,
    MaxSpeed,
    PredatorSpeed,
}

impl ParamName {
    pub const ALL: [ParamName; 17] = [
        ParamName::NumBoids,
        ParamName::NumPredators,
        ParamName::CohesionWeight,
        ParamName::AlignmentWeight,
        ParamName::SeparationWeight,
        ParamName::PredatorAvoidanceWeight,
        ParamName::WallAvoidanceWeight,
        ParamName::PointerAttractionWeight,
        ParamName::TotalForceWeight,
        ParamName::NeighborRadius,
        ParamName::CollisionRadius,
        ParamName::PointerRadius,
        ParamName::PredatorSafeRadius,
        ParamName::WallMargin,
        ParamName::MinSpeed,
        ParamName::MaxSpeed,
        ParamName::PredatorSpeed,
    ];

    /// Key used in the persisted parameter file.
    pub fn key(self) -> &'static str {
        match self {
            ParamName::NumBoids => "numBoids",
            ParamName::NumPredators => "numPredators",
            ParamName::CohesionWeight => "cohesionWeight",
            ParamName::AlignmentWeight => "alignmentWeight",
            ParamName::SeparationWeight => "separationWeight",
            ParamName::PredatorAvoidanceWeight => "predatorAvoidanceWeight",
            ParamName::WallAvoidanceWeight => "wallAvoidanceWeight",
            ParamName::PointerAttractionWeight => "pointerAttractionWeight",
            ParamName::TotalForceWeight => "totalForceWeight",
            ParamName::NeighborRadius => "neighborRadius",
            ParamName::CollisionRadius => "collisionRadius",
            ParamName::PointerRadius => "pointerRadius",
            ParamName::PredatorSafeRadius => "predatorSafeRadius",
            ParamName::WallMargin => "wallMargin",
            ParamName::MinSpeed => "minSpeed",
            ParamName::MaxSpeed => "maxSpeed",
            ParamName::PredatorSpeed => "predatorSpeed",
        }
    }

    pub fn from_key(key: &str) -> Option<ParamName> {
        ParamName::ALL.into_iter().find(|name| name.key() == key)
    }

    /// Slider label.
    pub fn label(self) -> &'static str {
        match self {
            ParamName::NumBoids => "Number of boids",
            ParamName::NumPredators => "Number of predators",
            ParamName::CohesionWeight => "Cohesion weight",
            ParamName::AlignmentWeight => "Alignment weight",
            ParamName::SeparationWeight => "Separation weight",
            ParamName::PredatorAvoidanceWeight => "Predator avoidance weight",
            ParamName::WallAvoidanceWeight => "Wall avoidance weight",
            ParamName::PointerAttractionWeight => "Mouse attraction weight",
            ParamName::TotalForceWeight => "Total force weight",
            ParamName::NeighborRadius => "Neighbor radius",
            ParamName::CollisionRadius => "Collision radius",
            ParamName::PointerRadius => "Mouse radius",
            ParamName::PredatorSafeRadius => "Predator safe radius",
            ParamName::WallMargin => "Wall margin",
            ParamName::MinSpeed => "Boid min speed",
            ParamName::MaxSpeed => "Boid max speed",
            ParamName::PredatorSpeed => "Predator max speed",
        }
    }

    /// Valid range for the parameter. Radii never reach zero.
    pub fn range(self) -> RangeInclusive<f32> {
        match self {
            ParamName::NumBoids => 0.0..=2000.0,
            ParamName::NumPredators => 0.0..=50.0,
            ParamName::CohesionWeight
            | ParamName::AlignmentWeight
            | ParamName::SeparationWeight
            | ParamName::WallAvoidanceWeight => 0.0..=5.0,
            ParamName::PredatorAvoidanceWeight => 0.0..=10.0,
            ParamName::PointerAttractionWeight => -10.0..=10.0,
            ParamName::TotalForceWeight => 0.0..=20_000.0,
            ParamName::NeighborRadius | ParamName::CollisionRadius => 5.0..=100.0,
            ParamName::PointerRadius => 10.0..=500.0,
            ParamName::PredatorSafeRadius => 10.0..=300.0,
            ParamName::WallMargin => 0.0..=300.0,
            ParamName::MinSpeed | ParamName::MaxSpeed | ParamName::PredatorSpeed => 0.0..=1000.0,
        }
    }

    /// Slider step.
    pub fn step(self) -> f32 {
        match self {
            ParamName::NumBoids => 100.0,
            ParamName::NumPredators => 1.0,
            ParamName::PredatorAvoidanceWeight => 0.5,
            ParamName::PointerAttractionWeight => 1.0,
            ParamName::TotalForceWeight => 100.0,
            ParamName::NeighborRadius | ParamName::CollisionRadius => 5.0,
            ParamName::PointerRadius | ParamName::PredatorSafeRadius | ParamName::WallMargin => {
                5.0
            }
            ParamName::MinSpeed | ParamName::MaxSpeed | ParamName::PredatorSpeed => 10.0,
            _ => 0.1,
        }
    }

    pub fn is_count(self) -> bool {
        matches!(self, ParamName::NumBoids | ParamName::NumPredators)
    }

    /// Clamp into range; counts are also rounded. NaN falls back to the range minimum.
    pub fn sanitize(self, value: f32) -> f32 {
        let range = self.range();
        if value.is_nan() {
            return *range.start();
        }
        let value = value.clamp(*range.start(), *range.end());
        if self.is_count() {
            value.round()
        } else {
            value
        }
    }
}

impl SimulationParams {
    pub fn get(&self, name: ParamName) -> f32 {
        match name {
            ParamName::NumBoids => self.num_boids as f32,
            ParamName::NumPredators => self.num_predators as f32,
            ParamName::CohesionWeight => self.cohesion_weight,
            ParamName::AlignmentWeight => self.alignment_weight,
            ParamName::SeparationWeight => self.separation_weight,
            ParamName::PredatorAvoidanceWeight => self.predator_avoidance_weight,
            ParamName::WallAvoidanceWeight => self.wall_avoidance_weight,
            ParamName::PointerAttractionWeight => self.pointer_attraction_weight,
            ParamName::TotalForceWeight => self.total_force_weight,
            ParamName::NeighborRadius => self.neighbor_radius,
            ParamName::CollisionRadius => self.collision_radius,
            ParamName::PointerRadius => self.pointer_radius,
            ParamName::PredatorSafeRadius => self.predator_safe_radius,
            ParamName::WallMargin => self.wall_margin,
            ParamName::MinSpeed => self.min_speed,
            ParamName::MaxSpeed => self.max_speed,
            ParamName::PredatorSpeed => self.predator_speed,
        }
    }

    /// Set a parameter, clamped into its range. Returns the value actually stored.
    pub fn set(&mut self, name: ParamName, value: f32) -> f32 {
        let value = name.sanitize(value);
        match name {
            ParamName::NumBoids => self.num_boids = value as usize,
            ParamName::NumPredators => self.num_predators = value as usize,
            ParamName::CohesionWeight => self.cohesion_weight = value,
            ParamName::AlignmentWeight => self.alignment_weight = value,
            ParamName::SeparationWeight => self.separation_weight = value,
            ParamName::PredatorAvoidanceWeight => self.predator_avoidance_weight = value,
            ParamName::WallAvoidanceWeight => self.wall_avoidance_weight = value,
            ParamName::PointerAttractionWeight => self.pointer_attraction_weight = value,
            ParamName::TotalForceWeight => self.total_force_weight = value,
            ParamName::NeighborRadius => self.neighbor_radius = value,
            ParamName::CollisionRadius => self.collision_radius = value,
            ParamName::PointerRadius => self.pointer_radius = value,
            ParamName::PredatorSafeRadius => self.predator_safe_radius = value,
            ParamName::WallMargin => self.wall_margin = value,
            ParamName::MinSpeed => self.min_speed = value,
            ParamName::MaxSpeed => self.max_speed = value,
            ParamName::PredatorSpeed => self.predator_speed = value,
        }
        value
    }

    /// Clamp every parameter into its range.
    pub fn sanitized(&self) -> Self {
        let mut params = self.clone();
        for name in ParamName::ALL {
            params.set(name, self.get(name));
        }
        params
    }

    /// Names of the parameters whose value differs from `previous`.
    pub fn changed_since(&self, previous: &SimulationParams) -> Vec<ParamName> {
        ParamName::ALL
            .into_iter()
            .filter(|&name| self.get(name) != previous.get(name))
            .collect()
    }

    /// `(min_speed, max_speed)` with max raised to min when the two are crossed.
    pub fn speed_limits(&self) -> (f32, f32) {
        let min = self.min_speed.max(0.0);
        (min, self.max_speed.max(min))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_within_ranges() {
        let params = SimulationParams::default();
        for name in ParamName::ALL {
            let value = params.get(name);
            assert!(name.range().contains(&value), "{name:?} default {value} out of range");
        }
        assert_eq!(params.sanitized(), params);
    }

    #[test]
    fn keys_round_trip_through_from_key() {
        for name in ParamName::ALL {
            assert_eq!(ParamName::from_key(name.key()), Some(name));
        }
        assert_eq!(ParamName::from_key("nope"), None);
    }

    #[test]
    fn serde_keys_match_param_keys() {
        let json = serde_json::to_value(SimulationParams::default()).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), ParamName::ALL.len());
        for name in ParamName::ALL {
            assert!(object.contains_key(name.key()), "missing {}", name.key());
        }
    }

    #[test]
    fn set_clamps_and_rounds() {
        let mut params = SimulationParams::default();
        assert_eq!(params.set(ParamName::PointerRadius, 2.0), 10.0);
        assert_eq!(params.pointer_radius, 10.0);
        assert_eq!(params.set(ParamName::PointerRadius, 9000.0), 500.0);
        assert_eq!(params.set(ParamName::NumBoids, 12.6), 13.0);
        assert_eq!(params.num_boids, 13);
        assert_eq!(params.set(ParamName::NumPredators, -4.0), 0.0);
        assert_eq!(params.set(ParamName::NeighborRadius, f32::NAN), 5.0);
    }

    #[test]
    fn detects_changed_parameters() {
        let before = SimulationParams::default();
        let mut after = before.clone();
        assert!(after.changed_since(&before).is_empty());

        after.set(ParamName::NumBoids, 100.0);
        after.set(ParamName::CohesionWeight, 2.5);
        assert_eq!(
            after.changed_since(&before),
            vec![ParamName::NumBoids, ParamName::CohesionWeight]
        );
    }

    #[test]
    fn crossed_speed_limits_are_repaired() {
        let mut params = SimulationParams::default();
        params.min_speed = 400.0;
        params.max_speed = 200.0;
        assert_eq!(params.speed_limits(), (400.0, 400.0));
    }
}
