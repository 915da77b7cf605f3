/*
 * Bounds Module
 *
 * The world is a torus of `width` x `height` with positions in [0, width) x [0, height).
 * Boids and predators both wrap around its edges, and predator pursuit uses the
 * shortest wrapped path.
 */

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::vector::Vector2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Result<Self, SimError> {
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(SimError::InvalidValue(format!(
                "world bounds must be finite and positive (was {width}x{height})"
            )));
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn size(&self) -> Vector2 {
        Vector2::xy(self.width, self.height)
    }

    /// Wrap a position back onto the torus.
    #[inline]
    pub fn wrap(&self, position: Vector2) -> Vector2 {
        Vector2::xy(wrap_axis(position.x, self.width), wrap_axis(position.y, self.height))
    }

    /// Displacement from `from` to `to` taking the shorter way around each axis.
    pub fn toroidal_delta(&self, from: Vector2, to: Vector2) -> Vector2 {
        Vector2::xy(
            shortest_axis_delta(to.x - from.x, self.width),
            shortest_axis_delta(to.y - from.y, self.height),
        )
    }

    pub fn contains(&self, position: Vector2) -> bool {
        (0.0..self.width).contains(&position.x) && (0.0..self.height).contains(&position.y)
    }
}

#[inline]
fn wrap_axis(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

#[inline]
fn shortest_axis_delta(delta: f32, extent: f32) -> f32 {
    let half = extent / 2.0;
    if delta > half {
        delta - extent
    } else if delta < -half {
        delta + extent
    } else {
        delta
    }
}
