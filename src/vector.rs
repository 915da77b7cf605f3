/*
 * Vector Module
 *
 * The 2D vector value type used by every other part of the simulation, a thin
 * wrapper over glam's Vec2. The wrapper adds the checked construction and
 * division the simulation relies on; the algebra itself is glam's.
 *
 * Construction rejects NaN. The operators are plain IEEE arithmetic and are not
 * re-checked, so combining infinities (inf - inf, inf * 0) can yield NaN
 * components. `normalize` maps any non-finite or zero length to the zero vector,
 * so directions taken from such a value never carry NaN further.
 */

use std::fmt;
use std::ops::{Add, AddAssign, Deref, DerefMut, Mul, MulAssign, Neg, Sub, SubAssign};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::SimError;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Vector2(pub Vec2);

impl Vector2 {
    pub const ZERO: Vector2 = Vector2(Vec2::ZERO);
    pub const UP: Vector2 = Vector2(Vec2::Y);
    pub const DOWN: Vector2 = Vector2(Vec2::NEG_Y);
    pub const LEFT: Vector2 = Vector2(Vec2::NEG_X);
    pub const RIGHT: Vector2 = Vector2(Vec2::X);

    /// Create a vector, rejecting NaN components. Infinite components are allowed.
    pub fn new(x: f32, y: f32) -> Result<Self, SimError> {
        if x.is_nan() || y.is_nan() {
            return Err(SimError::InvalidValue(format!(
                "vector component is NaN (was ({x}, {y}))"
            )));
        }
        Ok(Self::xy(x, y))
    }

    /// Unchecked construction for values already known to be valid.
    #[inline]
    pub const fn xy(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    /// Unit vector pointing at `radians` from the positive x-axis.
    #[inline]
    pub fn from_angle(radians: f32) -> Self {
        Self(Vec2::from_angle(radians))
    }

    /// Divide both components by `scalar`.
    pub fn try_div(self, scalar: f32) -> Result<Self, SimError> {
        if scalar == 0.0 {
            return Err(SimError::DivisionByZero);
        }
        Ok(Self(self.0 / scalar))
    }

    #[inline]
    pub fn length_squared(self) -> f32 {
        self.0.length_squared()
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.0.length()
    }

    /// Same direction with length 1, or the zero vector when the length is zero or
    /// not finite.
    #[inline]
    pub fn normalize(self) -> Self {
        Self(self.0.normalize_or_zero())
    }

    #[inline]
    pub fn dot(self, other: Vector2) -> f32 {
        self.0.dot(other.0)
    }

    #[inline]
    pub fn cross(self, other: Vector2) -> f32 {
        self.0.perp_dot(other.0)
    }

    /// Signed angle from the positive x-axis, in (-π, π].
    #[inline]
    pub fn angle(self) -> f32 {
        self.0.to_angle()
    }

    /// Signed angle that rotates this vector onto `other`, in (-π, π].
    #[inline]
    pub fn angle_to(self, other: Vector2) -> f32 {
        self.cross(other).atan2(self.dot(other))
    }

    pub fn rotate(self, radians: f32) -> Self {
        Self(Vec2::from_angle(radians).rotate(self.0))
    }

    #[inline]
    pub fn distance_squared_to(self, other: Vector2) -> f32 {
        self.0.distance_squared(other.0)
    }

    #[inline]
    pub fn distance_to(self, other: Vector2) -> f32 {
        self.0.distance(other.0)
    }

    /// Rescale to exactly `max` if longer than `max`, otherwise unchanged.
    pub fn limit(self, max: f32) -> Self {
        Self(self.0.clamp_length_max(max))
    }

    /// Componentwise clamp between `min` and `max`.
    pub fn clamp(self, min: Vector2, max: Vector2) -> Self {
        Self(self.0.max(min.0).min(max.0))
    }
}

impl Deref for Vector2 {
    type Target = Vec2;

    #[inline]
    fn deref(&self) -> &Vec2 {
        &self.0
    }
}

impl DerefMut for Vector2 {
    #[inline]
    fn deref_mut(&mut self) -> &mut Vec2 {
        &mut self.0
    }
}

impl From<Vec2> for Vector2 {
    fn from(v: Vec2) -> Self {
        Self(v)
    }
}

impl From<Vector2> for Vec2 {
    fn from(v: Vector2) -> Self {
        v.0
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0.x, self.0.y)
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    #[inline]
    fn add(self, rhs: Vector2) -> Vector2 {
        Self(self.0 + rhs.0)
    }
}

impl Add<f32> for Vector2 {
    type Output = Vector2;

    #[inline]
    fn add(self, rhs: f32) -> Vector2 {
        Self(self.0 + rhs)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    #[inline]
    fn sub(self, rhs: Vector2) -> Vector2 {
        Self(self.0 - rhs.0)
    }
}

impl Sub<f32> for Vector2 {
    type Output = Vector2;

    #[inline]
    fn sub(self, rhs: f32) -> Vector2 {
        Self(self.0 - rhs)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Vector2;

    #[inline]
    fn mul(self, rhs: f32) -> Vector2 {
        Self(self.0 * rhs)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    #[inline]
    fn neg(self) -> Vector2 {
        Self(-self.0)
    }
}

impl AddAssign for Vector2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vector2) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Vector2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vector2) {
        self.0 -= rhs.0;
    }
}

impl MulAssign<f32> for Vector2 {
    #[inline]
    fn mul_assign(&mut self, rhs: f32) {
        self.0 *= rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPS: f32 = 1e-5;

    fn v(x: f32, y: f32) -> Vector2 {
        Vector2::new(x, y).unwrap()
    }

    fn approx(a: Vector2, b: Vector2) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    #[test]
    fn rejects_nan_components() {
        assert!(matches!(Vector2::new(f32::NAN, 0.0), Err(SimError::InvalidValue(_))));
        assert!(matches!(Vector2::new(1.0, f32::NAN), Err(SimError::InvalidValue(_))));
        assert!(Vector2::new(f32::NAN, f32::NAN).is_err());
    }

    #[test]
    fn accepts_infinite_components() {
        let inf = v(f32::INFINITY, f32::NEG_INFINITY);
        assert_eq!(inf.x, f32::INFINITY);
        assert_eq!(inf.y, f32::NEG_INFINITY);
    }

    #[test]
    fn normalize_of_infinite_vector_is_zero() {
        let inf = v(f32::INFINITY, 0.0);
        let unit = inf.normalize();
        assert!(!unit.x.is_nan() && !unit.y.is_nan());
        assert_eq!(unit, Vector2::ZERO);
        assert_eq!(v(f32::INFINITY, f32::NEG_INFINITY).normalize(), Vector2::ZERO);
    }

    #[test]
    fn infinite_difference_is_nan_but_never_normalizes_to_nan() {
        let inf = v(f32::INFINITY, 0.0);
        let diff = inf - inf;
        assert!(diff.x.is_nan());
        // the checked constructor refuses what raw arithmetic produced
        assert!(Vector2::new(diff.x, diff.y).is_err());
        assert_eq!(diff.normalize(), Vector2::ZERO);
        assert_eq!((inf * 0.0).normalize(), Vector2::ZERO);
    }

    #[test]
    fn scalar_and_vector_arithmetic() {
        let a = v(1.0, 2.0);
        assert_eq!(a + 3.0, v(4.0, 5.0));
        assert_eq!(a - 1.0, v(0.0, 1.0));
        assert_eq!(a + v(2.0, -2.0), v(3.0, 0.0));
        assert_eq!(a - v(2.0, -2.0), v(-1.0, 4.0));
        assert_eq!(a * 2.0, v(2.0, 4.0));
        assert_eq!(-a, v(-1.0, -2.0));
        // Copy operands leave `a` as it was
        assert_eq!(a, v(1.0, 2.0));
    }

    #[test]
    fn accumulates_in_place() {
        let mut force = Vector2::ZERO;
        force += v(1.0, 1.0);
        force -= v(0.5, 0.0);
        force *= 2.0;
        assert_eq!(force, v(1.0, 2.0));
    }

    #[test]
    fn division_by_zero_fails() {
        assert_eq!(v(1.0, 2.0).try_div(0.0), Err(SimError::DivisionByZero));
        assert_eq!(v(2.0, 4.0).try_div(2.0), Ok(v(1.0, 2.0)));
    }

    #[test]
    fn length_of_three_four_is_five() {
        assert_eq!(v(3.0, 4.0).length(), 5.0);
        assert_eq!(v(3.0, 4.0).length_squared(), 25.0);
    }

    #[test]
    fn normalize_zero_is_zero() {
        assert_eq!(Vector2::ZERO.normalize(), Vector2::ZERO);
        assert!(approx(v(3.0, 4.0).normalize(), v(0.6, 0.8)));
    }

    #[test]
    fn angles_are_signed() {
        assert!((Vector2::UP.angle() - FRAC_PI_2).abs() < EPS);
        assert!((Vector2::LEFT.angle() - PI).abs() < EPS);
        assert!((Vector2::RIGHT.angle_to(Vector2::UP) - FRAC_PI_2).abs() < EPS);
        assert!((Vector2::RIGHT.angle_to(Vector2::DOWN) + FRAC_PI_2).abs() < EPS);
        assert!(Vector2::RIGHT.angle_to(Vector2::RIGHT).abs() < EPS);
    }

    #[test]
    fn rotate_quarter_turn() {
        assert!(approx(Vector2::RIGHT.rotate(FRAC_PI_2), Vector2::UP));
        assert!(approx(v(1.0, 1.0).rotate(PI), v(-1.0, -1.0)));
    }

    #[test]
    fn limit_only_shrinks() {
        assert_eq!(v(3.0, 4.0).limit(10.0), v(3.0, 4.0));
        assert!(approx(v(3.0, 4.0).limit(1.0), v(0.6, 0.8)));
        assert_eq!(v(3.0, 4.0).limit(5.0), v(3.0, 4.0));
    }

    #[test]
    fn clamp_is_componentwise() {
        let clamped = v(-5.0, 50.0).clamp(v(0.0, 0.0), v(10.0, 10.0));
        assert_eq!(clamped, v(0.0, 10.0));
    }

    #[test]
    fn distance_between_points() {
        assert_eq!(v(1.0, 1.0).distance_to(v(4.0, 5.0)), 5.0);
        assert_eq!(v(1.0, 1.0).distance_squared_to(v(4.0, 5.0)), 25.0);
    }

    #[test]
    fn display_format() {
        assert_eq!(v(1.5, -2.0).to_string(), "(1.5, -2)");
    }
}
