//! Vector helpers on top of `glam::Vec2` and the projection interval used by SAT.

use glam::Vec2;

use crate::error::CollisionError;

/// Unit vector pointing along +y.
pub const UP: Vec2 = Vec2::new(0.0, 1.0);
/// Unit vector pointing along -y.
pub const DOWN: Vec2 = Vec2::new(0.0, -1.0);
/// Unit vector pointing along -x.
pub const LEFT: Vec2 = Vec2::new(-1.0, 0.0);
/// Unit vector pointing along +x.
pub const RIGHT: Vec2 = Vec2::new(1.0, 0.0);

pub fn vertical(y: f32) -> Vec2 {
    Vec2::new(0.0, y)
}

pub fn horizontal(x: f32) -> Vec2 {
    Vec2::new(x, 0.0)
}

/// Rotate `v` about the origin by `angle` radians.
pub fn rotated(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Unit vector in the direction of `v`; fails only when `v` has length exactly zero.
pub fn normalized(v: Vec2) -> Result<Vec2, CollisionError> {
    let len = v.length();
    if len == 0.0 {
        return Err(CollisionError::ZeroLengthNormalize);
    }
    Ok(v / len)
}

/// Scalar linear interpolation: `start` at t = 0, `end` at t = 1.
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start * (1.0 - t) + end * t
}

/// Component-wise linear interpolation.
pub fn lerp_vec(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    Vec2::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}

/// Closed scalar interval a shape occupies along an axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    pub min: f32,
    pub max: f32,
}

impl Projection {
    /// Projection of a shape with no vertices. Never overlaps anything.
    pub const EMPTY: Self = Self {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Grow the interval to include `p`.
    pub fn include(self, p: f32) -> Self {
        Self {
            min: self.min.min(p),
            max: self.max.max(p),
        }
    }

    /// Intervals overlap iff the one starting further right begins strictly
    /// before the other ends. Touching intervals do not overlap.
    pub fn overlaps(&self, other: &Projection) -> bool {
        let (left, right) = if self.min < other.min {
            (self, other)
        } else {
            (other, self)
        };
        right.min < left.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_rotate_quarter_turn() {
        let v = rotated(Vec2::new(1.0, 0.0), FRAC_PI_2);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-6);
        // counter-clockwise walk around the four directions
        for (from, to) in [(RIGHT, UP), (UP, LEFT), (LEFT, DOWN), (DOWN, RIGHT)] {
            let v = rotated(from, FRAC_PI_2);
            assert_relative_eq!(v.x, to.x, epsilon = 1e-6);
            assert_relative_eq!(v.y, to.y, epsilon = 1e-6);
        }
        assert_eq!(vertical(2.5), UP * 2.5);
        assert_eq!(horizontal(-3.0), RIGHT * -3.0);
    }

    #[test]
    fn test_rotate_round_trip() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            let v = Vec2::new(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0));
            let angle = rng.gen_range(-2.0 * PI..2.0 * PI);
            let back = rotated(rotated(v, angle), -angle);
            assert_relative_eq!(back.x, v.x, epsilon = 1e-3);
            assert_relative_eq!(back.y, v.y, epsilon = 1e-3);
            assert_relative_eq!(rotated(v, angle).length(), v.length(), epsilon = 1e-3);
        }
    }

    #[test]
    fn test_normalize_unit_length() {
        let mut rng = StdRng::seed_from_u64(12);
        for i in 0..1000 {
            let magnitude = 10f32.powi(i % 7 - 3);
            let v = Vec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)) * magnitude;
            if v == Vec2::ZERO {
                continue;
            }
            let n = normalized(v).unwrap();
            assert_relative_eq!(n.length(), 1.0, epsilon = 1e-5);
            // same direction as the input
            assert!(n.dot(v) > 0.0);
        }
    }

    #[test]
    fn test_normalize_zero_fails() {
        assert_eq!(normalized(Vec2::ZERO), Err(CollisionError::ZeroLengthNormalize));
    }

    #[test]
    fn test_lerp_endpoints() {
        assert_relative_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_relative_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        let mid = lerp_vec(Vec2::ZERO, Vec2::new(4.0, -2.0), 0.5);
        assert_eq!(mid, Vec2::new(2.0, -1.0));
    }

    #[test]
    fn test_projection_overlap_is_strict() {
        let a = Projection::new(0.0, 2.0);
        assert!(a.overlaps(&Projection::new(1.0, 3.0)));
        assert!(Projection::new(1.0, 3.0).overlaps(&a));
        // touching at 2.0
        assert!(!a.overlaps(&Projection::new(2.0, 4.0)));
        assert!(!Projection::new(2.0, 4.0).overlaps(&a));
        assert!(!a.overlaps(&Projection::new(5.0, 6.0)));
    }

    #[test]
    fn test_projection_containment_and_empty() {
        let outer = Projection::new(-5.0, 5.0);
        assert!(outer.overlaps(&Projection::new(-1.0, 1.0)));
        assert!(!outer.overlaps(&Projection::EMPTY));
        assert!(!Projection::EMPTY.overlaps(&outer));
        let grown = Projection::EMPTY.include(3.0).include(-1.0);
        assert_eq!(grown, Projection::new(-1.0, 3.0));
    }
}
