//! Geometry module - stateless sampling math shared by every shape
//!
//! This module provides:
//! - Line, circle, disc, ellipse and polygon sampling (`primitives`)
//! - Fibonacci lattice sampling of spheres (`fibonacci`)
//! - Inversion of point-count estimates into a particle density (`density`)
//!
//! ## Coordinate System
//!
//! Y is up. Flat shapes (circles, ellipses, polygons, stars, hearts) lie in the
//! XZ plane at y = 0 and prisms grow along +Y.

pub mod density;
pub mod fibonacci;
pub mod primitives;

use nalgebra::{UnitQuaternion, Vector3};

/// 3D point or direction
pub type Vec3 = Vector3<f64>;

/// Unit quaternion used for orientations
pub type Quat = UnitQuaternion<f64>;

/// Smallest value any radius, extent, scale or density may take
pub const EPSILON: f64 = 1e-4;

/// Clamp a length-like value to the epsilon floor
#[inline]
pub fn clamp_positive(value: f64) -> f64 {
    if value.is_nan() {
        EPSILON
    } else {
        value.max(EPSILON)
    }
}

/// Clamp the magnitude of a signed value to the epsilon floor, keeping its sign
#[inline]
pub fn clamp_magnitude(value: f64) -> f64 {
    if value.is_nan() {
        EPSILON
    } else if value < 0.0 {
        value.min(-EPSILON)
    } else {
        value.max(EPSILON)
    }
}

/// Clamp a height-like value so it is never negative
#[inline]
pub fn clamp_non_negative(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_positive() {
        assert_eq!(clamp_positive(-3.0), EPSILON);
        assert_eq!(clamp_positive(0.0), EPSILON);
        assert_eq!(clamp_positive(f64::NAN), EPSILON);
        assert_eq!(clamp_positive(2.5), 2.5);
    }

    #[test]
    fn test_clamp_magnitude() {
        assert_eq!(clamp_magnitude(-0.5), -0.5);
        assert_eq!(clamp_magnitude(-1e-9), -EPSILON);
        assert_eq!(clamp_magnitude(0.0), EPSILON);
        assert_eq!(clamp_magnitude(f64::NAN), EPSILON);
        assert_eq!(clamp_magnitude(3.0), 3.0);
    }

    #[test]
    fn test_clamp_non_negative() {
        assert_eq!(clamp_non_negative(-1.0), 0.0);
        assert_eq!(clamp_non_negative(4.0), 4.0);
    }
}
