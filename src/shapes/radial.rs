//! Radius plus cutoff angle, shared by circular and spherical shapes
//!
//! A circle with a cutoff below 2π is an arc; a sphere with a cutoff below π
//! is a spherical cap. Both shapes hold a `Radial` rather than deriving from a
//! common base type.

use std::f64::consts::{PI, TAU};

use crate::geometry::clamp_positive;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Radial {
    radius: f64,
    cutoff_angle: f64,
    max_angle: f64,
}

impl Radial {
    /// Full sweep for planar shapes, cutoff in `[0, 2π]`
    pub fn planar(radius: f64) -> Self {
        Self::with_cutoff(radius, TAU, TAU)
    }

    /// Full sweep for spherical shapes, cutoff in `[0, π]`
    pub fn polar(radius: f64) -> Self {
        Self::with_cutoff(radius, PI, PI)
    }

    fn with_cutoff(radius: f64, cutoff_angle: f64, max_angle: f64) -> Self {
        let mut radial = Self {
            radius: 0.0,
            cutoff_angle: max_angle,
            max_angle,
        };
        radial.set_radius(radius);
        radial.set_cutoff_angle(cutoff_angle);
        radial
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f64) {
        self.radius = clamp_positive(radius);
    }

    pub fn cutoff_angle(&self) -> f64 {
        self.cutoff_angle
    }

    /// Set the cutoff, clamped into `[0, max_angle]`
    pub fn set_cutoff_angle(&mut self, angle: f64) {
        self.cutoff_angle = if angle.is_nan() {
            self.max_angle
        } else {
            angle.clamp(0.0, self.max_angle)
        };
    }

    pub fn max_angle(&self) -> f64 {
        self.max_angle
    }

    /// Whether the cutoff covers the full sweep
    pub fn is_full(&self) -> bool {
        self.cutoff_angle >= self.max_angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::EPSILON;

    #[test]
    fn test_planar_clamps() {
        let mut radial = Radial::planar(-2.0);
        assert_eq!(radial.radius(), EPSILON);
        radial.set_cutoff_angle(10.0);
        assert_eq!(radial.cutoff_angle(), TAU);
        radial.set_cutoff_angle(-1.0);
        assert_eq!(radial.cutoff_angle(), 0.0);
        assert!(!radial.is_full());
    }

    #[test]
    fn test_polar_range() {
        let mut radial = Radial::polar(1.0);
        assert!(radial.is_full());
        radial.set_cutoff_angle(4.0);
        assert_eq!(radial.cutoff_angle(), PI);
    }
}
