//! Helix around the Y axis
//!
//! The parameter `t` advances along `(r cos t, slope·t, r sin t)`, so the
//! curve climbs `slope` per radian; a negative slope descends from y = 0.
//! Steps are sized by the true arc length `t · √(r² + slope²)`.

use serde::{Deserialize, Serialize};

use crate::geometry::primitives::disc_rings;
use crate::geometry::{clamp_magnitude, clamp_non_negative, clamp_positive, Vec3};

use super::base::ShapeBase;
use super::style::Style;
use super::traits::Shape;

/// Direction the helix turns when seen from +Y
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winding {
    #[default]
    CounterClockwise,
    Clockwise,
}

impl Winding {
    fn sign(self) -> f64 {
        match self {
            Winding::CounterClockwise => 1.0,
            Winding::Clockwise => -1.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Helix {
    base: ShapeBase,
    radius: f64,
    height: f64,
    slope: f64,
    winding: Winding,
}

impl Helix {
    pub fn new(radius: f64, height: f64, slope: f64, winding: Winding) -> Self {
        Self {
            base: ShapeBase::new(),
            radius: clamp_positive(radius),
            height: clamp_non_negative(height),
            slope: clamp_magnitude(slope),
            winding,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f64) {
        self.radius = clamp_positive(radius);
        self.base.mark_changed();
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn set_height(&mut self, height: f64) {
        self.height = clamp_non_negative(height);
        self.base.mark_changed();
    }

    /// Rise per radian of rotation, negative when descending
    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn set_slope(&mut self, slope: f64) {
        self.slope = clamp_magnitude(slope);
        self.base.mark_changed();
    }

    pub fn winding(&self) -> Winding {
        self.winding
    }

    pub fn set_winding(&mut self, winding: Winding) {
        self.winding = winding;
        self.base.mark_changed();
    }

    /// Number of full turns
    pub fn turns(&self) -> f64 {
        self.parameter_range() / std::f64::consts::TAU
    }

    fn parameter_range(&self) -> f64 {
        (self.height / self.slope).abs()
    }

    fn steps(&self, radius: f64, density: f64) -> usize {
        let length = self.parameter_range() * (radius * radius + self.slope * self.slope).sqrt();
        ((length / density).round() as usize).max(1)
    }

    fn extend_strand(&self, out: &mut Vec<Vec3>, radius: f64, density: f64) {
        let steps = self.steps(radius, density);
        let dt = self.parameter_range() / steps as f64;
        let sign = self.winding.sign();
        out.reserve(steps);
        for i in 0..steps {
            let t = dt * i as f64;
            let (sin, cos) = (sign * t).sin_cos();
            out.push(Vec3::new(radius * cos, self.slope * t, radius * sin));
        }
    }

    fn sub_radii(&self, density: f64) -> impl Iterator<Item = f64> {
        let rings = disc_rings(self.radius, density);
        let radius = self.radius;
        (1..=rings).rev().map(move |k| radius * k as f64 / rings as f64)
    }
}

impl Shape for Helix {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    fn name(&self) -> &str {
        "Helix"
    }

    fn generate_outline(&self) -> Vec<Vec3> {
        let mut points = Vec::new();
        self.extend_strand(&mut points, self.radius, self.base.particle_density());
        points
    }

    fn generate_surface(&self) -> Vec<Vec3> {
        let density = self.base.particle_density();
        let mut points = Vec::new();
        for radius in self.sub_radii(density) {
            self.extend_strand(&mut points, radius, density);
        }
        points
    }

    fn estimate_count(&self, style: Style, density: f64) -> f64 {
        match style {
            Style::Outline => self.steps(self.radius, density) as f64,
            Style::Surface | Style::Fill => self
                .sub_radii(density)
                .map(|radius| self.steps(radius, density) as f64)
                .sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::TAU;

    #[test]
    fn test_points_on_cylinder() {
        let mut helix = Helix::new(2.0, 5.0, 0.5, Winding::CounterClockwise);
        helix.set_particle_density(0.1);
        for p in helix.get_points() {
            assert_relative_eq!((p.x * p.x + p.z * p.z).sqrt(), 2.0, epsilon = 1e-9);
            assert!(p.y >= 0.0 && p.y < 5.0);
        }
    }

    #[test]
    fn test_spacing_follows_arc_length() {
        let mut helix = Helix::new(1.0, 3.0, 0.25, Winding::Clockwise);
        helix.set_particle_density(0.2);
        let points = helix.get_points().to_vec();
        for pair in points.windows(2) {
            let gap = (pair[1] - pair[0]).norm();
            assert!(gap > 0.18 && gap < 0.21, "gap {}", gap);
        }
    }

    #[test]
    fn test_winding_direction() {
        let mut ccw = Helix::new(1.0, 1.0, 1.0, Winding::CounterClockwise);
        let mut cw = Helix::new(1.0, 1.0, 1.0, Winding::Clockwise);
        ccw.set_particle_density(0.1);
        cw.set_particle_density(0.1);
        assert!(ccw.get_points()[1].z > 0.0);
        assert!(cw.get_points()[1].z < 0.0);
    }

    #[test]
    fn test_negative_slope_descends() {
        let mut up = Helix::new(1.0, 5.0, 0.5, Winding::CounterClockwise);
        let mut down = Helix::new(1.0, 5.0, -0.5, Winding::CounterClockwise);
        assert_eq!(down.slope(), -0.5);
        assert_relative_eq!(down.turns(), up.turns());

        let rising = up.get_points().to_vec();
        let falling = down.get_points().to_vec();
        assert_eq!(rising.len(), falling.len());
        for (r, f) in rising.iter().zip(&falling) {
            assert_relative_eq!(f.x, r.x, epsilon = 1e-12);
            assert_relative_eq!(f.y, -r.y, epsilon = 1e-12);
            assert_relative_eq!(f.z, r.z, epsilon = 1e-12);
            assert!(f.y <= 0.0 && f.y > -5.0);
        }
    }

    #[test]
    fn test_turns() {
        let helix = Helix::new(1.0, TAU, 1.0, Winding::CounterClockwise);
        assert_relative_eq!(helix.turns(), 1.0);
    }

    #[test]
    fn test_surface_count_matches_estimate() {
        let mut helix = Helix::new(1.0, 2.0, 0.3, Winding::CounterClockwise);
        helix.set_style(Style::Surface);
        let n = helix.get_points().len() as f64;
        assert_eq!(n, helix.estimate_count(Style::Surface, 0.25));
    }
}
