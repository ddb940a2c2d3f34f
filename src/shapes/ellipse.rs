//! Ellipse, elliptical arc and elliptic cylinder
//!
//! `x_radius` runs along X and `z_radius` along Z. The angular step is
//! recomputed at every point from the local speed of the parametrisation,
//! since an ellipse has no closed-form arc length.
//!
//! The cutoff angle is the parametric angle `θ` of `(a cos θ, b sin θ)`. For
//! eccentric ellipses it differs from the polar angle actually swept.

use std::f64::consts::TAU;

use crate::geometry::primitives::{self, elliptical_disc_count, ellipse_count, line_steps};
use crate::geometry::{clamp_non_negative, clamp_positive, Vec3};

use super::base::ShapeBase;
use super::style::Style;
use super::traits::Shape;

#[derive(Clone, Debug)]
pub struct Ellipse {
    base: ShapeBase,
    x_radius: f64,
    z_radius: f64,
    cutoff_angle: f64,
    height: f64,
}

impl Ellipse {
    /// Create a full ellipse
    pub fn new(x_radius: f64, z_radius: f64) -> Self {
        Self {
            base: ShapeBase::new(),
            x_radius: clamp_positive(x_radius),
            z_radius: clamp_positive(z_radius),
            cutoff_angle: TAU,
            height: 0.0,
        }
    }

    /// Create an elliptical arc
    pub fn arc(x_radius: f64, z_radius: f64, cutoff_angle: f64) -> Self {
        let mut ellipse = Self::new(x_radius, z_radius);
        ellipse.cutoff_angle = clamp_cutoff(cutoff_angle);
        ellipse
    }

    /// Set the height (builder pattern)
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = clamp_non_negative(height);
        self
    }

    pub fn x_radius(&self) -> f64 {
        self.x_radius
    }

    pub fn set_x_radius(&mut self, radius: f64) {
        self.x_radius = clamp_positive(radius);
        self.base.mark_changed();
    }

    pub fn z_radius(&self) -> f64 {
        self.z_radius
    }

    pub fn set_z_radius(&mut self, radius: f64) {
        self.z_radius = clamp_positive(radius);
        self.base.mark_changed();
    }

    pub fn cutoff_angle(&self) -> f64 {
        self.cutoff_angle
    }

    pub fn set_cutoff_angle(&mut self, angle: f64) {
        self.cutoff_angle = clamp_cutoff(angle);
        self.base.mark_changed();
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn set_height(&mut self, height: f64) {
        self.height = clamp_non_negative(height);
        self.base.mark_changed();
    }

    /// Approximate circumference (Ramanujan)
    pub fn circumference(&self) -> f64 {
        primitives::ellipse_circumference(self.x_radius, self.z_radius)
    }

    fn rim(&self, out: &mut Vec<Vec3>, y: f64) {
        let density = self.base.particle_density();
        primitives::extend_ellipse(out, self.x_radius, self.z_radius, density, self.cutoff_angle, y);
    }

    fn disc(&self, out: &mut Vec<Vec3>, y: f64) {
        let density = self.base.particle_density();
        primitives::extend_elliptical_disc(out, self.x_radius, self.z_radius, density, self.cutoff_angle, y);
    }
}

fn clamp_cutoff(angle: f64) -> f64 {
    if angle.is_nan() {
        TAU
    } else {
        angle.clamp(0.0, TAU)
    }
}

impl Shape for Ellipse {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    fn name(&self) -> &str {
        if self.height > 0.0 {
            "Elliptic Cylinder"
        } else if self.cutoff_angle < TAU {
            "Elliptical Arc"
        } else {
            "Ellipse"
        }
    }

    fn generate_outline(&self) -> Vec<Vec3> {
        let mut points = Vec::new();
        self.rim(&mut points, 0.0);
        if self.height > 0.0 {
            self.rim(&mut points, self.height);
        }
        points
    }

    fn generate_surface(&self) -> Vec<Vec3> {
        let mut points = Vec::new();
        self.disc(&mut points, 0.0);
        if self.height > 0.0 {
            self.disc(&mut points, self.height);
            let steps = line_steps(self.height, self.base.particle_density());
            let step = self.height / steps as f64;
            for level in 1..steps {
                self.rim(&mut points, step * level as f64);
            }
        }
        points
    }

    fn generate_filled(&self) -> Vec<Vec3> {
        let mut points = Vec::new();
        if self.height > 0.0 {
            let steps = line_steps(self.height, self.base.particle_density());
            let step = self.height / steps as f64;
            for level in 0..=steps {
                self.disc(&mut points, step * level as f64);
            }
        } else {
            self.disc(&mut points, 0.0);
        }
        points
    }

    fn estimate_count(&self, style: Style, density: f64) -> f64 {
        let (a, b, cutoff) = (self.x_radius, self.z_radius, self.cutoff_angle);
        let rim = ellipse_count(a, b, density, cutoff);
        let disc = elliptical_disc_count(a, b, density, cutoff);
        if self.height <= 0.0 {
            return match style {
                Style::Outline => rim,
                Style::Surface | Style::Fill => disc,
            };
        }
        let steps = line_steps(self.height, density) as f64;
        match style {
            Style::Outline => 2.0 * rim,
            Style::Surface => 2.0 * disc + (steps - 1.0) * rim,
            Style::Fill => (steps + 1.0) * disc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_outline_on_curve() {
        let mut ellipse = Ellipse::new(4.0, 2.0);
        ellipse.set_particle_density(0.2);
        for p in ellipse.get_points() {
            let value = (p.x / 4.0).powi(2) + (p.z / 2.0).powi(2);
            assert_relative_eq!(value, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_outline_spacing_roughly_uniform() {
        let mut ellipse = Ellipse::new(5.0, 1.0);
        ellipse.set_particle_density(0.1);
        let points = ellipse.get_points().to_vec();
        for pair in points.windows(2) {
            let gap = (pair[1] - pair[0]).norm();
            assert!(gap > 0.05 && gap < 0.15, "gap {}", gap);
        }
    }

    #[test]
    fn test_arc_is_parametric() {
        let mut arc = Ellipse::arc(3.0, 1.0, PI);
        arc.set_particle_density(0.1);
        assert_eq!(arc.name(), "Elliptical Arc");
        assert!(arc.get_points().iter().all(|p| p.z >= -1e-9));
    }

    #[test]
    fn test_surface_filled() {
        let mut ellipse = Ellipse::new(2.0, 1.0);
        ellipse.set_style(Style::Surface);
        let points = ellipse.get_points().to_vec();
        assert!(points.iter().all(|p| (p.x / 2.0).powi(2) + p.z.powi(2) <= 1.0 + 1e-9));
        assert!(points.contains(&Vec3::zeros()));
    }

    #[test]
    fn test_elliptic_cylinder_levels() {
        let mut ellipse = Ellipse::new(2.0, 1.0).with_height(1.0);
        ellipse.set_particle_density(0.25);
        assert_eq!(ellipse.name(), "Elliptic Cylinder");
        let outline = ellipse.get_points().to_vec();
        assert!(outline.iter().all(|p| p.y == 0.0 || p.y == 1.0));
    }
}
