//! Sphere and spherical cap
//!
//! The surface is a Fibonacci lattice of `4 · ⌈π r² / d²⌉` points. A polar
//! cutoff below π stops the lattice early, leaving a cap around +Y. Filling
//! stacks concentric shells down to the centre.

use crate::geometry::fibonacci::{self, cap_count, lattice_size};
use crate::geometry::primitives::disc_rings;
use crate::geometry::{density, Vec3};

use super::base::ShapeBase;
use super::radial::Radial;
use super::style::Style;
use super::traits::Shape;

#[derive(Clone, Debug)]
pub struct Sphere {
    base: ShapeBase,
    radial: Radial,
}

impl Sphere {
    /// Create a full sphere
    pub fn new(radius: f64) -> Self {
        Self {
            base: ShapeBase::new(),
            radial: Radial::polar(radius),
        }
    }

    /// Create a spherical cap spanning `cutoff_angle` radians from the +Y pole
    pub fn cap(radius: f64, cutoff_angle: f64) -> Self {
        let mut sphere = Self::new(radius);
        sphere.radial.set_cutoff_angle(cutoff_angle);
        sphere
    }

    pub fn radius(&self) -> f64 {
        self.radial.radius()
    }

    pub fn set_radius(&mut self, radius: f64) {
        self.radial.set_radius(radius);
        self.base.mark_changed();
    }

    pub fn cutoff_angle(&self) -> f64 {
        self.radial.cutoff_angle()
    }

    /// Set the polar cutoff, clamped into `[0, π]`
    pub fn set_cutoff_angle(&mut self, angle: f64) {
        self.radial.set_cutoff_angle(angle);
        self.base.mark_changed();
    }

    fn shell_count(&self, radius: f64, density: f64) -> usize {
        cap_count(lattice_size(radius, density), self.cutoff_angle())
    }
}

impl Shape for Sphere {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    fn name(&self) -> &str {
        if self.radial.is_full() {
            "Sphere"
        } else {
            "Spherical Cap"
        }
    }

    fn generate_outline(&self) -> Vec<Vec3> {
        fibonacci::sphere(self.radius(), self.base.particle_density(), self.cutoff_angle())
    }

    fn generate_filled(&self) -> Vec<Vec3> {
        let (radius, density) = (self.radius(), self.base.particle_density());
        let shells = disc_rings(radius, density);
        let mut points = Vec::new();
        for k in (1..=shells).rev() {
            let shell_radius = radius * k as f64 / shells as f64;
            fibonacci::extend_sphere(&mut points, shell_radius, density, self.cutoff_angle());
        }
        points.push(Vec3::zeros());
        points
    }

    fn estimate_count(&self, style: Style, density: f64) -> f64 {
        let radius = self.radius();
        match style {
            Style::Outline | Style::Surface => self.shell_count(radius, density) as f64,
            Style::Fill => {
                let shells = disc_rings(radius, density);
                let total: usize = (1..=shells)
                    .map(|k| self.shell_count(radius * k as f64 / shells as f64, density))
                    .sum();
                (total + 1) as f64
            }
        }
    }

    /// Surfaces invert the lattice size: `d = r · √(2π (1 − cos c) / N)`
    fn density_for_count(&self, count: usize) -> f64 {
        let style = self.style();
        if style == Style::Fill {
            return density::invert(count, |d| self.estimate_count(style, d));
        }
        let fraction = 1.0 - self.cutoff_angle().cos();
        if fraction <= 0.0 {
            return self.base.particle_density();
        }
        let count = count.max(1) as f64;
        // Slightly coarser so an exact lattice size is not rounded up a step
        self.radius() * (2.0 * std::f64::consts::PI * fraction / count).sqrt() * (1.0 + 1e-9)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_sphere_surface_on_radius() {
        let mut sphere = Sphere::new(3.0);
        sphere.set_style(Style::Surface);
        for p in sphere.get_points() {
            assert_relative_eq!(p.norm(), 3.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_cap_respects_cutoff() {
        let mut cap = Sphere::cap(2.0, PI / 4.0);
        cap.set_particle_density(0.1);
        let min_y = 2.0 * (PI / 4.0).cos();
        for p in cap.get_points() {
            assert!(p.y >= min_y - 1e-9);
        }
        assert_eq!(cap.name(), "Spherical Cap");
    }

    #[test]
    fn test_fill_shells_inside() {
        let mut sphere = Sphere::new(1.0);
        sphere.set_style(Style::Fill);
        sphere.set_particle_density(0.2);
        let points = sphere.get_points().to_vec();
        assert!(points.iter().all(|p| p.norm() <= 1.0 + 1e-9));
        assert!(points.iter().any(|p| p.norm() < 0.5));
        assert_eq!(points.len() as f64, sphere.estimate_count(Style::Fill, 0.2));
    }

    #[test]
    fn test_particle_count_inverts_lattice() {
        let mut sphere = Sphere::new(2.0);
        sphere.set_particle_count(1000);
        let n = sphere.get_points().len() as f64;
        assert!((n - 1000.0).abs() / 1000.0 < 0.05);
    }

    #[test]
    fn test_exact_lattice_counts_not_rounded_up() {
        let mut sphere = Sphere::new(2.0);
        sphere.set_particle_count(100);
        assert_eq!(sphere.get_points().len(), 100);

        let mut cap = Sphere::cap(2.0, PI / 3.0);
        cap.set_particle_count(10);
        assert_eq!(cap.get_points().len(), 10);
    }
}
