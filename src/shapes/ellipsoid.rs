//! Ellipsoid
//!
//! A Fibonacci lattice on the unit sphere stretched per axis. The lattice
//! size comes from Knud Thomsen's surface-area approximation, so the spacing
//! stays near `density` for moderate eccentricities.

use std::f64::consts::PI;

use crate::geometry::fibonacci;
use crate::geometry::primitives::disc_rings;
use crate::geometry::{clamp_positive, Vec3};

use super::base::ShapeBase;
use super::style::Style;
use super::traits::Shape;

/// Exponent of Thomsen's approximation (relative error under 1.1%)
const THOMSEN_P: f64 = 1.6075;

#[derive(Clone, Debug)]
pub struct Ellipsoid {
    base: ShapeBase,
    radii: Vec3,
}

impl Ellipsoid {
    pub fn new(x_radius: f64, y_radius: f64, z_radius: f64) -> Self {
        Self {
            base: ShapeBase::new(),
            radii: clamp_radii(Vec3::new(x_radius, y_radius, z_radius)),
        }
    }

    pub fn radii(&self) -> Vec3 {
        self.radii
    }

    pub fn set_radii(&mut self, x_radius: f64, y_radius: f64, z_radius: f64) {
        self.radii = clamp_radii(Vec3::new(x_radius, y_radius, z_radius));
        self.base.mark_changed();
    }

    /// Approximate surface area
    pub fn surface_area(&self) -> f64 {
        surface_area(&self.radii)
    }

    fn lattice_size(radii: &Vec3, density: f64) -> usize {
        ((surface_area(radii) / (density * density)).ceil() as usize).max(1)
    }

    fn extend_shell(out: &mut Vec<Vec3>, radii: &Vec3, density: f64) {
        let n = Self::lattice_size(radii, density);
        fibonacci::extend_unit_lattice(out, n, PI, |p| p.component_mul(radii));
    }

    fn shells(&self, density: f64) -> usize {
        disc_rings(self.radii.x.max(self.radii.y).max(self.radii.z), density)
    }
}

fn clamp_radii(radii: Vec3) -> Vec3 {
    radii.map(clamp_positive)
}

fn surface_area(radii: &Vec3) -> f64 {
    let (a, b, c) = (radii.x.powf(THOMSEN_P), radii.y.powf(THOMSEN_P), radii.z.powf(THOMSEN_P));
    4.0 * PI * ((a * b + a * c + b * c) / 3.0).powf(1.0 / THOMSEN_P)
}

impl Shape for Ellipsoid {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    fn name(&self) -> &str {
        "Ellipsoid"
    }

    fn generate_outline(&self) -> Vec<Vec3> {
        let mut points = Vec::new();
        Self::extend_shell(&mut points, &self.radii, self.base.particle_density());
        points
    }

    fn generate_filled(&self) -> Vec<Vec3> {
        let density = self.base.particle_density();
        let shells = self.shells(density);
        let mut points = Vec::new();
        for k in (1..=shells).rev() {
            let radii = self.radii * (k as f64 / shells as f64);
            Self::extend_shell(&mut points, &radii, density);
        }
        points.push(Vec3::zeros());
        points
    }

    fn estimate_count(&self, style: Style, density: f64) -> f64 {
        match style {
            Style::Outline | Style::Surface => Self::lattice_size(&self.radii, density) as f64,
            Style::Fill => {
                let shells = self.shells(density);
                let total: usize = (1..=shells)
                    .map(|k| Self::lattice_size(&(self.radii * (k as f64 / shells as f64)), density))
                    .sum();
                (total + 1) as f64
            }
        }
    }
}
