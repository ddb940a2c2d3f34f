//! Heart curve in the XZ plane
//!
//! ```text
//! x = w sin³θ
//! z = l (cosθ − cos2θ / e − cos3θ / 6 − cos4θ / 16)
//! ```
//!
//! The eccentricity `e` controls how deep the top notch is. Surfaces nest
//! smaller hearts inside the outline, shrinking both axes by `1.5 · density`
//! per ring.

use std::f64::consts::TAU;

use crate::geometry::{clamp_positive, Vec3};

use super::base::ShapeBase;
use super::style::Style;
use super::traits::Shape;

pub const DEFAULT_ECCENTRICITY: f64 = 3.0;

/// Ring spacing relative to density
const RING_STEP: f64 = 1.5;

#[derive(Clone, Debug)]
pub struct Heart {
    base: ShapeBase,
    width: f64,
    length: f64,
    eccentricity: f64,
}

impl Heart {
    pub fn new(width: f64, length: f64) -> Self {
        Self::with_eccentricity(width, length, DEFAULT_ECCENTRICITY)
    }

    pub fn with_eccentricity(width: f64, length: f64, eccentricity: f64) -> Self {
        Self {
            base: ShapeBase::new(),
            width: clamp_positive(width),
            length: clamp_positive(length),
            eccentricity: clamp_positive(eccentricity),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn set_width(&mut self, width: f64) {
        self.width = clamp_positive(width);
        self.base.mark_changed();
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn set_length(&mut self, length: f64) {
        self.length = clamp_positive(length);
        self.base.mark_changed();
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn set_eccentricity(&mut self, eccentricity: f64) {
        self.eccentricity = clamp_positive(eccentricity);
        self.base.mark_changed();
    }

    fn steps(width: f64, length: f64, density: f64) -> usize {
        let angle_step = 4.0 / 3.0 * density / (width + length);
        ((TAU / angle_step).round() as usize).max(1)
    }

    fn extend_curve(&self, out: &mut Vec<Vec3>, width: f64, length: f64, density: f64) {
        let steps = Self::steps(width, length, density);
        let angle_step = TAU / steps as f64;
        out.reserve(steps);
        for i in 0..steps {
            let theta = angle_step * i as f64;
            let x = width * theta.sin().powi(3);
            let z = length
                * (theta.cos()
                    - (2.0 * theta).cos() / self.eccentricity
                    - (3.0 * theta).cos() / 6.0
                    - (4.0 * theta).cos() / 16.0);
            out.push(Vec3::new(x, 0.0, z));
        }
    }

    /// (width, length) of every nested ring, outermost first
    fn rings(&self, density: f64) -> Vec<(f64, f64)> {
        let shrink = RING_STEP * density;
        let mut rings = Vec::new();
        let (mut width, mut length) = (self.width, self.length);
        while width > 0.0 && length > 0.0 {
            rings.push((width, length));
            width -= shrink;
            length -= shrink;
        }
        rings
    }
}

impl Shape for Heart {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    fn name(&self) -> &str {
        "Heart"
    }

    fn generate_outline(&self) -> Vec<Vec3> {
        let mut points = Vec::new();
        self.extend_curve(&mut points, self.width, self.length, self.base.particle_density());
        points
    }

    fn generate_surface(&self) -> Vec<Vec3> {
        let density = self.base.particle_density();
        let mut points = Vec::new();
        for (width, length) in self.rings(density) {
            self.extend_curve(&mut points, width, length, density);
        }
        points
    }

    fn estimate_count(&self, style: Style, density: f64) -> f64 {
        match style {
            Style::Outline => Self::steps(self.width, self.length, density) as f64,
            Style::Surface | Style::Fill => self
                .rings(density)
                .into_iter()
                .map(|(width, length)| Self::steps(width, length, density) as f64)
                .sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_curve_extremes() {
        let mut heart = Heart::new(2.0, 2.0);
        heart.set_particle_density(0.05);
        let points = heart.get_points().to_vec();
        let max_x = points.iter().map(|p| p.x).fold(f64::MIN, f64::max);
        assert_relative_eq!(max_x, 2.0, epsilon = 1e-3);
        // θ = 0 lies on the notch: l (1 − 1/e − 1/6 − 1/16)
        let notch = 2.0 * (1.0 - 1.0 / 3.0 - 1.0 / 6.0 - 1.0 / 16.0);
        assert_relative_eq!(points[0].z, notch, epsilon = 1e-12);
        assert!(points.iter().all(|p| p.y == 0.0));
    }

    #[test]
    fn test_surface_rings_shrink() {
        let mut heart = Heart::new(1.0, 1.0);
        heart.set_particle_density(0.1);
        heart.set_style(Style::Surface);
        let outline = heart.generate_outline().len();
        let surface = heart.get_points().len();
        assert!(surface > outline * 2);
        assert_eq!(surface as f64, heart.estimate_count(Style::Surface, 0.1));
    }

    #[test]
    fn test_eccentricity_clamped() {
        let heart = Heart::with_eccentricity(1.0, 1.0, -2.0);
        assert!(heart.eccentricity() > 0.0);
    }
}
