//! Circle, arc and cylinder
//!
//! A circle of `radius` in the XZ plane. A cutoff angle below 2π turns it into
//! an arc (or sector when filled); a height above zero turns it into a
//! cylinder growing along +Y.
//!
//! | Style   | Flat              | Cylinder                              |
//! |---------|-------------------|---------------------------------------|
//! | Outline | rim               | rim at bottom and top                 |
//! | Surface | disc              | bottom disc ∪ top disc ∪ wall         |
//! | Fill    | disc              | disc at every height step             |

use crate::geometry::primitives::{self, arc_steps, disc_count, line_steps};
use crate::geometry::{clamp_non_negative, density, Vec3};

use super::base::ShapeBase;
use super::radial::Radial;
use super::style::Style;
use super::traits::Shape;

#[derive(Clone, Debug)]
pub struct Circle {
    base: ShapeBase,
    radial: Radial,
    height: f64,
}

impl Circle {
    /// Create a full circle
    pub fn new(radius: f64) -> Self {
        Self {
            base: ShapeBase::new(),
            radial: Radial::planar(radius),
            height: 0.0,
        }
    }

    /// Create an arc sweeping `cutoff_angle` radians from +X towards +Z
    pub fn arc(radius: f64, cutoff_angle: f64) -> Self {
        let mut circle = Self::new(radius);
        circle.radial.set_cutoff_angle(cutoff_angle);
        circle
    }

    /// Create a cylinder
    pub fn cylinder(radius: f64, height: f64) -> Self {
        Self::new(radius).with_height(height)
    }

    /// Set the height (builder pattern)
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = clamp_non_negative(height);
        self
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

    pub fn set_cutoff_angle(&mut self, angle: f64) {
        self.radial.set_cutoff_angle(angle);
        self.base.mark_changed();
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn set_height(&mut self, height: f64) {
        self.height = clamp_non_negative(height);
        self.base.mark_changed();
    }

    fn density(&self) -> f64 {
        self.base.particle_density()
    }

    fn rim(&self, out: &mut Vec<Vec3>, y: f64) {
        primitives::extend_circle(out, self.radius(), self.density(), self.cutoff_angle(), y);
    }

    fn disc(&self, out: &mut Vec<Vec3>, y: f64) {
        primitives::extend_disc(out, self.radius(), self.density(), self.cutoff_angle(), y);
    }

    fn height_steps(&self, density: f64) -> usize {
        line_steps(self.height, density)
    }
}

impl Shape for Circle {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    fn name(&self) -> &str {
        match (self.radial.is_full(), self.height > 0.0) {
            (_, true) => "Cylinder",
            (true, false) => "Circle",
            (false, false) => "Arc",
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
            let steps = self.height_steps(self.density());
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
            let steps = self.height_steps(self.density());
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
        let (radius, cutoff) = (self.radius(), self.cutoff_angle());
        let rim = arc_steps(radius, density, cutoff) as f64;
        let disc = disc_count(radius, density, cutoff) as f64;
        if self.height <= 0.0 {
            return match style {
                Style::Outline => rim,
                Style::Surface | Style::Fill => disc,
            };
        }
        let steps = self.height_steps(density) as f64;
        match style {
            Style::Outline => 2.0 * rim,
            Style::Surface => 2.0 * disc + (steps - 1.0) * rim,
            Style::Fill => (steps + 1.0) * disc,
        }
    }

    /// Flat outlines invert directly: `density = cutoff · r / count`
    fn density_for_count(&self, count: usize) -> f64 {
        if self.style() == Style::Outline && self.height <= 0.0 {
            let count = count.max(1) as f64;
            return self.cutoff_angle() * self.radius() / count;
        }
        let style = self.style();
        density::invert(count, |d| self.estimate_count(style, d))
    }
}
