//! Regular polygon and prism
//!
//! Vertices sit on a circle of `radius` in the XZ plane, first vertex on +X.
//! A height above zero extrudes the polygon along +Y:
//! - Outline: bottom and top outline joined by vertical edges at every vertex
//! - Surface: filled bottom and top plus the wall outline at each interior level
//! - Fill: filled polygon at every level

use std::f64::consts::PI;

use crate::geometry::primitives::{
    extend_closed_polyline, extend_filled_polygon, extend_line, filled_polygon_count,
    line_steps, polygon_vertices, regular_outline_count,
};
use crate::geometry::{clamp_non_negative, clamp_positive, Vec3};

use super::base::ShapeBase;
use super::style::Style;
use super::traits::Shape;

pub const MIN_SIDES: usize = 3;

#[derive(Clone, Debug)]
pub struct RegularPolygon {
    base: ShapeBase,
    sides: usize,
    radius: f64,
    height: f64,
}

impl RegularPolygon {
    /// Create a polygon with `sides` vertices on a circle of `radius`
    pub fn new(sides: usize, radius: f64) -> Self {
        Self {
            base: ShapeBase::new(),
            sides: sides.max(MIN_SIDES),
            radius: clamp_positive(radius),
            height: 0.0,
        }
    }

    /// Create a polygon from its edge length
    pub fn from_side_length(sides: usize, side_length: f64) -> Self {
        let sides = sides.max(MIN_SIDES);
        Self::new(sides, clamp_positive(side_length) / (2.0 * (PI / sides as f64).sin()))
    }

    /// Set the prism height (builder pattern)
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = clamp_non_negative(height);
        self
    }

    pub fn sides(&self) -> usize {
        self.sides
    }

    pub fn set_sides(&mut self, sides: usize) {
        self.sides = sides.max(MIN_SIDES);
        self.base.mark_changed();
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

    pub fn side_length(&self) -> f64 {
        2.0 * self.radius * (PI / self.sides as f64).sin()
    }

    pub fn apothem(&self) -> f64 {
        self.radius * (PI / self.sides as f64).cos()
    }

    fn vertices_at(&self, y: f64) -> Vec<Vec3> {
        let lift = Vec3::new(0.0, y, 0.0);
        polygon_vertices(self.sides, self.radius)
            .into_iter()
            .map(|v| v + lift)
            .collect()
    }

    /// Interior wall levels of a prism, ends excluded
    fn levels(&self, density: f64) -> (usize, f64) {
        let steps = line_steps(self.height, density);
        (steps, self.height / steps as f64)
    }
}

impl Shape for RegularPolygon {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    fn name(&self) -> &str {
        if self.height > 0.0 {
            "Regular Prism"
        } else {
            "Regular Polygon"
        }
    }

    fn generate_outline(&self) -> Vec<Vec3> {
        let density = self.base.particle_density();
        let bottom = self.vertices_at(0.0);
        let mut points = Vec::new();
        extend_closed_polyline(&mut points, &bottom, density);
        if self.height > 0.0 {
            let top = self.vertices_at(self.height);
            extend_closed_polyline(&mut points, &top, density);
            for (low, high) in bottom.iter().zip(&top) {
                let mut edge = Vec::new();
                extend_line(&mut edge, low, high, density, false);
                // both ends are already on the rims
                points.extend(edge.into_iter().skip(1));
            }
        }
        points
    }

    fn generate_surface(&self) -> Vec<Vec3> {
        let density = self.base.particle_density();
        let mut points = Vec::new();
        extend_filled_polygon(&mut points, self.sides, self.radius, density, 0.0);
        if self.height > 0.0 {
            extend_filled_polygon(&mut points, self.sides, self.radius, density, self.height);
            let (steps, step) = self.levels(density);
            for level in 1..steps {
                extend_closed_polyline(&mut points, &self.vertices_at(step * level as f64), density);
            }
        }
        points
    }

    fn generate_filled(&self) -> Vec<Vec3> {
        let density = self.base.particle_density();
        let mut points = Vec::new();
        if self.height > 0.0 {
            let (steps, step) = self.levels(density);
            for level in 0..=steps {
                extend_filled_polygon(&mut points, self.sides, self.radius, density, step * level as f64);
            }
        } else {
            extend_filled_polygon(&mut points, self.sides, self.radius, density, 0.0);
        }
        points
    }

    fn estimate_count(&self, style: Style, density: f64) -> f64 {
        let outline = regular_outline_count(self.sides, self.radius, density) as f64;
        let filled = filled_polygon_count(self.sides, self.radius, density) as f64;
        if self.height <= 0.0 {
            return match style {
                Style::Outline => outline,
                Style::Surface | Style::Fill => filled,
            };
        }
        let steps = line_steps(self.height, density) as f64;
        let sides = self.sides as f64;
        match style {
            Style::Outline => 2.0 * outline + sides * (steps - 1.0),
            Style::Surface => 2.0 * filled + (steps - 1.0) * outline,
            Style::Fill => (steps + 1.0) * filled,
        }
    }
}
