//! Star polygon in the XZ plane
//!
//! Outer vertices sit at multiples of the point angle `α = 2π / points`, inner
//! vertices halfway between. The outline walks outer, inner, outer, ... as a
//! closed polyline.

use std::f64::consts::TAU;

use crate::geometry::primitives::{closed_polyline_count, disc_rings, extend_closed_polyline};
use crate::geometry::{clamp_positive, Vec3};

use super::base::ShapeBase;
use super::style::Style;
use super::traits::Shape;

pub const MIN_POINTS: usize = 2;

#[derive(Clone, Debug)]
pub struct Star {
    base: ShapeBase,
    inner_radius: f64,
    outer_radius: f64,
    points: usize,
}

impl Star {
    pub fn new(inner_radius: f64, outer_radius: f64, points: usize) -> Self {
        Self {
            base: ShapeBase::new(),
            inner_radius: clamp_positive(inner_radius),
            outer_radius: clamp_positive(outer_radius),
            points: points.max(MIN_POINTS),
        }
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn set_inner_radius(&mut self, radius: f64) {
        self.inner_radius = clamp_positive(radius);
        self.base.mark_changed();
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn set_outer_radius(&mut self, radius: f64) {
        self.outer_radius = clamp_positive(radius);
        self.base.mark_changed();
    }

    pub fn points(&self) -> usize {
        self.points
    }

    pub fn set_points(&mut self, points: usize) {
        self.points = points.max(MIN_POINTS);
        self.base.mark_changed();
    }

    /// Angle between neighbouring tips
    pub fn point_angle(&self) -> f64 {
        TAU / self.points as f64
    }

    /// Alternating outer and inner vertices scaled by `factor`
    fn vertices(&self, factor: f64) -> Vec<Vec3> {
        let alpha = self.point_angle();
        let (outer, inner) = (self.outer_radius * factor, self.inner_radius * factor);
        let mut vertices = Vec::with_capacity(self.points * 2);
        for k in 0..self.points {
            let tip = alpha * k as f64;
            let valley = tip + alpha / 2.0;
            vertices.push(Vec3::new(outer * tip.cos(), 0.0, outer * tip.sin()));
            vertices.push(Vec3::new(inner * valley.cos(), 0.0, inner * valley.sin()));
        }
        vertices
    }

    fn rings(&self, density: f64) -> usize {
        disc_rings(self.outer_radius, density)
    }
}

impl Shape for Star {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    fn name(&self) -> &str {
        "Star"
    }

    fn generate_outline(&self) -> Vec<Vec3> {
        let mut points = Vec::new();
        extend_closed_polyline(&mut points, &self.vertices(1.0), self.base.particle_density());
        points
    }

    fn generate_surface(&self) -> Vec<Vec3> {
        let density = self.base.particle_density();
        let rings = self.rings(density);
        let mut points = Vec::new();
        for k in (1..=rings).rev() {
            let vertices = self.vertices(k as f64 / rings as f64);
            extend_closed_polyline(&mut points, &vertices, density);
        }
        points.push(Vec3::zeros());
        points
    }

    fn estimate_count(&self, style: Style, density: f64) -> f64 {
        match style {
            Style::Outline => closed_polyline_count(&self.vertices(1.0), density) as f64,
            Style::Surface | Style::Fill => {
                let rings = self.rings(density);
                let total: usize = (1..=rings)
                    .map(|k| closed_polyline_count(&self.vertices(k as f64 / rings as f64), density))
                    .sum();
                (total + 1) as f64
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_tips_and_valleys() {
        let mut star = Star::new(1.0, 3.0, 5);
        star.set_particle_density(0.1);
        let points = star.get_points().to_vec();
        let radii: Vec<f64> = points.iter().map(|p| p.norm()).collect();
        let max = radii.iter().cloned().fold(f64::MIN, f64::max);
        assert_relative_eq!(max, 3.0, epsilon = 1e-9);
        assert_relative_eq!(points[0], Vec3::new(3.0, 0.0, 0.0));
        // no point dips below the inner radius along an edge
        let min = radii.iter().cloned().fold(f64::MAX, f64::min);
        assert!(min > 0.5);
    }

    #[test]
    fn test_point_angle() {
        let star = Star::new(1.0, 2.0, 4);
        assert_relative_eq!(star.point_angle(), PI / 2.0);
        assert_eq!(Star::new(1.0, 2.0, 0).points(), MIN_POINTS);
    }

    #[test]
    fn test_fill_reaches_centre() {
        let mut star = Star::new(0.5, 1.0, 6);
        star.set_style(Style::Fill);
        let points = star.get_points().to_vec();
        assert!(points.contains(&Vec3::zeros()));
        assert_eq!(points.len() as f64, star.estimate_count(Style::Fill, 0.25));
    }
}
