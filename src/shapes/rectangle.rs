//! Axis-aligned rectangle
//!
//! Like the cuboid, the two corners are point sources. The rectangle lies in
//! one of the three axis planes; its normal coordinate comes from the first
//! corner.

use serde::{Deserialize, Serialize};

use crate::geometry::primitives::{axis_positions, line_steps};
use crate::geometry::{Vec3, EPSILON};

use super::base::ShapeBase;
use super::style::Style;
use super::supplier::{fixed, PointSource};
use super::traits::Shape;

/// Axis plane a rectangle lies in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plane {
    #[default]
    XZ,
    XY,
    YZ,
}

impl Plane {
    /// Split a point into (u, v, normal) coordinates
    fn split(self, p: &Vec3) -> (f64, f64, f64) {
        match self {
            Plane::XZ => (p.x, p.z, p.y),
            Plane::XY => (p.x, p.y, p.z),
            Plane::YZ => (p.y, p.z, p.x),
        }
    }

    /// Rebuild a point from (u, v, normal) coordinates
    fn join(self, u: f64, v: f64, normal: f64) -> Vec3 {
        match self {
            Plane::XZ => Vec3::new(u, normal, v),
            Plane::XY => Vec3::new(u, v, normal),
            Plane::YZ => Vec3::new(normal, u, v),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Rectangle {
    base: ShapeBase,
    corner_a: Box<dyn PointSource>,
    corner_b: Box<dyn PointSource>,
    plane: Plane,
}

/// Resolved in-plane frame
struct Frame {
    u_min: f64,
    v_min: f64,
    length: f64,
    width: f64,
    normal: f64,
}

impl Rectangle {
    /// Create a rectangle centred on the origin
    ///
    /// `length` runs along the plane's first axis, `width` along its second.
    pub fn new(length: f64, width: f64, plane: Plane) -> Self {
        let half_u = length.abs().max(2.0 * EPSILON) / 2.0;
        let half_v = width.abs().max(2.0 * EPSILON) / 2.0;
        Self::from_corners(
            fixed(plane.join(-half_u, -half_v, 0.0)),
            fixed(plane.join(half_u, half_v, 0.0)),
            plane,
        )
    }

    /// Create a rectangle spanning two (possibly moving) corners
    pub fn from_corners(
        corner_a: Box<dyn PointSource>,
        corner_b: Box<dyn PointSource>,
        plane: Plane,
    ) -> Self {
        let mut rectangle = Self {
            base: ShapeBase::new(),
            corner_a,
            corner_b,
            plane,
        };
        rectangle.refresh_dynamic();
        rectangle
    }

    pub fn plane(&self) -> Plane {
        self.plane
    }

    pub fn set_plane(&mut self, plane: Plane) {
        self.plane = plane;
        self.base.mark_changed();
    }

    /// Replace both corners
    pub fn set_corners(&mut self, corner_a: Box<dyn PointSource>, corner_b: Box<dyn PointSource>) {
        self.corner_a = corner_a;
        self.corner_b = corner_b;
        self.refresh_dynamic();
    }

    /// Current (length, width) of the rectangle
    pub fn dimensions(&self) -> (f64, f64) {
        let frame = self.frame();
        (frame.length, frame.width)
    }

    fn refresh_dynamic(&mut self) {
        let dynamic = self.corner_a.is_dynamic() || self.corner_b.is_dynamic();
        self.base.set_dynamic(dynamic);
    }

    fn frame(&self) -> Frame {
        let (ua, va, normal) = self.plane.split(&self.corner_a.resolve());
        let (ub, vb, _) = self.plane.split(&self.corner_b.resolve());
        let length = (ub - ua).abs().max(2.0 * EPSILON);
        let width = (vb - va).abs().max(2.0 * EPSILON);
        Frame {
            u_min: (ua + ub) / 2.0 - length / 2.0,
            v_min: (va + vb) / 2.0 - width / 2.0,
            length,
            width,
            normal,
        }
    }

    fn axes(frame: &Frame, density: f64) -> (Vec<f64>, Vec<f64>) {
        (
            axis_positions(frame.u_min, frame.length, density),
            axis_positions(frame.v_min, frame.width, density),
        )
    }
}

impl Shape for Rectangle {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    fn name(&self) -> &str {
        "Rectangle"
    }

    fn generate_outline(&self) -> Vec<Vec3> {
        let frame = self.frame();
        let (us, vs) = Self::axes(&frame, self.base.particle_density());
        let (v_first, v_last) = (vs[0], vs[vs.len() - 1]);
        let (u_first, u_last) = (us[0], us[us.len() - 1]);
        let mut points = Vec::new();
        for v in [v_first, v_last] {
            points.extend(us.iter().map(|&u| self.plane.join(u, v, frame.normal)));
        }
        for u in [u_first, u_last] {
            points.extend(
                vs[1..vs.len() - 1]
                    .iter()
                    .map(|&v| self.plane.join(u, v, frame.normal)),
            );
        }
        points
    }

    fn generate_surface(&self) -> Vec<Vec3> {
        let frame = self.frame();
        let (us, vs) = Self::axes(&frame, self.base.particle_density());
        let mut points = Vec::with_capacity(us.len() * vs.len());
        for &v in &vs {
            points.extend(us.iter().map(|&u| self.plane.join(u, v, frame.normal)));
        }
        points
    }

    fn estimate_count(&self, style: Style, density: f64) -> f64 {
        let frame = self.frame();
        let nu = line_steps(frame.length, density) as f64;
        let nv = line_steps(frame.width, density) as f64;
        match style {
            Style::Outline => 2.0 * (nu + 1.0) + 2.0 * (nv - 1.0),
            Style::Surface | Style::Fill => (nu + 1.0) * (nv + 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::supplier::dynamic;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_outline_on_border() {
        let mut rect = Rectangle::new(4.0, 2.0, Plane::XZ);
        rect.set_particle_density(0.5);
        let points = rect.get_points().to_vec();
        assert_eq!(points.len() as f64, rect.estimate_count(Style::Outline, 0.5));
        for p in &points {
            assert_eq!(p.y, 0.0);
            let on_u = (p.x.abs() - 2.0).abs() < 1e-9;
            let on_v = (p.z.abs() - 1.0).abs() < 1e-9;
            assert!(on_u || on_v, "{:?}", p);
        }
    }

    #[test]
    fn test_surface_grid() {
        let mut rect = Rectangle::new(1.0, 1.0, Plane::XY);
        rect.set_particle_density(0.25);
        rect.set_style(Style::Surface);
        let points = rect.get_points();
        assert_eq!(points.len(), 25);
        assert!(points.iter().all(|p| p.z == 0.0));
    }

    #[test]
    fn test_normal_from_first_corner() {
        let mut rect = Rectangle::from_corners(
            fixed(Vec3::new(3.0, 0.0, 0.0)),
            fixed(Vec3::new(7.0, 2.0, 2.0)),
            Plane::YZ,
        );
        assert!(!rect.is_dynamic());
        assert!(rect.get_points().iter().all(|p| p.x == 3.0));
        assert_eq!(rect.dimensions(), (2.0, 2.0));
    }

    #[test]
    fn test_dynamic_corner() {
        let corner = Arc::new(Mutex::new(Vec3::new(1.0, 0.0, 1.0)));
        let tracked = Arc::clone(&corner);
        let mut rect = Rectangle::from_corners(
            fixed(Vec3::zeros()),
            dynamic(move || *tracked.lock().unwrap()),
            Plane::XZ,
        );
        assert!(rect.is_dynamic());
        let max_x = |points: &[Vec3]| points.iter().map(|p| p.x).fold(f64::MIN, f64::max);
        assert_eq!(max_x(rect.get_points()), 1.0);
        *corner.lock().unwrap() = Vec3::new(3.0, 0.0, 1.0);
        assert_eq!(max_x(rect.get_points()), 3.0);
    }
}
