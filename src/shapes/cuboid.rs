//! Cuboid between two corners
//!
//! The corners are point sources, so a cuboid can stretch between two moving
//! anchors. Each generation resolves both corners and rebuilds the grid from
//! the resulting extents.
//!
//! All styles sample the same axis-aligned grid with `max(round(extent / d), 1)`
//! steps per axis:
//! - Outline keeps the 12 edges
//! - Surface keeps the 6 faces
//! - Fill keeps every grid point

use crate::geometry::primitives::{axis_positions, line_steps};
use crate::geometry::{Vec3, EPSILON};

use super::base::ShapeBase;
use super::style::Style;
use super::supplier::{fixed, PointSource};
use super::traits::Shape;

#[derive(Clone, Debug)]
pub struct Cuboid {
    base: ShapeBase,
    corner_a: Box<dyn PointSource>,
    corner_b: Box<dyn PointSource>,
}

/// Resolved corner frame: minimum corner and per-axis extents
struct Frame {
    min: Vec3,
    extents: Vec3,
}

impl Cuboid {
    /// Create a cuboid centred on the origin
    ///
    /// `length` runs along X, `height` along Y and `width` along Z.
    pub fn new(length: f64, height: f64, width: f64) -> Self {
        let half = Vec3::new(length, height, width).map(|v| v.abs().max(2.0 * EPSILON)) / 2.0;
        Self::from_corners(fixed(-half), fixed(half))
    }

    /// Create a cuboid spanning two (possibly moving) corners
    pub fn from_corners(corner_a: Box<dyn PointSource>, corner_b: Box<dyn PointSource>) -> Self {
        let mut cuboid = Self {
            base: ShapeBase::new(),
            corner_a,
            corner_b,
        };
        cuboid.refresh_dynamic();
        cuboid
    }

    /// Replace both corners
    pub fn set_corners(&mut self, corner_a: Box<dyn PointSource>, corner_b: Box<dyn PointSource>) {
        self.corner_a = corner_a;
        self.corner_b = corner_b;
        self.refresh_dynamic();
    }

    /// Current per-axis extents, each at least twice the epsilon floor
    pub fn extents(&self) -> Vec3 {
        self.frame().extents
    }

    /// Current centre between the corners
    pub fn center(&self) -> Vec3 {
        let frame = self.frame();
        frame.min + frame.extents / 2.0
    }

    fn refresh_dynamic(&mut self) {
        let dynamic = self.corner_a.is_dynamic() || self.corner_b.is_dynamic();
        self.base.set_dynamic(dynamic);
    }

    fn frame(&self) -> Frame {
        let (a, b) = (self.corner_a.resolve(), self.corner_b.resolve());
        let center = (a + b) / 2.0;
        let extents = (b - a).map(|v| v.abs().max(2.0 * EPSILON));
        Frame {
            min: center - extents / 2.0,
            extents,
        }
    }

    fn grid(frame: &Frame, density: f64) -> [Vec<f64>; 3] {
        [
            axis_positions(frame.min.x, frame.extents.x, density),
            axis_positions(frame.min.y, frame.extents.y, density),
            axis_positions(frame.min.z, frame.extents.z, density),
        ]
    }

    fn steps(&self, density: f64) -> [f64; 3] {
        let extents = self.frame().extents;
        [
            line_steps(extents.x, density) as f64,
            line_steps(extents.y, density) as f64,
            line_steps(extents.z, density) as f64,
        ]
    }
}

/// Interior positions of an axis (both ends dropped)
fn inner(values: &[f64]) -> &[f64] {
    &values[1..values.len() - 1]
}

/// First and last position of an axis
fn ends(values: &[f64]) -> [f64; 2] {
    [values[0], values[values.len() - 1]]
}

impl Shape for Cuboid {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    fn name(&self) -> &str {
        "Cuboid"
    }

    fn generate_outline(&self) -> Vec<Vec3> {
        let [xs, ys, zs] = Self::grid(&self.frame(), self.base.particle_density());
        let mut points = Vec::new();
        for y in ends(&ys) {
            for z in ends(&zs) {
                points.extend(xs.iter().map(|&x| Vec3::new(x, y, z)));
            }
        }
        for x in ends(&xs) {
            for z in ends(&zs) {
                points.extend(inner(&ys).iter().map(|&y| Vec3::new(x, y, z)));
            }
        }
        for x in ends(&xs) {
            for y in ends(&ys) {
                points.extend(inner(&zs).iter().map(|&z| Vec3::new(x, y, z)));
            }
        }
        points
    }

    fn generate_surface(&self) -> Vec<Vec3> {
        let [xs, ys, zs] = Self::grid(&self.frame(), self.base.particle_density());
        let mut points = Vec::new();
        for z in ends(&zs) {
            for &y in &ys {
                points.extend(xs.iter().map(|&x| Vec3::new(x, y, z)));
            }
        }
        for y in ends(&ys) {
            for &z in inner(&zs) {
                points.extend(xs.iter().map(|&x| Vec3::new(x, y, z)));
            }
        }
        for x in ends(&xs) {
            for &z in inner(&zs) {
                points.extend(inner(&ys).iter().map(|&y| Vec3::new(x, y, z)));
            }
        }
        points
    }

    fn generate_filled(&self) -> Vec<Vec3> {
        let [xs, ys, zs] = Self::grid(&self.frame(), self.base.particle_density());
        let mut points = Vec::with_capacity(xs.len() * ys.len() * zs.len());
        for &z in &zs {
            for &y in &ys {
                points.extend(xs.iter().map(|&x| Vec3::new(x, y, z)));
            }
        }
        points
    }

    fn estimate_count(&self, style: Style, density: f64) -> f64 {
        let [nx, ny, nz] = self.steps(density);
        match style {
            Style::Outline => 4.0 * (nx + 1.0) + 4.0 * (ny - 1.0) + 4.0 * (nz - 1.0),
            Style::Surface => {
                2.0 * (nx + 1.0) * (ny + 1.0)
                    + 2.0 * (nx + 1.0) * (nz - 1.0)
                    + 2.0 * (ny - 1.0) * (nz - 1.0)
            }
            Style::Fill => (nx + 1.0) * (ny + 1.0) * (nz + 1.0),
        }
    }
}
