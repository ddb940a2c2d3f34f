//! Line segment between two point sources
//!
//! Every style produces the same sampled segment, endpoints included.

use crate::error::{Result, ShapeError};
use crate::geometry::primitives::{self, line_steps};
use crate::geometry::Vec3;

use super::base::ShapeBase;
use super::style::Style;
use super::supplier::{fixed, PointSource};
use super::traits::Shape;

#[derive(Clone, Debug)]
pub struct Line {
    base: ShapeBase,
    start: Box<dyn PointSource>,
    end: Box<dyn PointSource>,
}

impl Line {
    /// Create a line between two fixed points
    ///
    /// Fails with [`ShapeError::DegenerateLine`] when the points coincide.
    pub fn new(start: Vec3, end: Vec3) -> Result<Self> {
        Self::between(fixed(start), fixed(end))
    }

    /// Create a line between two point sources
    ///
    /// Coincidence is checked against the values the sources resolve to now.
    pub fn between(start: Box<dyn PointSource>, end: Box<dyn PointSource>) -> Result<Self> {
        check_distinct(&start.resolve(), &end.resolve())?;
        let mut base = ShapeBase::new();
        base.set_dynamic(start.is_dynamic() || end.is_dynamic());
        Ok(Self { base, start, end })
    }

    pub fn start(&self) -> Vec3 {
        self.start.resolve()
    }

    pub fn end(&self) -> Vec3 {
        self.end.resolve()
    }

    /// Current length of the segment
    pub fn length(&self) -> f64 {
        (self.end() - self.start()).norm()
    }

    /// Replace both endpoints
    pub fn set_endpoints(&mut self, start: Box<dyn PointSource>, end: Box<dyn PointSource>) -> Result<()> {
        check_distinct(&start.resolve(), &end.resolve())?;
        self.base.set_dynamic(start.is_dynamic() || end.is_dynamic());
        self.start = start;
        self.end = end;
        Ok(())
    }
}

fn check_distinct(start: &Vec3, end: &Vec3) -> Result<()> {
    if start == end {
        return Err(ShapeError::DegenerateLine);
    }
    Ok(())
}

impl Shape for Line {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    fn name(&self) -> &str {
        "Line"
    }

    fn generate_outline(&self) -> Vec<Vec3> {
        primitives::line(&self.start(), &self.end(), self.base.particle_density())
    }

    fn estimate_count(&self, _style: Style, density: f64) -> f64 {
        (line_steps(self.length(), density) + 1) as f64
    }

    /// `count` points split the line into `count - 1` segments
    fn density_for_count(&self, count: usize) -> f64 {
        let segments = count.saturating_sub(1).max(1) as f64;
        self.length() / segments
    }
}
