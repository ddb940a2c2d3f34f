//! Bézier curve of arbitrary degree
//!
//! Evaluated with de Casteljau reduction. The step count comes from the
//! control polygon length, an upper bound of the arc length, so spacing along
//! the curve is at most `density`.
//!
//! Control points are point sources and are resolved again on every
//! generation, so a curve anchored to moving points follows them.

use crate::error::{Result, ShapeError};
use crate::geometry::primitives::line_steps;
use crate::geometry::Vec3;

use super::base::ShapeBase;
use super::style::Style;
use super::supplier::{any_dynamic, fixed, resolve_all, PointSource};
use super::traits::Shape;

#[derive(Clone, Debug)]
pub struct BezierCurve {
    base: ShapeBase,
    control_points: Vec<Box<dyn PointSource>>,
}

impl BezierCurve {
    /// Create a curve through fixed control points
    pub fn new(control_points: &[Vec3]) -> Result<Self> {
        Self::from_sources(control_points.iter().copied().map(fixed).collect())
    }

    /// Create a curve from point sources, at least two required
    pub fn from_sources(control_points: Vec<Box<dyn PointSource>>) -> Result<Self> {
        check_count(&control_points)?;
        let mut base = ShapeBase::new();
        base.set_dynamic(any_dynamic(&control_points));
        Ok(Self { base, control_points })
    }

    /// Replace the control points
    pub fn set_control_points(&mut self, control_points: Vec<Box<dyn PointSource>>) -> Result<()> {
        check_count(&control_points)?;
        self.base.set_dynamic(any_dynamic(&control_points));
        self.control_points = control_points;
        Ok(())
    }

    /// Control points as they resolve right now
    pub fn control_points(&self) -> Vec<Vec3> {
        resolve_all(&self.control_points)
    }

    /// Length of the control polygon
    pub fn polyline_length(&self) -> f64 {
        polyline_length(&self.control_points())
    }

    /// Evaluate the curve at `t` in `[0, 1]`
    pub fn evaluate(&self, t: f64) -> Vec3 {
        let mut scratch = self.control_points();
        reduce(&mut scratch, t)
    }
}

fn check_count(control_points: &[Box<dyn PointSource>]) -> Result<()> {
    if control_points.len() < 2 {
        return Err(ShapeError::TooFewControlPoints(control_points.len()));
    }
    Ok(())
}

fn polyline_length(points: &[Vec3]) -> f64 {
    points.windows(2).map(|pair| (pair[1] - pair[0]).norm()).sum()
}

/// de Casteljau reduction in place; `scratch` must hold at least one point
fn reduce(scratch: &mut [Vec3], t: f64) -> Vec3 {
    let nt = 1.0 - t;
    for level in (1..scratch.len()).rev() {
        for i in 0..level {
            scratch[i] = scratch[i] * nt + scratch[i + 1] * t;
        }
    }
    scratch[0]
}

impl Shape for BezierCurve {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    fn name(&self) -> &str {
        "Bezier Curve"
    }

    fn generate_outline(&self) -> Vec<Vec3> {
        let control = self.control_points();
        let steps = line_steps(polyline_length(&control), self.base.particle_density());
        let mut scratch = control.clone();
        let mut points = Vec::with_capacity(steps);
        for i in 0..steps {
            scratch.copy_from_slice(&control);
            points.push(reduce(&mut scratch, i as f64 / steps as f64));
        }
        points
    }

    fn estimate_count(&self, _style: Style, density: f64) -> f64 {
        line_steps(self.polyline_length(), density) as f64
    }

    fn density_for_count(&self, count: usize) -> f64 {
        self.polyline_length() / count.max(1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::supplier::dynamic;
    use approx::assert_relative_eq;
    use std::sync::{Arc, Mutex};

    fn arch() -> BezierCurve {
        BezierCurve::new(&[
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(3.0, 2.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_too_few_control_points() {
        let err = BezierCurve::new(&[Vec3::zeros()]).unwrap_err();
        assert_eq!(err, ShapeError::TooFewControlPoints(1));
    }

    #[test]
    fn test_first_point_is_first_control() {
        let mut curve = arch();
        assert_eq!(curve.get_points()[0], Vec3::zeros());
    }

    #[test]
    fn test_last_point_within_one_step() {
        let mut curve = arch();
        curve.set_particle_density(0.1);
        let last = *curve.get_points().last().unwrap();
        let step = curve.polyline_length() / line_steps(curve.polyline_length(), 0.1) as f64;
        assert!((last - Vec3::new(4.0, 0.0, 0.0)).norm() <= step);
    }

    #[test]
    fn test_linear_curve_matches_line() {
        let curve = BezierCurve::new(&[Vec3::zeros(), Vec3::new(2.0, 0.0, 0.0)]).unwrap();
        assert_relative_eq!(curve.evaluate(0.25), Vec3::new(0.5, 0.0, 0.0));
        assert_relative_eq!(curve.evaluate(1.0), Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_quadratic_midpoint() {
        let curve = BezierCurve::new(&[
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        ])
        .unwrap();
        assert_relative_eq!(curve.evaluate(0.5), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_dynamic_control_point() {
        let anchor = Arc::new(Mutex::new(Vec3::new(0.0, 1.0, 0.0)));
        let tracked = Arc::clone(&anchor);
        let mut curve = BezierCurve::from_sources(vec![
            dynamic(move || *tracked.lock().unwrap()),
            fixed(Vec3::new(2.0, 0.0, 0.0)),
        ])
        .unwrap();
        assert!(curve.is_dynamic());
        assert_eq!(curve.get_points()[0], Vec3::new(0.0, 1.0, 0.0));
        *anchor.lock().unwrap() = Vec3::new(0.0, 3.0, 0.0);
        assert_eq!(curve.get_points()[0], Vec3::new(0.0, 3.0, 0.0));
    }
}
