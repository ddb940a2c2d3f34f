//! Point sources - lazily resolved anchor points
//!
//! Shapes whose defining points can move between frames (line endpoints,
//! cuboid corners, bezier control points) hold `Box<dyn PointSource>` instead
//! of plain vectors. Generation resolves every source first.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use particle_shapes::{dynamic, fixed, Line, Vec3};
//!
//! let target = Arc::new(Mutex::new(Vec3::new(4.0, 0.0, 0.0)));
//! let tracked = Arc::clone(&target);
//! let line = Line::between(
//!     fixed(Vec3::zeros()),
//!     dynamic(move || *tracked.lock().unwrap()),
//! );
//! assert!(line.is_ok());
//! ```

use std::fmt;
use std::sync::Arc;

use crate::geometry::Vec3;

/// Something that produces a point when asked
pub trait PointSource: fmt::Debug + Send + Sync {
    /// Produce the current point
    fn resolve(&self) -> Vec3;

    /// Whether the point may differ between calls
    fn is_dynamic(&self) -> bool;

    /// Clone into a new box
    fn clone_box(&self) -> Box<dyn PointSource>;
}

impl Clone for Box<dyn PointSource> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// A point fixed at construction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedPoint(pub Vec3);

impl PointSource for FixedPoint {
    fn resolve(&self) -> Vec3 {
        self.0
    }

    fn is_dynamic(&self) -> bool {
        false
    }

    fn clone_box(&self) -> Box<dyn PointSource> {
        Box::new(*self)
    }
}

/// A point produced by a callback on every resolve
///
/// Clones share the callback, so a cloned shape keeps following the same
/// tracked position.
#[derive(Clone)]
pub struct DynamicPoint {
    source: Arc<dyn Fn() -> Vec3 + Send + Sync>,
}

impl DynamicPoint {
    pub fn new<F>(source: F) -> Self
    where
        F: Fn() -> Vec3 + Send + Sync + 'static,
    {
        Self {
            source: Arc::new(source),
        }
    }
}

impl fmt::Debug for DynamicPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicPoint").finish_non_exhaustive()
    }
}

impl PointSource for DynamicPoint {
    fn resolve(&self) -> Vec3 {
        (self.source)()
    }

    fn is_dynamic(&self) -> bool {
        true
    }

    fn clone_box(&self) -> Box<dyn PointSource> {
        Box::new(self.clone())
    }
}

/// Box a fixed point
pub fn fixed(point: Vec3) -> Box<dyn PointSource> {
    Box::new(FixedPoint(point))
}

/// Box a callback-backed point
pub fn dynamic<F>(source: F) -> Box<dyn PointSource>
where
    F: Fn() -> Vec3 + Send + Sync + 'static,
{
    Box::new(DynamicPoint::new(source))
}

/// Resolve every source in order
pub fn resolve_all(sources: &[Box<dyn PointSource>]) -> Vec<Vec3> {
    sources.iter().map(|s| s.resolve()).collect()
}

/// Whether any source is dynamic
pub fn any_dynamic(sources: &[Box<dyn PointSource>]) -> bool {
    sources.iter().any(|s| s.is_dynamic())
}
