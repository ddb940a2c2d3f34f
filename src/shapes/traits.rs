//! Shape trait definition
//!
//! The `Shape` trait is the core abstraction for point-generating shapes.
//! Implementors supply the geometry (one generator per style plus a point
//! count estimate); the trait provides style dispatch, transforms, caching and
//! density control on top.
//!
//! ## Implementing a Shape
//!
//! ```rust
//! use particle_shapes::{Shape, ShapeBase, Style, Vec3};
//!
//! #[derive(Clone, Debug)]
//! struct Dot {
//!     base: ShapeBase,
//! }
//!
//! impl Shape for Dot {
//!     fn base(&self) -> &ShapeBase { &self.base }
//!     fn base_mut(&mut self) -> &mut ShapeBase { &mut self.base }
//!     fn name(&self) -> &str { "Dot" }
//!     fn generate_outline(&self) -> Vec<Vec3> { vec![Vec3::zeros()] }
//!     fn estimate_count(&self, _style: Style, _density: f64) -> f64 { 1.0 }
//! }
//!
//! let mut dot = Dot { base: ShapeBase::new() };
//! assert_eq!(dot.get_points().len(), 1);
//! ```

use std::fmt;

use crate::geometry::{density, Quat, Vec3};

use super::base::ShapeBase;
use super::style::Style;

/// A shape that can be sampled into a point cloud
///
/// ## Generation Pipeline
///
/// 1. [`Shape::get_points_oriented`] builds the current cache state
/// 2. If the cache cannot serve it, [`Shape::generate_points`] dispatches on
///    the style to `generate_outline`, `generate_surface` or `generate_filled`
/// 3. Every point is rotated, scaled and offset, then cached
///
/// Generated points are in local space: flat shapes lie in the XZ plane and
/// grow along +Y.
///
/// ## Thread Safety
///
/// Shapes are `Send + Sync` so they can be handed to worker threads. The
/// cache is not synchronised; clone a shape to render it from several threads.
pub trait Shape: ShapeClone + fmt::Debug + Send + Sync {
    /// Shared state
    fn base(&self) -> &ShapeBase;

    /// Mutable shared state
    fn base_mut(&mut self) -> &mut ShapeBase;

    /// Name of this shape
    fn name(&self) -> &str;

    /// Boundary curves only
    fn generate_outline(&self) -> Vec<Vec3>;

    /// The 2D surface; defaults to the outline
    fn generate_surface(&self) -> Vec<Vec3> {
        self.generate_outline()
    }

    /// The volume; defaults to the surface
    fn generate_filled(&self) -> Vec<Vec3> {
        self.generate_surface()
    }

    /// Predicted number of points `style` would produce at `density`
    ///
    /// Used to invert a target count into a density. It must not generate
    /// points and should be non-increasing in `density`.
    fn estimate_count(&self, style: Style, density: f64) -> f64;

    /// Density expected to produce roughly `count` points in the current style
    fn density_for_count(&self, count: usize) -> f64 {
        let style = self.base().style();
        density::invert(count, |d| self.estimate_count(style, d))
    }

    /// Generate untransformed points for the current style
    fn generate_points(&self) -> Vec<Vec3> {
        match self.base().style() {
            Style::Outline => self.generate_outline(),
            Style::Surface => self.generate_surface(),
            Style::Fill => self.generate_filled(),
        }
    }

    /// Points using the shape's own orientation
    fn get_points(&mut self) -> &[Vec3] {
        let orientation = *self.base().orientation();
        self.get_points_oriented(&orientation)
    }

    /// Points using a caller-supplied orientation
    ///
    /// Cached points are returned unchanged unless the shape is dynamic, was
    /// mutated, or the transform differs from the cached one.
    fn get_points_oriented(&mut self, orientation: &Quat) -> &[Vec3] {
        let state = self.base().cache_state(orientation);
        if self.base().needs_update(&state) {
            let points = self.generate_points();
            log::trace!(
                "Generated {} points for {} ({})",
                points.len(),
                self.name(),
                state.style.name()
            );
            self.base_mut().store(state, orientation, points);
        }
        self.base().cached_points()
    }

    fn style(&self) -> Style {
        self.base().style()
    }

    fn set_style(&mut self, style: Style) {
        self.base_mut().set_style(style);
    }

    fn orientation(&self) -> Quat {
        *self.base().orientation()
    }

    fn set_orientation(&mut self, orientation: Quat) {
        self.base_mut().set_orientation(orientation);
    }

    fn scale(&self) -> f64 {
        self.base().scale()
    }

    fn set_scale(&mut self, scale: f64) {
        self.base_mut().set_scale(scale);
    }

    fn offset(&self) -> Vec3 {
        *self.base().offset()
    }

    fn set_offset(&mut self, offset: Vec3) {
        self.base_mut().set_offset(offset);
    }

    fn particle_density(&self) -> f64 {
        self.base().particle_density()
    }

    fn set_particle_density(&mut self, density: f64) {
        self.base_mut().set_particle_density(density);
    }

    /// Choose a density that yields roughly `count` points
    ///
    /// Only the density changes; points are regenerated on the next access.
    fn set_particle_count(&mut self, count: usize) {
        let density = self.density_for_count(count);
        self.base_mut().set_particle_density(density);
    }

    fn is_dynamic(&self) -> bool {
        self.base().is_dynamic()
    }

    fn version(&self) -> u64 {
        self.base().version()
    }
}

/// Boxed cloning for shape trait objects
pub trait ShapeClone {
    fn clone_box(&self) -> Box<dyn Shape>;
}

impl<T> ShapeClone for T
where
    T: Shape + Clone + 'static,
{
    fn clone_box(&self) -> Box<dyn Shape> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Shape> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// A boxed shape for dynamic dispatch
pub type BoxedShape = Box<dyn Shape>;
