//! Shared shape state - style, transform, density and the point cache
//!
//! Every shape embeds a [`ShapeBase`]. It owns the fields that apply to all
//! shapes and decides whether cached points can be reused.
//!
//! ## Change Detection
//!
//! Two things guard the cache:
//! - [`CacheState`] records style, orientation, scale, offset and density,
//!   compared field by field.
//! - `version` is bumped by every mutator, including shape-specific ones like
//!   `set_radius`, so parameters outside `CacheState` invalidate it too.
//!
//! Dynamic shapes never reuse their cache.

use crate::geometry::{clamp_positive, Quat, Vec3};

use super::style::Style;

/// Default spacing between generated points
pub const DEFAULT_PARTICLE_DENSITY: f64 = 0.25;

/// Snapshot of the transform fields a point set was generated with
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct CacheState {
    pub style: Style,
    /// Orientation as `[i, j, k, w]`
    pub orientation: [f64; 4],
    pub scale: f64,
    pub offset: [f64; 3],
    pub particle_density: f64,
}

#[derive(Debug)]
struct PointCache {
    state: CacheState,
    version: u64,
    points: Vec<Vec3>,
}

/// Fields common to every shape
#[derive(Debug)]
pub struct ShapeBase {
    style: Style,
    orientation: Quat,
    scale: f64,
    offset: Vec3,
    particle_density: f64,
    dynamic: bool,
    version: u64,
    cache: Option<PointCache>,
}

impl Default for ShapeBase {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloning copies every field except the cache; the clone generates fresh
/// points on first access.
impl Clone for ShapeBase {
    fn clone(&self) -> Self {
        Self {
            style: self.style,
            orientation: self.orientation,
            scale: self.scale,
            offset: self.offset,
            particle_density: self.particle_density,
            dynamic: self.dynamic,
            version: self.version,
            cache: None,
        }
    }
}

impl ShapeBase {
    /// Create a base with identity transform and the default density
    pub fn new() -> Self {
        Self {
            style: Style::Outline,
            orientation: Quat::identity(),
            scale: 1.0,
            offset: Vec3::zeros(),
            particle_density: DEFAULT_PARTICLE_DENSITY,
            dynamic: false,
            version: 0,
            cache: None,
        }
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
        self.mark_changed();
    }

    pub fn orientation(&self) -> &Quat {
        &self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation;
        self.mark_changed();
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Set the scale, clamped to the epsilon floor
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = clamp_positive(scale);
        self.mark_changed();
    }

    pub fn offset(&self) -> &Vec3 {
        &self.offset
    }

    pub fn set_offset(&mut self, offset: Vec3) {
        self.offset = offset;
        self.mark_changed();
    }

    pub fn particle_density(&self) -> f64 {
        self.particle_density
    }

    /// Set the spacing between points, clamped to the epsilon floor
    pub fn set_particle_density(&mut self, density: f64) {
        self.particle_density = clamp_positive(density);
        self.mark_changed();
    }

    /// Whether any defining point is resolved lazily
    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    pub(crate) fn set_dynamic(&mut self, dynamic: bool) {
        self.dynamic = dynamic;
        self.mark_changed();
    }

    /// Monotonic counter bumped by every geometry-affecting mutation
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Record that shape geometry changed
    pub fn mark_changed(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    /// Build the state a generation with `orientation` would be cached under
    pub fn cache_state(&self, orientation: &Quat) -> CacheState {
        let q = orientation.quaternion();
        CacheState {
            style: self.style,
            orientation: [q.i, q.j, q.k, q.w],
            scale: self.scale,
            offset: [self.offset.x, self.offset.y, self.offset.z],
            particle_density: self.particle_density,
        }
    }

    /// Whether the cache cannot serve a request made under `state`
    pub fn needs_update(&self, state: &CacheState) -> bool {
        if self.dynamic {
            return true;
        }
        match &self.cache {
            Some(cache) => cache.state != *state || cache.version != self.version,
            None => true,
        }
    }

    /// Apply orientation, then scale, then offset to a local point
    #[inline]
    pub fn transform(&self, orientation: &Quat, point: &Vec3) -> Vec3 {
        orientation.transform_vector(point) * self.scale + self.offset
    }

    /// Transform freshly generated points and store them as the new cache
    pub fn store(&mut self, state: CacheState, orientation: &Quat, mut points: Vec<Vec3>) {
        for point in points.iter_mut() {
            *point = self.transform(orientation, point);
        }
        self.cache = Some(PointCache {
            state,
            version: self.version,
            points,
        });
    }

    /// Points from the last generation (empty before the first one)
    pub fn cached_points(&self) -> &[Vec3] {
        self.cache.as_ref().map(|c| c.points.as_slice()).unwrap_or(&[])
    }

    /// Drop cached points
    pub fn clear_cache(&mut self) {
        self.cache = None;
    }
}
