//! particle-shapes - procedural point-cloud geometry
//!
//! Turns shape descriptions into evenly spaced 3D points, ready to be emitted
//! as particles. Each shape is sampled in one of three styles:
//! - `Outline`: boundary curves and edges
//! - `Surface`: the 2D surface of the solid
//! - `Fill`: the volumetric interior
//!
//! ## Quick Start
//!
//! ```rust
//! use particle_shapes::{Shape, Sphere, Style};
//!
//! let mut sphere = Sphere::new(2.0);
//! sphere.set_style(Style::Surface);
//! sphere.set_particle_count(500);
//!
//! let points = sphere.get_points();
//! assert!(points.len() > 400 && points.len() < 600);
//! ```
//!
//! Points are cached until the style, transform, density or a shape parameter
//! changes. Shapes anchored to moving points (see [`PointSource`]) regenerate
//! on every call.

pub mod error;
pub mod geometry;
pub mod settings;
pub mod shapes;

pub use error::{Result, ShapeError};
pub use geometry::{Quat, Vec3, EPSILON};
pub use settings::{ShapeKind, ShapeSettings};
pub use shapes::{
    dynamic, fixed, BezierCurve, BoxedShape, Circle, Cuboid, Ellipse, Ellipsoid, Heart, Helix,
    IrregularPolygon, Line, Plane, PointSource, RegularPolygon, RegularPolyhedron, Rectangle,
    Shape, ShapeBase, Solid, Sphere, Star, Style, Winding,
};
