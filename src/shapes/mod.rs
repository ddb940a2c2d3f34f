//! Shapes module - point-cloud generators for every supported shape family
//!
//! This module provides:
//! - `Shape` trait for abstracting over shape generators
//! - `ShapeBase` with the transform fields and point cache every shape embeds
//! - `PointSource` for anchors that may move between generations
//! - Curves: Circle/Arc, Ellipse, Line, BezierCurve, Helix, Heart, Star
//! - Polygons: Rectangle, RegularPolygon, IrregularPolygon (with prisms)
//! - Solids: Cuboid, Sphere/Cap, Ellipsoid, RegularPolyhedron

mod base;
mod bezier;
mod circle;
mod cuboid;
mod ellipse;
mod ellipsoid;
mod heart;
mod helix;
mod irregular_polygon;
mod line;
mod polyhedron;
mod radial;
mod rectangle;
mod regular_polygon;
mod sphere;
mod star;
mod style;
mod supplier;
mod traits;

pub use base::{CacheState, ShapeBase, DEFAULT_PARTICLE_DENSITY};
pub use bezier::BezierCurve;
pub use circle::Circle;
pub use cuboid::Cuboid;
pub use ellipse::Ellipse;
pub use ellipsoid::Ellipsoid;
pub use heart::{Heart, DEFAULT_ECCENTRICITY};
pub use helix::{Helix, Winding};
pub use irregular_polygon::IrregularPolygon;
pub use line::Line;
pub use polyhedron::{RegularPolyhedron, Solid};
pub use radial::Radial;
pub use rectangle::{Plane, Rectangle};
pub use regular_polygon::RegularPolygon;
pub use sphere::Sphere;
pub use star::Star;
pub use style::Style;
pub use supplier::{any_dynamic, dynamic, fixed, resolve_all, DynamicPoint, FixedPoint, PointSource};
pub use traits::{BoxedShape, Shape, ShapeClone};
