//! Error types for shape construction
//!
//! Most invalid numbers are clamped silently when they are assigned.
//! The variants here cover the few inputs that cannot describe a shape at all.

use thiserror::Error;

/// Errors raised when a shape cannot be constructed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("Bezier curve needs at least 2 control points, got {0}")]
    TooFewControlPoints(usize),

    #[error("Line start and end points must differ")]
    DegenerateLine,

    #[error("Irregular polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
}

/// Result alias for shape constructors
pub type Result<T> = std::result::Result<T, ShapeError>;
