//! Rendering style of a shape

use serde::{Deserialize, Serialize};

/// Which part of a shape gets sampled
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    /// Wireframe / boundary curves only
    #[default]
    Outline,
    /// The 2D boundary surface of the solid
    Surface,
    /// The volumetric interior
    Fill,
}

impl Style {
    /// Get all styles
    pub fn all() -> &'static [Style] {
        &[Style::Outline, Style::Surface, Style::Fill]
    }

    /// Get the name of this style
    pub fn name(&self) -> &'static str {
        match self {
            Style::Outline => "Outline",
            Style::Surface => "Surface",
            Style::Fill => "Fill",
        }
    }
}
