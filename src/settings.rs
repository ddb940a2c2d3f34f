use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::{Quat, Vec3};
use crate::shapes::{
    BezierCurve, BoxedShape, Circle, Cuboid, Ellipse, Ellipsoid, Heart, Helix, IrregularPolygon,
    Line, Plane, Rectangle, RegularPolygon, RegularPolyhedron, Sphere, Star, Style, Winding,
    DEFAULT_ECCENTRICITY, DEFAULT_PARTICLE_DENSITY,
};

/// Returns the path to the settings file: `~/.config/particle-shapes/settings.json`
pub fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("particle-shapes");
    path.push("settings.json");
    path
}

/// Shape family a settings file describes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    #[default]
    Circle,
    Sphere,
    Ellipse,
    Ellipsoid,
    Cuboid,
    Rectangle,
    Line,
    Bezier,
    Helix,
    Heart,
    Star,
    RegularPolygon,
    Polyhedron,
    IrregularPolygon,
}

/// Persisted description of a single shape.
///
/// Serialized as JSON. Fields use `#[serde(default)]` so a file only needs
/// the parameters of the shape it describes; each kind reads just the fields
/// it uses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeSettings {
    pub kind: ShapeKind,
    pub style: Style,

    // Transform
    /// Euler angles (roll, pitch, yaw) in radians
    pub rotation: [f64; 3],
    pub scale: f64,
    pub offset: [f64; 3],

    // Sampling; a particle count takes precedence over the density
    pub particle_density: f64,
    pub particle_count: Option<usize>,

    // Radial shapes
    pub radius: f64,
    pub x_radius: f64,
    pub y_radius: f64,
    pub z_radius: f64,
    /// Arc / cap cutoff in radians, full shape when absent
    pub cutoff_angle: Option<f64>,
    pub height: f64,

    // Boxes
    pub length: f64,
    pub width: f64,
    pub plane: Plane,

    // Curves
    pub start: [f64; 3],
    pub end: [f64; 3],
    pub control_points: Vec<[f64; 3]>,
    pub slope: f64,
    pub winding: Winding,
    pub eccentricity: f64,

    // Polygons
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub points: usize,
    pub sides: usize,
    pub faces: u32,
    pub vertices: Vec<[f64; 3]>,
}

impl Default for ShapeSettings {
    fn default() -> Self {
        Self {
            kind: ShapeKind::Circle,
            style: Style::Outline,

            rotation: [0.0; 3],
            scale: 1.0,
            offset: [0.0; 3],

            particle_density: DEFAULT_PARTICLE_DENSITY,
            particle_count: None,

            radius: 1.0,
            x_radius: 2.0,
            y_radius: 1.0,
            z_radius: 1.0,
            cutoff_angle: None,
            height: 0.0,

            length: 2.0,
            width: 1.0,
            plane: Plane::XZ,

            start: [0.0; 3],
            end: [1.0, 0.0, 0.0],
            control_points: vec![[0.0, 0.0, 0.0], [1.0, 2.0, 0.0], [2.0, 0.0, 0.0]],
            slope: 0.2,
            winding: Winding::CounterClockwise,
            eccentricity: DEFAULT_ECCENTRICITY,

            inner_radius: 0.5,
            outer_radius: 1.0,
            points: 5,
            sides: 6,
            faces: 4,
            vertices: vec![[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [1.0, 0.0, 2.0]],
        }
    }
}

fn vec3(v: [f64; 3]) -> Vec3 {
    Vec3::new(v[0], v[1], v[2])
}

impl ShapeSettings {
    /// Load settings from the config directory, falling back to defaults on any error.
    pub fn load() -> Self {
        Self::load_from(&settings_path())
    }

    /// Load settings from `path`, falling back to defaults on any error.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Failed to parse settings ({}), using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("No settings file found ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to the config directory as pretty JSON.
    pub fn save(&self) {
        self.save_to(&settings_path());
    }

    /// Save settings to `path` as pretty JSON.
    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("Failed to create config directory: {}", e);
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    log::warn!("Failed to write settings: {}", e);
                }
            }
            Err(e) => {
                log::warn!("Failed to serialize settings: {}", e);
            }
        }
    }

    /// Build the described shape with style, transform and sampling applied
    pub fn build(&self) -> Result<BoxedShape> {
        let mut shape = self.build_geometry()?;
        shape.set_style(self.style);
        let [roll, pitch, yaw] = self.rotation;
        shape.set_orientation(Quat::from_euler_angles(roll, pitch, yaw));
        shape.set_scale(self.scale);
        shape.set_offset(vec3(self.offset));
        match self.particle_count {
            Some(count) => shape.set_particle_count(count),
            None => shape.set_particle_density(self.particle_density),
        }
        Ok(shape)
    }

    fn build_geometry(&self) -> Result<BoxedShape> {
        let shape: BoxedShape = match self.kind {
            ShapeKind::Circle => {
                let circle = match self.cutoff_angle {
                    Some(cutoff) => Circle::arc(self.radius, cutoff),
                    None => Circle::new(self.radius),
                };
                Box::new(circle.with_height(self.height))
            }
            ShapeKind::Sphere => Box::new(match self.cutoff_angle {
                Some(cutoff) => Sphere::cap(self.radius, cutoff),
                None => Sphere::new(self.radius),
            }),
            ShapeKind::Ellipse => {
                let ellipse = match self.cutoff_angle {
                    Some(cutoff) => Ellipse::arc(self.x_radius, self.z_radius, cutoff),
                    None => Ellipse::new(self.x_radius, self.z_radius),
                };
                Box::new(ellipse.with_height(self.height))
            }
            ShapeKind::Ellipsoid => {
                Box::new(Ellipsoid::new(self.x_radius, self.y_radius, self.z_radius))
            }
            ShapeKind::Cuboid => Box::new(Cuboid::new(self.length, self.height, self.width)),
            ShapeKind::Rectangle => Box::new(Rectangle::new(self.length, self.width, self.plane)),
            ShapeKind::Line => Box::new(Line::new(vec3(self.start), vec3(self.end))?),
            ShapeKind::Bezier => {
                let control: Vec<Vec3> = self.control_points.iter().copied().map(vec3).collect();
                Box::new(BezierCurve::new(&control)?)
            }
            ShapeKind::Helix => {
                Box::new(Helix::new(self.radius, self.height, self.slope, self.winding))
            }
            ShapeKind::Heart => Box::new(Heart::with_eccentricity(
                self.width,
                self.length,
                self.eccentricity,
            )),
            ShapeKind::Star => Box::new(Star::new(self.inner_radius, self.outer_radius, self.points)),
            ShapeKind::RegularPolygon => {
                Box::new(RegularPolygon::new(self.sides, self.radius).with_height(self.height))
            }
            ShapeKind::Polyhedron => Box::new(RegularPolyhedron::new(self.radius, self.faces)),
            ShapeKind::IrregularPolygon => {
                let vertices: Vec<Vec3> = self.vertices.iter().copied().map(vec3).collect();
                Box::new(IrregularPolygon::new(&vertices)?.with_height(self.height))
            }
        };
        Ok(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShapeError;

    const KINDS: [ShapeKind; 14] = [
        ShapeKind::Circle,
        ShapeKind::Sphere,
        ShapeKind::Ellipse,
        ShapeKind::Ellipsoid,
        ShapeKind::Cuboid,
        ShapeKind::Rectangle,
        ShapeKind::Line,
        ShapeKind::Bezier,
        ShapeKind::Helix,
        ShapeKind::Heart,
        ShapeKind::Star,
        ShapeKind::RegularPolygon,
        ShapeKind::Polyhedron,
        ShapeKind::IrregularPolygon,
    ];

    #[test]
    fn test_defaults_build_every_kind() {
        for kind in KINDS {
            let settings = ShapeSettings {
                kind,
                ..ShapeSettings::default()
            };
            let mut shape = settings.build().unwrap();
            assert!(!shape.get_points().is_empty(), "{:?}", kind);
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "kind": "polyhedron", "faces": 20, "style": "surface", "radius": 3.0 }"#;
        let settings: ShapeSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.kind, ShapeKind::Polyhedron);
        assert_eq!(settings.style, Style::Surface);
        assert_eq!(settings.scale, 1.0);

        let shape = settings.build().unwrap();
        assert_eq!(shape.name(), "Icosahedron");
        assert_eq!(shape.style(), Style::Surface);
    }

    #[test]
    fn test_particle_count_overrides_density() {
        let settings = ShapeSettings {
            kind: ShapeKind::Line,
            end: [10.0, 0.0, 0.0],
            particle_density: 5.0,
            particle_count: Some(11),
            ..ShapeSettings::default()
        };
        let mut shape = settings.build().unwrap();
        assert_eq!(shape.get_points().len(), 11);
    }

    #[test]
    fn test_invalid_geometry_reported() {
        let settings = ShapeSettings {
            kind: ShapeKind::Bezier,
            control_points: vec![[1.0, 1.0, 1.0]],
            ..ShapeSettings::default()
        };
        assert_eq!(settings.build().unwrap_err(), ShapeError::TooFewControlPoints(1));

        let settings = ShapeSettings {
            kind: ShapeKind::Line,
            end: [0.0; 3],
            ..ShapeSettings::default()
        };
        assert_eq!(settings.build().unwrap_err(), ShapeError::DegenerateLine);
    }

    #[test]
    fn test_transform_applied() {
        let settings = ShapeSettings {
            kind: ShapeKind::Sphere,
            scale: 2.0,
            offset: [0.0, 10.0, 0.0],
            ..ShapeSettings::default()
        };
        let mut shape = settings.build().unwrap();
        for p in shape.get_points() {
            assert!(((p - Vec3::new(0.0, 10.0, 0.0)).norm() - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = std::env::temp_dir()
            .join(format!("particle-shapes-test-{}", std::process::id()))
            .join("settings.json");
        let settings = ShapeSettings {
            kind: ShapeKind::Star,
            points: 7,
            cutoff_angle: Some(1.0),
            ..ShapeSettings::default()
        };
        settings.save_to(&path);
        assert_eq!(ShapeSettings::load_from(&path), settings);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = ShapeSettings::load_from(Path::new("/nonexistent/particle-shapes.json"));
        assert_eq!(settings, ShapeSettings::default());
    }
}
