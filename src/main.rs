//! particle-shapes - print the point cloud of a configured shape
//!
//! Reads a JSON shape description and writes the generated points to stdout
//! as `[[x, y, z], ...]`.
//!
//! ## Usage
//! ```text
//! particle-shapes                 # ~/.config/particle-shapes/settings.json
//! particle-shapes shape.json      # explicit settings file
//! particle-shapes --init          # write default settings to the config dir
//! ```
//!
//! Set `RUST_LOG=info` to see which settings were loaded.

use std::path::Path;
use std::process::ExitCode;

use particle_shapes::settings::settings_path;
use particle_shapes::{Shape, ShapeSettings};

fn main() -> ExitCode {
    env_logger::init();

    let settings = match std::env::args_os().nth(1) {
        Some(arg) if arg == "--init" => {
            ShapeSettings::default().save();
            log::info!("Wrote default settings to {}", settings_path().display());
            return ExitCode::SUCCESS;
        }
        Some(path) => ShapeSettings::load_from(Path::new(&path)),
        None => ShapeSettings::load(),
    };

    let mut shape = match settings.build() {
        Ok(shape) => shape,
        Err(e) => {
            log::error!("Invalid shape settings: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let points: Vec<[f64; 3]> = shape.get_points().iter().map(|p| [p.x, p.y, p.z]).collect();
    log::info!(
        "Generated {} points for {} ({}, density {:.4})",
        points.len(),
        shape.name(),
        shape.style().name(),
        shape.particle_density()
    );

    match serde_json::to_string(&points) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to serialize points: {}", e);
            ExitCode::FAILURE
        }
    }
}
