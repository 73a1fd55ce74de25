//! Level files: a text map plus a spawn pose, in YAML or JSON.
//!
//! ```yaml
//! name: courtyard
//! map:
//!   - "#####"
//!   - "#...#"
//!   - "#.2.#"
//!   - "#####"
//! spawn: { x: 1.5, y: 1.5, angle_degrees: 0 }
//! fov_degrees: 66
//! columns: 120
//! ```

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::grid::{GridMap, MapError};
use crate::types::Pose;

/// Horizontal field of view used when a level file does not name one.
pub const DEFAULT_FOV_DEGREES: f64 = 66.0;

/// Errors from loading a level file.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("map error: {0}")]
    Map(#[from] MapError),
    #[error("invalid spawn pose: {0}")]
    InvalidPose(String),
}

/// Spawn point as written in a level file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spawn {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub angle_degrees: f64,
}

/// On-disk level layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelFile {
    #[serde(default)]
    pub name: String,
    pub map: Vec<String>,
    pub spawn: Spawn,
    #[serde(default)]
    pub fov_degrees: Option<f64>,
    #[serde(default)]
    pub columns: Option<usize>,
}

/// A validated level: parsed grid, spawn pose, optional column count.
#[derive(Debug, Clone)]
pub struct Level {
    pub name: String,
    pub map: GridMap,
    pub spawn: Pose,
    pub columns: Option<usize>,
}

impl Level {
    /// Load a level, picking JSON for `.json` files and YAML otherwise.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let file: LevelFile = if is_json {
            serde_json::from_str(&text)?
        } else {
            serde_yaml::from_str(&text)?
        };
        let level = Self::from_file(file)?;
        tracing::info!(
            path = %path.display(),
            name = %level.name,
            width = level.map.width(),
            height = level.map.height(),
            "loaded level"
        );
        Ok(level)
    }

    /// Parse a level from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, LevelError> {
        let file: LevelFile = serde_yaml::from_str(text)?;
        Self::from_file(file)
    }

    /// Validate an already-deserialized level file.
    pub fn from_file(file: LevelFile) -> Result<Self, LevelError> {
        let map = GridMap::parse(&file.map)?;
        let fov_degrees = file.fov_degrees.unwrap_or(DEFAULT_FOV_DEGREES);
        if !(fov_degrees > 0.0 && fov_degrees < 180.0) {
            return Err(LevelError::InvalidPose(format!(
                "fov_degrees must be in (0, 180), got {fov_degrees}"
            )));
        }
        let Spawn {
            x,
            y,
            angle_degrees,
        } = file.spawn;
        let spawn = Pose::from_angle(
            DVec2::new(x, y),
            angle_degrees.to_radians(),
            fov_degrees.to_radians(),
        );
        if !spawn.is_finite() {
            return Err(LevelError::InvalidPose(format!(
                "non-finite spawn ({x}, {y}) at {angle_degrees} degrees"
            )));
        }
        Ok(Self {
            name: file.name,
            map,
            spawn,
            columns: file.columns,
        })
    }
}
