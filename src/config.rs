//! Game configuration.
//!
//! Field of view, cast distance, wall height unit, screen size and window
//! settings, read from a JSON file. Every section is `#[serde(default)]`,
//! so a file only needs the keys it overrides.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use raylib::prelude::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Raycaster and projection parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaycastConfig {
    /// Horizontal field of view in degrees
    pub fov_degrees: f32,
    /// Length of every cast ray in world units
    pub max_distance: f32,
    /// Nominal wall height unit used by the perspective projection
    pub wall_height: f32,
    /// Unshaded wall color (RGBA)
    pub wall_color: [u8; 4],
    pub screen_width: u32,
    pub screen_height: u32,
}

impl Default for RaycastConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            max_distance: 1000.0,
            wall_height: 200.0,
            wall_color: [80, 80, 80, 255],
            screen_width: 800,
            screen_height: 600,
        }
    }
}

impl RaycastConfig {
    #[inline]
    pub fn fov_radians(&self) -> f32 {
        self.fov_degrees.to_radians()
    }

    #[inline]
    pub fn wall_color(&self) -> Color {
        let [r, g, b, a] = self.wall_color;
        Color::new(r, g, b, a)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "fov_degrees must be in (0, 180), got {}",
                self.fov_degrees
            )));
        }
        if !(self.max_distance > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max_distance must be positive, got {}",
                self.max_distance
            )));
        }
        if !(self.wall_height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "wall_height must be positive, got {}",
                self.wall_height
            )));
        }
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "screen size must be non-zero, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub target_fps: u32,
    /// Radians of yaw per pixel of mouse motion in first-person view
    pub mouse_sensitivity: f32,
    /// Turn speed for Q/E in radians per frame
    pub turn_speed: f32,
    pub start_in_first_person: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Coin Collector".to_string(),
            target_fps: 60,
            mouse_sensitivity: 0.003,
            turn_speed: 0.05,
            start_in_first_person: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimapConfig {
    /// Panel edge in pixels
    pub size: i32,
    /// Gap between the panel and the bottom-right screen corner
    pub margin: i32,
    /// World width the panel maps onto
    pub world_width: f32,
}

impl Default for MinimapConfig {
    fn default() -> Self {
        Self {
            size: 140,
            margin: 10,
            world_width: 800.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub raycast: RaycastConfig,
    pub minimap: MinimapConfig,
}

impl GameConfig {
    /// Loads the config at `path`; a missing file means defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config: Self = serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.raycast.validate()?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
