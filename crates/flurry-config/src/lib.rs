//! Configuration file handling for flurry.
//!
//! The configuration lives at `<config dir>/flurry/config.toml`. A missing
//! file is not an error: defaults are used instead. Every field has a
//! default, so a file only needs the settings it changes.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use flurry_core::Profile;
use serde::{Deserialize, Serialize};

/// Errors raised while reading, writing or validating the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine a configuration directory")]
    NoConfigDir,
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("layer {index}: {reason}")]
    InvalidLayer { index: usize, reason: &'static str },
    #[error("overlay.{field}: {reason}")]
    InvalidOverlay {
        field: &'static str,
        reason: &'static str,
    },
    #[error("tick_ms must be at least 1")]
    ZeroTick,
}

/// Appearance of the terminal overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Overlay units per terminal column.
    pub cell_width: f64,
    /// Overlay units per terminal row.
    pub cell_height: f64,
    /// Intrinsic width and height of every flake.
    pub flake_size: f64,
    /// Hue of the flakes in degrees; `None` renders them white.
    pub tint: Option<f32>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            cell_width: 8.0,
            cell_height: 16.0,
            flake_size: 6.0,
            tint: None,
        }
    }
}

/// Where diagnostics are written.
///
/// The terminal belongs to the UI, so logging is off unless a file is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub file: Option<PathBuf>,
    /// `tracing` filter directive, e.g. `info` or `flurry_overlay=trace`.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}

/// Top level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Animation tick period in milliseconds.
    pub tick_ms: u64,
    /// Longest random delay between two spawns while a layer fills up.
    pub stagger_max_ms: u64,
    pub overlay: OverlayConfig,
    pub log: LogConfig,
    /// Layers, nearest first.
    pub layers: Vec<Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_ms: 17,
            stagger_max_ms: 400,
            overlay: OverlayConfig::default(),
            log: LogConfig::default(),
            layers: Profile::defaults(),
        }
    }
}

impl Config {
    /// Path of the configuration file for this platform.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        ProjectDirs::from("", "", "flurry")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load the configuration from the platform path.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load the configuration from `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration to the platform path.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Write the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(io_err)
    }

    /// Reject settings the animation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        let overlay = &self.overlay;
        for (field, value) in [
            ("cell_width", overlay.cell_width),
            ("cell_height", overlay.cell_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidOverlay {
                    field,
                    reason: "must be a positive number",
                });
            }
        }
        if !overlay.flake_size.is_finite() || overlay.flake_size < 0.0 {
            return Err(ConfigError::InvalidOverlay {
                field: "flake_size",
                reason: "must be a non-negative number",
            });
        }
        if overlay.tint.is_some_and(|hue| !hue.is_finite()) {
            return Err(ConfigError::InvalidOverlay {
                field: "tint",
                reason: "must be a finite hue",
            });
        }
        for (index, layer) in self.layers.iter().enumerate() {
            let invalid = |reason| Err(ConfigError::InvalidLayer { index, reason });
            if layer.limit == 0 {
                return invalid("limit must be positive");
            }
            if !layer.blur.is_finite() || layer.blur < 0.0 {
                return invalid("blur must be a non-negative number");
            }
            if !layer.fall_rate.is_finite() || !layer.sway_rate.is_finite() {
                return invalid("fall_rate and sway_rate must be finite");
            }
        }
        Ok(())
    }
}
