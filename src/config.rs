//! Render settings loaded from TOML.
//!
//! Every field has a default, so a partial file (or none at all) is valid:
//!
//! ```toml
//! width = 640
//! height = 480
//! normalize_projection = true
//! output = "frame.png"
//! mesh = "assets/teapot.obj"
//!
//! [background]
//! r = 10
//! g = 10
//! b = 30
//! a = 255
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::colors::{Color, BLACK};
use crate::space::Viewport;

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    /// Divide projected coordinates by the camera half-extents.
    pub normalize_projection: bool,
    /// Where the finished frame is written; the extension picks the format.
    pub output: PathBuf,
    /// OBJ file to render instead of the built-in cube.
    pub mesh: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            background: BLACK,
            normalize_projection: true,
            output: PathBuf::from("render.png"),
            mesh: None,
        }
    }
}

impl RenderConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height).with_normalize(self.normalize_projection)
    }
}
