use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{QrError, Result};
use crate::qr::{EncodeOptions, MAX_IMAGE_SIDE};
use crate::viewport::CanvasSize;

pub const DEFAULT_WHATSAPP_PREFIX: &str = "https://wa.me/";

/// Application settings. Every field falls back to its default when absent from the file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub encode: EncodeOptions,
    /// Prepended to the phone number for WhatsApp codes.
    pub whatsapp_prefix: String,
    pub canvas: CanvasSize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            encode: EncodeOptions::default(),
            whatsapp_prefix: DEFAULT_WHATSAPP_PREFIX.to_string(),
            canvas: CanvasSize::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make generation or the blank canvas fail.
    pub fn validate(&self) -> Result<()> {
        self.encode
            .validate()
            .map_err(|e| QrError::InvalidConfig(format!("[encode] {e}")))?;

        let CanvasSize { width, height } = self.canvas;
        if !(1..=MAX_IMAGE_SIDE).contains(&width) || !(1..=MAX_IMAGE_SIDE).contains(&height) {
            return Err(QrError::InvalidConfig(format!(
                "[canvas] size must be between 1 and {MAX_IMAGE_SIDE} pixels per side, got {width}x{height}"
            )));
        }
        Ok(())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Load `path` if given, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }
}
