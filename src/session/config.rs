use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::foundation::{
    core::Canvas,
    error::{FukuwaraiError, FukuwaraiResult},
};

/// Share-link parameter encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShareFormat {
    /// Current encoding: CSS-style transforms with comma-separated arguments.
    #[default]
    Style,
    /// Legacy encoding: SVG attribute transforms without commas.
    Attribute,
}

/// Session-wide settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Intrinsic snapshot size in pixels.
    pub canvas: Canvas,
    /// Base URL that share-link parameters are appended to.
    pub share_base_url: String,
    /// Rotation from the background hue to the accent hue, in `[0, 360)`.
    pub accent_offset_deg: u16,
    /// Encoding used when producing share links.
    pub share_format: ShareFormat,
    /// Download filename prefix.
    pub export_prefix: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            share_base_url: "https://ver-1000000.github.io/akaino-warai/".to_string(),
            accent_offset_deg: 270,
            share_format: ShareFormat::Style,
            export_prefix: "fukuwarai".to_string(),
        }
    }
}

impl SessionConfig {
    /// Reject unusable settings.
    pub fn validate(&self) -> FukuwaraiResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        if self.accent_offset_deg >= 360 {
            return Err(FukuwaraiError::validation(
                "accent_offset_deg must be in [0, 360)",
            ));
        }
        url::Url::parse(&self.share_base_url).map_err(|e| {
            FukuwaraiError::validation(format!("share_base_url is not a url: {e}"))
        })?;
        if self.export_prefix.is_empty() {
            return Err(FukuwaraiError::validation("export_prefix must not be empty"));
        }
        Ok(())
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(s: &str) -> FukuwaraiResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| FukuwaraiError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_json_file(path: &Path) -> FukuwaraiResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| FukuwaraiError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
