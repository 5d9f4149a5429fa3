//! JSON configuration merged over built-in defaults.
//!
//! Every key is optional; anything absent falls back to its default and
//! unknown keys are ignored, so a config spelling out the defaults is
//! indistinguishable from no config at all. Only malformed JSON is an
//! error.

use crate::types::{BadgeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fonts: FontConfig,
    pub badge_options: BadgeOptions,
    pub pdf_offsets: PdfOffset,
}

impl Config {
    /// Read a configuration file. Absent keys keep their defaults.
    pub async fn load(path: impl AsRef<Path>) -> Result<Config> {
        let contents = tokio::fs::read_to_string(path.as_ref()).await?;
        Config::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Config> {
        serde_json::from_str(contents).map_err(|e| BadgeError::Config(e.to_string()))
    }
}

/// One [`FontSpec`] per badge text line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub line1: FontSpec,
    pub line2: FontSpec,
    pub line3: FontSpec,
}

impl FontConfig {
    pub fn line(&self, index: usize) -> &FontSpec {
        match index {
            0 => &self.line1,
            1 => &self.line2,
            _ => &self.line3,
        }
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            line1: FontSpec::sized(16.0, 8.0),
            line2: FontSpec::sized(14.0, 15.0),
            line3: FontSpec::sized(12.0, 22.0),
        }
    }
}

/// Font, size, and vertical position for one text line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    /// Path to a TTF file. Absent = builtin Helvetica.
    pub font_name: Option<String>,
    /// Size in points.
    pub font_size: f32,
    /// Distance from the badge top to the top of the text, in mm.
    pub y_position: f32,
}

impl FontSpec {
    fn sized(font_size: f32, y_position: f32) -> Self {
        Self {
            font_name: None,
            font_size,
            y_position,
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::sized(12.0, 15.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BadgeOptions {
    pub draw_border: bool,
    /// Border corner radius and inset, in mm.
    pub border_radius: f32,
    /// Path to a background image drawn under the text.
    pub background_image: Option<String>,
    /// 0.0–1.0; pre-composited over white before embedding.
    pub background_opacity: f32,
    /// Multiplier on the fit-to-badge size.
    pub background_scale: f32,
}

impl Default for BadgeOptions {
    fn default() -> Self {
        Self {
            draw_border: true,
            border_radius: 2.0,
            background_image: None,
            background_opacity: 1.0,
            background_scale: 1.0,
        }
    }
}

/// Manual translation applied to badge placements on the PDF only,
/// compensating for printer feed drift. Registration marks and STL
/// outputs never move with it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfOffset {
    pub x_offset: f32,
    pub y_offset: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_all_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_json(
            r#"{"pdf_offsets": {"x_offset": 1.5}, "badge_options": {"draw_border": false}}"#,
        )
        .unwrap();
        assert_eq!(config.pdf_offsets.x_offset, 1.5);
        assert_eq!(config.pdf_offsets.y_offset, 0.0);
        assert!(!config.badge_options.draw_border);
        assert_eq!(config.badge_options.border_radius, 2.0);
        assert_eq!(config.fonts, FontConfig::default());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config = Config::from_json(r#"{"no_such_section": {"a": 1}}"#).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = Config::from_json("{not json").unwrap_err();
        assert!(matches!(err, BadgeError::Config(_)));
    }

    #[test]
    fn explicit_defaults_equal_the_builtin_defaults() {
        let spelled_out = serde_json::to_string(&Config::default()).unwrap();
        let config = Config::from_json(&spelled_out).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn per_line_font_defaults() {
        let fonts = FontConfig::default();
        assert_eq!(fonts.line(0).font_size, 16.0);
        assert_eq!(fonts.line(1).y_position, 15.0);
        assert_eq!(fonts.line(2).font_size, 12.0);
        assert!(fonts.line(0).font_name.is_none());
    }
}
