use crate::error::{CockpitError, Result};
use crate::i18n::Locale;
use bon::Builder;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// RGB colour used by every drawing primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CockpitError::InvalidColor(hex.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| CockpitError::InvalidColor(hex.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Linear blend towards `other`; `t = 0` keeps `self`.
    pub fn mix(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let blend = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color::new(
            blend(self.r, other.r),
            blend(self.g, other.g),
            blend(self.b, other.b),
        )
    }

    pub fn scale(self, factor: f64) -> Color {
        Color::new(0, 0, 0).mix(self, factor)
    }
}

impl TryFrom<String> for Color {
    type Error = CockpitError;

    fn try_from(value: String) -> Result<Self> {
        Color::from_hex(&value)
    }
}

/// Runtime configuration of the display.
///
/// Built in code through the generated builder, or loaded from TOML where
/// every key is optional and falls back to the builder default.
#[derive(Debug, Clone, Builder, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    #[builder(default = "Cockpit".to_string())]
    pub title: String,

    // Window configuration
    #[builder(default = 1280)]
    pub window_width: u32,
    #[builder(default = 800)]
    pub window_height: u32,
    #[builder(default = 60.0)]
    pub max_framerate: f64,

    // Animation timing
    #[builder(default = 600)]
    pub telemetry_interval_ms: u64,
    #[builder(default = 1800)]
    pub reveal_duration_ms: u64,
    #[builder(default = 90.0)]
    pub sweep_rate_deg_per_s: f64,

    #[builder(default = Locale::En)]
    pub locale: Locale,

    // Colors
    #[builder(default = Color::new(0x00, 0xe5, 0xff))]
    pub accent_color: Color,
    #[builder(default = Color::new(0xff, 0x3b, 0x30))]
    pub warning_color: Color,
    #[builder(default = Color::new(0x05, 0x08, 0x0d))]
    pub background_color: Color,

    /// TrueType/OpenType file used for labels; text is skipped without one.
    pub font_path: Option<PathBuf>,
    /// Telemetry RNG seed; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl DisplayConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let string = std::fs::read_to_string(path).map_err(|source| CockpitError::ConfigIo {
            source,
            path: path.to_path_buf(),
        })?;
        Self::from_toml_str(&string).map_err(|error| match error {
            CockpitError::ConfigParse { source, .. } => CockpitError::ConfigParse {
                source,
                path: path.to_path_buf(),
            },
            other => other,
        })
    }

    pub fn from_toml_str(string: &str) -> Result<Self> {
        toml::from_str(string).map_err(|source| CockpitError::ConfigParse {
            source,
            path: PathBuf::new(),
        })
    }

    pub fn frame_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.max_framerate.max(1.0))
    }

    pub fn telemetry_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.telemetry_interval_ms)
    }

    pub fn reveal_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.reveal_duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(Color::from_hex("#00e5ff").unwrap(), Color::new(0, 0xe5, 0xff));
        assert_eq!(Color::from_hex("FF3B30").unwrap(), Color::new(0xff, 0x3b, 0x30));
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#zzzzzz").is_err());
    }

    #[test]
    fn mix_hits_both_ends() {
        let a = Color::new(0, 0, 0);
        let b = Color::new(200, 100, 50);
        assert_eq!(a.mix(b, 0.0), a);
        assert_eq!(a.mix(b, 1.0), b);
        assert_eq!(a.mix(b, 0.5), Color::new(100, 50, 25));
    }

    #[test]
    fn toml_overrides_only_given_keys() {
        let config = DisplayConfig::from_toml_str(
            r##"
            window_width = 1600
            locale = "tr"
            accent_color = "#10ff80"
            seed = 7
            "##,
        )
        .unwrap();
        assert_eq!(config.window_width, 1600);
        assert_eq!(config.window_height, 800);
        assert_eq!(config.locale, Locale::Tr);
        assert_eq!(config.accent_color, Color::new(0x10, 0xff, 0x80));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.telemetry_interval_ms, 600);
    }

    #[test]
    fn bad_color_in_toml_is_a_parse_error() {
        let error = DisplayConfig::from_toml_str(r##"warning_color = "red""##).unwrap_err();
        assert!(matches!(error, CockpitError::ConfigParse { .. }));
    }
}
