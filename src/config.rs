//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the
//! clock-config.toml file. Every section and key is optional; anything left out
//! takes the widget defaults (black hands and numerals, red second hand,
//! stroked black face at full radius).

use crate::geometry::{
    ClockFaceStyle, HandStyle, HandStyles, Orientation, DEFAULT_CLOCK_BORDER_WIDTH,
    DEFAULT_HOUR_HAND_WIDTH, DEFAULT_MINUTE_HAND_WIDTH, DEFAULT_RADIUS_PERCENT,
    DEFAULT_SECOND_HAND_WIDTH, DEFAULT_TICK_WIDTH, HOUR_HAND_LENGTH_PERCENT,
    MINUTE_HAND_LENGTH_PERCENT, SECOND_HAND_LENGTH_PERCENT,
};
use crate::CircleRenderMode;
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default location of the configuration file
pub const CONFIG_FILE: &str = "clock-config.toml";

/// Errors from writing the configuration back to disk.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config serialize: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("config IO: {0}")]
    Io(#[from] std::io::Error),
}

/// Application configuration loaded from clock-config.toml
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// View size and orientation
    pub display: DisplayConfig,
    /// Face circle and numerals
    pub face: FaceConfig,
    /// Hand colors and stroke widths
    pub hands: HandsConfig,
    /// Rotation counter persistence
    pub state: StateConfig,
}

/// View dimensions used by the binary's host loop
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// View width in pixels
    pub width: u32,
    /// View height in pixels
    pub height: u32,
    /// Which dimension sizes the face
    pub orientation: OrientationSetting,
}

/// Orientation as written in the config file
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationSetting {
    /// Portrait unless the view is wider than tall
    #[default]
    Auto,
    Portrait,
    Landscape,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct FaceConfig {
    #[serde(with = "hex_color")]
    pub circle_color: Rgb888,
    pub circle_style: CircleRenderMode,
    #[serde(with = "hex_color")]
    pub digit_color: Rgb888,
    /// Numeral size in pixels; 0 selects 5% of the view width
    pub digit_size: f32,
    /// Fraction of the half-dimension used as the face radius
    pub radius_percent: f32,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct HandsConfig {
    #[serde(with = "hex_color")]
    pub hour_color: Rgb888,
    pub hour_stroke_width: f32,
    #[serde(with = "hex_color")]
    pub minute_color: Rgb888,
    pub minute_stroke_width: f32,
    #[serde(with = "hex_color")]
    pub second_color: Rgb888,
    pub second_stroke_width: f32,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct StateConfig {
    /// Where the rotation counter is kept between runs
    pub path: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            width: 400,
            height: 300,
            orientation: OrientationSetting::Auto,
        }
    }
}

impl Default for FaceConfig {
    fn default() -> Self {
        FaceConfig {
            circle_color: Rgb888::BLACK,
            circle_style: CircleRenderMode::Stroke,
            digit_color: Rgb888::BLACK,
            digit_size: 0.0, // auto
            radius_percent: DEFAULT_RADIUS_PERCENT,
        }
    }
}

impl Default for HandsConfig {
    fn default() -> Self {
        HandsConfig {
            hour_color: Rgb888::BLACK,
            hour_stroke_width: DEFAULT_HOUR_HAND_WIDTH,
            minute_color: Rgb888::BLACK,
            minute_stroke_width: DEFAULT_MINUTE_HAND_WIDTH,
            second_color: Rgb888::RED,
            second_stroke_width: DEFAULT_SECOND_HAND_WIDTH,
        }
    }
}

impl Default for StateConfig {
    fn default() -> Self {
        StateConfig {
            path: "/tmp/clock_rotation_state.json".to_string(),
        }
    }
}

impl OrientationSetting {
    /// Resolve against the actual view size.
    pub fn resolve(self, width: f32, height: f32) -> Orientation {
        match self {
            OrientationSetting::Auto => Orientation::from_dimensions(width, height),
            OrientationSetting::Portrait => Orientation::Portrait,
            OrientationSetting::Landscape => Orientation::Landscape,
        }
    }
}

impl Config {
    /// Load configuration from clock-config.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    log::info!("Loaded configuration from {}", path.as_ref().display());
                    config
                }
                Err(e) => {
                    log::warn!("Invalid config file format: {}", e);
                    log::warn!("Using default clock configuration");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No config file found, using default clock configuration");
                Self::default()
            }
        }
    }

    /// Save current configuration to clock-config.toml
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to_path(CONFIG_FILE)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        log::info!("Configuration saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Face paint for the geometry core.
    pub fn face_style(&self) -> ClockFaceStyle {
        ClockFaceStyle {
            circle_color: self.face.circle_color,
            circle_mode: self.face.circle_style,
            digit_color: self.face.digit_color,
            digit_size: self.face.digit_size,
            border_width: DEFAULT_CLOCK_BORDER_WIDTH,
            tick_width: DEFAULT_TICK_WIDTH,
        }
    }

    /// Hand paint for the geometry core; lengths are fixed.
    pub fn hand_styles(&self) -> HandStyles {
        let hands = &self.hands;
        HandStyles {
            hour: HandStyle {
                color: hands.hour_color,
                stroke_width: hands.hour_stroke_width,
                length_percent: HOUR_HAND_LENGTH_PERCENT,
            },
            minute: HandStyle {
                color: hands.minute_color,
                stroke_width: hands.minute_stroke_width,
                length_percent: MINUTE_HAND_LENGTH_PERCENT,
            },
            second: HandStyle {
                color: hands.second_color,
                stroke_width: hands.second_stroke_width,
                length_percent: SECOND_HAND_LENGTH_PERCENT,
            },
        }
    }
}

/// `#RRGGBB` (de)serialization for colors.
mod hex_color {
    use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &Rgb888, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!(
            "#{:02X}{:02X}{:02X}",
            color.r(),
            color.g(),
            color.b()
        ))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rgb888, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse(&text)
            .ok_or_else(|| de::Error::custom(format!("invalid color {text:?}, expected #RRGGBB")))
    }

    pub(super) fn parse(text: &str) -> Option<Rgb888> {
        let hex = text.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some(Rgb888::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.display.width, 400);
        assert_eq!(config.display.orientation, OrientationSetting::Auto);
        assert_eq!(config.face.radius_percent, 1.0);
        assert_eq!(config.face.circle_style, CircleRenderMode::Stroke);
        assert_eq!(config.hands.second_color, Rgb888::RED);
        assert_eq!(config.hand_styles(), HandStyles::default());
        assert_eq!(config.face_style(), ClockFaceStyle::default());
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.face.circle_color = Rgb888::new(0x12, 0xAB, 0xEF);
        config.face.circle_style = CircleRenderMode::FillAndStroke;
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("\"#12ABEF\""));
        assert!(toml_str.contains("fill_and_stroke"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.face.circle_color, config.face.circle_color);
        assert_eq!(parsed.face.circle_style, config.face.circle_style);
        assert_eq!(parsed.state.path, config.state.path);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: Config = toml::from_str(
            r##"
[hands]
second_color = "#0000ff"
second_stroke_width = 3.5

[display]
orientation = "landscape"
"##,
        )
        .unwrap();
        assert_eq!(parsed.hands.second_color, Rgb888::BLUE);
        assert_eq!(parsed.hands.second_stroke_width, 3.5);
        assert_eq!(parsed.hands.hour_stroke_width, DEFAULT_HOUR_HAND_WIDTH);
        assert_eq!(parsed.display.orientation, OrientationSetting::Landscape);
        assert_eq!(parsed.display.height, 300);
        assert_eq!(parsed.face.digit_size, 0.0);
    }

    #[test]
    fn test_invalid_color_falls_back() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "[face]\ncircle_color = \"black\"\n").unwrap();
        let config = Config::load_from_path(file.path());
        assert_eq!(config.face.circle_color, Rgb888::BLACK);
        assert_eq!(config.hands.second_color, Rgb888::RED);
    }

    #[test]
    fn test_hex_parse() {
        assert_eq!(hex_color::parse("#FF0000"), Some(Rgb888::RED));
        assert_eq!(hex_color::parse("#ffffff"), Some(Rgb888::WHITE));
        assert_eq!(hex_color::parse("FF0000"), None);
        assert_eq!(hex_color::parse("#FF00"), None);
        assert_eq!(hex_color::parse("#GG0000"), None);
    }

    #[test]
    fn test_orientation_resolution() {
        assert_eq!(
            OrientationSetting::Auto.resolve(400.0, 300.0),
            Orientation::Landscape
        );
        assert_eq!(
            OrientationSetting::Portrait.resolve(400.0, 300.0),
            Orientation::Portrait
        );
    }

    #[test]
    fn test_save_and_load() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.hands.minute_stroke_width = 12.0;
        config.save_to_path(file.path()).unwrap();

        let loaded = Config::load_from_path(file.path());
        assert_eq!(loaded.hands.minute_stroke_width, 12.0);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let config = Config::load_from_path("/nonexistent/path");
        // Should fallback to default
        assert_eq!(config.display.width, 400);
    }
}
