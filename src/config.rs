use std::path::{Path, PathBuf};

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV_VAR: &str = "SKETCHPAD_CONFIG";

/// Largest accepted canvas side, in surface pixels.
pub const MAX_CANVAS_SIZE: f32 = 4096.0;

/// Largest accepted export side (`canvas_size * export_scale`), in pixels.
pub const MAX_EXPORT_SIZE: f32 = 16384.0;

/// Largest accepted `max_rotation`, in radians.
pub const MAX_ROTATION: f32 = std::f32::consts::PI;

/// Tunables for the sketchpad. Missing fields fall back to their defaults, so
/// a config file only needs to mention what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchpadConfig {
    /// Side length of the square canvas, in surface pixels
    pub canvas_size: f32,
    /// Export resolution multiplier
    pub export_scale: f32,
    pub export_file_name: String,
    pub thin_thickness: f32,
    pub thick_thickness: f32,
    /// Display size and hit-box side length of stickers
    pub sticker_size: f32,
    /// Stickers get a random rotation in `[-max_rotation, max_rotation]` radians
    pub max_rotation: f32,
    /// Marker colors as `#RRGGBB`
    pub palette: Vec<String>,
    pub stickers: Vec<String>,
    pub custom_sticker_default: String,
}

impl Default for SketchpadConfig {
    fn default() -> Self {
        Self {
            canvas_size: 256.0,
            export_scale: 4.0,
            export_file_name: "sketchpad.png".to_owned(),
            thin_thickness: 2.0,
            thick_thickness: 5.0,
            sticker_size: 20.0,
            max_rotation: 0.25,
            palette: [
                "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8",
                "#F7DC6F", "#BB8FCE", "#85C1E9", "#F8C471", "#82E0AA", "#F1948A", "#85C1E9",
                "#D7BDE2",
            ]
            .map(String::from)
            .to_vec(),
            stickers: ["☄️", "🪐", "⭐", "🌌", "🌑"].map(String::from).to_vec(),
            custom_sticker_default: "👾".to_owned(),
        }
    }
}

impl SketchpadConfig {
    /// Read and validate a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise from `$SKETCHPAD_CONFIG`,
    /// otherwise use the defaults.
    pub fn load(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));
        match path {
            Some(path) => {
                log::info!("Loading config from {}", path.display());
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("canvas_size", self.canvas_size),
            ("export_scale", self.export_scale),
            ("thin_thickness", self.thin_thickness),
            ("thick_thickness", self.thick_thickness),
            ("sticker_size", self.sticker_size),
            ("max_rotation", self.max_rotation),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }
        for (field, value) in [
            ("canvas_size", self.canvas_size),
            ("export_scale", self.export_scale),
            ("thin_thickness", self.thin_thickness),
            ("thick_thickness", self.thick_thickness),
            ("sticker_size", self.sticker_size),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if self.max_rotation < 0.0 {
            return Err(ConfigError::NotPositive {
                field: "max_rotation",
                value: self.max_rotation,
            });
        }
        for (field, value, max) in [
            ("max_rotation", self.max_rotation, MAX_ROTATION),
            ("canvas_size", self.canvas_size, MAX_CANVAS_SIZE),
            (
                "canvas_size * export_scale",
                self.canvas_size * self.export_scale,
                MAX_EXPORT_SIZE,
            ),
        ] {
            if value > max {
                return Err(ConfigError::OutOfRange { field, value, max });
            }
        }
        if self.palette.is_empty() {
            return Err(ConfigError::Empty { field: "palette" });
        }
        if self.stickers.iter().all(|s| s.trim().is_empty()) {
            return Err(ConfigError::Empty { field: "stickers" });
        }
        if self.export_file_name.trim().is_empty() {
            return Err(ConfigError::Empty {
                field: "export_file_name",
            });
        }
        self.palette_colors().map(|_| ())
    }

    /// The palette parsed into colors.
    pub fn palette_colors(&self) -> Result<Vec<Color32>, ConfigError> {
        self.palette.iter().map(|hex| parse_hex_color(hex)).collect()
    }
}

/// Parse `#RRGGBB` (the leading `#` is optional).
pub fn parse_hex_color(text: &str) -> Result<Color32, ConfigError> {
    let hex = text.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return Err(ConfigError::InvalidColor(text.to_owned()));
    }
    Color32::from_hex(&format!("#{hex}")).map_err(|_| ConfigError::InvalidColor(text.to_owned()))
}
