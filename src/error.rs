use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a [`crate::SketchpadConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A numeric field must be strictly positive
    #[error("`{field}` must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("`{field}` must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("`{field}` must be at most {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        max: f32,
    },

    #[error("`{field}` must not be empty")]
    Empty { field: &'static str },

    #[error("invalid color {0:?}, expected #RRGGBB")]
    InvalidColor(String),
}

/// Errors raised while exporting the drawing to a bitmap.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export surface would be {width}x{height} pixels")]
    EmptySurface { width: u32, height: u32 },

    #[error("export surface would be {width}x{height} pixels, larger than {max}x{max}")]
    TooLarge { width: u32, height: u32, max: u32 },

    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolboxError {
    #[error("custom sticker text is empty")]
    EmptySticker,

    #[error("no sticker at index {0}")]
    UnknownSticker(usize),
}
