#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod components;
pub mod config;
pub mod drawing_log;
pub mod error;
pub mod export;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod state;
pub mod sticker;
pub mod stroke;
pub mod surface;
pub mod tools;

pub use app::SketchpadApp;
pub use command::{CommandId, DrawCommand};
pub use config::SketchpadConfig;
pub use drawing_log::DrawingLog;
pub use error::{ConfigError, ExportError, ToolboxError};
pub use input::{InputEvent, PointerEvent, PointerKind};
pub use renderer::PainterSurface;
pub use state::{Interaction, InteractionState};
pub use sticker::{Sticker, StickerPreview};
pub use stroke::Stroke;
pub use surface::{DrawOp, RecordingSurface, Surface};
pub use tools::{ActiveTool, MarkerKind, ToolSelection, Toolbox};
