use egui::{Color32, Pos2};

use crate::command::DrawCommand;
use crate::sticker::StickerPreview;
use crate::stroke::Stroke;

mod toolbox;
pub use toolbox::{CursorHint, MarkerKind, StickerSlot, ToolSelection, Toolbox};

/// Fully resolved tool settings for the next command.
///
/// The toolbox owns selection and randomization; commands are built only from
/// the values carried here.
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveTool {
    Marker { thickness: f32, color: Color32 },
    Sticker { glyph: String, rotation: f32, size: f32 },
}

impl ActiveTool {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Marker { .. } => "Marker",
            Self::Sticker { .. } => "Sticker",
        }
    }

    pub fn is_sticker(&self) -> bool {
        matches!(self, Self::Sticker { .. })
    }

    /// The command a press at `point` starts with this tool: a one-point
    /// stroke or a sticker ghost.
    pub fn start_command(&self, point: Pos2) -> DrawCommand {
        match self {
            Self::Marker { thickness, color } => Stroke::new(point, *thickness, *color).into(),
            Self::Sticker { glyph, rotation, size } => {
                StickerPreview::new(point, glyph.clone(), *rotation, *size).into()
            }
        }
    }
}
