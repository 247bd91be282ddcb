use std::fmt;

use egui::Pos2;
use uuid::Uuid;

use crate::sticker::{Sticker, StickerPreview};
use crate::stroke::Stroke;
use crate::surface::Surface;

/// Identity of a draw command, stable across undo and redo.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(Uuid);

impl CommandId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CommandId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The short form is enough to tell commands apart in logs
        write!(f, "#{}", &self.0.simple().to_string()[..8])
    }
}

/// Everything that can be drawn onto the canvas.
///
/// `Stroke` and `Sticker` end up in the drawing log; `StickerPreview` only
/// ever lives as the in-progress command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Stroke(Stroke),
    Sticker(Sticker),
    StickerPreview(StickerPreview),
}

impl DrawCommand {
    pub fn id(&self) -> CommandId {
        match self {
            Self::Stroke(stroke) => stroke.id(),
            Self::Sticker(sticker) => sticker.id(),
            Self::StickerPreview(preview) => preview.id(),
        }
    }

    /// Short human-readable name, used by logging and the history panel.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Stroke(_) => "stroke",
            Self::Sticker(_) => "sticker",
            Self::StickerPreview(_) => "sticker preview",
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        match self {
            Self::Stroke(stroke) => stroke.render(surface),
            Self::Sticker(sticker) => sticker.render(surface),
            Self::StickerPreview(preview) => preview.render(surface),
        }
    }

    /// Follow the pointer: a stroke grows, a sticker or preview moves.
    pub fn drag_to(&mut self, point: Pos2) {
        match self {
            Self::Stroke(stroke) => stroke.append(point),
            Self::Sticker(sticker) => sticker.reposition(point),
            Self::StickerPreview(preview) => preview.reposition(point),
        }
    }

    pub fn as_sticker(&self) -> Option<&Sticker> {
        match self {
            Self::Sticker(sticker) => Some(sticker),
            _ => None,
        }
    }

    /// The form this command takes once it is committed: a preview becomes
    /// a real sticker, everything else is unchanged.
    pub fn into_committed(self) -> Self {
        match self {
            Self::StickerPreview(preview) => Self::Sticker(preview.into_sticker()),
            other => other,
        }
    }

    pub fn is_preview(&self) -> bool {
        matches!(self, Self::StickerPreview(_))
    }
}

impl From<Stroke> for DrawCommand {
    fn from(stroke: Stroke) -> Self {
        Self::Stroke(stroke)
    }
}

impl From<Sticker> for DrawCommand {
    fn from(sticker: Sticker) -> Self {
        Self::Sticker(sticker)
    }
}

impl From<StickerPreview> for DrawCommand {
    fn from(preview: StickerPreview) -> Self {
        Self::StickerPreview(preview)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Color32, pos2};

    #[test]
    fn ids_are_unique() {
        let a = DrawCommand::from(Stroke::new(pos2(0.0, 0.0), 2.0, Color32::BLACK));
        let b = DrawCommand::from(Stroke::new(pos2(0.0, 0.0), 2.0, Color32::BLACK));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn committing_a_preview_yields_a_sticker() {
        let preview = StickerPreview::new(pos2(5.0, 5.0), "⭐", 0.0, 20.0);
        let id = preview.id();
        let committed = DrawCommand::from(preview).into_committed();

        assert!(!committed.is_preview());
        assert_eq!(committed.id(), id);
        assert_eq!(committed.as_sticker().map(Sticker::glyph), Some("⭐"));
    }

    #[test]
    fn drag_grows_strokes_and_moves_stickers() {
        let mut stroke = DrawCommand::from(Stroke::new(pos2(0.0, 0.0), 2.0, Color32::BLACK));
        stroke.drag_to(pos2(1.0, 1.0));
        match &stroke {
            DrawCommand::Stroke(s) => assert_eq!(s.points().len(), 2),
            other => panic!("unexpected {other:?}"),
        }

        let mut sticker = DrawCommand::from(Sticker::new(pos2(0.0, 0.0), "⭐", 0.0, 20.0));
        sticker.drag_to(pos2(9.0, 9.0));
        assert_eq!(sticker.as_sticker().map(Sticker::position), Some(pos2(9.0, 9.0)));
    }
}
