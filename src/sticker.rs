use egui::Pos2;

use crate::command::CommandId;
use crate::surface::{GlyphDraw, Surface};

/// Opacity used for the ghost of a sticker that is still being placed.
pub const PREVIEW_OPACITY: f32 = 0.4;

/// An emoji or short text stamped onto the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Sticker {
    id: CommandId,
    position: Pos2,
    glyph: String,
    rotation: f32,
    size: f32,
}

impl Sticker {
    pub fn new(position: Pos2, glyph: impl Into<String>, rotation: f32, size: f32) -> Self {
        Self {
            id: CommandId::new(),
            position,
            glyph: glyph.into(),
            rotation,
            size,
        }
    }

    pub fn id(&self) -> CommandId {
        self.id
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    /// Rotation in radians, fixed at creation.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Move the sticker. Only the interaction layer calls this, while the
    /// sticker is the in-progress command.
    pub fn reposition(&mut self, point: Pos2) {
        self.position = point;
    }

    /// Hit test against an axis-aligned box of `size` centered on the
    /// position, edges inclusive.
    pub fn contains_point(&self, point: Pos2) -> bool {
        let half = self.size / 2.0;
        point.x >= self.position.x - half
            && point.x <= self.position.x + half
            && point.y >= self.position.y - half
            && point.y <= self.position.y + half
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        surface.glyph(&self.glyph_draw(1.0));
    }

    fn glyph_draw(&self, opacity: f32) -> GlyphDraw<'_> {
        GlyphDraw {
            position: self.position,
            text: &self.glyph,
            size: self.size,
            rotation: self.rotation,
            opacity,
        }
    }
}

/// A sticker that follows the pointer until the button is released.
///
/// Never stored in the drawing log: it is turned into a [`Sticker`] on commit
/// or dropped on cancel.
#[derive(Debug, Clone, PartialEq)]
pub struct StickerPreview {
    inner: Sticker,
}

impl StickerPreview {
    pub fn new(position: Pos2, glyph: impl Into<String>, rotation: f32, size: f32) -> Self {
        Self {
            inner: Sticker::new(position, glyph, rotation, size),
        }
    }

    pub fn id(&self) -> CommandId {
        self.inner.id
    }

    pub fn position(&self) -> Pos2 {
        self.inner.position
    }

    pub fn glyph(&self) -> &str {
        &self.inner.glyph
    }

    pub fn rotation(&self) -> f32 {
        self.inner.rotation
    }

    pub fn reposition(&mut self, point: Pos2) {
        self.inner.reposition(point);
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        surface.glyph(&self.inner.glyph_draw(PREVIEW_OPACITY));
    }

    /// Turn the ghost into a real sticker, keeping glyph, rotation and the
    /// final position.
    pub fn into_sticker(self) -> Sticker {
        self.inner
    }
}
