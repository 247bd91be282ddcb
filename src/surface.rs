use egui::{Color32, Pos2};

/// A positioned, rotated piece of text (usually a single emoji).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphDraw<'a> {
    /// Center of the glyph in surface coordinates
    pub position: Pos2,
    pub text: &'a str,
    /// Display size in surface pixels
    pub size: f32,
    /// Radians, clockwise in screen space
    pub rotation: f32,
    /// 0.0 (invisible) to 1.0 (opaque)
    pub opacity: f32,
}

/// Sink for draw primitives.
///
/// Commands only ever write to a surface; nothing reads pixels back. The
/// on-screen painter, the export rasterizer and the recording surface used in
/// tests all implement this.
pub trait Surface {
    /// Wipe everything drawn so far.
    fn clear(&mut self);

    /// Stroke a connected path through `points` in order.
    fn polyline(&mut self, points: &[Pos2], thickness: f32, color: Color32);

    fn glyph(&mut self, glyph: &GlyphDraw<'_>);
}

/// One primitive captured by a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Polyline {
        points: Vec<Pos2>,
        thickness: f32,
        color: Color32,
    },
    Glyph {
        position: Pos2,
        text: String,
        size: f32,
        rotation: f32,
        opacity: f32,
    },
}

/// Surface that remembers every primitive instead of drawing it.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded, including `Clear` markers.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// What would be visible now: the primitives after the last clear.
    pub fn visible(&self) -> &[DrawOp] {
        let start = self
            .ops
            .iter()
            .rposition(|op| matches!(op, DrawOp::Clear))
            .map_or(0, |i| i + 1);
        &self.ops[start..]
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn polyline(&mut self, points: &[Pos2], thickness: f32, color: Color32) {
        self.ops.push(DrawOp::Polyline {
            points: points.to_vec(),
            thickness,
            color,
        });
    }

    fn glyph(&mut self, glyph: &GlyphDraw<'_>) {
        self.ops.push(DrawOp::Glyph {
            position: glyph.position,
            text: glyph.text.to_owned(),
            size: glyph.size,
            rotation: glyph.rotation,
            opacity: glyph.opacity,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn visible_starts_after_last_clear() {
        let mut surface = RecordingSurface::new();
        surface.polyline(&[pos2(0.0, 0.0), pos2(1.0, 1.0)], 1.0, Color32::RED);
        surface.clear();
        assert!(surface.visible().is_empty());

        surface.polyline(&[pos2(2.0, 2.0), pos2(3.0, 3.0)], 1.0, Color32::RED);
        assert_eq!(surface.visible().len(), 1);
        assert_eq!(surface.ops().len(), 3);
    }
}
