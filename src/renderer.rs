use egui::emath::Rot2;
use egui::epaint::TextShape;
use egui::{Color32, FontId, Painter, Pos2, Rect, Shape, Stroke as EguiStroke};

use crate::surface::{GlyphDraw, Surface};

/// Ink used for sticker glyphs; egui emoji are single-color.
pub const GLYPH_COLOR: Color32 = Color32::BLACK;

/// Draws onto an egui painter, mapping canvas coordinates into `rect`.
///
/// The painter should be clipped to `rect` (see [`egui::Ui::painter_at`]) so
/// off-canvas geometry is cut off the same way the export clips it.
pub struct PainterSurface<'a> {
    painter: &'a Painter,
    rect: Rect,
    background: Color32,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a Painter, rect: Rect, background: Color32) -> Self {
        Self {
            painter,
            rect,
            background,
        }
    }

    fn to_screen(&self, point: Pos2) -> Pos2 {
        self.rect.min + point.to_vec2()
    }
}

impl Surface for PainterSurface<'_> {
    fn clear(&mut self) {
        self.painter.rect_filled(self.rect, 0.0, self.background);
    }

    fn polyline(&mut self, points: &[Pos2], thickness: f32, color: Color32) {
        let points = points.iter().map(|p| self.to_screen(*p)).collect();
        self.painter
            .add(Shape::line(points, EguiStroke::new(thickness, color)));
    }

    fn glyph(&mut self, glyph: &GlyphDraw<'_>) {
        let color = GLYPH_COLOR.gamma_multiply(glyph.opacity);
        let galley = self.painter.layout_no_wrap(
            glyph.text.to_owned(),
            FontId::proportional(glyph.size),
            color,
        );
        // Text shapes rotate around their top-left corner; shift so the
        // rotation pivots on the glyph center instead.
        let half = galley.size() / 2.0;
        let center = self.to_screen(glyph.position);
        let pos = center - Rot2::from_angle(glyph.rotation) * half;
        self.painter
            .add(TextShape::new(pos, galley, color).with_angle(glyph.rotation));
    }
}
