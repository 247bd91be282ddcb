use eframe::egui;
use egui::emath::Rot2;
use egui::epaint::TextShape;

/// Square toolbar button showing a label (text or emoji).
///
/// Marker buttons pass their current color as `accent`; sticker buttons pass
/// the rotation the next placement will use, so the button previews it.
pub struct ToolButton<'a> {
    pub label: &'a str,
    pub selected: bool,
    pub accent: Option<egui::Color32>,
    pub rotation: f32,
}

impl<'a> ToolButton<'a> {
    pub fn new(label: &'a str, selected: bool) -> Self {
        Self {
            label,
            selected,
            accent: None,
            rotation: 0.0,
        }
    }

    pub fn accent(mut self, color: egui::Color32) -> Self {
        self.accent = Some(color);
        self
    }

    pub fn rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let button_size = egui::vec2(40.0, 32.0);
        let (rect, response) = ui.allocate_exact_size(button_size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                egui::Color32::from_rgb(100, 181, 246) // Light blue when selected
            } else if response.hovered() {
                egui::Color32::from_gray(70)
            } else {
                egui::Color32::from_gray(50)
            };
            let bg_color = match self.accent {
                Some(accent) if !self.selected => accent.gamma_multiply(0.35),
                _ => bg_color,
            };
            ui.painter().rect_filled(rect, 4.0, bg_color);

            let text_color = if self.selected {
                egui::Color32::BLACK
            } else {
                egui::Color32::WHITE
            };
            let galley = ui.painter().layout_no_wrap(
                self.label.to_owned(),
                egui::FontId::proportional(16.0),
                text_color,
            );
            let half = galley.size() / 2.0;
            let pos = rect.center() - Rot2::from_angle(self.rotation) * half;
            ui.painter()
                .add(TextShape::new(pos, galley, text_color).with_angle(self.rotation));

            let border = match (self.selected, self.accent) {
                (_, Some(accent)) => Some(egui::Stroke::new(2.0, accent)),
                (true, None) => Some(egui::Stroke::new(2.0, egui::Color32::from_rgb(33, 150, 243))),
                (false, None) => None,
            };
            if let Some(border) = border {
                ui.painter().rect_stroke(rect, 4.0, border);
            }
        }

        response
    }
}
