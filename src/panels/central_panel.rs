use crate::SketchpadApp;
use crate::renderer::PainterSurface;
use crate::tools::CursorHint;

pub fn central_panel(app: &mut SketchpadApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading("Sticker Sketchpad");

        let size = egui::Vec2::splat(app.config().canvas_size);
        let (canvas_rect, response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());

        // Handle input
        app.handle_canvas_input(ctx, canvas_rect, response.contains_pointer());

        // Render the canvas
        let painter = ui.painter_at(canvas_rect);
        let mut surface = PainterSurface::new(&painter, canvas_rect, egui::Color32::WHITE);
        app.log().render(&mut surface);
        painter.rect_stroke(canvas_rect, 0.0, egui::Stroke::new(1.0, egui::Color32::DARK_GRAY));

        if let Some(hover) = response.hover_pos() {
            let radius = match app.toolbox().cursor() {
                CursorHint::Crosshair => {
                    ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
                    return;
                }
                CursorHint::SmallDot => 2.0,
                CursorHint::LargeDot => 3.0,
            };
            ctx.set_cursor_icon(egui::CursorIcon::None);
            painter.circle_filled(hover, radius, egui::Color32::BLACK);
        }
    });
}

/// Modal-ish prompt for adding a custom sticker.
pub fn custom_sticker_window(app: &mut SketchpadApp, ctx: &egui::Context) {
    let mut decision = None;
    let Some(text) = app.custom_sticker_prompt_mut() else {
        return;
    };

    egui::Window::new("Custom sticker")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label("Emoji or text:");
            let edit = ui.text_edit_singleline(text);
            if edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                decision = Some(true);
            }
            ui.horizontal(|ui| {
                if ui.button("Add").clicked() {
                    decision = Some(true);
                }
                if ui.button("Cancel").clicked() {
                    decision = Some(false);
                }
            });
        });

    if let Some(accept) = decision {
        app.close_custom_sticker_prompt(accept);
    }
}
