use crate::SketchpadApp;
use crate::components::tool_button::ToolButton;
use crate::tools::{MarkerKind, ToolSelection};

pub fn tools_panel(app: &mut SketchpadApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            ui.horizontal(|ui| {
                if ui.button("Clear").clicked() {
                    app.clear();
                }
                let can_undo = app.log().can_undo();
                let can_redo = app.log().can_redo();
                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.redo();
                }
            });

            ui.separator();

            let selection = app.toolbox().selection();
            ui.horizontal(|ui| {
                for (kind, label) in [(MarkerKind::Thin, "Thin"), (MarkerKind::Thick, "Thick")] {
                    let color = app.toolbox().marker_color(kind);
                    let button = ToolButton::new(label, selection == ToolSelection::Marker(kind)).accent(color);
                    if button.show(ui).on_hover_text(format!("{label} marker")).clicked() {
                        app.select_marker(kind);
                    }
                }
            });

            ui.separator();

            if ui.button("Export").clicked() {
                app.export();
            }
            if let Some(status) = app.status() {
                ui.label(status);
            }

            ui.separator();

            ui.label("Stickers");
            let slots: Vec<(String, f32)> = app
                .toolbox()
                .stickers()
                .iter()
                .map(|slot| (slot.glyph.clone(), slot.rotation))
                .collect();
            ui.horizontal_wrapped(|ui| {
                for (index, (glyph, rotation)) in slots.iter().enumerate() {
                    let selected = selection == ToolSelection::Sticker(index);
                    if ToolButton::new(glyph, selected).rotation(*rotation).show(ui).clicked() {
                        app.select_sticker(index);
                    }
                }
                if ui.button("+").on_hover_text("Custom sticker").clicked() {
                    app.open_custom_sticker_prompt();
                }
            });

            ui.separator();

            let log = app.log();
            ui.horizontal(|ui| {
                ui.label(format!("Committed: {}", log.len()));
                ui.label(format!("Redoable: {}", log.redo_buffer().len()));
            });

            egui::CollapsingHeader::new("History").show(ui, |ui| {
                egui::Grid::new("command_history_grid")
                    .num_columns(2)
                    .spacing([40.0, 4.0])
                    .striped(true)
                    .show(ui, |ui| {
                        ui.strong("Log");
                        ui.strong("Redo");
                        ui.end_row();

                        let committed = log.commands();
                        let redo = log.redo_buffer();
                        for i in 0..committed.len().max(redo.len()) {
                            ui.label(committed.get(i).map_or("", |c| c.kind()));
                            ui.label(redo.get(i).map_or("", |c| c.kind()));
                            ui.end_row();
                        }
                    });
            });
        });
}
