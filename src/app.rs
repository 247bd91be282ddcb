use std::path::PathBuf;

use crate::config::SketchpadConfig;
use crate::drawing_log::DrawingLog;
use crate::error::ConfigError;
use crate::export;
use crate::input::{InputEvent, InputHandler};
use crate::panels::{central_panel, custom_sticker_window, tools_panel};
use crate::state::Interaction;
use crate::tools::{MarkerKind, Toolbox};

/// The sketchpad application: drawing log, tool selection and the pointer
/// state machine, wired to eframe.
pub struct SketchpadApp {
    config: SketchpadConfig,
    log: DrawingLog,
    interaction: Interaction,
    toolbox: Toolbox,
    input: InputHandler,
    /// Text of the open custom sticker prompt
    custom_sticker_prompt: Option<String>,
    /// Result of the last export, shown under the export button
    status: Option<String>,
    last_revision: u64,
}

impl SketchpadApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>, config: SketchpadConfig) -> Result<Self, ConfigError> {
        Self::from_config(config)
    }

    pub fn from_config(config: SketchpadConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let toolbox = Toolbox::new(&config)?;
        Ok(Self {
            config,
            log: DrawingLog::new(),
            interaction: Interaction::new(),
            toolbox,
            input: InputHandler::new(egui::Rect::NOTHING),
            custom_sticker_prompt: None,
            status: None,
            last_revision: 0,
        })
    }

    pub fn config(&self) -> &SketchpadConfig {
        &self.config
    }

    pub fn log(&self) -> &DrawingLog {
        &self.log
    }

    pub fn toolbox(&self) -> &Toolbox {
        &self.toolbox
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn undo(&mut self) {
        self.log.undo();
    }

    pub fn redo(&mut self) {
        self.log.redo();
    }

    pub fn clear(&mut self) {
        self.log.clear();
        self.interaction.reset();
    }

    pub fn select_marker(&mut self, kind: MarkerKind) {
        self.toolbox.select_marker(kind);
    }

    pub fn select_sticker(&mut self, index: usize) {
        if let Err(err) = self.toolbox.select_sticker(index) {
            log::warn!("{err}");
        }
    }

    pub fn open_custom_sticker_prompt(&mut self) {
        self.custom_sticker_prompt = Some(self.config.custom_sticker_default.clone());
    }

    pub fn custom_sticker_prompt_mut(&mut self) -> Option<&mut String> {
        self.custom_sticker_prompt.as_mut()
    }

    /// Close the prompt, adding the sticker if `accept` and the text is usable.
    pub fn close_custom_sticker_prompt(&mut self, accept: bool) {
        let Some(text) = self.custom_sticker_prompt.take() else {
            return;
        };
        if accept {
            if let Err(err) = self.toolbox.add_custom_sticker(&text) {
                log::warn!("{err}");
            }
        }
    }

    /// Write the drawing as PNG next to the working directory.
    pub fn export(&mut self) {
        let path = PathBuf::from(&self.config.export_file_name);
        self.status = Some(match export::export_to_file(&self.log, &self.config, &path) {
            Ok(()) => format!("Saved {}", path.display()),
            Err(err) => {
                log::error!("Export failed: {err}");
                format!("Export failed: {err}")
            }
        });
    }

    /// Route this frame's canvas input through the state machine.
    pub fn handle_canvas_input(&mut self, ctx: &egui::Context, canvas_rect: egui::Rect, pointer_over_canvas: bool) {
        self.input.set_canvas_rect(canvas_rect);
        let tool = self.toolbox.active_tool();
        for event in self.input.process_input(ctx, pointer_over_canvas) {
            match event {
                InputEvent::Pointer(pointer) => {
                    self.interaction.handle(pointer, &tool, &mut self.log);
                }
                InputEvent::Undo => self.undo(),
                InputEvent::Redo => self.redo(),
            }
        }
    }

    pub fn is_interacting(&self) -> bool {
        self.interaction.state().is_active()
    }
}

impl eframe::App for SketchpadApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        tools_panel(self, ctx);
        central_panel(self, ctx);
        custom_sticker_window(self, ctx);

        if self.log.revision() != self.last_revision {
            self.last_revision = self.log.revision();
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_config() {
        let config = SketchpadConfig {
            palette: Vec::new(),
            ..Default::default()
        };
        assert!(SketchpadApp::from_config(config).is_err());
    }

    #[test]
    fn clear_resets_interaction() {
        let mut app = SketchpadApp::from_config(SketchpadConfig::default()).unwrap();
        let tool = app.toolbox.active_tool();
        app.interaction.handle(
            crate::input::PointerEvent::new(crate::input::PointerKind::Press, egui::pos2(1.0, 1.0)),
            &tool,
            &mut app.log,
        );
        assert!(app.is_interacting());

        app.clear();
        assert!(!app.is_interacting());
        assert!(app.log().in_progress().is_none());
    }

    #[test]
    fn custom_sticker_prompt_adds_and_selects() {
        let mut app = SketchpadApp::from_config(SketchpadConfig::default()).unwrap();
        app.open_custom_sticker_prompt();
        assert_eq!(app.custom_sticker_prompt_mut().map(|s| s.as_str()), Some("👾"));

        app.close_custom_sticker_prompt(true);
        assert!(app.custom_sticker_prompt_mut().is_none());
        assert_eq!(app.toolbox().stickers().len(), 6);
        assert!(app.toolbox().active_tool().is_sticker());
    }
}
