use egui::Color32;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use super::ActiveTool;
use crate::config::SketchpadConfig;
use crate::error::{ConfigError, ToolboxError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Thin,
    Thick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolSelection {
    Marker(MarkerKind),
    /// Index into [`Toolbox::stickers`]
    Sticker(usize),
}

/// Pointer shape to show over the canvas for the current tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    SmallDot,
    LargeDot,
    Crosshair,
}

/// A sticker button: the glyph and the rotation the next placement will use.
#[derive(Debug, Clone, PartialEq)]
pub struct StickerSlot {
    pub glyph: String,
    pub rotation: f32,
    pub custom: bool,
}

/// Tool selection state.
///
/// Each marker keeps a color picked from the palette and each sticker a
/// rotation; both are re-rolled whenever the tool is selected again, so the
/// next command gets a fresh variation while committed ones keep theirs.
#[derive(Debug)]
pub struct Toolbox {
    selection: ToolSelection,
    thin_thickness: f32,
    thick_thickness: f32,
    thin_color: Color32,
    thick_color: Color32,
    sticker_size: f32,
    max_rotation: f32,
    palette: Vec<Color32>,
    stickers: Vec<StickerSlot>,
    rng: StdRng,
}

impl Toolbox {
    pub fn new(config: &SketchpadConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Build a toolbox drawing its variations from `rng`.
    pub fn with_rng(config: &SketchpadConfig, mut rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let palette = config.palette_colors()?;
        let max_rotation = config.max_rotation;

        let stickers = config
            .stickers
            .iter()
            .map(|glyph| glyph.trim())
            .filter(|glyph| !glyph.is_empty())
            .map(|glyph| StickerSlot {
                glyph: glyph.to_owned(),
                rotation: random_rotation(&mut rng, max_rotation),
                custom: false,
            })
            .collect();

        let thin_color = random_color(&mut rng, &palette);
        let thick_color = random_color(&mut rng, &palette);

        Ok(Self {
            selection: ToolSelection::Marker(MarkerKind::Thin),
            thin_thickness: config.thin_thickness,
            thick_thickness: config.thick_thickness,
            thin_color,
            thick_color,
            sticker_size: config.sticker_size,
            max_rotation,
            palette,
            stickers,
            rng,
        })
    }

    pub fn selection(&self) -> ToolSelection {
        self.selection
    }

    pub fn stickers(&self) -> &[StickerSlot] {
        &self.stickers
    }

    pub fn marker_color(&self, kind: MarkerKind) -> Color32 {
        match kind {
            MarkerKind::Thin => self.thin_color,
            MarkerKind::Thick => self.thick_color,
        }
    }

    pub fn marker_thickness(&self, kind: MarkerKind) -> f32 {
        match kind {
            MarkerKind::Thin => self.thin_thickness,
            MarkerKind::Thick => self.thick_thickness,
        }
    }

    /// Select a marker and give it a new color from the palette.
    pub fn select_marker(&mut self, kind: MarkerKind) {
        let color = random_color(&mut self.rng, &self.palette);
        match kind {
            MarkerKind::Thin => self.thin_color = color,
            MarkerKind::Thick => self.thick_color = color,
        }
        self.selection = ToolSelection::Marker(kind);
        info!("Selected {kind:?} marker, color {color:?}");
    }

    /// Select a sticker and give it a new rotation.
    pub fn select_sticker(&mut self, index: usize) -> Result<(), ToolboxError> {
        let rotation = random_rotation(&mut self.rng, self.max_rotation);
        let slot = self
            .stickers
            .get_mut(index)
            .ok_or(ToolboxError::UnknownSticker(index))?;
        slot.rotation = rotation;
        self.selection = ToolSelection::Sticker(index);
        info!("Selected sticker {:?}, rotation {rotation:.3}", slot.glyph);
        Ok(())
    }

    /// Add a sticker with user-provided text and select it.
    pub fn add_custom_sticker(&mut self, text: &str) -> Result<usize, ToolboxError> {
        let glyph = text.trim();
        if glyph.is_empty() {
            return Err(ToolboxError::EmptySticker);
        }
        let rotation = random_rotation(&mut self.rng, self.max_rotation);
        self.stickers.push(StickerSlot {
            glyph: glyph.to_owned(),
            rotation,
            custom: true,
        });
        let index = self.stickers.len() - 1;
        self.selection = ToolSelection::Sticker(index);
        info!("Added custom sticker {glyph:?}");
        Ok(index)
    }

    /// Settings for the next command.
    pub fn active_tool(&self) -> ActiveTool {
        match self.selection {
            ToolSelection::Sticker(index) => match self.stickers.get(index) {
                Some(slot) => ActiveTool::Sticker {
                    glyph: slot.glyph.clone(),
                    rotation: slot.rotation,
                    size: self.sticker_size,
                },
                None => self.marker_tool(MarkerKind::Thin),
            },
            ToolSelection::Marker(kind) => self.marker_tool(kind),
        }
    }

    pub fn cursor(&self) -> CursorHint {
        match self.selection {
            ToolSelection::Sticker(_) => CursorHint::Crosshair,
            ToolSelection::Marker(MarkerKind::Thin) => CursorHint::SmallDot,
            ToolSelection::Marker(MarkerKind::Thick) => CursorHint::LargeDot,
        }
    }

    fn marker_tool(&self, kind: MarkerKind) -> ActiveTool {
        ActiveTool::Marker {
            thickness: self.marker_thickness(kind),
            color: self.marker_color(kind),
        }
    }
}

fn random_color(rng: &mut StdRng, palette: &[Color32]) -> Color32 {
    palette.choose(rng).copied().unwrap_or(Color32::BLACK)
}

fn random_rotation(rng: &mut StdRng, max_rotation: f32) -> f32 {
    if max_rotation == 0.0 {
        0.0
    } else {
        rng.gen_range(-max_rotation..=max_rotation)
    }
}
