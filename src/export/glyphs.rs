use ab_glyph::{Font, FontVec, GlyphId, PxScale, ScaleFont, point};
use egui::{FontDefinitions, FontFamily};

/// Grayscale coverage of a rasterized piece of text, row-major.
#[derive(Debug, Clone)]
pub struct Coverage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f32>,
}

impl Coverage {
    pub fn get(&self, x: usize, y: usize) -> f32 {
        if x < self.width && y < self.height {
            self.data[y * self.width + x]
        } else {
            0.0
        }
    }
}

/// Rasterizes sticker text for the bitmap export.
///
/// Uses the same fonts, in the same fallback order, as egui's proportional
/// family so exported stickers match what is on screen.
pub struct GlyphRasterizer {
    fonts: Vec<FontVec>,
}

impl std::fmt::Debug for GlyphRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphRasterizer")
            .field("fonts", &self.fonts.len())
            .finish()
    }
}

impl GlyphRasterizer {
    /// Load egui's bundled fonts. `None` if none of them could be parsed.
    pub fn from_egui_defaults() -> Option<Self> {
        let definitions = FontDefinitions::default();
        let names = definitions
            .families
            .get(&FontFamily::Proportional)
            .cloned()
            .unwrap_or_default();

        let fonts: Vec<FontVec> = names
            .iter()
            .filter_map(|name| definitions.font_data.get(name))
            .filter_map(|data| match FontVec::try_from_vec(data.font.to_vec()) {
                Ok(font) => Some(font),
                Err(err) => {
                    log::warn!("Skipping unparsable font: {err}");
                    None
                }
            })
            .collect();

        Self::from_fonts(fonts)
    }

    pub fn from_fonts(fonts: Vec<FontVec>) -> Option<Self> {
        if fonts.is_empty() {
            None
        } else {
            Some(Self { fonts })
        }
    }

    /// Rasterize `text` on one line at `px_size`. Characters no font covers
    /// (variation selectors, for one) are skipped.
    pub fn coverage(&self, text: &str, px_size: f32) -> Option<Coverage> {
        let scale = PxScale::from(px_size);

        let glyphs: Vec<(usize, GlyphId)> = text
            .chars()
            .filter_map(|c| {
                self.fonts
                    .iter()
                    .position(|font| font.glyph_id(c).0 != 0)
                    .map(|index| (index, self.fonts[index].glyph_id(c)))
            })
            .collect();
        if glyphs.is_empty() {
            return None;
        }

        let mut ascent: f32 = 0.0;
        let mut descent: f32 = 0.0;
        let mut width: f32 = 0.0;
        for (index, id) in &glyphs {
            let font = self.fonts[*index].as_scaled(scale);
            ascent = ascent.max(font.ascent());
            descent = descent.min(font.descent());
            width += font.h_advance(*id);
        }

        let out_width = width.ceil().max(1.0) as usize;
        let out_height = (ascent - descent).ceil().max(1.0) as usize;
        let mut data = vec![0.0_f32; out_width * out_height];

        let mut pen_x: f32 = 0.0;
        for (index, id) in glyphs {
            let font = &self.fonts[index];
            let advance = font.as_scaled(scale).h_advance(id);
            let glyph = id.with_scale_and_position(scale, point(pen_x, ascent));
            pen_x += advance;

            let Some(outlined) = font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|x, y, c| {
                let px = bounds.min.x as i64 + x as i64;
                let py = bounds.min.y as i64 + y as i64;
                if px >= 0 && py >= 0 && (px as usize) < out_width && (py as usize) < out_height {
                    let cell = &mut data[py as usize * out_width + px as usize];
                    *cell = cell.max(c);
                }
            });
        }

        Some(Coverage {
            width: out_width,
            height: out_height,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rasterizes_plain_text() {
        let rasterizer = GlyphRasterizer::from_egui_defaults().expect("egui ships default fonts");
        let coverage = rasterizer.coverage("A", 40.0).unwrap();
        assert!(coverage.width > 0 && coverage.height > 0);
        assert!(coverage.data.iter().any(|&c| c > 0.5));
    }

    #[test]
    fn uncovered_text_yields_nothing() {
        let rasterizer = GlyphRasterizer::from_egui_defaults().unwrap();
        assert!(rasterizer.coverage("", 20.0).is_none());
    }

    #[test]
    fn out_of_range_reads_are_empty() {
        let coverage = Coverage {
            width: 1,
            height: 1,
            data: vec![1.0],
        };
        assert_eq!(coverage.get(0, 0), 1.0);
        assert_eq!(coverage.get(1, 0), 0.0);
    }
}
