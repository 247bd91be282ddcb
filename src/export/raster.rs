use egui::emath::Rot2;
use egui::{Color32, Pos2, pos2, vec2};
use image::{Rgba, RgbaImage};

use super::glyphs::GlyphRasterizer;
use crate::renderer::GLYPH_COLOR;
use crate::surface::{GlyphDraw, Surface};

/// Software rasterizer backing the bitmap export.
///
/// Canvas coordinates, line widths and glyph sizes are multiplied by `scale`,
/// so the same commands produce a larger picture. Starts out transparent.
pub struct RasterSurface {
    image: RgbaImage,
    scale: f32,
    glyphs: Option<GlyphRasterizer>,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32, scale: f32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            scale,
            glyphs: None,
        }
    }

    /// Enable glyph drawing. Without a rasterizer, stickers are skipped.
    pub fn with_glyphs(mut self, glyphs: Option<GlyphRasterizer>) -> Self {
        self.glyphs = glyphs;
        self
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    fn scaled(&self, point: Pos2) -> Pos2 {
        pos2(point.x * self.scale, point.y * self.scale)
    }

    /// Integer pixel range covering `[min, max]`, clipped to the image.
    fn clip(&self, min: Pos2, max: Pos2) -> Option<(u32, u32, u32, u32)> {
        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil().max(0.0) as u32).min(self.image.width());
        let y1 = (max.y.ceil().max(0.0) as u32).min(self.image.height());
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }
}

impl Surface for RasterSurface {
    fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    fn polyline(&mut self, points: &[Pos2], thickness: f32, color: Color32) {
        if points.is_empty() {
            return;
        }
        let points: Vec<Pos2> = points.iter().map(|p| self.scaled(*p)).collect();
        let radius = (thickness * self.scale / 2.0).max(0.5);

        let (mut min, mut max) = (points[0], points[0]);
        for p in &points {
            min = min.min(*p);
            max = max.max(*p);
        }
        let pad = vec2(radius + 1.0, radius + 1.0);
        let Some((x0, y0, x1, y1)) = self.clip(min - pad, max + pad) else {
            return;
        };

        // Coverage of the whole line first, so joints are not blended twice
        let width = (x1 - x0) as usize;
        let mut mask = vec![0.0_f32; width * (y1 - y0) as usize];
        let segments: Vec<(Pos2, Pos2)> = if points.len() == 1 {
            vec![(points[0], points[0])]
        } else {
            points.windows(2).map(|w| (w[0], w[1])).collect()
        };
        for (a, b) in segments {
            let Some((sx0, sy0, sx1, sy1)) = self.clip(a.min(b) - pad, a.max(b) + pad) else {
                continue;
            };
            for y in sy0..sy1 {
                for x in sx0..sx1 {
                    let center = pos2(x as f32 + 0.5, y as f32 + 0.5);
                    let coverage = (radius + 0.5 - distance_to_segment(center, a, b)).clamp(0.0, 1.0);
                    if coverage > 0.0 {
                        let cell = &mut mask[(y - y0) as usize * width + (x - x0) as usize];
                        *cell = cell.max(coverage);
                    }
                }
            }
        }

        let [r, g, b, a] = color.to_srgba_unmultiplied();
        let alpha = a as f32 / 255.0;
        for y in y0..y1 {
            for x in x0..x1 {
                let coverage = mask[(y - y0) as usize * width + (x - x0) as usize];
                if coverage > 0.0 {
                    blend(self.image.get_pixel_mut(x, y), [r, g, b], coverage * alpha);
                }
            }
        }
    }

    fn glyph(&mut self, glyph: &GlyphDraw<'_>) {
        let Some(rasterizer) = &self.glyphs else {
            return;
        };
        let Some(coverage) = rasterizer.coverage(glyph.text, glyph.size * self.scale) else {
            return;
        };

        let center = self.scaled(glyph.position);
        let half = vec2(coverage.width as f32, coverage.height as f32) / 2.0;
        let reach = half.length().ceil() + 1.0;
        let Some((x0, y0, x1, y1)) = self.clip(center - vec2(reach, reach), center + vec2(reach, reach)) else {
            return;
        };

        // Sample the unrotated coverage for every destination pixel
        let inverse = Rot2::from_angle(-glyph.rotation);
        let [r, g, b, a] = GLYPH_COLOR.to_srgba_unmultiplied();
        let alpha = a as f32 / 255.0 * glyph.opacity.clamp(0.0, 1.0);
        for y in y0..y1 {
            for x in x0..x1 {
                let offset = pos2(x as f32 + 0.5, y as f32 + 0.5) - center;
                let local = inverse * offset + half;
                if local.x < 0.0 || local.y < 0.0 {
                    continue;
                }
                let c = coverage.get(local.x as usize, local.y as usize);
                if c > 0.0 {
                    blend(self.image.get_pixel_mut(x, y), [r, g, b], c * alpha);
                }
            }
        }
    }
}

fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    let t = if len_sq == 0.0 {
        0.0
    } else {
        ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0)
    };
    (a + ab * t).distance(p)
}

/// Source-over blend of an unpremultiplied color into `pixel`.
fn blend(pixel: &mut Rgba<u8>, rgb: [u8; 3], alpha: f32) {
    let dst_alpha = pixel[3] as f32 / 255.0;
    let out_alpha = alpha + dst_alpha * (1.0 - alpha);
    if out_alpha <= 0.0 {
        return;
    }
    for i in 0..3 {
        let value = (rgb[i] as f32 * alpha + pixel[i] as f32 * dst_alpha * (1.0 - alpha)) / out_alpha;
        pixel[i] = value.round().clamp(0.0, 255.0) as u8;
    }
    pixel[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
}
