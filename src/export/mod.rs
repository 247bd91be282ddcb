//! Bitmap export: replay the committed drawing onto a larger raster surface
//! and encode it as PNG.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbaImage};
use log::{info, warn};

use crate::config::{MAX_EXPORT_SIZE, SketchpadConfig};
use crate::drawing_log::DrawingLog;
use crate::error::ExportError;

mod glyphs;
mod raster;

pub use glyphs::{Coverage, GlyphRasterizer};
pub use raster::RasterSurface;

/// Side length in pixels of the exported square image.
pub fn export_size(config: &SketchpadConfig) -> u32 {
    let size = (config.canvas_size * config.export_scale).round();
    if size.is_finite() && size > 0.0 {
        size as u32
    } else {
        0
    }
}

/// Render the committed history into a fresh, transparent image.
///
/// Anything still in progress (a stroke being drawn, a sticker ghost) is not
/// part of the export. An empty log yields a blank image.
pub fn render_image(log: &DrawingLog, config: &SketchpadConfig) -> Result<RgbaImage, ExportError> {
    let size = export_size(config);
    if size == 0 {
        return Err(ExportError::EmptySurface {
            width: size,
            height: size,
        });
    }
    let max = MAX_EXPORT_SIZE as u32;
    if size > max {
        return Err(ExportError::TooLarge {
            width: size,
            height: size,
            max,
        });
    }

    let glyphs = GlyphRasterizer::from_egui_defaults();
    if glyphs.is_none() && log.stickers().next().is_some() {
        warn!("No glyph font available, stickers will be missing from the export");
    }

    let mut surface = RasterSurface::new(size, size, config.export_scale).with_glyphs(glyphs);
    log.render_committed(&mut surface);
    Ok(surface.into_image())
}

/// Render and encode as PNG.
pub fn export_png(log: &DrawingLog, config: &SketchpadConfig) -> Result<Vec<u8>, ExportError> {
    let image = render_image(log, config)?;
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    info!(
        "Exported {} commands as {}x{} PNG ({} bytes)",
        log.len(),
        image.width(),
        image.height(),
        bytes.len()
    );
    Ok(bytes)
}

/// Render, encode and write the PNG to `path`.
pub fn export_to_file(log: &DrawingLog, config: &SketchpadConfig, path: &Path) -> Result<(), ExportError> {
    let bytes = export_png(log, config)?;
    std::fs::write(path, bytes).map_err(|source| ExportError::Write {
        path: path.to_owned(),
        source,
    })?;
    info!("Wrote {}", path.display());
    Ok(())
}
