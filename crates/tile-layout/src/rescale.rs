//! Resolution-independent re-rendering of a finished layout.

use image::RgbaImage;
use image::imageops::{self, FilterType};
use tracing::debug;

use crate::packer::LayoutCanvas;
use crate::{BASE_DPI, LayoutError, Result};

/// Resample the finished canvas for export at `target_dpi`.
///
/// This is a pure scale of the already-packed pixels; the packing pass
/// is never re-run, so the export matches the preview exactly. At the
/// base DPI the output is pixel-identical to the canvas itself.
pub fn rescale(layout: &LayoutCanvas, target_dpi: f32) -> Result<RgbaImage> {
    if !(target_dpi > 0.0) {
        return Err(LayoutError::InvalidDpi(target_dpi));
    }

    let factor = target_dpi / BASE_DPI;
    let source = layout.image();
    if factor == 1.0 {
        return Ok(source.clone());
    }

    let width = (source.width() as f32 * factor).round() as u32;
    let height = (source.height() as f32 * factor).round() as u32;
    debug!(target_dpi, width, height, "rescaling layout for export");

    Ok(imageops::resize(source, width, height, FilterType::Lanczos3))
}
