//! Size-range caption drawn under the packed layout.

use ab_glyph::{Font, FontRef, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;

/// Caption font size in pixels.
pub const CAPTION_SIZE: f32 = 12.0;

/// Left margin of the caption, and its distance from the bottom edge.
pub const CAPTION_MARGIN: i32 = 10;

const CAPTION_COLOR: Rgba<u8> = Rgba([0x66, 0x66, 0x66, 255]);

/// Draw "Photo sizes: {min}mm - {max}mm" near the bottom-left corner.
///
/// The margin is measured to the text baseline, matching the preview.
pub fn draw_size_caption(canvas: &mut RgbaImage, font: &FontRef<'_>, min_mm: f32, max_mm: f32) {
    let text = format!(
        "Photo sizes: {}mm - {}mm",
        min_mm.round() as u32,
        max_mm.round() as u32
    );
    let scale = PxScale::from(CAPTION_SIZE);
    let ascent = font.as_scaled(scale).ascent().ceil() as i32;
    let y = canvas.height() as i32 - CAPTION_MARGIN - ascent;
    draw_text_mut(canvas, CAPTION_COLOR, CAPTION_MARGIN, y.max(0), scale, font, &text);
}
