//! Alpha compositing of tiles onto the print canvas.

use image::{Rgba, RgbaImage};

/// Alpha-composite `tile` over `base` with its top-left corner at `(x, y)`.
///
/// Pixels falling outside the base are discarded.
pub fn overlay(base: &mut RgbaImage, tile: &RgbaImage, x: u32, y: u32) {
    for (dx, dy, pixel) in tile.enumerate_pixels() {
        let target_x = x + dx;
        let target_y = y + dy;
        if target_x >= base.width() || target_y >= base.height() {
            continue;
        }
        let alpha = pixel[3] as f32 / 255.0;
        if alpha > 0.99 {
            base.put_pixel(target_x, target_y, *pixel);
        } else if alpha > 0.01 {
            let background = *base.get_pixel(target_x, target_y);
            base.put_pixel(target_x, target_y, blend_pixel(background, *pixel, alpha));
        }
    }
}

fn blend_pixel(bg: Rgba<u8>, fg: Rgba<u8>, alpha: f32) -> Rgba<u8> {
    let inv = 1.0 - alpha;
    Rgba([
        (fg[0] as f32 * alpha + bg[0] as f32 * inv) as u8,
        (fg[1] as f32 * alpha + bg[1] as f32 * inv) as u8,
        (fg[2] as f32 * alpha + bg[2] as f32 * inv) as u8,
        255,
    ])
}
