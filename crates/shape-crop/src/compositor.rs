//! Renders a photo through a clip mask into the fixed artifact buffer.

use image::{DynamicImage, GrayImage, Rgba, RgbaImage};
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};
use tracing::debug;

use crate::shape::{ClipRegion, CropShape, render_mask};
use crate::transform::Transform;
use crate::{ARTIFACT_SIZE, CLIP_FRACTION, CropError, Result};

/// Render `image` through the clip mask for `shape` into a fresh
/// 400x400 artifact buffer, applying `transform` first.
///
/// The transform order matches the interactive crop preview: the photo
/// is moved to the buffer center plus the pan offset, rotated, zoomed,
/// and drawn centered on its own midpoint. Pixels outside the clip
/// region are fully transparent.
///
/// Out-of-range transform values are used as given; callers clamp.
pub fn render(image: &DynamicImage, shape: CropShape, transform: &Transform) -> Result<RgbaImage> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(CropError::EmptyImage { width, height });
    }

    debug!(width, height, %shape, ?transform, "rendering crop artifact");

    let source = image.to_rgba8();
    let center = ARTIFACT_SIZE as f32 / 2.0;

    let projection = Projection::translate(
        center + transform.offset_x,
        center + transform.offset_y,
    ) * Projection::rotate(transform.rotation.to_radians())
        * Projection::scale(transform.scale, transform.scale)
        * Projection::translate(-(width as f32) / 2.0, -(height as f32) / 2.0);

    let mut artifact = RgbaImage::new(ARTIFACT_SIZE, ARTIFACT_SIZE);
    warp_into(
        &source,
        &projection,
        Interpolation::Bilinear,
        Rgba([0, 0, 0, 0]),
        &mut artifact,
    );

    let region = ClipRegion::centered(ARTIFACT_SIZE, CLIP_FRACTION);
    let mask = render_mask(shape, ARTIFACT_SIZE, ARTIFACT_SIZE, region);
    apply_mask(&mut artifact, &mask);

    Ok(artifact)
}

/// Zero out alpha wherever the mask is off; partial mask values
/// attenuate alpha proportionally.
pub fn apply_mask(image: &mut RgbaImage, mask: &GrayImage) {
    debug_assert_eq!(image.dimensions(), mask.dimensions());
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let coverage = mask.get_pixel(x, y)[0];
        match coverage {
            0 => *pixel = Rgba([0, 0, 0, 0]),
            255 => {}
            partial => pixel[3] = ((pixel[3] as u16 * partial as u16) / 255) as u8,
        }
    }
}
