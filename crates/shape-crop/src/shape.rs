//! Clip-mask geometry for the supported crop shapes.
//!
//! The same geometry is used when cropping the source photo (a region
//! centered in the artifact buffer) and when drawing each tile of the
//! print layout (a region filling the tile), so the exported sheet
//! matches the crop preview exactly.

use std::fmt;
use std::str::FromStr;

use image::{GrayImage, Luma};
use imageproc::drawing::{draw_filled_ellipse_mut, draw_filled_rect_mut, draw_polygon_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;
use serde::{Deserialize, Serialize};

/// Segments each heart lobe is flattened into before polygon fill.
const CURVE_STEPS: usize = 32;

const MASK_ON: Luma<u8> = Luma([255u8]);

/// Geometric clip mask applied to a photo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropShape {
    Circle,
    Oval,
    Square,
    #[default]
    Rectangle,
    Heart,
}

impl CropShape {
    /// All supported shapes, in display order.
    pub const ALL: [CropShape; 5] = [
        CropShape::Circle,
        CropShape::Oval,
        CropShape::Square,
        CropShape::Rectangle,
        CropShape::Heart,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CropShape::Circle => "circle",
            CropShape::Oval => "oval",
            CropShape::Square => "square",
            CropShape::Rectangle => "rectangle",
            CropShape::Heart => "heart",
        }
    }
}

impl fmt::Display for CropShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CropShape {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "circle" => Ok(CropShape::Circle),
            "oval" => Ok(CropShape::Oval),
            "square" => Ok(CropShape::Square),
            "rectangle" => Ok(CropShape::Rectangle),
            "heart" => Ok(CropShape::Heart),
            other => Err(format!(
                "unknown crop shape '{other}' (expected circle, oval, square, rectangle, or heart)"
            )),
        }
    }
}

/// Square region a clip mask is fitted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRegion {
    pub x: i32,
    pub y: i32,
    pub size: u32,
}

impl ClipRegion {
    /// Region centered in a square canvas, covering `fraction` of its side.
    pub fn centered(canvas: u32, fraction: f32) -> Self {
        let size = (canvas as f32 * fraction) as u32;
        let offset = ((canvas - size.min(canvas)) / 2) as i32;
        Self {
            x: offset,
            y: offset,
            size,
        }
    }

    /// Region filling a tile of the given side length, anchored at the origin.
    pub fn tile(size: u32) -> Self {
        Self { x: 0, y: 0, size }
    }
}

/// Rasterize the clip silhouette for `shape` into a `width`x`height` mask.
///
/// Pixels inside the silhouette are 255, everything else 0. A zero-size
/// region yields an empty mask.
pub fn render_mask(shape: CropShape, width: u32, height: u32, region: ClipRegion) -> GrayImage {
    let mut mask = GrayImage::new(width, height);
    if region.size == 0 {
        return mask;
    }

    let s = region.size as i32;
    let center = (region.x + s / 2, region.y + s / 2);

    match shape {
        CropShape::Circle => {
            draw_filled_ellipse_mut(&mut mask, center, s / 2, s / 2, MASK_ON);
        }
        CropShape::Oval => {
            let rx = (region.size as f32 / 2.5) as i32;
            draw_filled_ellipse_mut(&mut mask, center, rx, s / 2, MASK_ON);
        }
        CropShape::Square => {
            let rect = Rect::at(region.x, region.y).of_size(region.size, region.size);
            draw_filled_rect_mut(&mut mask, rect, MASK_ON);
        }
        CropShape::Rectangle => {
            let h = ((region.size as f32 * 0.6) as u32).max(1);
            let rect = Rect::at(region.x, region.y).of_size(region.size, h);
            draw_filled_rect_mut(&mut mask, rect, MASK_ON);
        }
        CropShape::Heart => {
            let points = heart_polygon(region);
            if points.len() >= 3 {
                draw_polygon_mut(&mut mask, &points, MASK_ON);
            }
        }
    }

    mask
}

/// Flatten the heart outline into a closed polygon.
///
/// Two symmetric cubic lobes meet at a bottom point, with a dip at 40%
/// height between them. Control points sit at the region edges (0% and
/// 70% height) mirrored about the vertical centerline.
fn heart_polygon(region: ClipRegion) -> Vec<Point<i32>> {
    let x = region.x as f32;
    let y = region.y as f32;
    let w = region.size as f32;
    let h = region.size as f32;

    let cx = x + w / 2.0;
    let bottom = (cx, y + h);
    let dip = (cx, y + h * 0.4);

    let mut points = Vec::with_capacity(CURVE_STEPS * 2);
    flatten_cubic(bottom, (x, y + h * 0.7), (x, y), dip, &mut points);
    flatten_cubic(dip, (x + w, y), (x + w, y + h * 0.7), bottom, &mut points);

    // The fill routine requires an open point list.
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    points
}

fn flatten_cubic(
    p0: (f32, f32),
    c1: (f32, f32),
    c2: (f32, f32),
    p3: (f32, f32),
    out: &mut Vec<Point<i32>>,
) {
    // The endpoint (t = 1) is the next curve's start point, so stop short.
    for i in 0..CURVE_STEPS {
        let t = i as f32 / CURVE_STEPS as f32;
        let u = 1.0 - t;
        let bx = u * u * u * p0.0 + 3.0 * u * u * t * c1.0 + 3.0 * u * t * t * c2.0 + t * t * t * p3.0;
        let by = u * u * u * p0.1 + 3.0 * u * u * t * c1.1 + 3.0 * u * t * t * c2.1 + t * t * t * p3.1;
        let point = Point::new(bx.round() as i32, by.round() as i32);
        if out.last() != Some(&point) {
            out.push(point);
        }
    }
}
