//! First-fit-row packing of photo instances onto the print canvas.

use ab_glyph::FontRef;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use rand::Rng;
use rand::rngs::OsRng;
use tracing::debug;

use shape_crop::{ClipRegion, CropShape, apply_mask, render_mask};

use crate::params::{LayoutParameters, SortOrder};
use crate::{CANVAS_HEIGHT, CANVAS_WIDTH, MIN_HEIGHT_MM, MM_TO_PX, PHOTO_COUNT, caption, compose};

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// One randomly sized copy of the artifact, before placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotoInstance {
    /// Drawn height in millimeters.
    pub height_mm: f32,
    /// Drawn height in pixels at the base DPI (square tiles).
    pub size_px: u32,
}

/// Where an instance ended up on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

/// The finished print canvas together with its placements.
#[derive(Debug, Clone)]
pub struct LayoutCanvas {
    image: RgbaImage,
    placements: Vec<Placement>,
    max_height_mm: f32,
}

impl LayoutCanvas {
    /// The rendered canvas pixels.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consume the layout, yielding the canvas pixels.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Placements of the instances that fit, in draw order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// The size range this layout was generated for, in millimeters.
    pub fn size_range_mm(&self) -> (f32, f32) {
        (MIN_HEIGHT_MM, self.max_height_mm)
    }

    /// Draw the size-range caption near the bottom-left corner.
    pub fn annotate(&mut self, font: &FontRef<'_>) {
        caption::draw_size_caption(&mut self.image, font, MIN_HEIGHT_MM, self.max_height_mm);
    }
}

/// Generate exactly [`PHOTO_COUNT`] instances with heights drawn
/// uniformly from `[MIN_HEIGHT_MM, max_height_mm)`.
pub fn generate_instances<R: Rng + ?Sized>(max_height_mm: f32, rng: &mut R) -> Vec<PhotoInstance> {
    (0..PHOTO_COUNT)
        .map(|_| {
            let fraction = rng.r#gen::<f64>() as f32;
            let height_mm = MIN_HEIGHT_MM + fraction * (max_height_mm - MIN_HEIGHT_MM);
            let size_px = (height_mm * MM_TO_PX).floor() as u32;
            PhotoInstance { height_mm, size_px }
        })
        .collect()
}

/// Pack randomly sized copies of `artifact` onto a fresh print canvas.
///
/// Sizes come from the operating-system random source, so two calls
/// with identical parameters produce different layouts by design. Use
/// [`pack_with_rng`] with a seeded generator for reproducible output.
pub fn pack(artifact: &RgbaImage, shape: CropShape, params: &LayoutParameters) -> LayoutCanvas {
    pack_with_rng(artifact, shape, params, &mut OsRng)
}

/// [`pack`] with an injectable random source.
///
/// Instances are placed left to right, wrapping to a new row when the
/// next tile would cross the right edge. An instance that would cross
/// the bottom edge is dropped without advancing the cursor; later,
/// smaller instances may still fit. Nothing is ever resized to fit.
pub fn pack_with_rng<R: Rng + ?Sized>(
    artifact: &RgbaImage,
    shape: CropShape,
    params: &LayoutParameters,
    rng: &mut R,
) -> LayoutCanvas {
    let mut canvas = RgbaImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, WHITE);

    let mut instances = generate_instances(params.max_height_mm, rng);
    match params.sort_order {
        SortOrder::None => {}
        SortOrder::Asc => instances.sort_by_key(|i| i.size_px),
        SortOrder::Desc => instances.sort_by(|a, b| b.size_px.cmp(&a.size_px)),
    }

    let spacing = params.spacing_px;
    let mut x = spacing;
    let mut y = spacing;
    let mut row_height = 0u32;
    let mut placements = Vec::with_capacity(instances.len());

    for instance in &instances {
        let size = instance.size_px;

        if x + size + spacing > CANVAS_WIDTH {
            x = spacing;
            y += row_height + spacing;
            row_height = 0;
        }

        if y + size + spacing > CANVAS_HEIGHT {
            debug!(size, y, "instance does not fit below the cursor, dropping");
            continue;
        }

        draw_tile(&mut canvas, artifact, shape, x, y, size);
        placements.push(Placement { x, y, size });

        x += size + spacing;
        row_height = row_height.max(size);
    }

    debug!(
        placed = placements.len(),
        generated = instances.len(),
        %shape,
        "layout packed"
    );

    LayoutCanvas {
        image: canvas,
        placements,
        max_height_mm: params.max_height_mm,
    }
}

/// Draw one tile: resize the artifact to the instance size and re-clip
/// it with the same shape geometry the crop used, scaled to the tile.
fn draw_tile(
    canvas: &mut RgbaImage,
    artifact: &RgbaImage,
    shape: CropShape,
    x: u32,
    y: u32,
    size: u32,
) {
    if size == 0 {
        return;
    }
    let mut tile = imageops::resize(artifact, size, size, FilterType::Lanczos3);
    let mask = render_mask(shape, size, size, ClipRegion::tile(size));
    apply_mask(&mut tile, &mask);
    compose::overlay(canvas, &tile, x, y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;

    fn test_artifact() -> RgbaImage {
        RgbaImage::from_pixel(64, 64, Rgba([40, 80, 160, 255]))
    }

    #[test]
    fn generates_exactly_thirty_five_instances() {
        let mut rng = StdRng::seed_from_u64(1);
        for max_mm in [8.0, 20.0, 35.0] {
            assert_eq!(generate_instances(max_mm, &mut rng).len(), PHOTO_COUNT);
        }
    }

    #[test]
    fn instance_sizes_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(2);
        for instance in generate_instances(35.0, &mut rng) {
            assert!(instance.height_mm >= MIN_HEIGHT_MM);
            assert!(instance.height_mm < 35.0);
            assert!(instance.size_px >= 45, "size {}", instance.size_px);
            assert!(instance.size_px <= 198, "size {}", instance.size_px);
        }
    }

    #[test]
    fn min_equals_max_pins_every_size() {
        // 8mm at 144 DPI is floor(8 * 144/25.4) = 45px.
        let mut rng = StdRng::seed_from_u64(3);
        for instance in generate_instances(8.0, &mut rng) {
            assert_eq!(instance.size_px, 45);
        }
    }

    #[test]
    fn packing_is_deterministic_with_seeded_rng() {
        let artifact = test_artifact();
        let params = LayoutParameters::default();
        let a = pack_with_rng(&artifact, CropShape::Circle, &params, &mut StdRng::seed_from_u64(7));
        let b = pack_with_rng(&artifact, CropShape::Circle, &params, &mut StdRng::seed_from_u64(7));
        assert_eq!(a.image().as_raw(), b.image().as_raw());
        assert_eq!(a.placements(), b.placements());
    }

    #[test]
    fn canvas_has_print_dimensions_and_white_background() {
        let layout = pack_with_rng(
            &test_artifact(),
            CropShape::Circle,
            &LayoutParameters::default(),
            &mut StdRng::seed_from_u64(4),
        );
        assert_eq!(layout.image().dimensions(), (CANVAS_WIDTH, CANVAS_HEIGHT));
        // Circle tiles never reach the canvas corners.
        assert_eq!(layout.image().get_pixel(0, 0), &WHITE);
        assert_eq!(
            layout.image().get_pixel(CANVAS_WIDTH - 1, CANVAS_HEIGHT - 1),
            &WHITE
        );
    }

    #[test]
    fn placements_respect_canvas_bounds_and_spacing() {
        for seed in 0..8 {
            let params = LayoutParameters::default()
                .with_max_height_mm(35.0)
                .with_spacing_px(5);
            let layout = pack_with_rng(
                &test_artifact(),
                CropShape::Square,
                &params,
                &mut StdRng::seed_from_u64(seed),
            );
            for p in layout.placements() {
                assert!(p.x >= params.spacing_px);
                assert!(p.y >= params.spacing_px);
                assert!(p.x + p.size + params.spacing_px <= CANVAS_WIDTH);
                assert!(p.y + p.size + params.spacing_px <= CANVAS_HEIGHT);
            }
        }
    }

    #[test]
    fn ascending_sort_draws_non_decreasing_sizes() {
        let params = LayoutParameters::default().with_sort_order(SortOrder::Asc);
        let layout = pack_with_rng(
            &test_artifact(),
            CropShape::Square,
            &params,
            &mut StdRng::seed_from_u64(5),
        );
        let sizes: Vec<u32> = layout.placements().iter().map(|p| p.size).collect();
        assert!(sizes.windows(2).all(|w| w[0] <= w[1]), "{sizes:?}");
    }

    #[test]
    fn descending_sort_draws_non_increasing_sizes() {
        let params = LayoutParameters::default().with_sort_order(SortOrder::Desc);
        let layout = pack_with_rng(
            &test_artifact(),
            CropShape::Square,
            &params,
            &mut StdRng::seed_from_u64(6),
        );
        let sizes: Vec<u32> = layout.placements().iter().map(|p| p.size).collect();
        assert!(sizes.windows(2).all(|w| w[0] >= w[1]), "{sizes:?}");
    }

    #[test]
    fn oversized_instances_are_dropped_not_resized() {
        // A constant max-entropy generator pins every draw near 1.0, so
        // all 35 instances are 198px. With 30px spacing only two fit per
        // row and only three rows fit, leaving 6 placements.
        let mut rng = StepRng::new(u64::MAX, 0);
        let params = LayoutParameters::default()
            .with_max_height_mm(35.0)
            .with_spacing_px(30);
        let layout = pack_with_rng(&test_artifact(), CropShape::Square, &params, &mut rng);

        assert_eq!(layout.placements().len(), 6);
        for p in layout.placements() {
            assert_eq!(p.size, 198);
        }
    }

    #[test]
    fn row_wrap_triggers_before_right_edge() {
        let params = LayoutParameters::default()
            .with_max_height_mm(35.0)
            .with_spacing_px(30);
        let layout = pack_with_rng(
            &test_artifact(),
            CropShape::Square,
            &params,
            &mut StdRng::seed_from_u64(8),
        );
        let distinct_rows: std::collections::BTreeSet<u32> =
            layout.placements().iter().map(|p| p.y).collect();
        assert!(distinct_rows.len() >= 2, "expected at least one row wrap");
    }

    #[test]
    fn drawn_tiles_carry_the_shape_silhouette() {
        // Pin sizes to 45px and check that a circle layout leaves the
        // tile corners white while covering the tile center.
        let mut rng = StepRng::new(0, 0);
        let params = LayoutParameters::default().with_max_height_mm(8.0);
        let layout = pack_with_rng(&test_artifact(), CropShape::Circle, &params, &mut rng);

        let p = layout.placements()[0];
        assert_eq!(p.size, 45);
        let center = layout.image().get_pixel(p.x + 22, p.y + 22);
        let corner = layout.image().get_pixel(p.x, p.y);
        assert_ne!(center, &WHITE);
        assert_eq!(corner, &WHITE);
    }

    #[test]
    fn size_range_reflects_parameters() {
        let params = LayoutParameters::default().with_max_height_mm(22.0);
        let layout = pack_with_rng(
            &test_artifact(),
            CropShape::Oval,
            &params,
            &mut StdRng::seed_from_u64(9),
        );
        assert_eq!(layout.size_range_mm(), (MIN_HEIGHT_MM, 22.0));
    }
}
