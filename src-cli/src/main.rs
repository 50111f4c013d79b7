//! Command-line shell around the crop and layout engines.
//!
//! Loads a photo, crops it into the chosen shape, packs a 4" x 6"
//! sheet, and writes the result as a PNG at the requested DPI. Acts as
//! the image source, parameter provider, and exporter the engines
//! expect; parameter clamping happens here, not in the engines.

use std::fs;
use std::path::PathBuf;

use ab_glyph::FontRef;
use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shape_crop::{CropShape, Transform, transform};
use tile_layout::params::{MAX_HEIGHT_MM_RANGE, SPACING_PX_RANGE};
use tile_layout::{BASE_DPI, LayoutParameters, PrintSession, SortOrder};

#[derive(Debug, Parser)]
#[command(name = "locketprint", about = "Tile a shape-cropped photo onto a 4\" x 6\" print sheet")]
struct Args {
    /// Source photo (any format the image crate can decode).
    input: PathBuf,

    /// Output PNG path. Defaults to locket-photos-<dpi>dpi-<timestamp>.png.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Crop shape: circle, oval, square, rectangle, or heart.
    #[arg(long, default_value = "rectangle")]
    shape: CropShape,

    /// Rotation of the photo inside the crop, in degrees.
    #[arg(long, default_value_t = 0.0)]
    rotation: f32,

    /// Zoom factor of the photo inside the crop.
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Horizontal pan of the photo inside the crop, in pixels.
    #[arg(long, default_value_t = 0.0)]
    offset_x: f32,

    /// Vertical pan of the photo inside the crop, in pixels.
    #[arg(long, default_value_t = 0.0)]
    offset_y: f32,

    /// Maximum photo height on the sheet, in millimeters.
    #[arg(long, default_value_t = 30.0)]
    max_height: f32,

    /// Spacing between photos, in pixels.
    #[arg(long, default_value_t = 10)]
    spacing: u32,

    /// Packing order: none, asc, or desc.
    #[arg(long, default_value = "none")]
    sort: SortOrder,

    /// Export resolution in DPI (144 = preview, 600/1200 = print).
    #[arg(long, default_value_t = 600.0)]
    dpi: f32,

    /// JSON file with layout parameters, overriding the layout flags.
    #[arg(long)]
    params: Option<PathBuf>,

    /// TTF/OTF font used for the size caption; omitted = no caption.
    #[arg(long)]
    font: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    run(args)
}

fn run(args: Args) -> anyhow::Result<()> {
    let image = image::open(&args.input)
        .with_context(|| format!("failed to load photo from {}", args.input.display()))?;
    info!(
        width = image.width(),
        height = image.height(),
        "photo loaded"
    );

    let transform = clamped_transform(&args);
    let params = layout_parameters(&args)?;

    let mut session = PrintSession::new();
    session.set_image(image);
    session.set_shape(args.shape);
    session.set_transform(transform);
    session.set_params(params);

    let placed = session.layout()?.placements().len();
    info!(placed, shape = %args.shape, "layout packed");

    if let Some(font_path) = &args.font {
        let font_bytes = fs::read(font_path)
            .with_context(|| format!("failed to read font from {}", font_path.display()))?;
        let font = FontRef::try_from_slice(&font_bytes).context("failed to parse caption font")?;
        session.annotate(&font)?;
    }

    let export = session.export(args.dpi)?;
    let output = args.output.unwrap_or_else(|| default_output(args.dpi));
    export
        .save(&output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!(path = %output.display(), dpi = args.dpi, "sheet exported");

    Ok(())
}

/// The engines never re-clamp, so the boundary does it once here.
fn clamped_transform(args: &Args) -> Transform {
    Transform::default()
        .with_rotation(args.rotation.clamp(
            *transform::ROTATION_DEGREES.start(),
            *transform::ROTATION_DEGREES.end(),
        ))
        .with_scale(
            args.scale
                .clamp(*transform::SCALE_RANGE.start(), *transform::SCALE_RANGE.end()),
        )
        .with_offset(args.offset_x, args.offset_y)
}

fn layout_parameters(args: &Args) -> anyhow::Result<LayoutParameters> {
    if let Some(path) = &args.params {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read parameters from {}", path.display()))?;
        return serde_json::from_str(&text).context("failed to parse layout parameters");
    }

    Ok(LayoutParameters::new()
        .with_max_height_mm(args.max_height.clamp(
            *MAX_HEIGHT_MM_RANGE.start(),
            *MAX_HEIGHT_MM_RANGE.end(),
        ))
        .with_spacing_px(
            args.spacing
                .clamp(*SPACING_PX_RANGE.start(), *SPACING_PX_RANGE.end()),
        )
        .with_sort_order(args.sort))
}

fn default_output(dpi: f32) -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    PathBuf::from(format!("locket-photos-{}dpi-{timestamp}.png", dpi as u32))
}
