//! Print-layout generation for locket photo sheets.
//!
//! Packs randomly sized copies of a shape-cropped photo artifact onto a
//! fixed 4" x 6" print canvas, annotates it with a size caption, and
//! rescales the finished canvas to arbitrary export resolutions.

pub mod caption;
pub mod compose;
pub mod packer;
pub mod params;
pub mod rescale;
pub mod session;

// Re-exports for convenience
pub use packer::{LayoutCanvas, PhotoInstance, Placement, generate_instances, pack, pack_with_rng};
pub use params::{LayoutParameters, SortOrder};
pub use rescale::rescale;
pub use session::PrintSession;
pub use shape_crop::{CropShape, Transform};

/// Print canvas width in pixels (4 inches at the base DPI).
pub const CANVAS_WIDTH: u32 = 576;

/// Print canvas height in pixels (6 inches at the base DPI).
pub const CANVAS_HEIGHT: u32 = 864;

/// DPI the canvas constants are expressed in.
pub const BASE_DPI: f32 = 144.0;

/// Millimeters to pixels at the base DPI.
pub const MM_TO_PX: f32 = BASE_DPI / 25.4;

/// Number of photo instances generated per layout pass.
pub const PHOTO_COUNT: usize = 35;

/// Smallest photo height a layout will generate, in millimeters.
pub const MIN_HEIGHT_MM: f32 = 8.0;

/// Errors that can occur while generating or exporting a layout.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("no source image has been loaded")]
    NoImage,

    #[error("no layout has been generated yet")]
    NoLayout,

    #[error("target dpi must be positive, got {0}")]
    InvalidDpi(f32),

    #[error(transparent)]
    Crop(#[from] shape_crop::CropError),
}

/// Result type alias for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;
