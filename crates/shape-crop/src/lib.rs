//! Shaped photo cropping for locket print sheets.
//!
//! Provides the five supported clip masks (circle, oval, square,
//! rectangle, heart), the user transform (rotation/scale/offset), and
//! the compositor that renders a photo through a clip mask into a
//! fixed-size reusable artifact.

pub mod compositor;
pub mod shape;
pub mod transform;

// Re-exports for convenience
pub use compositor::{apply_mask, render};
pub use shape::{ClipRegion, CropShape, render_mask};
pub use transform::Transform;

/// Side length of the square artifact buffer in pixels.
pub const ARTIFACT_SIZE: u32 = 400;

/// Fraction of the artifact buffer covered by the clip region.
pub const CLIP_FRACTION: f32 = 0.8;

/// Errors that can occur while cropping.
#[derive(Debug, thiserror::Error)]
pub enum CropError {
    #[error("source image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
}

/// Result type alias for cropping operations.
pub type Result<T> = std::result::Result<T, CropError>;
