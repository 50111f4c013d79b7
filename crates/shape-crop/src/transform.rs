//! The user's manual positioning of a photo within the clip region.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Rotation range accepted by parameter providers, in degrees.
pub const ROTATION_DEGREES: RangeInclusive<f32> = -180.0..=180.0;

/// Scale range accepted by parameter providers.
pub const SCALE_RANGE: RangeInclusive<f32> = 0.1..=5.0;

/// Rotation, zoom, and pan applied to the source photo before clipping.
///
/// The compositor applies these as given; providers are expected to
/// clamp values to [`ROTATION_DEGREES`] and [`SCALE_RANGE`] before
/// handing a transform over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Clockwise rotation in degrees.
    pub rotation: f32,
    /// Uniform zoom factor.
    pub scale: f32,
    /// Horizontal pan in artifact pixels.
    pub offset_x: f32,
    /// Vertical pan in artifact pixels.
    pub offset_y: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl Transform {
    /// Builder: set rotation in degrees.
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    /// Builder: set the zoom factor.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Builder: set the pan offset in artifact pixels.
    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }
}
