//! Stateful editing session tying the crop and layout stages together.
//!
//! Mirrors the interactive flow: changing the image, shape, or
//! transform invalidates the crop artifact and the layout; changing
//! layout parameters invalidates the layout only. Derived products are
//! recomputed wholesale on next access, never patched.

use ab_glyph::FontRef;
use image::{DynamicImage, RgbaImage};
use rand::Rng;
use rand::rngs::OsRng;
use tracing::debug;

use shape_crop::{CropShape, Transform};

use crate::packer::{LayoutCanvas, pack_with_rng};
use crate::params::LayoutParameters;
use crate::rescale::rescale;
use crate::{LayoutError, Result};

/// Everything needed to go from a source photo to an exportable sheet.
#[derive(Debug, Default)]
pub struct PrintSession {
    image: Option<DynamicImage>,
    shape: CropShape,
    transform: Transform,
    params: LayoutParameters,
    artifact: Option<RgbaImage>,
    layout: Option<LayoutCanvas>,
}

impl PrintSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load (or replace) the source photo.
    pub fn set_image(&mut self, image: DynamicImage) {
        debug!(
            width = image.width(),
            height = image.height(),
            "source image set"
        );
        self.image = Some(image);
        self.invalidate_artifact();
    }

    pub fn set_shape(&mut self, shape: CropShape) {
        if self.shape != shape {
            self.shape = shape;
            self.invalidate_artifact();
        }
    }

    pub fn set_transform(&mut self, transform: Transform) {
        if self.transform != transform {
            self.transform = transform;
            self.invalidate_artifact();
        }
    }

    pub fn set_params(&mut self, params: LayoutParameters) {
        if self.params != params {
            self.params = params;
            self.layout = None;
        }
    }

    pub fn shape(&self) -> CropShape {
        self.shape
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn params(&self) -> LayoutParameters {
        self.params
    }

    /// The current crop artifact, rendering it if stale.
    ///
    /// Fails with [`LayoutError::NoImage`] until an image is loaded.
    pub fn artifact(&mut self) -> Result<&RgbaImage> {
        if self.artifact.is_none() {
            let image = self.image.as_ref().ok_or(LayoutError::NoImage)?;
            let artifact = shape_crop::render(image, self.shape, &self.transform)?;
            self.artifact = Some(artifact);
        }
        Ok(self.artifact.as_ref().expect("just rendered"))
    }

    /// The current layout, packing a fresh one if stale.
    pub fn layout(&mut self) -> Result<&LayoutCanvas> {
        self.layout_with_rng(&mut OsRng)
    }

    /// [`PrintSession::layout`] with an injectable random source.
    pub fn layout_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&LayoutCanvas> {
        if self.layout.is_none() {
            self.artifact()?;
            let artifact = self.artifact.as_ref().expect("just rendered");
            let layout = pack_with_rng(artifact, self.shape, &self.params, rng);
            self.layout = Some(layout);
        }
        Ok(self.layout.as_ref().expect("just packed"))
    }

    /// Draw the size caption on the current layout.
    pub fn annotate(&mut self, font: &FontRef<'_>) -> Result<()> {
        let layout = self.layout.as_mut().ok_or(LayoutError::NoLayout)?;
        layout.annotate(font);
        Ok(())
    }

    /// Resample the current layout for export at `target_dpi`.
    ///
    /// Fails with [`LayoutError::NoLayout`] until a layout exists; the
    /// layout itself is read-only here.
    pub fn export(&self, target_dpi: f32) -> Result<RgbaImage> {
        let layout = self.layout.as_ref().ok_or(LayoutError::NoLayout)?;
        rescale(layout, target_dpi)
    }

    fn invalidate_artifact(&mut self) {
        self.artifact = None;
        self.layout = None;
    }
}
