//! Reference illustration probing.
//!
//! Only the natural dimensions of the castle artwork matter to the board.
//! They are read from the image header without decoding pixels.

use crate::constants::DEFAULT_REFERENCE_WIDTH;
use crate::error::CastleResult;
use crate::geometry::sanitize_reference_width;
use std::path::Path;
use tracing::{debug, warn};

/// Natural pixel size of the reference illustration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReferenceImage {
    pub width: u32,
    pub height: u32,
}

impl ReferenceImage {
    /// Read the dimensions from the file header.
    pub fn probe(path: &Path) -> CastleResult<Self> {
        let (width, height) = image::image_dimensions(path)?;
        debug!(path = %path.display(), width, height, "reference image probed");
        Ok(Self { width, height })
    }

    /// Width fed to the geometry resolver. Zero-width images fall back to
    /// the default.
    pub fn natural_width(&self) -> f32 {
        sanitize_reference_width(self.width as f32)
    }
}

/// Natural width of the image at `path`, or the default when it cannot be
/// read.
pub fn reference_width_or_default(path: &Path) -> f32 {
    match ReferenceImage::probe(path) {
        Ok(reference) => reference.natural_width(),
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "could not probe reference image, using default width"
            );
            DEFAULT_REFERENCE_WIDTH
        }
    }
}
