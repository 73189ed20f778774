//! Raster encoder.
//!
//! Encodes resolved raster pixels into a container format through the `image`
//! crate. Indexed rasters are resolved to RGBA first, so the output always
//! shows the colors the fingerprint was computed over.
//!
//! JPEG has no alpha channel; alpha is dropped before encoding.

use std::io::Cursor;

use bytes::Bytes;
use image::DynamicImage;

use crate::error::EncodeError;
use crate::raster::Raster;

use super::registry::{FormatKind, FormatRegistry};

/// Encoder for writing rasters in any registered format.
///
/// # Example
///
/// ```
/// use frameprint::format::{FormatKind, RasterEncoder};
/// use frameprint::raster::Raster;
/// use image::{Rgba, RgbaImage};
///
/// let raster = Raster::from(RgbaImage::from_pixel(2, 2, Rgba([0, 128, 255, 255])));
/// let png = RasterEncoder::new().encode(&raster, FormatKind::Png).unwrap();
/// assert_eq!(&png[1..4], b"PNG");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RasterEncoder {
    registry: FormatRegistry,
}

impl RasterEncoder {
    /// Encoder accepting every built-in format.
    pub fn new() -> Self {
        Self::with_registry(FormatRegistry::new())
    }

    /// Encoder restricted to the formats `registry` can encode.
    pub fn with_registry(registry: FormatRegistry) -> Self {
        Self { registry }
    }

    /// Encode `raster` as `kind`.
    ///
    /// # Errors
    ///
    /// * [`EncodeError::Unsupported`] - `kind` is not registered for encoding
    /// * [`EncodeError::Encode`] - the underlying encoder failed
    pub fn encode(&self, raster: &Raster, kind: FormatKind) -> Result<Bytes, EncodeError> {
        if !self.registry.can_encode(kind) {
            return Err(EncodeError::Unsupported {
                format: kind.name(),
            });
        }

        let rgba = DynamicImage::ImageRgba8(raster.to_rgba_image());
        let image = match kind {
            FormatKind::Jpeg => DynamicImage::ImageRgb8(rgba.into_rgb8()),
            _ => rgba,
        };

        let mut output = Cursor::new(Vec::new());
        image
            .write_to(&mut output, kind.image_format())
            .map_err(|e| EncodeError::Encode {
                message: e.to_string(),
            })?;

        Ok(Bytes::from(output.into_inner()))
    }

    /// Encode `raster` as PNG.
    ///
    /// Convenience for `encode(raster, FormatKind::Png)`.
    pub fn encode_png(&self, raster: &Raster) -> Result<Bytes, EncodeError> {
        self.encode(raster, FormatKind::Png)
    }
}

// =============================================================================
// Tests
// =============================================================================
