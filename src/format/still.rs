//! Single-frame source for non-incremental formats.
//!
//! PNG, JPEG and BMP streams are decoded in one go by the `image` crate and
//! yielded as a single direct-color frame without metadata.

use std::io::Cursor;

use bytes::Bytes;
use image::ImageReader;
use tracing::debug;

use crate::error::DecodeError;
use crate::raster::Raster;

use super::registry::FormatKind;
use super::source::{DecodedFrame, FrameSource};

/// Frame source yielding exactly one full frame.
///
/// Decoding is deferred until the first [`FrameSource::next_frame`] call.
#[derive(Debug, Clone)]
pub struct StillFrameSource {
    data: Option<Bytes>,
    kind: FormatKind,
}

impl StillFrameSource {
    /// Create a source over encoded `data` in format `kind`.
    pub fn new(data: Bytes, kind: FormatKind) -> Self {
        Self {
            data: Some(data),
            kind,
        }
    }
}

impl FrameSource for StillFrameSource {
    fn format_kind(&self) -> FormatKind {
        self.kind
    }

    fn next_frame(&mut self) -> Result<Option<DecodedFrame>, DecodeError> {
        let Some(data) = self.data.take() else {
            return Ok(None);
        };

        let reader = ImageReader::with_format(Cursor::new(data), self.kind.image_format());
        let image = reader.decode().map_err(|e| DecodeError::Malformed {
            message: e.to_string(),
        })?;

        debug!(
            format = self.kind.name(),
            width = image.width(),
            height = image.height(),
            "decoded still image"
        );

        Ok(Some(DecodedFrame::full(Raster::Direct(image.into_rgba8()))))
    }
}
