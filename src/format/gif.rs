//! GIF frame source.
//!
//! GIF animations store the first frame in full and every later frame as a
//! rectangle positioned on the logical screen. This source decodes each frame
//! as-is, without any compositing, into an indexed [`Raster`] and reports the
//! rectangle's offset through [`FrameMetadata::Gif`].
//!
//! # Palettes
//!
//! The global color table is decoded once. Every frame without a local color
//! table references that single `Arc<Palette>`, so consecutive frames can be
//! merged index-for-index. A local color table gets its own palette.

use std::io::Read;
use std::sync::Arc;

use ::gif::{ColorOutput, DecodeOptions, Decoder, DecodingError, DisposalMethod};
use tracing::debug;

use crate::error::DecodeError;
use crate::raster::{IndexedImage, Palette, Raster};

use super::registry::FormatKind;
use super::source::{DecodedFrame, Disposal, FrameMetadata, FrameSource, GifFrameMetadata};

/// Frame source over a GIF stream.
pub struct GifFrameSource<R: Read> {
    decoder: Decoder<R>,
    global_palette: Option<Arc<Palette>>,
    frames_read: usize,
}

impl<R: Read> GifFrameSource<R> {
    /// Read the GIF header and logical screen descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the header is invalid or the global color
    /// table is malformed.
    pub fn new(reader: R) -> Result<Self, DecodeError> {
        let mut options = DecodeOptions::new();
        options.set_color_output(ColorOutput::Indexed);

        let decoder = options
            .read_info(reader)
            .map_err(|e| map_gif_error(e, 0))?;

        let global_palette = match decoder.global_palette() {
            Some(table) if !table.is_empty() => Some(Arc::new(Palette::from_rgb(table)?)),
            _ => None,
        };

        debug!(
            width = decoder.width(),
            height = decoder.height(),
            global_palette = global_palette.as_ref().map_or(0, |p| p.len()),
            "opened GIF stream"
        );

        Ok(Self {
            decoder,
            global_palette,
            frames_read: 0,
        })
    }

    /// Logical screen size declared in the header.
    pub fn screen_dimensions(&self) -> (u32, u32) {
        (
            u32::from(self.decoder.width()),
            u32::from(self.decoder.height()),
        )
    }

    /// The shared global palette, if the stream has one.
    pub fn global_palette(&self) -> Option<&Arc<Palette>> {
        self.global_palette.as_ref()
    }
}

impl<R: Read> FrameSource for GifFrameSource<R> {
    fn format_kind(&self) -> FormatKind {
        FormatKind::Gif
    }

    fn next_frame(&mut self) -> Result<Option<DecodedFrame>, DecodeError> {
        let index = self.frames_read;

        let next = self.decoder.read_next_frame();
        let Some(frame) = next.map_err(|e| map_gif_error(e, index))? else {
            debug!(frames = index, "GIF stream exhausted");
            return Ok(None);
        };

        let palette = match (&frame.palette, &self.global_palette) {
            (Some(local), _) => Arc::new(Palette::from_rgb(local)?),
            (None, Some(global)) => Arc::clone(global),
            (None, None) => return Err(DecodeError::MissingPalette { frame: index }),
        };

        let metadata = GifFrameMetadata {
            left: frame.left,
            top: frame.top,
            delay: frame.delay,
            disposal: map_disposal(frame.dispose),
        };

        let image = IndexedImage::new(
            u32::from(frame.width),
            u32::from(frame.height),
            frame.buffer.to_vec(),
            palette,
            frame.transparent,
        )?;

        self.frames_read += 1;

        Ok(Some(DecodedFrame::new(
            Raster::Indexed(image),
            FrameMetadata::Gif(metadata),
        )))
    }
}

fn map_disposal(method: DisposalMethod) -> Disposal {
    match method {
        DisposalMethod::Any => Disposal::Unspecified,
        DisposalMethod::Keep => Disposal::Keep,
        DisposalMethod::Background => Disposal::Background,
        DisposalMethod::Previous => Disposal::Previous,
    }
}

/// Message of the decoder's format error for a frame with no color table.
const NO_COLOR_TABLE: &str = "no color table";

/// Convert a decoder error raised while reading frame `frame`.
fn map_gif_error(err: DecodingError, frame: usize) -> DecodeError {
    match err {
        DecodingError::Io(e) => DecodeError::Io(e.to_string()),
        DecodingError::Format(e) if e.to_string().contains(NO_COLOR_TABLE) => {
            DecodeError::MissingPalette { frame }
        }
        other => DecodeError::Malformed {
            message: other.to_string(),
        },
    }
}

// =============================================================================
// Tests
// =============================================================================
