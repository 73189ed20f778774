//! FrameSource trait and per-frame metadata.
//!
//! A frame source is the pull-based boundary to a codec: each call to
//! [`FrameSource::next_frame`] yields one decoded raster with the metadata the
//! container stored for it, `Ok(None)` once the stream is exhausted, or a
//! [`DecodeError`] if the stream is unreadable.
//!
//! Format metadata is an explicit tagged union. Extracting a draw offset is a
//! match on [`FrameMetadata`], and anything that does not match the source's
//! format simply has no position.

use crate::error::DecodeError;
use crate::raster::{FramePosition, Raster};

use super::registry::FormatKind;

// =============================================================================
// Metadata
// =============================================================================

/// GIF frame disposal, as declared in the Graphic Control Extension.
///
/// Carried for callers; compositing only merges the previous frame and the
/// current delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Disposal {
    /// No disposal specified
    #[default]
    Unspecified,

    /// Leave the frame in place
    Keep,

    /// Restore the frame area to the background
    Background,

    /// Restore the frame area to the previous state
    Previous,
}

/// Metadata of one GIF frame (Image Descriptor + Graphic Control Extension).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GifFrameMetadata {
    /// Left offset on the logical screen
    pub left: u16,

    /// Top offset on the logical screen
    pub top: u16,

    /// Frame delay in hundredths of a second
    pub delay: u16,

    /// Declared disposal method
    pub disposal: Disposal,
}

impl GifFrameMetadata {
    pub fn position(&self) -> FramePosition {
        FramePosition::new(i32::from(self.left), i32::from(self.top))
    }
}

/// Format-specific metadata attached to a decoded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrameMetadata {
    /// GIF image descriptor fields
    Gif(GifFrameMetadata),

    /// The format supplies no per-frame metadata
    #[default]
    None,
}

impl FrameMetadata {
    /// Draw offset for a frame decoded by a `kind` source.
    ///
    /// Returns `None` when the metadata is absent or belongs to another
    /// format. Neither case is an error: the frame is then treated as a full
    /// raster.
    pub fn position_for(&self, kind: FormatKind) -> Option<FramePosition> {
        match (self, kind) {
            (FrameMetadata::Gif(meta), FormatKind::Gif) => Some(meta.position()),
            _ => None,
        }
    }
}

// =============================================================================
// Decoded Frame
// =============================================================================

/// One frame as produced by a codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    pub raster: Raster,
    pub metadata: FrameMetadata,
}

impl DecodedFrame {
    pub fn new(raster: Raster, metadata: FrameMetadata) -> Self {
        Self { raster, metadata }
    }

    /// A full frame with no metadata.
    pub fn full(raster: Raster) -> Self {
        Self::new(raster, FrameMetadata::None)
    }
}

// =============================================================================
// FrameSource Trait
// =============================================================================

/// Pull-based producer of decoded frames.
///
/// The format kind is fixed when the source is constructed; callers query it
/// once instead of inspecting each frame.
pub trait FrameSource {
    /// Container format this source decodes.
    fn format_kind(&self) -> FormatKind;

    /// Decode the next frame.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(frame))` - the next frame in source order
    /// * `Ok(None)` - the stream has no more frames
    /// * `Err(_)` - the stream is corrupt; further calls are unspecified
    fn next_frame(&mut self) -> Result<Option<DecodedFrame>, DecodeError>;

    /// Whether frames of this source are incremental deltas.
    fn requires_compositing(&self) -> bool {
        self.format_kind().requires_compositing()
    }
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn format_kind(&self) -> FormatKind {
        (**self).format_kind()
    }

    fn next_frame(&mut self) -> Result<Option<DecodedFrame>, DecodeError> {
        (**self).next_frame()
    }

    fn requires_compositing(&self) -> bool {
        (**self).requires_compositing()
    }
}

// =============================================================================
// Tests
// =============================================================================
