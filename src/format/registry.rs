//! Format registry.
//!
//! Maps MIME types and byte signatures to a [`FormatKind`] and records which
//! kinds can be decoded and encoded. The registry is also where the decision
//! "does this format need compositing" is made: the frame source it opens
//! carries the kind for its whole lifetime.
//!
//! Failing to resolve a format is a [`FormatError`], which callers can tell
//! apart from a [`DecodeError`] raised halfway through a stream.
//!
//! [`DecodeError`]: crate::error::DecodeError

use std::io::Cursor;

use bytes::Bytes;
use image::ImageFormat;
use serde::Serialize;
use tracing::debug;

use crate::error::{FormatError, LoadError};

use super::gif::GifFrameSource;
use super::source::FrameSource;
use super::still::StillFrameSource;

// =============================================================================
// FormatKind
// =============================================================================

/// Container formats known to the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    /// GIF; frames after the first are positioned deltas
    Gif,

    /// PNG
    Png,

    /// JPEG
    Jpeg,

    /// Windows bitmap
    Bmp,
}

impl FormatKind {
    /// Every known kind, in registration order.
    pub const ALL: [FormatKind; 4] = [
        FormatKind::Gif,
        FormatKind::Png,
        FormatKind::Jpeg,
        FormatKind::Bmp,
    ];

    /// Get a human-readable name for the format.
    pub const fn name(&self) -> &'static str {
        match self {
            FormatKind::Gif => "GIF",
            FormatKind::Png => "PNG",
            FormatKind::Jpeg => "JPEG",
            FormatKind::Bmp => "BMP",
        }
    }

    /// Canonical MIME type.
    pub const fn mime_type(&self) -> &'static str {
        match self {
            FormatKind::Gif => "image/gif",
            FormatKind::Png => "image/png",
            FormatKind::Jpeg => "image/jpeg",
            FormatKind::Bmp => "image/bmp",
        }
    }

    /// Preferred file extension, without the dot.
    pub const fn extension(&self) -> &'static str {
        match self {
            FormatKind::Gif => "gif",
            FormatKind::Png => "png",
            FormatKind::Jpeg => "jpg",
            FormatKind::Bmp => "bmp",
        }
    }

    /// Whether frames after the first are stored as positioned deltas that
    /// must be drawn over the previous frame.
    pub const fn requires_compositing(&self) -> bool {
        matches!(self, FormatKind::Gif)
    }

    /// The matching `image` crate format.
    pub const fn image_format(&self) -> ImageFormat {
        match self {
            FormatKind::Gif => ImageFormat::Gif,
            FormatKind::Png => ImageFormat::Png,
            FormatKind::Jpeg => ImageFormat::Jpeg,
            FormatKind::Bmp => ImageFormat::Bmp,
        }
    }

    /// Map an `image` crate format back to a kind.
    pub fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Gif => Some(FormatKind::Gif),
            ImageFormat::Png => Some(FormatKind::Png),
            ImageFormat::Jpeg => Some(FormatKind::Jpeg),
            ImageFormat::Bmp => Some(FormatKind::Bmp),
            _ => None,
        }
    }

    /// Extra MIME types accepted for this kind.
    const fn aliases(&self) -> &'static [&'static str] {
        match self {
            FormatKind::Gif => &[],
            FormatKind::Png => &["image/apng"],
            FormatKind::Jpeg => &["image/jpg", "image/pjpeg"],
            FormatKind::Bmp => &["image/x-bmp", "image/x-ms-bmp"],
        }
    }
}

impl std::fmt::Display for FormatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// FormatEntry
// =============================================================================

/// Capabilities registered for one format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormatEntry {
    pub kind: FormatKind,
    pub decode: bool,
    pub encode: bool,
}

impl FormatEntry {
    /// Entry with both decode and encode support.
    pub const fn new(kind: FormatKind) -> Self {
        Self {
            kind,
            decode: true,
            encode: true,
        }
    }

    pub const fn decode_only(kind: FormatKind) -> Self {
        Self {
            kind,
            decode: true,
            encode: false,
        }
    }

    /// Whether `mime` (already normalized) names this entry's format.
    fn matches(&self, mime: &str) -> bool {
        self.kind.mime_type() == mime || self.kind.aliases().contains(&mime)
    }
}

// =============================================================================
// FormatRegistry
// =============================================================================

/// Table of supported formats.
#[derive(Debug, Clone)]
pub struct FormatRegistry {
    entries: Vec<FormatEntry>,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatRegistry {
    /// Registry with every [`FormatKind`] readable and writable.
    pub fn new() -> Self {
        Self::with_entries(FormatKind::ALL.iter().map(|&kind| FormatEntry::new(kind)))
    }

    /// Registry restricted to the given entries.
    pub fn with_entries(entries: impl IntoIterator<Item = FormatEntry>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn entries(&self) -> &[FormatEntry] {
        &self.entries
    }

    /// Find the entry registered for a MIME type.
    ///
    /// Matching is case-insensitive and ignores parameters such as
    /// `; charset=binary`.
    pub fn lookup(&self, mime_type: &str) -> Option<&FormatEntry> {
        let mime = normalize_mime(mime_type);
        self.entries.iter().find(|entry| entry.matches(&mime))
    }

    fn entry(&self, kind: FormatKind) -> Option<&FormatEntry> {
        self.entries.iter().find(|entry| entry.kind == kind)
    }

    pub fn can_decode(&self, kind: FormatKind) -> bool {
        self.entry(kind).is_some_and(|entry| entry.decode)
    }

    pub fn can_encode(&self, kind: FormatKind) -> bool {
        self.entry(kind).is_some_and(|entry| entry.encode)
    }

    /// Resolve a MIME type to a decodable format.
    ///
    /// # Errors
    ///
    /// [`FormatError::UnsupportedFormat`] if no entry matches or the entry
    /// cannot decode.
    pub fn resolve_decoder(&self, mime_type: &str) -> Result<FormatKind, FormatError> {
        match self.lookup(mime_type) {
            Some(entry) if entry.decode => {
                debug!(mime_type, format = entry.kind.name(), "resolved decoder");
                Ok(entry.kind)
            }
            _ => Err(FormatError::UnsupportedFormat {
                reason: format!("no decoder registered for {}", mime_type),
            }),
        }
    }

    /// Resolve a MIME type to an encodable format.
    ///
    /// # Errors
    ///
    /// [`FormatError::UnsupportedFormat`] if no entry matches or the entry
    /// cannot encode.
    pub fn resolve_encoder(&self, mime_type: &str) -> Result<FormatKind, FormatError> {
        match self.lookup(mime_type) {
            Some(entry) if entry.encode => {
                debug!(mime_type, format = entry.kind.name(), "resolved encoder");
                Ok(entry.kind)
            }
            _ => Err(FormatError::UnsupportedFormat {
                reason: format!("no encoder registered for {}", mime_type),
            }),
        }
    }

    /// Detect the format of a stream from its leading bytes.
    ///
    /// # Errors
    ///
    /// [`FormatError::UnsupportedFormat`] if the signature is unknown or the
    /// detected format is not registered for decoding.
    pub fn detect(&self, data: &[u8]) -> Result<FormatKind, FormatError> {
        let format = image::guess_format(data).map_err(|_| FormatError::UnsupportedFormat {
            reason: "unrecognized image signature".to_string(),
        })?;

        let kind = FormatKind::from_image_format(format).ok_or_else(|| {
            FormatError::UnsupportedFormat {
                reason: format!("{:?} images are not supported", format),
            }
        })?;

        if !self.can_decode(kind) {
            return Err(FormatError::UnsupportedFormat {
                reason: format!("no decoder registered for {}", kind.mime_type()),
            });
        }

        debug!(format = kind.name(), "detected format from signature");
        Ok(kind)
    }

    /// Open a frame source for `data`, which must be encoded as `kind`.
    ///
    /// GIF streams get an incremental [`GifFrameSource`]; every other format
    /// is decoded as a single full frame.
    ///
    /// # Errors
    ///
    /// * [`LoadError::Format`] - `kind` is not registered for decoding
    /// * [`LoadError::Decode`] - the stream header is unreadable
    pub fn open_source(
        &self,
        kind: FormatKind,
        data: Bytes,
    ) -> Result<Box<dyn FrameSource>, LoadError> {
        if !self.can_decode(kind) {
            return Err(FormatError::UnsupportedFormat {
                reason: format!("no decoder registered for {}", kind.mime_type()),
            }
            .into());
        }

        let source: Box<dyn FrameSource> = match kind {
            FormatKind::Gif => Box::new(GifFrameSource::new(Cursor::new(data))?),
            other => Box::new(StillFrameSource::new(data, other)),
        };
        Ok(source)
    }
}

/// Lowercase the essence of a MIME type, dropping parameters.
fn normalize_mime(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

// =============================================================================
// Tests
// =============================================================================
