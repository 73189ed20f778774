//! Image loading from memory, readers and files.
//!
//! Every entry point ends in the same pipeline: resolve a [`FormatKind`],
//! open a frame source through the [`FormatRegistry`] and assemble all frames
//! into an [`AnimationSequence`].

use std::io::Read;
use std::path::Path;

use bytes::Bytes;
use tracing::debug;

use crate::compose::{AnimationAssembler, AnimationSequence};
use crate::error::LoadError;
use crate::format::{FormatKind, FormatRegistry};

/// A fully assembled image and the format it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    pub kind: FormatKind,
    pub sequence: AnimationSequence,
}

/// Loads images into assembled frame sequences.
///
/// # Example
///
/// ```
/// use frameprint::io::ImageLoader;
/// use frameprint::format::{FormatKind, RasterEncoder};
/// use frameprint::raster::Raster;
/// use image::{Rgba, RgbaImage};
///
/// let raster = Raster::from(RgbaImage::from_pixel(2, 2, Rgba([5, 6, 7, 255])));
/// let png = RasterEncoder::new().encode_png(&raster).unwrap();
///
/// let loaded = ImageLoader::new().load_bytes(png).unwrap();
/// assert_eq!(loaded.kind, FormatKind::Png);
/// assert_eq!(loaded.sequence.frames(), &[raster]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImageLoader {
    registry: FormatRegistry,
    assembler: AnimationAssembler,
}

impl ImageLoader {
    /// Loader accepting every built-in format.
    pub fn new() -> Self {
        Self::with_registry(FormatRegistry::new())
    }

    /// Loader restricted to the formats `registry` can decode.
    pub fn with_registry(registry: FormatRegistry) -> Self {
        Self {
            registry,
            assembler: AnimationAssembler::new(),
        }
    }

    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    /// Load an image, detecting its format from the leading bytes.
    ///
    /// # Errors
    ///
    /// * [`LoadError::Format`] - unknown or unregistered signature
    /// * [`LoadError::Decode`] - any frame failed to decode
    pub fn load_bytes(&self, data: impl Into<Bytes>) -> Result<LoadedImage, LoadError> {
        let data = data.into();
        let kind = self.registry.detect(&data)?;
        self.load_kind(kind, data)
    }

    /// Load an image declared as `mime_type`.
    ///
    /// The signature is not checked; a mismatching stream fails to decode.
    pub fn load_bytes_as(
        &self,
        data: impl Into<Bytes>,
        mime_type: &str,
    ) -> Result<LoadedImage, LoadError> {
        let kind = self.registry.resolve_decoder(mime_type)?;
        self.load_kind(kind, data.into())
    }

    /// Read `reader` to the end and load the result.
    pub fn load_reader<R: Read>(&self, mut reader: R) -> Result<LoadedImage, LoadError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.load_bytes(data)
    }

    /// Load the file at `path`.
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<LoadedImage, LoadError> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        debug!(path = %path.display(), bytes = data.len(), "read image file");
        self.load_bytes(data)
    }

    /// Load the file at `path`, declared as `mime_type`.
    pub fn load_path_as(
        &self,
        path: impl AsRef<Path>,
        mime_type: &str,
    ) -> Result<LoadedImage, LoadError> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        debug!(path = %path.display(), bytes = data.len(), mime_type, "read image file");
        self.load_bytes_as(data, mime_type)
    }

    fn load_kind(&self, kind: FormatKind, data: Bytes) -> Result<LoadedImage, LoadError> {
        let mut source = self.registry.open_source(kind, data)?;
        let sequence = self.assembler.assemble_source(source.as_mut())?;

        debug!(format = kind.name(), frames = sequence.len(), "loaded image");
        Ok(LoadedImage { kind, sequence })
    }
}

// =============================================================================
// Tests
// =============================================================================
