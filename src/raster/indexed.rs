//! Palette-indexed pixel storage.

use std::sync::Arc;

use image::Rgba;

use super::palette::Palette;
use crate::error::RasterError;

/// Resolved color for the transparent index.
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Resolved color for an index past the end of the palette.
pub const OUT_OF_PALETTE: Rgba<u8> = Rgba([0, 0, 0, 0xFF]);

/// A width × height grid of palette indices.
///
/// The transparent index belongs to the image rather than the palette: GIF
/// frames sharing the global color table may each declare a different one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
    width: u32,
    height: u32,
    indices: Vec<u8>,
    palette: Arc<Palette>,
    transparent: Option<u8>,
}

impl IndexedImage {
    /// Create an indexed image from a row-major index buffer.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::BufferSizeMismatch`] if `indices` does not hold
    /// exactly `width * height` entries.
    pub fn new(
        width: u32,
        height: u32,
        indices: Vec<u8>,
        palette: Arc<Palette>,
        transparent: Option<u8>,
    ) -> Result<Self, RasterError> {
        let expected = width as usize * height as usize;
        if indices.len() != expected {
            return Err(RasterError::BufferSizeMismatch {
                width,
                height,
                expected,
                actual: indices.len(),
            });
        }

        Ok(Self {
            width,
            height,
            indices,
            palette,
            transparent,
        })
    }

    /// Create an image where every pixel holds `index`.
    pub fn filled(
        width: u32,
        height: u32,
        index: u8,
        palette: Arc<Palette>,
        transparent: Option<u8>,
    ) -> Self {
        Self {
            width,
            height,
            indices: vec![index; width as usize * height as usize],
            palette,
            transparent,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major index buffer.
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// The shared palette.
    pub fn palette(&self) -> &Arc<Palette> {
        &self.palette
    }

    pub fn transparent_index(&self) -> Option<u8> {
        self.transparent
    }

    /// Palette index at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the image.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> u8 {
        self.indices[self.offset(x, y)]
    }

    /// Overwrite the palette index at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the image.
    #[inline]
    pub fn set_index(&mut self, x: u32, y: u32, index: u8) {
        let offset = self.offset(x, y);
        self.indices[offset] = index;
    }

    /// Resolved RGBA color at `(x, y)`.
    #[inline]
    pub fn color(&self, x: u32, y: u32) -> Rgba<u8> {
        self.resolve(self.index(x, y))
    }

    /// Map an index to a color through the palette.
    ///
    /// The transparent index resolves to [`TRANSPARENT`]; indices past the
    /// end of the palette resolve to [`OUT_OF_PALETTE`].
    pub fn resolve(&self, index: u8) -> Rgba<u8> {
        if Some(index) == self.transparent {
            return TRANSPARENT;
        }
        self.palette.get(index).unwrap_or(OUT_OF_PALETTE)
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} image",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }
}
