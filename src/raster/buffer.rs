//! The [`Raster`] type: one decoded frame in either color model.

use std::sync::Arc;

use image::{Rgba, RgbaImage};

use super::indexed::IndexedImage;
use super::palette::Palette;

// =============================================================================
// Color Model
// =============================================================================

/// How a raster stores its pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorModel {
    /// Each pixel is an RGBA color
    Direct,

    /// Each pixel is an index into a shared palette
    Indexed,
}

impl ColorModel {
    pub const fn name(&self) -> &'static str {
        match self {
            ColorModel::Direct => "direct",
            ColorModel::Indexed => "indexed",
        }
    }
}

// =============================================================================
// Frame Position
// =============================================================================

/// Offset, in pixels, at which a delta frame is drawn onto the canvas.
///
/// Signed so that offsets left of or above the canvas clip instead of
/// wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FramePosition {
    pub x: i32,
    pub y: i32,
}

impl FramePosition {
    /// The canvas origin.
    pub const ORIGIN: FramePosition = FramePosition { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

// =============================================================================
// Raster
// =============================================================================

/// A decoded rectangular grid of pixels.
///
/// A raster owns its pixel buffer. Indexed rasters share their palette by
/// reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Raster {
    /// Direct-color pixels
    Direct(RgbaImage),

    /// Palette-indexed pixels
    Indexed(IndexedImage),
}

impl Raster {
    #[inline]
    pub fn width(&self) -> u32 {
        match self {
            Raster::Direct(image) => image.width(),
            Raster::Indexed(image) => image.width(),
        }
    }

    #[inline]
    pub fn height(&self) -> u32 {
        match self {
            Raster::Direct(image) => image.height(),
            Raster::Indexed(image) => image.height(),
        }
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn color_model(&self) -> ColorModel {
        match self {
            Raster::Direct(_) => ColorModel::Direct,
            Raster::Indexed(_) => ColorModel::Indexed,
        }
    }

    /// Palette of an indexed raster.
    pub fn palette(&self) -> Option<&Arc<Palette>> {
        match self {
            Raster::Direct(_) => None,
            Raster::Indexed(image) => Some(image.palette()),
        }
    }

    /// Whether both rasters are indexed and reference the same palette
    /// allocation. Equal-but-distinct palettes do not count.
    pub fn shares_palette_with(&self, other: &Raster) -> bool {
        match (self.palette(), other.palette()) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Resolved color at `(x, y)`, with palette lookup for indexed rasters.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the raster.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        match self {
            Raster::Direct(image) => *image.get_pixel(x, y),
            Raster::Indexed(image) => image.color(x, y),
        }
    }

    /// Resolved color at `(x, y)` packed as `0xAARRGGBB`.
    #[inline]
    pub fn argb(&self, x: u32, y: u32) -> u32 {
        to_argb(self.pixel(x, y))
    }

    /// Direct-color copy of this raster with identical resolved colors.
    pub fn to_direct(&self) -> Raster {
        Raster::Direct(self.to_rgba_image())
    }

    /// Resolve every pixel into an RGBA image.
    pub fn to_rgba_image(&self) -> RgbaImage {
        match self {
            Raster::Direct(image) => image.clone(),
            Raster::Indexed(image) => {
                RgbaImage::from_fn(image.width(), image.height(), |x, y| image.color(x, y))
            }
        }
    }

    /// Like [`Raster::to_rgba_image`] but reuses the buffer of direct rasters.
    pub fn into_rgba_image(self) -> RgbaImage {
        match self {
            Raster::Direct(image) => image,
            indexed => indexed.to_rgba_image(),
        }
    }
}

impl From<RgbaImage> for Raster {
    fn from(image: RgbaImage) -> Self {
        Raster::Direct(image)
    }
}

impl From<IndexedImage> for Raster {
    fn from(image: IndexedImage) -> Self {
        Raster::Indexed(image)
    }
}

/// Pack an RGBA color as `0xAARRGGBB`.
#[inline]
pub fn to_argb(color: Rgba<u8>) -> u32 {
    let [r, g, b, a] = color.0;
    u32::from_be_bytes([a, r, g, b])
}

// =============================================================================
// Tests
// =============================================================================
