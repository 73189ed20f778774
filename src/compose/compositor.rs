//! Frame compositor.
//!
//! Draws an incremental (delta) frame over the previously composited frame to
//! reconstruct the full visual state of an animation frame.
//!
//! # Rules
//!
//! - **No position**: the delta already is a complete frame and is returned
//!   untouched.
//! - **Canvas**: the result always has the previous frame's size and color
//!   model. Indexed canvases keep the previous frame's palette allocation.
//! - **Clipping**: delta pixels that fall outside the canvas are dropped.
//! - **Transparency**: alpha is treated as 1-bit. Delta pixels that resolve
//!   to alpha 0 leave the canvas pixel as it was. Any other delta pixel,
//!   including a partially transparent one, overwrites the canvas pixel
//!   without blending.
//! - **Palettes**: indices are only copied verbatim when the delta uses the
//!   very same palette as the canvas. Otherwise the delta color is resolved
//!   and mapped to the nearest canvas entry.

use std::collections::HashMap;
use std::sync::Arc;

use image::Rgba;

use crate::raster::{FramePosition, IndexedImage, Palette, Raster};

// =============================================================================
// Frame Compositor
// =============================================================================

/// Merges delta frames onto the previous composited frame.
///
/// # Example
///
/// ```
/// use frameprint::compose::FrameCompositor;
/// use frameprint::raster::{FramePosition, Raster};
/// use image::{Rgba, RgbaImage};
///
/// let base = Raster::from(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255])));
/// let patch = Raster::from(RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255])));
///
/// let compositor = FrameCompositor::new();
/// let frame = compositor.composite(&base, patch, Some(FramePosition::new(1, 1)));
///
/// assert_eq!(frame.dimensions(), (4, 4));
/// assert_eq!(frame.pixel(1, 1), Rgba([255, 0, 0, 255]));
/// assert_eq!(frame.pixel(0, 0), Rgba([0, 0, 0, 255]));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameCompositor {}

impl FrameCompositor {
    pub fn new() -> Self {
        Self {}
    }

    /// Produce the next composited frame.
    ///
    /// # Arguments
    ///
    /// * `previous` - The last composited frame; defines canvas size and color model
    /// * `delta` - The newly decoded frame
    /// * `position` - Where to draw `delta`, or `None` if it is a full frame
    ///
    /// Neither input is modified.
    pub fn composite(
        &self,
        previous: &Raster,
        delta: Raster,
        position: Option<FramePosition>,
    ) -> Raster {
        let Some(position) = position else {
            return delta;
        };

        // Cloning keeps the canvas model, size and (for indexed) the palette Arc
        let mut canvas = previous.clone();
        draw(&mut canvas, &delta, position);
        canvas
    }
}

// =============================================================================
// Drawing
// =============================================================================

/// Intersection of a positioned delta with the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Region {
    src_x: u32,
    src_y: u32,
    dst_x: u32,
    dst_y: u32,
    width: u32,
    height: u32,
}

impl Region {
    fn clip(canvas: (u32, u32), delta: (u32, u32), position: FramePosition) -> Option<Region> {
        let (x, y) = (i64::from(position.x), i64::from(position.y));

        let left = x.max(0);
        let top = y.max(0);
        let right = (x + i64::from(delta.0)).min(i64::from(canvas.0));
        let bottom = (y + i64::from(delta.1)).min(i64::from(canvas.1));

        if left >= right || top >= bottom {
            return None;
        }

        Some(Region {
            src_x: (left - x) as u32,
            src_y: (top - y) as u32,
            dst_x: left as u32,
            dst_y: top as u32,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        })
    }

    /// Yields `(src_x, src_y, dst_x, dst_y)` row by row.
    fn points(self) -> impl Iterator<Item = (u32, u32, u32, u32)> {
        (0..self.height).flat_map(move |row| {
            (0..self.width).map(move |col| {
                (
                    self.src_x + col,
                    self.src_y + row,
                    self.dst_x + col,
                    self.dst_y + row,
                )
            })
        })
    }
}

fn draw(canvas: &mut Raster, delta: &Raster, position: FramePosition) {
    let Some(region) = Region::clip(canvas.dimensions(), delta.dimensions(), position) else {
        return;
    };

    match (canvas, delta) {
        (Raster::Direct(target), source) => {
            for (sx, sy, dx, dy) in region.points() {
                let color = source.pixel(sx, sy);
                if color[3] != 0 {
                    target.put_pixel(dx, dy, color);
                }
            }
        }
        (Raster::Indexed(target), Raster::Indexed(source))
            if Arc::ptr_eq(target.palette(), source.palette()) =>
        {
            copy_indices(target, source, region);
        }
        (Raster::Indexed(target), source) => {
            let mut mapper = PaletteMapper::new(target);
            for (sx, sy, dx, dy) in region.points() {
                let color = source.pixel(sx, sy);
                if color[3] != 0 {
                    target.set_index(dx, dy, mapper.map(color));
                }
            }
        }
    }
}

/// Index copy between two images sharing one palette.
fn copy_indices(target: &mut IndexedImage, source: &IndexedImage, region: Region) {
    let mut mapper = PaletteMapper::new(target);

    for (sx, sy, dx, dy) in region.points() {
        let index = source.index(sx, sy);
        if Some(index) == source.transparent_index() {
            continue;
        }

        // An opaque source index can collide with the canvas's transparent index
        let index = if Some(index) == mapper.exclude {
            mapper.map(source.resolve(index))
        } else {
            index
        };
        target.set_index(dx, dy, index);
    }
}

/// Memoizing color → canvas index lookup.
struct PaletteMapper {
    palette: Arc<Palette>,
    exclude: Option<u8>,
    cache: HashMap<Rgba<u8>, u8>,
}

impl PaletteMapper {
    fn new(target: &IndexedImage) -> Self {
        Self {
            palette: Arc::clone(target.palette()),
            exclude: target.transparent_index(),
            cache: HashMap::new(),
        }
    }

    fn map(&mut self, color: Rgba<u8>) -> u8 {
        let palette = &self.palette;
        let exclude = self.exclude;
        *self
            .cache
            .entry(color)
            .or_insert_with(|| palette.nearest_index(color, exclude))
    }
}

// =============================================================================
// Tests
// =============================================================================
