//! Color tables for indexed rasters.
//!
//! A [`Palette`] is immutable once built. Rasters reference it through an
//! `Arc`, so several frames decoded from the same stream can point at the very
//! same table and compositing can tell "same palette" apart from "equal
//! palette" with `Arc::ptr_eq`.

use image::Rgba;

use crate::error::RasterError;

/// Maximum number of entries addressable by a `u8` index.
pub const MAX_PALETTE_ENTRIES: usize = 256;

/// Ordered table of RGBA colors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Palette {
    entries: Vec<Rgba<u8>>,
}

impl Palette {
    /// Build a palette from explicit entries.
    ///
    /// # Errors
    ///
    /// Fails if `entries` is empty or holds more than 256 colors.
    pub fn new(entries: Vec<Rgba<u8>>) -> Result<Self, RasterError> {
        if entries.is_empty() {
            return Err(RasterError::EmptyPalette);
        }
        if entries.len() > MAX_PALETTE_ENTRIES {
            return Err(RasterError::PaletteTooLarge(entries.len()));
        }
        Ok(Self { entries })
    }

    /// Build an opaque palette from packed RGB triplets.
    ///
    /// This is the layout GIF color tables use.
    pub fn from_rgb(data: &[u8]) -> Result<Self, RasterError> {
        if data.len() % 3 != 0 {
            return Err(RasterError::InvalidPaletteData(data.len()));
        }

        let entries = data
            .chunks_exact(3)
            .map(|rgb| Rgba([rgb[0], rgb[1], rgb[2], 0xFF]))
            .collect();

        Self::new(entries)
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; construction rejects empty palettes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Color at `index`, or `None` past the end of the table.
    #[inline]
    pub fn get(&self, index: u8) -> Option<Rgba<u8>> {
        self.entries.get(index as usize).copied()
    }

    /// All entries in index order.
    pub fn entries(&self) -> &[Rgba<u8>] {
        &self.entries
    }

    /// Index of the entry closest to `color`.
    ///
    /// An exact match wins immediately. Otherwise the entry with the smallest
    /// squared RGBA distance is chosen, ties going to the lower index.
    /// `exclude` removes one index from consideration (the transparent index
    /// of an indexed canvas). If every entry is excluded, 0 is returned.
    pub fn nearest_index(&self, color: Rgba<u8>, exclude: Option<u8>) -> u8 {
        let mut best: Option<(u8, u32)> = None;

        for (i, entry) in self.entries.iter().enumerate() {
            let index = i as u8;
            if Some(index) == exclude {
                continue;
            }

            let distance = squared_distance(*entry, color);
            if distance == 0 {
                return index;
            }
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((index, distance));
            }
        }

        best.map(|(index, _)| index).unwrap_or(0)
    }
}

fn squared_distance(a: Rgba<u8>, b: Rgba<u8>) -> u32 {
    a.0.iter()
        .zip(b.0.iter())
        .map(|(&x, &y)| {
            let d = x as i32 - y as i32;
            (d * d) as u32
        })
        .sum()
}

// =============================================================================
// Tests
// =============================================================================
