//! Content fingerprints for rasters.
//!
//! A fingerprint is a SHA-256 digest over resolved pixel colors. Rasters are
//! visited in order; within a raster, rows top-to-bottom and columns
//! left-to-right. Each pixel contributes exactly four bytes: its ARGB value
//! (`a << 24 | r << 16 | g << 8 | b`) in big-endian order. Indexed pixels are
//! resolved through their palette first, so an indexed raster and a direct
//! raster showing the same colors hash identically.
//!
//! Dimensions are not part of the digest. They are part of the
//! [`identifier`], which is the content-addressed name of a single raster.

use sha2::{Digest, Sha256};

use crate::compose::AnimationSequence;
use crate::raster::{to_argb, Raster};

/// Length of a fingerprint in bytes.
pub const DIGEST_LEN: usize = 32;

/// SHA-256 digest over resolved pixel content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    bytes: [u8; DIGEST_LEN],
}

impl Fingerprint {
    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.bytes
    }

    /// Lowercase hex, 64 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Fingerprint a sequence of rasters.
///
/// The result depends on raster order. An empty input yields the digest of
/// the empty message.
pub fn fingerprint<'a, I>(rasters: I) -> Fingerprint
where
    I: IntoIterator<Item = &'a Raster>,
{
    let mut hasher = Sha256::new();
    for raster in rasters {
        feed_raster(&mut hasher, raster);
    }

    let mut bytes = [0u8; DIGEST_LEN];
    bytes.copy_from_slice(&hasher.finalize());
    Fingerprint::from_bytes(bytes)
}

/// Fingerprint a single raster.
pub fn fingerprint_raster(raster: &Raster) -> Fingerprint {
    fingerprint(std::iter::once(raster))
}

/// Hex digest of a single raster.
pub fn digest_hex(raster: &Raster) -> String {
    fingerprint_raster(raster).to_hex()
}

/// Content-addressed name of a raster: `{width}x{height}-{hex digest}`.
///
/// Two rasters with equal dimensions and equal resolved pixels always get the
/// same identifier.
///
/// # Example
///
/// ```
/// use frameprint::fingerprint::identifier;
/// use frameprint::raster::Raster;
/// use image::{Rgba, RgbaImage};
///
/// let raster = Raster::from(RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255])));
/// let id = identifier(&raster);
/// assert!(id.starts_with("3x2-"));
/// assert_eq!(id.len(), "3x2-".len() + 64);
/// ```
pub fn identifier(raster: &Raster) -> String {
    format!(
        "{}x{}-{}",
        raster.width(),
        raster.height(),
        digest_hex(raster)
    )
}

impl AnimationSequence {
    /// Fingerprint of every frame, in playback order.
    pub fn fingerprint(&self) -> Fingerprint {
        fingerprint(self.frames())
    }
}

fn feed_raster(hasher: &mut Sha256, raster: &Raster) {
    let row_len = raster.width() as usize * 4;
    let mut row = Vec::with_capacity(row_len);

    match raster {
        Raster::Direct(image) => {
            for pixels in image.rows() {
                row.clear();
                for pixel in pixels {
                    row.extend_from_slice(&to_argb(*pixel).to_be_bytes());
                }
                hasher.update(&row);
            }
        }
        Raster::Indexed(image) => {
            let mut resolved = [0u32; 256];
            for (index, slot) in resolved.iter_mut().enumerate() {
                *slot = to_argb(image.resolve(index as u8));
            }

            let width = image.width() as usize;
            if width == 0 {
                return;
            }
            for indices in image.indices().chunks(width) {
                row.clear();
                for &index in indices {
                    row.extend_from_slice(&resolved[index as usize].to_be_bytes());
                }
                hasher.update(&row);
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
