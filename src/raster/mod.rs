//! Raster and palette types.
//!
//! Every decoded frame is a [`Raster`], stored in one of two color models:
//!
//! - **Direct**: one RGBA color per pixel ([`image::RgbaImage`])
//! - **Indexed**: one `u8` per pixel, looked up in a shared [`Palette`]
//!
//! Palettes are reference-counted and never mutated after construction. Two
//! indexed rasters that hold the same `Arc<Palette>` agree on what every index
//! means, which is what lets the compositor copy indices between them.

mod buffer;
mod indexed;
mod palette;

pub use buffer::{to_argb, ColorModel, FramePosition, Raster};
pub use indexed::{IndexedImage, OUT_OF_PALETTE, TRANSPARENT};
pub use palette::{Palette, MAX_PALETTE_ENTRIES};
