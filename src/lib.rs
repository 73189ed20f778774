//! # frameprint
//!
//! Multi-frame image assembly and content fingerprinting.
//!
//! Animated formats such as GIF store every frame after the first as a
//! rectangle drawn over the previous frame. This library decodes those
//! frames, composites them into complete rasters, and computes a
//! deterministic fingerprint of the resulting pixels that can serve as a
//! content identifier (deduplication, cache keys, file naming).
//!
//! ## Architecture
//!
//! - [`raster`] - Direct (RGBA) and palette-indexed pixel grids
//! - [`mod@format`] - Format registry, frame sources and encoders
//! - [`compose`] - Frame compositing and animation assembly
//! - [`mod@fingerprint`] - SHA-256 pixel digests and identifiers
//! - [`io`] - Loading from bytes, readers and files; PNG output and frame export
//! - [`batch`] - Concurrent fingerprinting of many files
//! - [`config`] - CLI configuration
//!
//! ## Example
//!
//! ```
//! use frameprint::{identifier, ImageLoader, RasterEncoder, Raster};
//! use image::{Rgba, RgbaImage};
//!
//! let raster = Raster::from(RgbaImage::from_pixel(4, 4, Rgba([12, 34, 56, 255])));
//! let png = RasterEncoder::new().encode_png(&raster).unwrap();
//!
//! let loaded = ImageLoader::new().load_bytes(png).unwrap();
//! let frame = loaded.sequence.first().unwrap();
//! assert_eq!(identifier(frame), identifier(&raster));
//! ```

pub mod batch;
pub mod compose;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod format;
pub mod io;
pub mod raster;

// Re-export commonly used types
pub use batch::{any_failed, hash_file, hash_files, FileOutcome, FileReport, HashOptions};
pub use compose::{AnimationAssembler, AnimationSequence, FrameCompositor, PositionedFrame};
pub use config::{Cli, Command, ExportConfig, FormatsConfig, HashConfig, OutputFormat};
pub use error::{DecodeError, EncodeError, FormatError, LoadError, RasterError};
pub use fingerprint::{digest_hex, fingerprint, fingerprint_raster, identifier, Fingerprint};
pub use format::{
    DecodedFrame, Disposal, FormatEntry, FormatKind, FormatRegistry, FrameMetadata, FrameSource,
    GifFrameMetadata, GifFrameSource, RasterEncoder, StillFrameSource,
};
pub use io::{
    export_file_name, export_frames, write_png, write_png_file, ImageLoader, LoadedImage,
};
pub use raster::{ColorModel, FramePosition, IndexedImage, Palette, Raster};
