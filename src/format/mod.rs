//! Codec boundary: format resolution, frame sources and encoding.
//!
//! # Format Resolution
//!
//! Use [`FormatRegistry`] to map a MIME type or a byte signature to a
//! [`FormatKind`] and to open a [`FrameSource`] for it. Currently supported
//! formats:
//!
//! - **GIF**: decoded frame-by-frame as indexed deltas ([`GifFrameSource`])
//! - **PNG / JPEG / BMP**: decoded as one full frame ([`StillFrameSource`])
//!
//! Only GIF [`requires compositing`](FormatKind::requires_compositing).

pub mod encoder;
pub mod gif;
pub mod registry;
pub mod source;
pub mod still;

pub use encoder::RasterEncoder;
pub use self::gif::GifFrameSource;
pub use registry::{FormatEntry, FormatKind, FormatRegistry};
pub use source::{DecodedFrame, Disposal, FrameMetadata, FrameSource, GifFrameMetadata};
pub use still::StillFrameSource;
