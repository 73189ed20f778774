use thiserror::Error;

/// Errors raised while constructing rasters and palettes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    /// Pixel buffer length does not match the declared dimensions
    #[error("Buffer size mismatch: {width}x{height} needs {expected} pixels, got {actual}")]
    BufferSizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Palette has no entries
    #[error("Palette must contain at least one entry")]
    EmptyPalette,

    /// Palette has more entries than a u8 index can address
    #[error("Palette too large: {0} entries (maximum is 256)")]
    PaletteTooLarge(usize),

    /// Packed RGB palette data is not a whole number of triplets
    #[error("Invalid palette data: {0} bytes is not a multiple of 3")]
    InvalidPaletteData(usize),
}

/// Errors related to format resolution.
///
/// These are configuration-style failures: nothing was decoded yet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// No decoder or encoder is registered for the request
    #[error("Unsupported format: {reason}")]
    UnsupportedFormat { reason: String },
}

/// Errors reported by a frame source while decoding a stream.
///
/// Any of these aborts the whole assembly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Stream content is corrupt, truncated or otherwise unreadable
    #[error("Malformed image stream: {message}")]
    Malformed { message: String },

    /// A GIF frame has neither a local nor a global color table
    #[error("Frame {frame} has no color table")]
    MissingPalette { frame: usize },

    /// Decoded data could not form a valid raster
    #[error("Invalid raster: {0}")]
    Raster(#[from] RasterError),

    /// Underlying reader failed
    #[error("I/O error: {0}")]
    Io(String),
}

/// Errors that can occur when encoding a raster
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The encoder rejected the image
    #[error("Encode error: {message}")]
    Encode { message: String },

    /// Format is registered without encode capability
    #[error("Encoding is not supported for {format}")]
    Unsupported { format: &'static str },

    /// Output writer failed
    #[error("I/O error: {0}")]
    Io(String),
}

/// Errors from the end-to-end load pipeline (bytes or file to sequence)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// Format could not be resolved
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Stream failed to decode
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Input could not be read
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::Io(err.to_string())
    }
}

impl From<std::io::Error> for EncodeError {
    fn from(err: std::io::Error) -> Self {
        EncodeError::Io(err.to_string())
    }
}
