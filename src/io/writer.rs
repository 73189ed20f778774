//! PNG output for resolved rasters.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::EncodeError;
use crate::format::RasterEncoder;
use crate::raster::Raster;

/// Encode `raster` as PNG into `writer`.
pub fn write_png<W: Write>(mut writer: W, raster: &Raster) -> Result<(), EncodeError> {
    let png = RasterEncoder::new().encode_png(raster)?;
    writer.write_all(&png)?;
    writer.flush()?;
    Ok(())
}

/// Encode `raster` as PNG into a new file at `path`, replacing any existing
/// file.
pub fn write_png_file(path: impl AsRef<Path>, raster: &Raster) -> Result<(), EncodeError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_png(BufWriter::new(file), raster)?;

    debug!(
        path = %path.display(),
        width = raster.width(),
        height = raster.height(),
        "wrote PNG"
    );
    Ok(())
}
