//! Content-addressed export of assembled frames.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::compose::AnimationSequence;
use crate::error::EncodeError;
use crate::fingerprint::identifier;
use crate::raster::Raster;

use super::writer::write_png_file;

/// File name of an exported frame: `<identifier>.png`.
pub fn export_file_name(raster: &Raster) -> String {
    format!("{}.png", identifier(raster))
}

/// Write every frame of `sequence` into `dir` as `<identifier>.png`.
///
/// `dir` is created if missing. A frame whose file already exists, whether
/// from an earlier run or an identical earlier frame, is not written again.
///
/// Returns the paths written by this call, in frame order.
pub fn export_frames(
    sequence: &AnimationSequence,
    dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>, EncodeError> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    for (index, frame) in sequence.iter().enumerate() {
        let path = dir.join(export_file_name(frame));

        if path.exists() {
            debug!(frame = index, path = %path.display(), "frame already exported");
            continue;
        }

        write_png_file(&path, frame)?;
        written.push(path);
    }

    Ok(written)
}
