//! Reading images into assembled sequences and writing rasters back out.

mod export;
mod loader;
mod writer;

pub use export::{export_file_name, export_frames};
pub use loader::{ImageLoader, LoadedImage};
pub use writer::{write_png, write_png_file};
