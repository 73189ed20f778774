//! Test utilities for integration tests.
//!
//! Provides fixture builders for:
//! - GIF animations written with the `gif` encoder
//! - PNG images written with the `image` crate
//! - Scripted frame sources

use std::borrow::Cow;
use std::collections::VecDeque;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgba, RgbaImage};

use frameprint::{DecodeError, DecodedFrame, FormatKind, FrameSource};

// =============================================================================
// Palettes
// =============================================================================

/// Global palette used by the GIF fixtures: black, red, green, blue.
pub const PALETTE: [u8; 12] = [
    0x00, 0x00, 0x00, //
    0xFF, 0x00, 0x00, //
    0x00, 0xFF, 0x00, //
    0x00, 0x00, 0xFF, //
];

pub const BLACK: Rgba<u8> = Rgba([0x00, 0x00, 0x00, 0xFF]);
pub const RED: Rgba<u8> = Rgba([0xFF, 0x00, 0x00, 0xFF]);
pub const GREEN: Rgba<u8> = Rgba([0x00, 0xFF, 0x00, 0xFF]);
pub const BLUE: Rgba<u8> = Rgba([0x00, 0x00, 0xFF, 0xFF]);

// =============================================================================
// GIF Builder
// =============================================================================

/// One frame of a GIF fixture.
#[derive(Debug, Clone)]
pub struct GifFrameSpec {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
    pub indices: Vec<u8>,
    pub palette: Option<Vec<u8>>,
    pub transparent: Option<u8>,
    pub delay: u16,
}

impl GifFrameSpec {
    /// Rectangle filled with a single palette index.
    pub fn solid(left: u16, top: u16, width: u16, height: u16, index: u8) -> Self {
        Self {
            left,
            top,
            width,
            height,
            indices: vec![index; width as usize * height as usize],
            palette: None,
            transparent: None,
            delay: 10,
        }
    }

    pub fn with_indices(mut self, indices: Vec<u8>) -> Self {
        assert_eq!(indices.len(), self.width as usize * self.height as usize);
        self.indices = indices;
        self
    }

    pub fn with_palette(mut self, palette: Vec<u8>) -> Self {
        self.palette = Some(palette);
        self
    }

    pub fn with_transparent(mut self, index: u8) -> Self {
        self.transparent = Some(index);
        self
    }
}

/// Encode a GIF with a global palette and the given frames.
pub fn create_gif(width: u16, height: u16, global: &[u8], frames: &[GifFrameSpec]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = gif::Encoder::new(&mut buf, width, height, global).unwrap();
        for spec in frames {
            let mut frame = gif::Frame::default();
            frame.left = spec.left;
            frame.top = spec.top;
            frame.width = spec.width;
            frame.height = spec.height;
            frame.delay = spec.delay;
            frame.palette = spec.palette.clone();
            frame.transparent = spec.transparent;
            frame.buffer = Cow::Owned(spec.indices.clone());
            encoder.write_frame(&frame).unwrap();
        }
    }
    buf
}

/// The 4x4 three-frame animation used across tests:
/// - frame 0: full black canvas
/// - frame 1: 2x2 red rectangle at (2, 2)
/// - frame 2: 4x4 blue rectangle at (0, 0)
pub fn create_three_frame_gif() -> Vec<u8> {
    create_gif(
        4,
        4,
        &PALETTE,
        &[
            GifFrameSpec::solid(0, 0, 4, 4, 0),
            GifFrameSpec::solid(2, 2, 2, 2, 1),
            GifFrameSpec::solid(0, 0, 4, 4, 3),
        ],
    )
}

// =============================================================================
// PNG Builder
// =============================================================================

pub fn create_png(image: &RgbaImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

/// A small image with a distinct color per pixel.
pub fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 31) as u8, (y * 47) as u8, ((x + y) * 13) as u8, 0xFF])
    })
}

pub fn write_file(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).unwrap();
    path
}

// =============================================================================
// Scripted Frame Source
// =============================================================================

/// Frame source replaying a fixed list of results, counting pulls.
pub struct ScriptedSource {
    kind: FormatKind,
    script: VecDeque<Result<DecodedFrame, DecodeError>>,
    pub pulls: usize,
}

impl ScriptedSource {
    pub fn new(kind: FormatKind, script: Vec<Result<DecodedFrame, DecodeError>>) -> Self {
        Self {
            kind,
            script: script.into(),
            pulls: 0,
        }
    }
}

impl FrameSource for ScriptedSource {
    fn format_kind(&self) -> FormatKind {
        self.kind
    }

    fn next_frame(&mut self) -> Result<Option<DecodedFrame>, DecodeError> {
        self.pulls += 1;
        self.script.pop_front().transpose()
    }
}
