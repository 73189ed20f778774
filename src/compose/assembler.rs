//! Animation assembler.
//!
//! Pulls frames from a source in order and turns them into an
//! [`AnimationSequence`] of complete frames.
//!
//! # Assembly Logic
//!
//! 1. Formats that do not need compositing: every raster is appended as
//!    decoded and positions are ignored.
//! 2. Formats that do: the first raster is appended as decoded; each later
//!    raster is composited over the last appended one at its position.
//! 3. A frame without a usable position is a full frame, not an error.
//! 4. End of stream finishes assembly, even after zero frames.
//! 5. A decode error aborts assembly; frames collected so far are dropped.

use tracing::debug;

use crate::error::DecodeError;
use crate::format::FrameSource;
use crate::raster::{FramePosition, Raster};

use super::compositor::FrameCompositor;

// =============================================================================
// Positioned Frame
// =============================================================================

/// A decoded raster and the offset it should be drawn at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedFrame {
    pub raster: Raster,
    pub position: Option<FramePosition>,
}

impl PositionedFrame {
    pub fn new(raster: Raster, position: Option<FramePosition>) -> Self {
        Self { raster, position }
    }

    /// A complete frame with no offset.
    pub fn full(raster: Raster) -> Self {
        Self::new(raster, None)
    }

    /// A delta frame drawn at `position`.
    pub fn at(raster: Raster, position: FramePosition) -> Self {
        Self::new(raster, Some(position))
    }
}

// =============================================================================
// Animation Sequence
// =============================================================================

/// Fully resolved frames in playback order.
///
/// Frames are only appended during assembly; a returned sequence exposes no
/// way to modify them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnimationSequence {
    frames: Vec<Raster>,
}

impl AnimationSequence {
    /// Sequence holding a single still image.
    pub fn single(raster: Raster) -> Self {
        Self {
            frames: vec![raster],
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[Raster] {
        &self.frames
    }

    pub fn get(&self, index: usize) -> Option<&Raster> {
        self.frames.get(index)
    }

    pub fn first(&self) -> Option<&Raster> {
        self.frames.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Raster> {
        self.frames.iter()
    }

    pub fn into_frames(self) -> Vec<Raster> {
        self.frames
    }

    fn push(&mut self, raster: Raster) {
        self.frames.push(raster);
    }
}

impl From<Vec<Raster>> for AnimationSequence {
    fn from(frames: Vec<Raster>) -> Self {
        Self { frames }
    }
}

impl IntoIterator for AnimationSequence {
    type Item = Raster;
    type IntoIter = std::vec::IntoIter<Raster>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.into_iter()
    }
}

impl<'a> IntoIterator for &'a AnimationSequence {
    type Item = &'a Raster;
    type IntoIter = std::slice::Iter<'a, Raster>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

// =============================================================================
// Animation Assembler
// =============================================================================

/// Builds animation sequences from decoded frames.
///
/// # Example
///
/// ```
/// use frameprint::compose::{AnimationAssembler, PositionedFrame};
/// use frameprint::raster::{FramePosition, Raster};
/// use image::{Rgba, RgbaImage};
///
/// let frames = vec![
///     Ok(PositionedFrame::full(Raster::from(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]))))),
///     Ok(PositionedFrame::at(
///         Raster::from(RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255]))),
///         FramePosition::new(3, 3),
///     )),
/// ];
///
/// let sequence = AnimationAssembler::new().assemble(frames, true).unwrap();
/// assert_eq!(sequence.len(), 2);
/// assert_eq!(sequence.frames()[1].dimensions(), (4, 4));
/// assert_eq!(sequence.frames()[1].pixel(3, 3), Rgba([255, 255, 255, 255]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AnimationAssembler {
    compositor: FrameCompositor,
}

impl AnimationAssembler {
    pub fn new() -> Self {
        Self::with_compositor(FrameCompositor::new())
    }

    pub fn with_compositor(compositor: FrameCompositor) -> Self {
        Self { compositor }
    }

    /// Assemble frames pulled from `frames`, in order.
    ///
    /// # Arguments
    ///
    /// * `frames` - Finite, source-ordered frames; an `Err` item is a decode failure
    /// * `requires_compositing` - Whether frames after the first are deltas
    ///
    /// # Errors
    ///
    /// Returns the first [`DecodeError`] yielded by `frames`. No partial
    /// sequence is returned in that case.
    pub fn assemble<I>(
        &self,
        frames: I,
        requires_compositing: bool,
    ) -> Result<AnimationSequence, DecodeError>
    where
        I: IntoIterator<Item = Result<PositionedFrame, DecodeError>>,
    {
        let mut sequence = AnimationSequence::default();

        for (index, frame) in frames.into_iter().enumerate() {
            let PositionedFrame { raster, position } = frame?;

            let resolved = match sequence.frames.last() {
                Some(previous) if requires_compositing => {
                    if position.is_none() {
                        debug!(frame = index, "no frame position, using frame as-is");
                    }
                    self.compositor.composite(previous, raster, position)
                }
                _ => raster,
            };

            debug!(
                frame = index,
                width = resolved.width(),
                height = resolved.height(),
                model = resolved.color_model().name(),
                "appended frame"
            );
            sequence.push(resolved);
        }

        debug!(
            frames = sequence.len(),
            requires_compositing, "assembly complete"
        );
        Ok(sequence)
    }

    /// Assemble every frame of `source`.
    ///
    /// The compositing decision and the format kind are read once, before the
    /// first frame is pulled. Frame positions come from each frame's metadata
    /// and are dropped when they do not belong to the source's format.
    pub fn assemble_source<S>(&self, source: &mut S) -> Result<AnimationSequence, DecodeError>
    where
        S: FrameSource + ?Sized,
    {
        let kind = source.format_kind();
        let requires_compositing = source.requires_compositing();

        debug!(format = kind.name(), requires_compositing, "assembling frames");

        let frames = std::iter::from_fn(|| source.next_frame().transpose()).map(|result| {
            result.map(|frame| {
                let position = frame.metadata.position_for(kind);
                PositionedFrame::new(frame.raster, position)
            })
        });

        self.assemble(frames, requires_compositing)
    }
}

// =============================================================================
// Tests
// =============================================================================
