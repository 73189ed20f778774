//! Frame compositing and animation assembly.
//!
//! - [`FrameCompositor`] draws one delta frame over the previous composited
//!   frame.
//! - [`AnimationAssembler`] pulls frames from a source and produces an
//!   [`AnimationSequence`] of complete frames, compositing only when the
//!   format stores frames as deltas.

pub mod assembler;
pub mod compositor;

pub use assembler::{AnimationAssembler, AnimationSequence, PositionedFrame};
pub use compositor::FrameCompositor;
