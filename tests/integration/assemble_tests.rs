//! Assembly tests through the public API.
//!
//! Tests verify:
//! - Frame sources implemented outside the crate plug into the assembler
//! - Decode failures abort assembly without partial results
//! - Empty sources produce empty sequences

use image::RgbaImage;

use frameprint::{
    AnimationAssembler, DecodeError, DecodedFrame, FormatKind, FrameCompositor, FrameMetadata,
    FramePosition, GifFrameMetadata, PositionedFrame, Raster,
};

use super::test_utils::{gradient, ScriptedSource, BLUE, GREEN, RED};

fn solid(width: u32, height: u32, color: image::Rgba<u8>) -> Raster {
    Raster::from(RgbaImage::from_pixel(width, height, color))
}

fn delta(raster: Raster, left: u16, top: u16) -> DecodedFrame {
    DecodedFrame::new(
        raster,
        FrameMetadata::Gif(GifFrameMetadata {
            left,
            top,
            ..GifFrameMetadata::default()
        }),
    )
}

#[test]
fn test_scripted_gif_scenario() {
    let f0 = Raster::from(gradient(5, 5));
    let f1 = solid(2, 2, RED);
    let f2 = solid(5, 5, GREEN);

    let mut source = ScriptedSource::new(
        FormatKind::Gif,
        vec![
            Ok(DecodedFrame::full(f0.clone())),
            Ok(delta(f1.clone(), 2, 2)),
            Ok(delta(f2.clone(), 0, 0)),
        ],
    );

    let sequence = AnimationAssembler::new()
        .assemble_source(&mut source)
        .unwrap();

    let compositor = FrameCompositor::new();
    let expected_1 = compositor.composite(&f0, f1, Some(FramePosition::new(2, 2)));

    assert_eq!(sequence.frames()[0], f0);
    assert_eq!(sequence.frames()[1], expected_1);
    assert_eq!(sequence.frames()[2], f2);
}

#[test]
fn test_failure_after_two_frames() {
    let mut source = ScriptedSource::new(
        FormatKind::Gif,
        vec![
            Ok(DecodedFrame::full(solid(3, 3, RED))),
            Ok(delta(solid(1, 1, BLUE), 1, 1)),
            Err(DecodeError::Malformed {
                message: "unexpected end of image data".to_string(),
            }),
        ],
    );

    let result = AnimationAssembler::new().assemble_source(&mut source);
    assert!(matches!(result, Err(DecodeError::Malformed { .. })));
}

#[test]
fn test_empty_source() {
    let mut source = ScriptedSource::new(FormatKind::Gif, Vec::new());
    let sequence = AnimationAssembler::new()
        .assemble_source(&mut source)
        .unwrap();

    assert!(sequence.is_empty());
    assert_eq!(source.pulls, 1);
}

#[test]
fn test_still_format_ignores_positions() {
    let second = solid(1, 1, BLUE);
    let mut source = ScriptedSource::new(
        FormatKind::Png,
        vec![
            Ok(DecodedFrame::full(solid(4, 4, RED))),
            Ok(delta(second.clone(), 1, 1)),
        ],
    );

    let sequence = AnimationAssembler::new()
        .assemble_source(&mut source)
        .unwrap();
    assert_eq!(sequence.frames()[1], second);
}

#[test]
fn test_assemble_from_iterator() {
    let frames = (0..3u8).map(|i| {
        let raster = solid(2, 2, image::Rgba([i * 50, 0, 0, 0xFF]));
        Ok(PositionedFrame::at(raster, FramePosition::ORIGIN))
    });

    let sequence = AnimationAssembler::new().assemble(frames, false).unwrap();
    assert_eq!(sequence.len(), 3);
    assert_eq!(sequence.frames()[2].pixel(0, 0), image::Rgba([100, 0, 0, 0xFF]));
}
