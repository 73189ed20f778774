//! GIF end-to-end tests.
//!
//! Tests verify:
//! - Delta frames are composited onto the previous frame
//! - Transparent pixels keep the previous frame's pixels
//! - Local palettes are color-mapped onto the canvas palette
//! - Truncated streams fail the whole load

use std::sync::Arc;

use frameprint::{
    AnimationAssembler, FormatKind, FrameSource, GifFrameSource, ImageLoader, LoadError, Raster,
};

use super::test_utils::{
    create_gif, create_three_frame_gif, GifFrameSpec, BLACK, BLUE, GREEN, PALETTE, RED,
};

fn assert_all(raster: &Raster, expected: image::Rgba<u8>) {
    for y in 0..raster.height() {
        for x in 0..raster.width() {
            assert_eq!(raster.pixel(x, y), expected, "pixel ({}, {})", x, y);
        }
    }
}

// =============================================================================
// Compositing
// =============================================================================

#[test]
fn test_three_frame_gif() {
    let loaded = ImageLoader::new()
        .load_bytes(create_three_frame_gif())
        .unwrap();

    assert_eq!(loaded.kind, FormatKind::Gif);
    let frames = loaded.sequence.frames();
    assert_eq!(frames.len(), 3);

    assert_eq!(frames[0].dimensions(), (4, 4));
    assert_all(&frames[0], BLACK);

    assert_eq!(frames[1].dimensions(), (4, 4));
    for y in 0..4 {
        for x in 0..4 {
            let expected = if x >= 2 && y >= 2 { RED } else { BLACK };
            assert_eq!(frames[1].pixel(x, y), expected, "pixel ({}, {})", x, y);
        }
    }

    assert_all(&frames[2], BLUE);
}

#[test]
fn test_frames_keep_global_palette() {
    let loaded = ImageLoader::new()
        .load_bytes(create_three_frame_gif())
        .unwrap();

    let frames = loaded.sequence.frames();
    let palette = frames[0].palette().unwrap();
    for frame in frames {
        assert!(Arc::ptr_eq(frame.palette().unwrap(), palette));
    }
}

#[test]
fn test_delta_clipped_to_canvas() {
    // Second frame sticks out past the logical screen on both axes
    let data = create_gif(
        8,
        8,
        &PALETTE,
        &[
            GifFrameSpec::solid(0, 0, 3, 3, 0),
            GifFrameSpec::solid(2, 2, 4, 4, 2),
        ],
    );

    let loaded = ImageLoader::new().load_bytes(data).unwrap();
    let second = &loaded.sequence.frames()[1];

    assert_eq!(second.dimensions(), (3, 3));
    assert_eq!(second.pixel(2, 2), GREEN);
    assert_eq!(second.pixel(1, 2), BLACK);
    assert_eq!(second.pixel(2, 1), BLACK);
}

#[test]
fn test_transparent_pixels_show_previous_frame() {
    let overlay = GifFrameSpec::solid(0, 0, 2, 2, 0)
        .with_indices(vec![0, 2, 2, 0])
        .with_transparent(0);

    let data = create_gif(
        2,
        2,
        &PALETTE,
        &[GifFrameSpec::solid(0, 0, 2, 2, 1), overlay],
    );

    let loaded = ImageLoader::new().load_bytes(data).unwrap();
    let second = &loaded.sequence.frames()[1];

    assert_eq!(second.pixel(0, 0), RED);
    assert_eq!(second.pixel(1, 0), GREEN);
    assert_eq!(second.pixel(0, 1), GREEN);
    assert_eq!(second.pixel(1, 1), RED);
}

#[test]
fn test_local_palette_is_color_mapped() {
    // Index 0 of the local palette is a near-blue; index 0 of the canvas
    // palette is black. Copying indices would produce black.
    let local = GifFrameSpec::solid(1, 0, 1, 1, 0).with_palette(vec![0x05, 0x05, 0xF0, 0, 0, 0]);

    let data = create_gif(
        2,
        1,
        &PALETTE,
        &[GifFrameSpec::solid(0, 0, 2, 1, 2), local],
    );

    let loaded = ImageLoader::new().load_bytes(data).unwrap();
    let second = &loaded.sequence.frames()[1];

    assert_eq!(second.pixel(0, 0), GREEN);
    assert_eq!(second.pixel(1, 0), BLUE);
}

#[test]
fn test_single_frame_gif() {
    let data = create_gif(3, 2, &PALETTE, &[GifFrameSpec::solid(0, 0, 3, 2, 1)]);
    let loaded = ImageLoader::new().load_bytes(data).unwrap();

    assert_eq!(loaded.sequence.len(), 1);
    assert_all(&loaded.sequence.frames()[0], RED);
}

// =============================================================================
// Source
// =============================================================================

#[test]
fn test_source_reports_positions() {
    let mut source =
        GifFrameSource::new(std::io::Cursor::new(create_three_frame_gif())).unwrap();

    assert_eq!(source.screen_dimensions(), (4, 4));
    assert!(source.requires_compositing());

    let _first = source.next_frame().unwrap().unwrap();
    let second = source.next_frame().unwrap().unwrap();
    assert_eq!(second.raster.dimensions(), (2, 2));
    assert_eq!(
        second.metadata.position_for(FormatKind::Gif),
        Some(frameprint::FramePosition::new(2, 2))
    );
    assert_eq!(second.metadata.position_for(FormatKind::Png), None);
}

#[test]
fn test_assemble_source_directly() {
    let mut source =
        GifFrameSource::new(std::io::Cursor::new(create_three_frame_gif())).unwrap();
    let sequence = AnimationAssembler::new()
        .assemble_source(&mut source)
        .unwrap();

    assert_eq!(sequence.len(), 3);
    assert!(source.next_frame().unwrap().is_none());
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_truncated_gif_fails() {
    let data = create_three_frame_gif();
    let truncated = data[..data.len() - 6].to_vec();

    let result = ImageLoader::new().load_bytes(truncated);
    assert!(matches!(result, Err(LoadError::Decode(_))));
}

#[test]
fn test_header_only_gif_fails() {
    let data = create_three_frame_gif();
    let result = ImageLoader::new().load_bytes(data[..6].to_vec());
    assert!(result.is_err());
}
