//! Registry and loader tests.
//!
//! Tests verify:
//! - MIME resolution with aliases, parameters and unknown types
//! - Signature detection for every built-in format
//! - Declared MIME types drive decoding

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};

use frameprint::{FormatError, FormatKind, FormatRegistry, ImageLoader, LoadError};

use super::test_utils::{create_png, create_three_frame_gif, gradient};

fn encode(image: &RgbaImage, format: ImageFormat) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    match format {
        ImageFormat::Jpeg | ImageFormat::Bmp => image::DynamicImage::ImageRgba8(image.clone())
            .into_rgb8()
            .write_to(&mut out, format)
            .unwrap(),
        _ => image.write_to(&mut out, format).unwrap(),
    }
    out.into_inner()
}

#[test]
fn test_mime_resolution() {
    let registry = FormatRegistry::new();

    assert_eq!(registry.resolve_decoder("image/gif"), Ok(FormatKind::Gif));
    assert_eq!(registry.resolve_decoder("IMAGE/PNG"), Ok(FormatKind::Png));
    assert_eq!(registry.resolve_decoder("image/jpg"), Ok(FormatKind::Jpeg));
    assert_eq!(registry.resolve_decoder("image/x-ms-bmp"), Ok(FormatKind::Bmp));
    assert_eq!(
        registry.resolve_encoder("image/png; charset=binary"),
        Ok(FormatKind::Png)
    );
    assert!(matches!(
        registry.resolve_decoder("image/tiff"),
        Err(FormatError::UnsupportedFormat { .. })
    ));
}

#[test]
fn test_only_gif_requires_compositing() {
    for kind in FormatKind::ALL {
        assert_eq!(kind.requires_compositing(), kind == FormatKind::Gif);
    }
}

#[test]
fn test_detect_every_format() {
    let image = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 0xFF]));
    let loader = ImageLoader::new();

    for (format, kind) in [
        (ImageFormat::Png, FormatKind::Png),
        (ImageFormat::Jpeg, FormatKind::Jpeg),
        (ImageFormat::Bmp, FormatKind::Bmp),
        (ImageFormat::Gif, FormatKind::Gif),
    ] {
        let data = encode(&image, format);
        let loaded = loader.load_bytes(data).unwrap();
        assert_eq!(loaded.kind, kind);
        assert_eq!(loaded.sequence.len(), 1);
        assert_eq!(loaded.sequence.frames()[0].dimensions(), (2, 2));
    }
}

#[test]
fn test_declared_mime_used_for_decoding() {
    let loader = ImageLoader::new();

    let loaded = loader
        .load_bytes_as(create_three_frame_gif(), "image/gif")
        .unwrap();
    assert_eq!(loaded.sequence.len(), 3);

    let result = loader.load_bytes_as(create_png(&gradient(2, 2)), "image/gif");
    assert!(matches!(result, Err(LoadError::Decode(_))));
}

#[test]
fn test_unknown_declared_mime() {
    let result = ImageLoader::new().load_bytes_as(create_png(&gradient(2, 2)), "text/plain");
    assert!(matches!(result, Err(LoadError::Format(_))));
}
