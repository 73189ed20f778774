//! Fingerprint integration tests.
//!
//! Tests verify:
//! - Identifiers survive a PNG export and reload
//! - Indexed GIF frames and their PNG exports share identifiers
//! - Fingerprints are stable when computed concurrently

use std::sync::Arc;

use frameprint::{
    fingerprint, fingerprint_raster, identifier, write_png_file, ImageLoader, Raster,
    RasterEncoder,
};

use super::test_utils::{create_png, create_three_frame_gif, gradient, write_file};

fn is_identifier(id: &str, width: u32, height: u32) -> bool {
    let prefix = format!("{}x{}-", width, height);
    match id.strip_prefix(&prefix) {
        Some(digest) => {
            digest.len() == 64 && digest.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
        }
        None => false,
    }
}

// =============================================================================
// Identifiers
// =============================================================================

#[test]
fn test_identifier_shape_for_loaded_frames() {
    let loaded = ImageLoader::new()
        .load_bytes(create_three_frame_gif())
        .unwrap();

    for frame in loaded.sequence.iter() {
        let id = identifier(frame);
        assert!(is_identifier(&id, 4, 4), "unexpected identifier {}", id);
        assert_eq!(id, identifier(frame));
    }
}

#[test]
fn test_distinct_frames_distinct_identifiers() {
    let loaded = ImageLoader::new()
        .load_bytes(create_three_frame_gif())
        .unwrap();

    let ids: Vec<String> = loaded.sequence.iter().map(identifier).collect();
    assert_ne!(ids[0], ids[1]);
    assert_ne!(ids[1], ids[2]);
    assert_ne!(ids[0], ids[2]);
}

#[test]
fn test_png_round_trip_keeps_identifier() {
    let raster = Raster::from(gradient(7, 5));
    let png = RasterEncoder::new().encode_png(&raster).unwrap();

    let loaded = ImageLoader::new().load_bytes(png).unwrap();
    assert_eq!(identifier(&loaded.sequence.frames()[0]), identifier(&raster));
}

#[test]
fn test_gif_frames_match_exported_png() {
    let dir = tempfile::tempdir().unwrap();
    let loader = ImageLoader::new();
    let loaded = loader.load_bytes(create_three_frame_gif()).unwrap();

    for frame in loaded.sequence.iter() {
        let id = identifier(frame);
        let path = dir.path().join(format!("{}.png", id));
        write_png_file(&path, frame).unwrap();

        let reloaded = loader.load_path(&path).unwrap();
        let reloaded_frame = reloaded.sequence.first().unwrap();
        assert!(reloaded_frame.palette().is_none());
        assert_eq!(identifier(reloaded_frame), id);
    }
}

#[test]
fn test_file_and_bytes_agree() {
    let dir = tempfile::tempdir().unwrap();
    let data = create_png(&gradient(3, 3));
    let path = write_file(dir.path(), "gradient.png", &data);

    let loader = ImageLoader::new();
    let from_file = loader.load_path(&path).unwrap();
    let from_bytes = loader.load_bytes(data).unwrap();

    assert_eq!(
        from_file.sequence.fingerprint(),
        from_bytes.sequence.fingerprint()
    );
}

#[test]
fn test_sequence_fingerprint_covers_all_frames() {
    let loaded = ImageLoader::new()
        .load_bytes(create_three_frame_gif())
        .unwrap();

    let frames = loaded.sequence.frames();
    assert_eq!(loaded.sequence.fingerprint(), fingerprint(frames));
    assert_ne!(loaded.sequence.fingerprint(), fingerprint(&frames[..2]));
    assert_ne!(loaded.sequence.fingerprint(), fingerprint_raster(&frames[0]));
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test]
async fn test_concurrent_fingerprints_agree() {
    let loaded = ImageLoader::new()
        .load_bytes(create_three_frame_gif())
        .unwrap();
    let sequence = Arc::new(loaded.sequence);
    let expected = sequence.fingerprint();

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..8 {
        let sequence = Arc::clone(&sequence);
        tasks.spawn_blocking(move || sequence.fingerprint());
    }

    while let Some(result) = tasks.join_next().await {
        assert_eq!(result.unwrap(), expected);
    }
}
