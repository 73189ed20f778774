//! Concurrent fingerprinting of independent files.
//!
//! Each file is loaded and hashed on the blocking thread pool. At most
//! `jobs` files are in flight at once, and results are always returned in
//! input order regardless of completion order.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error};

use crate::fingerprint::identifier;
use crate::format::FormatKind;
use crate::io::{ImageLoader, LoadedImage};
use crate::LoadError;

/// Options shared by every file of a batch.
#[derive(Debug, Clone, Default)]
pub struct HashOptions {
    /// Declared MIME type; `None` detects each file's format
    pub mime: Option<String>,

    /// Also report every frame's identifier
    pub per_frame: bool,

    /// Maximum files hashed concurrently
    pub jobs: usize,
}

/// Fingerprint report of one successfully loaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: String,
    pub format: FormatKind,
    pub frames: usize,
    pub fingerprint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_identifiers: Option<Vec<String>>,
}

/// Result for one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FileOutcome {
    Hashed(FileReport),
    Failed { path: String, error: String },
}

impl FileOutcome {
    pub fn path(&self) -> &str {
        match self {
            FileOutcome::Hashed(report) => &report.path,
            FileOutcome::Failed { path, .. } => path,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, FileOutcome::Failed { .. })
    }
}

/// Whether any file of a batch failed; the CLI exits non-zero when it did.
pub fn any_failed(outcomes: &[FileOutcome]) -> bool {
    outcomes.iter().any(FileOutcome::is_failure)
}

/// Load `path`, as `mime` when declared.
pub fn load(
    loader: &ImageLoader,
    path: &Path,
    mime: Option<&str>,
) -> Result<LoadedImage, LoadError> {
    match mime {
        Some(mime) => loader.load_path_as(path, mime),
        None => loader.load_path(path),
    }
}

/// Load and fingerprint a single file.
pub fn hash_file(loader: &ImageLoader, path: &Path, options: &HashOptions) -> FileOutcome {
    let display = path.display().to_string();

    match load(loader, path, options.mime.as_deref()) {
        Ok(loaded) => {
            let frame_identifiers = options
                .per_frame
                .then(|| loaded.sequence.iter().map(identifier).collect());

            FileOutcome::Hashed(FileReport {
                path: display,
                format: loaded.kind,
                frames: loaded.sequence.len(),
                fingerprint: loaded.sequence.fingerprint().to_hex(),
                frame_identifiers,
            })
        }
        Err(e) => FileOutcome::Failed {
            path: display,
            error: e.to_string(),
        },
    }
}

/// Fingerprint `files` concurrently, returning one outcome per file in input
/// order.
pub async fn hash_files(
    loader: Arc<ImageLoader>,
    files: &[PathBuf],
    options: HashOptions,
) -> Vec<FileOutcome> {
    let options = Arc::new(options);
    let permits = Arc::new(Semaphore::new(options.jobs.max(1)));
    let mut tasks = JoinSet::new();

    for (index, path) in files.iter().cloned().enumerate() {
        let Ok(permit) = Arc::clone(&permits).acquire_owned().await else {
            break;
        };
        let loader = Arc::clone(&loader);
        let options = Arc::clone(&options);

        tasks.spawn_blocking(move || {
            let outcome = hash_file(&loader, &path, &options);
            drop(permit);
            (index, outcome)
        });
    }

    let mut outcomes: Vec<Option<FileOutcome>> = Vec::new();
    outcomes.resize_with(files.len(), || None);

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, outcome)) => {
                debug!(path = outcome.path(), "hashed file");
                outcomes[index] = Some(outcome);
            }
            Err(e) => error!("Hash task failed: {}", e),
        }
    }

    outcomes
        .into_iter()
        .zip(files)
        .map(|(outcome, path)| {
            outcome.unwrap_or_else(|| FileOutcome::Failed {
                path: path.display().to_string(),
                error: "hashing task did not complete".to_string(),
            })
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
