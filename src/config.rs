//! Command line configuration for frameprint.
//!
//! Every option can also be set through an environment variable with the
//! `FRAMEPRINT_` prefix:
//!
//! - `FRAMEPRINT_MIME` - Declared MIME type; skips signature detection
//! - `FRAMEPRINT_OUTPUT` - Report format, `text` or `json` (default: text)
//! - `FRAMEPRINT_JOBS` - Files fingerprinted concurrently (default: 4)
//! - `FRAMEPRINT_OUT_DIR` - Destination directory for `export`
//!
//! # Example
//!
//! ```
//! use clap::Parser;
//! use frameprint::config::{Cli, Command};
//!
//! let cli = Cli::parse_from(["frameprint", "hash", "a.gif", "b.png", "--per-frame"]);
//! match cli.into_command() {
//!     Command::Hash(config) => {
//!         assert_eq!(config.files.len(), 2);
//!         assert!(config.per_frame);
//!         assert!(config.validate().is_ok());
//!     }
//!     _ => unreachable!(),
//! }
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// =============================================================================
// Default Values
// =============================================================================

/// Default number of files fingerprinted concurrently.
pub const DEFAULT_JOBS: usize = 4;

/// Upper bound for `--jobs`.
pub const MAX_JOBS: usize = 256;

// =============================================================================
// CLI Arguments
// =============================================================================

/// frameprint - assemble animated images and fingerprint their pixels.
#[derive(Parser, Debug, Clone)]
#[command(name = "frameprint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn into_command(self) -> Command {
        self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fingerprint one or more image files.
    Hash(HashConfig),

    /// Write every assembled frame as `<identifier>.png`.
    Export(ExportConfig),

    /// List supported formats.
    Formats(FormatsConfig),
}

/// Report format for command output.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human readable lines
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

// =============================================================================
// Hash Command
// =============================================================================

#[derive(Args, Debug, Clone)]
pub struct HashConfig {
    /// Image files to fingerprint.
    #[arg(required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Treat every file as this MIME type instead of detecting the format.
    #[arg(long, env = "FRAMEPRINT_MIME")]
    pub mime: Option<String>,

    /// Also print the identifier of every assembled frame.
    #[arg(long, default_value_t = false)]
    pub per_frame: bool,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "FRAMEPRINT_OUTPUT")]
    pub output: OutputFormat,

    /// Number of files fingerprinted concurrently.
    #[arg(short, long, default_value_t = DEFAULT_JOBS, env = "FRAMEPRINT_JOBS")]
    pub jobs: usize,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl HashConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.files.is_empty() {
            return Err("At least one input file is required".to_string());
        }

        if self.jobs == 0 || self.jobs > MAX_JOBS {
            return Err(format!("jobs must be between 1 and {}", MAX_JOBS));
        }

        validate_mime(self.mime.as_deref())
    }
}

// =============================================================================
// Export Command
// =============================================================================

#[derive(Args, Debug, Clone)]
pub struct ExportConfig {
    /// Image file to export.
    pub file: PathBuf,

    /// Directory receiving the PNG frames. Created if missing.
    #[arg(long, env = "FRAMEPRINT_OUT_DIR")]
    pub out_dir: PathBuf,

    /// Treat the file as this MIME type instead of detecting the format.
    #[arg(long, env = "FRAMEPRINT_MIME")]
    pub mime: Option<String>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl ExportConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.out_dir.as_os_str().is_empty() {
            return Err(
                "Output directory is required. Set --out-dir or FRAMEPRINT_OUT_DIR".to_string(),
            );
        }

        if self.out_dir.is_file() {
            return Err(format!(
                "Output path '{}' exists and is not a directory",
                self.out_dir.display()
            ));
        }

        validate_mime(self.mime.as_deref())
    }
}

// =============================================================================
// Formats Command
// =============================================================================

#[derive(Args, Debug, Clone)]
pub struct FormatsConfig {
    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "FRAMEPRINT_OUTPUT")]
    pub output: OutputFormat,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

fn validate_mime(mime: Option<&str>) -> Result<(), String> {
    match mime {
        Some(m) if m.trim().is_empty() => {
            Err("MIME type must not be empty. Omit --mime to detect the format".to_string())
        }
        Some(m) if !m.contains('/') => Err(format!(
            "Invalid MIME type '{}', expected the form type/subtype",
            m
        )),
        _ => Ok(()),
    }
}

// =============================================================================
// Tests
// =============================================================================
