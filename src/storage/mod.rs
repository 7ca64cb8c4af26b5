//! # Storage Layer
//!
//! File-backed inputs and state for the Douay reader.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Commentary | TSV, one file per source | `<commentary_dir>/{haydock,lapide,douai-1609}.tsv` |
//! | Plan progress | JSON | `<data dir>/progress.json` |
//! | Config | TOML | `<config dir>/config.toml` |
//!
//! ## Key Types
//!
//! - [`CommentaryLoader`] - Builds the read-only commentary store
//! - [`ProgressStore`] - Read/write plan progress with file locking
//! - [`Config`] - User configuration

mod commentary;
mod config;
mod progress;

pub use commentary::CommentaryLoader;
pub use config::{Config, ConfigError, OutputFormat};
pub use progress::{ProgressError, ProgressStore};
