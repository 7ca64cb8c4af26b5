//! # Command-Line Interface
//!
//! User-facing commands over the read-only query surface.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Canon | Book table and passage lookup | `books`, `resolve "Genesis 1-3"` |
//! | Plan | One-year reading plan | `plan today`, `plan show 42`, `plan done` |
//! | Commentary | Verse notes | `commentary show Gn 1 1`, `commentary stats` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! douay --verbose commentary show Gn 1 1
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod reference;
mod plan;
mod commentary;

pub use app::{Cli, Commands, Settings, run};
pub use output::{Output, OutputFormat};
