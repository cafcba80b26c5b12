//! # Repobundle
//!
//! `repobundle` walks a project tree and consolidates every text file into a single Markdown
//! document, one fenced code block per file, for review or for pasting into an assistant.
//!
//! Ignored directories are pruned before the walk descends into them, ignored extensions and the
//! output file itself are never emitted, and a file that cannot be read or decoded as UTF-8 is
//! recorded in the [`ConsolidateReport`] without stopping the run.
//!
//! The crate also ships [`scaffold`], which writes fixed backend boilerplate for the lab-orders
//! feature.
//!
//! # Features
//!
//! - `logging` (default): Enables logging via the `tracing` crate and the [`logging`] setup
//!   used by the binaries.
//!
//! # Example
//!
//! ```no_run
//! use repobundle::{ConsolidateBuilder, consolidate};
//!
//! let options = ConsolidateBuilder::new(".")
//!     .output("context.md")
//!     .add_ignore_dir("target")
//!     .add_ignore_extension("bin")
//!     .build();
//!
//! let report = consolidate(&options).expect("Failed to consolidate directory");
//!
//! println!("Wrote {} files to {}", report.files_written, report.output.display());
//! for skipped in &report.skipped {
//!     eprintln!("Skipped {}: {}", skipped.relative_path.display(), skipped.reason);
//! }
//! ```

mod engine;
mod error;
#[cfg(feature = "logging")]
pub mod logging;
mod options;
pub mod output;
pub mod scaffold;
mod tree;
mod types;

pub use engine::{FileStream, consolidate, consolidate_to_writer};
pub use error::BundleError;
pub use options::{
    BinaryDetection, ConsolidateBuilder, ConsolidateOptions, DEFAULT_DESCRIPTION,
    DEFAULT_IGNORE_DIRS, DEFAULT_IGNORE_EXTENSIONS, DEFAULT_OUTPUT, DEFAULT_TITLE,
};
pub use output::language_tag;
pub use types::{ConsolidateReport, FileRecord, SkipReason, SkippedFile};
