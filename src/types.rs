use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A file that passed every filter and decoded cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the consolidation root.
    pub relative_path: PathBuf,
    /// Lowercase extension without the dot, empty when the file has none.
    pub extension: String,
    /// Decoded text with line endings normalized to `\n`.
    pub content: String,
}

/// Why a visited file was left out of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    Read(String),
    Decode(String),
    Binary,
    TooLarge { size: u64, limit: u64 },
    Walk(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Read(e) => write!(f, "{}", e),
            SkipReason::Decode(e) => write!(f, "not valid UTF-8 ({})", e),
            SkipReason::Binary => f.write_str("binary content"),
            SkipReason::TooLarge { size, limit } => {
                write!(f, "file too large ({} > {} bytes)", size, limit)
            }
            SkipReason::Walk(e) => write!(f, "walk error: {}", e),
        }
    }
}

/// A visited file that was not emitted, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub relative_path: PathBuf,
    pub reason: SkipReason,
}

/// Summary of a finished consolidation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsolidateReport {
    /// Where the document was written. Empty for writer-backed runs.
    pub output: PathBuf,
    /// Number of fenced blocks written.
    pub files_written: usize,
    /// Files that could not be emitted. The run still succeeded.
    pub skipped: Vec<SkippedFile>,
}
