//! Markdown rendering for consolidated documents.
//!
//! The layout is fixed: a title and description preamble, then one block per file made of a
//! `--- ` separator, an `### ARQUIVO:` header with the relative path, and a fenced code block
//! tagged with the file extension.

use crate::error::BundleError;
use crate::types::FileRecord;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Header label preceding every relative path.
pub const FILE_HEADER: &str = "### ARQUIVO:";
/// Fence tag for files without an extension.
pub const FALLBACK_TAG: &str = "text";

/// Lowercase extension of `path` without the dot, or an empty string.
pub fn file_extension(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Fence language tag for `path`: its lowercase extension, or `text` when it has none.
pub fn language_tag(path: &Path) -> String {
    fence_tag(&file_extension(path)).to_string()
}

fn fence_tag(extension: &str) -> &str {
    if extension.is_empty() {
        FALLBACK_TAG
    } else {
        extension
    }
}

/// Renders the title and description lines that open every document.
pub fn format_preamble(title: &str, description: &str) -> String {
    format!("# {}\n{}\n\n", title, description)
}

/// Renders one file block, closing fence and trailing blank line included.
pub fn format_record(record: &FileRecord) -> String {
    let mut out = String::with_capacity(record.content.len() + 64);
    out.push_str("--- \n");
    out.push_str(&format!(
        "{} {}\n",
        FILE_HEADER,
        record.relative_path.display()
    ));
    out.push_str(&format!("```{}\n", fence_tag(&record.extension)));
    out.push_str(&record.content);
    out.push_str("\n```\n\n");
    out
}

fn format_tree(tree: &str) -> String {
    format!("## ESTRUTURA\n```text\n{}\n```\n\n", tree)
}

/// Append-only writer for a consolidated document.
///
/// Every write error is reported against `path`, the document's destination.
pub struct DocumentWriter<W: Write> {
    inner: W,
    path: PathBuf,
}

impl<W: Write> DocumentWriter<W> {
    pub fn new(inner: W, path: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            path: path.into(),
        }
    }

    pub fn write_preamble(&mut self, title: &str, description: &str) -> Result<(), BundleError> {
        self.write_str(&format_preamble(title, description))
    }

    pub fn write_tree(&mut self, tree: &str) -> Result<(), BundleError> {
        self.write_str(&format_tree(tree))
    }

    pub fn write_record(&mut self, record: &FileRecord) -> Result<(), BundleError> {
        self.write_str(&format_record(record))
    }

    /// Flushes buffered output and hands back the underlying writer.
    pub fn finish(mut self) -> Result<W, BundleError> {
        self.inner
            .flush()
            .map_err(|e| BundleError::io(&self.path, e))?;
        Ok(self.inner)
    }

    fn write_str(&mut self, s: &str) -> Result<(), BundleError> {
        self.inner
            .write_all(s.as_bytes())
            .map_err(|e| BundleError::io(&self.path, e))
    }
}
