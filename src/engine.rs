use crate::error::BundleError;
use crate::options::{BinaryDetection, ConsolidateOptions};
use crate::output::{DocumentWriter, file_extension};
use crate::tree::build_tree_from_paths;
use crate::types::{ConsolidateReport, FileRecord, SkipReason, SkippedFile};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
#[cfg(feature = "logging")]
use tracing;

/// Bytes inspected when sniffing for binary content.
const SNIFF_LEN: usize = 4096;

enum Visit {
    File(PathBuf),
    Failed(SkippedFile),
}

/// Decides which walk entries survive. Runs inside `filter_entry`, so a rejected
/// directory is never descended into.
struct EntryFilter {
    root: PathBuf,
    ignore_dirs: BTreeSet<String>,
    ignore_extensions: BTreeSet<String>,
    output_name: Option<OsString>,
    matcher: Option<GlobSet>,
}

impl EntryFilter {
    fn new(options: &ConsolidateOptions) -> Result<Self, BundleError> {
        Ok(Self {
            root: options.root.clone(),
            ignore_dirs: options.ignore_dirs.clone(),
            ignore_extensions: options.ignore_extensions.clone(),
            output_name: options.output.file_name().map(|n| n.to_os_string()),
            matcher: build_matcher(&options.ignore_patterns)?,
        })
    }

    fn keep(&self, entry: &ignore::DirEntry) -> bool {
        if entry.depth() == 0 {
            return true;
        }
        let name = entry.file_name();
        let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
        if is_dir {
            if name.to_str().is_some_and(|n| self.ignore_dirs.contains(n)) {
                return false;
            }
        } else {
            if self.output_name.as_deref() == Some(name) {
                return false;
            }
            let ext = file_extension(entry.path());
            if !ext.is_empty() && self.ignore_extensions.contains(&ext) {
                return false;
            }
        }
        match &self.matcher {
            Some(matcher) => !matcher.is_match(relative_to(&self.root, entry.path())),
            None => true,
        }
    }
}

fn build_matcher(patterns: &[String]) -> Result<Option<GlobSet>, BundleError> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut glob_builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .map_err(|e| BundleError::Pattern(format!("'{}': {}", pattern, e)))?;
        glob_builder.add(glob);
    }
    glob_builder
        .build()
        .map(Some)
        .map_err(|e| BundleError::Pattern(format!("failed to build glob set: {}", e)))
}

struct Walker {
    inner: ignore::Walk,
    root: PathBuf,
}

impl Walker {
    fn new(options: &ConsolidateOptions) -> Result<Self, BundleError> {
        validate_root(&options.root)?;
        let filter = EntryFilter::new(options)?;
        let gitignore = options.respect_gitignore;
        let mut builder = WalkBuilder::new(&options.root);
        builder
            .standard_filters(false)
            .hidden(!options.include_hidden)
            .git_ignore(gitignore)
            .git_exclude(gitignore)
            .git_global(gitignore)
            .parents(gitignore)
            .require_git(false)
            .max_depth(options.max_depth)
            .follow_links(options.follow_links);
        if options.sort_entries {
            builder.sort_by_file_name(|a, b| a.cmp(b));
        }
        builder.filter_entry(move |entry| filter.keep(entry));
        Ok(Self {
            inner: builder.build(),
            root: options.root.clone(),
        })
    }

    fn into_visits(self) -> impl Iterator<Item = Visit> + Send + 'static {
        let root = self.root;
        self.inner.filter_map(move |result| match result {
            // Symlinks to files are read, symlinked directories are not entered.
            Ok(entry) if entry.depth() > 0 && entry.path().is_file() => {
                Some(Visit::File(entry.into_path()))
            }
            Ok(_) => None,
            Err(e) => {
                let relative_path = walk_error_path(&e)
                    .map(|p| relative_to(&root, p).to_path_buf())
                    .unwrap_or_default();
                Some(Visit::Failed(SkippedFile {
                    relative_path,
                    reason: SkipReason::Walk(e.to_string()),
                }))
            }
        })
    }
}

fn walk_error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } => walk_error_path(err),
        ignore::Error::WithLineNumber { err, .. } => walk_error_path(err),
        ignore::Error::Loop { child, .. } => Some(child.as_path()),
        _ => None,
    }
}

fn validate_root(root: &Path) -> Result<(), BundleError> {
    let metadata = fs::metadata(root).map_err(|e| BundleError::io(root, e))?;
    if !metadata.is_dir() {
        return Err(BundleError::InvalidPath(format!(
            "{} is not a directory",
            root.display()
        )));
    }
    Ok(())
}

fn relative_to<'a>(root: &Path, path: &'a Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}

/// Reads a whole file as strict UTF-8 with `\r\n` and `\r` folded into `\n`.
fn read_file_text(
    path: &Path,
    binary_detection: BinaryDetection,
    size_limit: Option<u64>,
) -> Result<String, SkipReason> {
    if let Some(limit) = size_limit {
        let size = fs::metadata(path)
            .map_err(|e| SkipReason::Read(e.to_string()))?
            .len();
        if size > limit {
            return Err(SkipReason::TooLarge { size, limit });
        }
    }
    let bytes = fs::read(path).map_err(|e| SkipReason::Read(e.to_string()))?;
    let sample = &bytes[..bytes.len().min(SNIFF_LEN)];
    let is_binary = match binary_detection {
        BinaryDetection::Simple => sample.contains(&0),
        BinaryDetection::Accurate => content_inspector::inspect(sample).is_binary(),
        BinaryDetection::None => false,
    };
    if is_binary {
        return Err(SkipReason::Binary);
    }
    let text =
        String::from_utf8(bytes).map_err(|e| SkipReason::Decode(e.utf8_error().to_string()))?;
    Ok(normalize_newlines(text))
}

fn normalize_newlines(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Lazily reads every file the walk selects, one at a time.
///
/// Each item is either a decoded [`FileRecord`] or a [`SkippedFile`] explaining why
/// the file could not be emitted. Skips never end the stream.
pub struct FileStream {
    visits: Box<dyn Iterator<Item = Visit> + Send>,
    root: PathBuf,
    binary_detection: BinaryDetection,
    file_size_limit: Option<u64>,
}

impl FileStream {
    pub fn new(options: &ConsolidateOptions) -> Result<Self, BundleError> {
        let walker = Walker::new(options)?;
        Ok(Self::from_visits(options, walker.into_visits()))
    }

    fn from_visits(
        options: &ConsolidateOptions,
        visits: impl Iterator<Item = Visit> + Send + 'static,
    ) -> Self {
        Self {
            visits: Box::new(visits),
            root: options.root.clone(),
            binary_detection: options.binary_detection,
            file_size_limit: options.file_size_limit,
        }
    }
}

impl Iterator for FileStream {
    type Item = Result<FileRecord, SkippedFile>;
    fn next(&mut self) -> Option<Self::Item> {
        let path = match self.visits.next()? {
            Visit::File(p) => p,
            Visit::Failed(skipped) => return Some(Err(skipped)),
        };
        let relative_path = relative_to(&self.root, &path).to_path_buf();
        let result = match read_file_text(&path, self.binary_detection, self.file_size_limit) {
            Ok(content) => Ok(FileRecord {
                extension: file_extension(&path),
                relative_path,
                content,
            }),
            Err(reason) => Err(SkippedFile {
                relative_path,
                reason,
            }),
        };
        Some(result)
    }
}

/// Writes the consolidated document to `options.output`, replacing any existing file.
///
/// A missing root, an invalid ignore pattern, or an output that cannot be created or
/// written aborts the run. The first two are detected before the output is touched.
/// Files that cannot be read are listed in the report instead.
pub fn consolidate(options: &ConsolidateOptions) -> Result<ConsolidateReport, BundleError> {
    let walker = Walker::new(options)?;
    let file = File::create(&options.output).map_err(|e| BundleError::io(&options.output, e))?;
    let report = write_document(options, walker, BufWriter::new(file))?;
    #[cfg(feature = "logging")]
    tracing::debug!(
        "Consolidated {} files into {} ({} skipped)",
        report.files_written,
        report.output.display(),
        report.skipped.len()
    );
    Ok(report)
}

/// Same as [`consolidate`], but writes the document into `writer`.
pub fn consolidate_to_writer<W: Write>(
    options: &ConsolidateOptions,
    writer: W,
) -> Result<ConsolidateReport, BundleError> {
    let walker = Walker::new(options)?;
    write_document(options, walker, writer)
}

fn write_document<W: Write>(
    options: &ConsolidateOptions,
    walker: Walker,
    writer: W,
) -> Result<ConsolidateReport, BundleError> {
    #[cfg(feature = "logging")]
    tracing::debug!("Starting consolidation of {}", options.root.display());
    let mut document = DocumentWriter::new(writer, &options.output);
    document.write_preamble(&options.title, &options.description)?;

    let stream = if options.include_tree {
        let visits: Vec<Visit> = walker.into_visits().collect();
        let paths: Vec<PathBuf> = visits
            .iter()
            .filter_map(|v| match v {
                Visit::File(p) => Some(relative_to(&options.root, p).to_path_buf()),
                Visit::Failed(_) => None,
            })
            .collect();
        let tree = build_tree_from_paths(&options.root, &paths);
        document.write_tree(&tree)?;
        FileStream::from_visits(options, visits.into_iter())
    } else {
        FileStream::from_visits(options, walker.into_visits())
    };

    let mut report = ConsolidateReport {
        output: options.output.clone(),
        ..Default::default()
    };
    for item in stream {
        match item {
            Ok(record) => {
                document.write_record(&record)?;
                report.files_written += 1;
            }
            Err(skipped) => {
                #[cfg(feature = "logging")]
                tracing::warn!(
                    "Error reading {}: {}",
                    skipped.relative_path.display(),
                    skipped.reason
                );
                report.skipped.push(skipped);
            }
        }
    }
    document.finish()?;
    Ok(report)
}
