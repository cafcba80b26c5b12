use crate::error::BundleError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// File name written into the working directory when no output is given.
pub const DEFAULT_OUTPUT: &str = "dentis_contexto_total.md";
pub const DEFAULT_TITLE: &str = "REPOSITÓRIO COMPLETO - APP DENTIS";
pub const DEFAULT_DESCRIPTION: &str =
    "Este documento contém a estrutura e o código do projeto para fins de revisão técnica e IA.";
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "__pycache__",
    "dist",
    "build",
    ".venv",
    ".vscode",
];
pub const DEFAULT_IGNORE_EXTENSIONS: &[&str] =
    &["png", "jpg", "jpeg", "gif", "svg", "ico", "pdf", "zip", "lock"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryDetection {
    Simple,
    Accurate,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsolidateOptions {
    pub root: PathBuf,
    pub output: PathBuf,
    pub title: String,
    pub description: String,
    /// Exact directory names pruned at every depth.
    pub ignore_dirs: BTreeSet<String>,
    /// Lowercase extensions without the leading dot.
    pub ignore_extensions: BTreeSet<String>,
    /// Globs matched against the path relative to `root`.
    pub ignore_patterns: Vec<String>,
    pub respect_gitignore: bool,
    pub include_hidden: bool,
    pub max_depth: Option<usize>,
    pub follow_links: bool,
    pub sort_entries: bool,
    pub binary_detection: BinaryDetection,
    pub file_size_limit: Option<u64>,
    pub include_tree: bool,
}

impl Default for ConsolidateOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            output: PathBuf::from(DEFAULT_OUTPUT),
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            ignore_dirs: DEFAULT_IGNORE_DIRS.iter().map(|d| d.to_string()).collect(),
            ignore_extensions: DEFAULT_IGNORE_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            ignore_patterns: Vec::new(),
            respect_gitignore: false,
            include_hidden: true,
            max_depth: None,
            follow_links: false,
            sort_entries: true,
            binary_detection: BinaryDetection::None,
            file_size_limit: None,
            include_tree: false,
        }
    }
}

impl ConsolidateOptions {
    /// Loads options from a JSON document. Fields left out keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, BundleError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| BundleError::io(path, e))?;
        let mut options: Self = serde_json::from_str(&raw)
            .map_err(|e| BundleError::Config(format!("{}: {}", path.display(), e)))?;
        options.ignore_extensions = normalize_extensions(options.ignore_extensions);
        Ok(options)
    }

    /// Name the output file is matched by when excluding it from the walk.
    pub fn output_file_name(&self) -> Option<&str> {
        self.output.file_name().and_then(|n| n.to_str())
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.trim_start_matches('.').to_lowercase()
}

fn normalize_extensions(exts: impl IntoIterator<Item = String>) -> BTreeSet<String> {
    exts.into_iter().map(|e| normalize_extension(&e)).collect()
}

#[derive(Debug, Default)]
pub struct ConsolidateBuilder {
    options: ConsolidateOptions,
}

impl ConsolidateBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: ConsolidateOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    pub fn from_options(options: ConsolidateOptions) -> Self {
        Self { options }
    }
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.options.root = root.into();
        self
    }
    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.options.output = output.into();
        self
    }
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.options.title = title.into();
        self
    }
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.options.description = description.into();
        self
    }
    pub fn ignore_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.ignore_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }
    pub fn add_ignore_dir(mut self, dir: impl Into<String>) -> Self {
        self.options.ignore_dirs.insert(dir.into());
        self
    }
    pub fn ignore_extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.ignore_extensions = normalize_extensions(exts.into_iter().map(Into::into));
        self
    }
    pub fn add_ignore_extension(mut self, ext: impl AsRef<str>) -> Self {
        self.options
            .ignore_extensions
            .insert(normalize_extension(ext.as_ref()));
        self
    }
    pub fn ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.options.ignore_patterns = patterns;
        self
    }
    pub fn add_ignore_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.options.ignore_patterns.push(pattern.into());
        self
    }
    pub fn respect_gitignore(mut self, yes: bool) -> Self {
        self.options.respect_gitignore = yes;
        self
    }
    pub fn include_hidden(mut self, yes: bool) -> Self {
        self.options.include_hidden = yes;
        self
    }
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.options.max_depth = Some(depth);
        self
    }
    pub fn no_limit_depth(mut self) -> Self {
        self.options.max_depth = None;
        self
    }
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.options.follow_links = yes;
        self
    }
    pub fn sort_entries(mut self, yes: bool) -> Self {
        self.options.sort_entries = yes;
        self
    }
    pub fn binary_detection(mut self, method: BinaryDetection) -> Self {
        self.options.binary_detection = method;
        self
    }
    pub fn file_size_limit(mut self, limit: Option<u64>) -> Self {
        self.options.file_size_limit = limit;
        self
    }
    pub fn include_tree(mut self, yes: bool) -> Self {
        self.options.include_tree = yes;
        self
    }
    pub fn build(self) -> ConsolidateOptions {
        self.options
    }
}
