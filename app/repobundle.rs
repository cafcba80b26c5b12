//! Command-line interface for repobundle.
//!
//! With no arguments it consolidates the current directory into `dentis_contexto_total.md`.
//! Flags override individual settings, on top of an optional JSON config file.

use clap::Parser;
use repobundle::{
    BinaryDetection, ConsolidateBuilder, ConsolidateOptions, ConsolidateReport, consolidate,
};
use std::path::PathBuf;
use std::process::exit;

/// repobundle — consolidate a project tree into one Markdown document
#[derive(Parser)]
#[command(name = "repobundle", version, about, long_about = None)]
struct Cli {
    /// Root directory (default current dir)
    root: Option<PathBuf>,

    /// Output file, overwritten if it exists
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file with consolidation options
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ignore patterns relative to the root (can be repeated)
    #[arg(short = 'I', long = "ignore")]
    ignore_patterns: Vec<String>,

    /// Extra directory name to prune (can be repeated)
    #[arg(long = "ignore-dir")]
    ignore_dirs: Vec<String>,

    /// Extra file extension to skip (can be repeated)
    #[arg(long = "ignore-ext")]
    ignore_extensions: Vec<String>,

    /// Max depth (unlimited if not set)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Follow symlinked directories
    #[arg(long)]
    follow_links: bool,

    /// Honor .gitignore files
    #[arg(long)]
    gitignore: bool,

    /// Skip hidden files and directories
    #[arg(long)]
    no_hidden: bool,

    /// Binary detection strategy
    #[arg(long, value_parser = parse_binary_detection)]
    binary_detection: Option<BinaryDetection>,

    /// File size limit in bytes (larger files are skipped)
    #[arg(long)]
    file_size_limit: Option<u64>,

    /// Write a directory tree section before the file blocks
    #[arg(long)]
    tree: bool,

    /// Keep the raw directory order instead of sorting by name
    #[arg(long)]
    unsorted: bool,

    /// Document title
    #[arg(long)]
    title: Option<String>,

    /// Line written under the title
    #[arg(long)]
    description: Option<String>,
}

/// Parse string into BinaryDetection enum.
fn parse_binary_detection(s: &str) -> Result<BinaryDetection, String> {
    match s {
        "simple" => Ok(BinaryDetection::Simple),
        "accurate" => Ok(BinaryDetection::Accurate),
        "none" => Ok(BinaryDetection::None),
        _ => Err(format!("invalid binary detection method: {}", s)),
    }
}

impl Cli {
    fn into_options(self) -> Result<ConsolidateOptions, repobundle::BundleError> {
        let base = match &self.config {
            Some(path) => ConsolidateOptions::from_json_file(path)?,
            None => ConsolidateOptions::default(),
        };
        let mut builder = ConsolidateBuilder::from_options(base);

        if let Some(root) = self.root {
            builder = builder.root(root);
        }
        if let Some(output) = self.output {
            builder = builder.output(output);
        }
        if let Some(title) = self.title {
            builder = builder.title(title);
        }
        if let Some(description) = self.description {
            builder = builder.description(description);
        }
        for dir in self.ignore_dirs {
            builder = builder.add_ignore_dir(dir);
        }
        for ext in self.ignore_extensions {
            builder = builder.add_ignore_extension(ext);
        }
        for pattern in self.ignore_patterns {
            builder = builder.add_ignore_pattern(pattern);
        }
        if let Some(depth) = self.max_depth {
            builder = builder.max_depth(depth);
        }
        if let Some(method) = self.binary_detection {
            builder = builder.binary_detection(method);
        }
        if self.file_size_limit.is_some() {
            builder = builder.file_size_limit(self.file_size_limit);
        }
        if self.follow_links {
            builder = builder.follow_links(true);
        }
        if self.gitignore {
            builder = builder.respect_gitignore(true);
        }
        if self.no_hidden {
            builder = builder.include_hidden(false);
        }
        if self.tree {
            builder = builder.include_tree(true);
        }
        if self.unsorted {
            builder = builder.sort_entries(false);
        }

        Ok(builder.build())
    }
}

fn main() {
    #[cfg(feature = "logging")]
    repobundle::logging::init();

    let cli = Cli::parse();
    let options = match cli.into_options() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    };

    match consolidate(&options) {
        Ok(report) => print_report(&report),
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    }
}

fn print_report(report: &ConsolidateReport) {
    // With logging on, skips were already reported as they happened.
    #[cfg(not(feature = "logging"))]
    for skipped in &report.skipped {
        eprintln!(
            "Error reading {}: {}",
            skipped.relative_path.display(),
            skipped.reason
        );
    }
    if !report.skipped.is_empty() {
        eprintln!("{} file(s) could not be read", report.skipped.len());
    }
    println!(
        "Success! Repository consolidated into: {}",
        report.output.display()
    );
}
