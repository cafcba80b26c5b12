//! Internal module for building a tree representation from a list of paths.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Builds a visual tree string from a root directory and file paths relative to it.
///
/// Intermediate directories are derived from the paths and printed once. The output is
/// similar to the `tree` command.
pub(crate) fn build_tree_from_paths(root: &Path, paths: &[PathBuf]) -> String {
    let mut sorted: Vec<_> = paths.iter().collect();
    sorted.sort_by(|a, b| a.components().cmp(b.components()));

    let mut lines = Vec::new();
    lines.push(format!(".  # {}", root.display()));

    let mut seen_dirs = BTreeSet::new();
    for path in sorted {
        let components: Vec<_> = path.components().collect();
        let mut prefix = PathBuf::new();
        for (depth, component) in components.iter().enumerate() {
            prefix.push(component);
            let is_file = depth + 1 == components.len();
            if !is_file && !seen_dirs.insert(prefix.clone()) {
                continue;
            }
            let name = component.as_os_str().to_string_lossy();
            lines.push(format!("{}├── {}", "│   ".repeat(depth), name));
        }
    }

    lines.join("\n")
}
