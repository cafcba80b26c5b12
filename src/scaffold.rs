//! Fixed backend boilerplate for the lab-orders feature.
//!
//! Writes a Drizzle schema and an Express router to their conventional locations under a
//! base directory. Existing files are overwritten.

use crate::error::BundleError;
use std::fs;
use std::path::{Path, PathBuf};
#[cfg(feature = "logging")]
use tracing;

/// A template written verbatim to a path relative to the scaffold base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaffoldFile {
    pub relative_path: &'static str,
    pub label: &'static str,
    pub contents: &'static str,
}

pub const LAB_SCHEMA: ScaffoldFile = ScaffoldFile {
    relative_path: "server/db/schema_lab.ts",
    label: "Lab schema",
    contents: include_str!("../templates/schema_lab.ts"),
};

pub const LAB_ROUTES: ScaffoldFile = ScaffoldFile {
    relative_path: "server/routes/labs.ts",
    label: "Lab API route",
    contents: include_str!("../templates/labs_route.ts"),
};

pub const LAB_BACKEND: [ScaffoldFile; 2] = [LAB_SCHEMA, LAB_ROUTES];

/// Writes one template under `base`, creating parent directories as needed.
///
/// Leading and trailing whitespace is trimmed from the template before writing.
pub fn write_scaffold_file(base: &Path, file: &ScaffoldFile) -> Result<PathBuf, BundleError> {
    let target = base.join(file.relative_path);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| BundleError::io(parent, e))?;
    }
    fs::write(&target, file.contents.trim()).map_err(|e| BundleError::io(&target, e))?;
    #[cfg(feature = "logging")]
    tracing::debug!("Wrote {} to {}", file.label, target.display());
    Ok(target)
}

/// Writes the lab schema and route handler, returning the written paths in order.
pub fn scaffold_lab_backend(base: &Path) -> Result<Vec<PathBuf>, BundleError> {
    LAB_BACKEND
        .iter()
        .map(|file| write_scaffold_file(base, file))
        .collect()
}
