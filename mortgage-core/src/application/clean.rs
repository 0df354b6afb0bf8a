// mortgage-core/src/application/clean.rs

use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{info, instrument};

use crate::application::pipeline::output_files;
use crate::error::MortgageError;
use crate::infrastructure::fs::remove_file_if_exists;

/// Deletes the files a run produces from `output_dir`, then the directory
/// itself if nothing else is left in it. Other files are never touched.
#[instrument]
pub fn clean_outputs(output_dir: &Path) -> Result<Vec<PathBuf>, MortgageError> {
    // Zero-Trust Path Traversal Guard
    let escapes = output_dir
        .components()
        .any(|c| matches!(c, Component::ParentDir));
    if output_dir.as_os_str().is_empty() || output_dir.parent().is_none() || escapes {
        return Err(MortgageError::UnsafePath(output_dir.display().to_string()));
    }

    let mut removed = Vec::new();
    if !output_dir.is_dir() {
        return Ok(removed);
    }

    for name in output_files() {
        let path = output_dir.join(&name);
        if remove_file_if_exists(&path)? {
            info!(path = ?path, "Artifact removed");
            removed.push(path);
        }
    }

    if fs::read_dir(output_dir)?.next().is_none() {
        fs::remove_dir(output_dir)?;
    }

    Ok(removed)
}
