// mortgage-core/src/infrastructure/fs.rs

use crate::infrastructure::error::InfrastructureError;
use std::io::Write;
use std::path::Path;

/// Write content to a file atomically using a temporary file.
///
/// The temporary file lives in the target's directory so the final rename
/// never crosses a filesystem. On any failure the temporary file is dropped
/// (and removed) and the target keeps its previous content, if any.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let failed = |source: std::io::Error| InfrastructureError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let mut temp_file = tempfile::NamedTempFile::new_in(parent).map_err(failed)?;
    temp_file.write_all(content.as_ref()).map_err(failed)?;
    temp_file.as_file().sync_all().map_err(failed)?;

    // Atomic rename (persist)
    temp_file.persist(path).map_err(|e| failed(e.error))?;

    Ok(())
}

/// Removes `path` if it is a file. Returns whether something was deleted.
pub fn remove_file_if_exists(path: &Path) -> Result<bool, InfrastructureError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(InfrastructureError::Io(e)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_overwrites_existing() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("dim_province.csv");

        atomic_write(&file_path, "Province_Code\nON\n")?;
        atomic_write(&file_path, "Province_Code\nQC\n")?;

        assert_eq!(fs::read_to_string(&file_path)?, "Province_Code\nQC\n");
        // No stray temporary file next to the target
        assert_eq!(fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }

    #[test]
    fn test_failed_write_names_the_path() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("missing").join("out.csv");

        let err = atomic_write(&target, "x").unwrap_err();
        assert!(matches!(err, InfrastructureError::WriteFailed { ref path, .. } if *path == target));
        assert!(!target.exists());
    }

    #[test]
    fn test_remove_file_if_exists() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("monthly_summary.csv");
        fs::write(&file_path, "x")?;

        assert!(remove_file_if_exists(&file_path)?);
        assert!(!remove_file_if_exists(&file_path)?);
        Ok(())
    }
}
