//! Atomic file replacement shared by the env and manifest stores

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write `contents` to `path` via a temporary file in the same directory,
/// so readers never observe a partially written file.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory: {}", parent.display()))?;

    let mut tmp = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temporary file in {}", parent.display()))?;
    tmp.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write temporary file for {}", path.display()))?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace {}", path.display()))?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "file written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join(".env");

        write_atomic(&path, "BOT_TOKEN=x\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "BOT_TOKEN=x\n");
    }

    #[test]
    fn test_replaces_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("botango.toml");
        std::fs::write(&path, "old").unwrap();

        write_atomic(&path, "new").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        // only the target remains, no stray temporary files
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
