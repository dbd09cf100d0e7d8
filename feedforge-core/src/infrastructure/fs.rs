use crate::infrastructure::error::InfrastructureError;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Write content to a file atomically using a temporary file.
///
/// The temporary file lives in the target's directory so the final rename
/// never crosses filesystems. The target is either fully written or untouched.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let mut staged = StagedFile::create(path.as_ref())?;
    staged.write_all(content.as_ref())?;
    staged.commit()?;
    Ok(())
}

/// A file being written under a temporary name.
///
/// Dropping it without [`StagedFile::commit`] removes the temporary file, so
/// a failed run never leaves a half-written feed behind.
pub struct StagedFile {
    temp: NamedTempFile,
    target: PathBuf,
}

impl StagedFile {
    pub fn create(target: &Path) -> Result<Self, InfrastructureError> {
        let parent = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        Ok(Self {
            temp,
            target: target.to_path_buf(),
        })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Atomic rename onto the target path.
    pub fn commit(mut self) -> Result<PathBuf, InfrastructureError> {
        self.temp.as_file_mut().flush()?;
        self.temp
            .persist(&self.target)
            .map_err(|e| InfrastructureError::Io(e.error))?;
        Ok(self.target)
    }
}

impl Write for StagedFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.temp.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.temp.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_creates_file() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("stats.json");

        atomic_write(&file_path, "{}")?;

        assert_eq!(fs::read_to_string(file_path)?, "{}");
        Ok(())
    }

    #[test]
    fn test_atomic_write_overwrites_existing() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("stats.json");

        atomic_write(&file_path, "Initial")?;
        atomic_write(&file_path, "Updated")?;

        assert_eq!(fs::read_to_string(file_path)?, "Updated");
        Ok(())
    }

    #[test]
    fn test_uncommitted_file_leaves_nothing_behind() -> Result<()> {
        let dir = tempdir()?;
        let target = dir.path().join("feed.jsonl");
        {
            let mut staged = StagedFile::create(&target)?;
            staged.write_all(b"partial")?;
        }
        assert!(!target.exists());
        assert_eq!(fs::read_dir(dir.path())?.count(), 0);
        Ok(())
    }

    #[test]
    fn test_missing_parent_directories_are_created() -> Result<()> {
        let dir = tempdir()?;
        let target = dir.path().join("nested/out/feed.tsv");
        let mut staged = StagedFile::create(&target)?;
        staged.write_all(b"id\n")?;
        assert_eq!(staged.commit()?, target);
        assert!(target.exists());
        Ok(())
    }
}
