//! Temp file that becomes the destination on `finalize` and is removed otherwise.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use super::temp_path;

/// A `<dest>.part` file being written.
///
/// Dropping without calling [`PartFile::finalize`] closes and deletes the temp
/// file, which covers every early-return and error path of a copy.
pub struct PartFile {
    // Field order matters: the file is closed before the guard removes it.
    writer: BufWriter<File>,
    guard: TempGuard,
    final_path: PathBuf,
}

impl PartFile {
    /// Create (or truncate) `<final_path>.part`.
    pub fn create(final_path: &Path) -> io::Result<Self> {
        let temp_path = temp_path(final_path);
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            guard: TempGuard {
                path: temp_path,
                armed: true,
            },
            final_path: final_path.to_path_buf(),
        })
    }

    pub fn writer(&mut self) -> &mut BufWriter<File> {
        &mut self.writer
    }

    pub fn temp_path(&self) -> &Path {
        &self.guard.path
    }

    /// Flush, close and rename the temp file over the destination.
    pub fn finalize(self) -> io::Result<()> {
        let PartFile {
            writer,
            mut guard,
            final_path,
        } = self;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        drop(file);
        std::fs::rename(&guard.path, &final_path)?;
        guard.armed = false;
        Ok(())
    }
}

/// Removes the temp file on drop unless disarmed.
struct TempGuard {
    path: PathBuf,
    armed: bool,
}

impl Drop for TempGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to remove partial copy"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn dropped_part_file_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("a.jpg");
        let mut part = PartFile::create(&dest).unwrap();
        part.writer().write_all(b"half").unwrap();
        let tp = part.temp_path().to_path_buf();
        assert!(tp.exists());
        drop(part);
        assert!(!tp.exists());
        assert!(!dest.exists());
    }

    #[test]
    fn finalize_renames() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("a.jpg");
        let mut part = PartFile::create(&dest).unwrap();
        part.writer().write_all(b"whole").unwrap();
        let tp = part.temp_path().to_path_buf();
        part.finalize().unwrap();
        assert!(!tp.exists());
        assert_eq!(std::fs::read(&dest).unwrap(), b"whole");
    }
}
