//! Copy-to-local storage.
//!
//! Copies go to `<dest>.part` first and are renamed over the destination only
//! once the source stream reached end-of-stream, so a failed copy never leaves
//! a truncated file at the destination path.

mod part_file;

pub use part_file::PartFile;

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Temporary file suffix used before the final rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Default copy buffer size in bytes.
pub const DEFAULT_BUFFER_BYTES: usize = 4096;

/// Path for the temp file: appends `.part` to the final path (e.g. `a.jpg` → `a.jpg.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Copy `reader` to `writer` through a fixed buffer until end-of-stream.
/// Returns the number of bytes copied.
pub fn copy_buffered<R, W>(reader: &mut R, writer: &mut W, buffer_bytes: usize) -> io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buf = vec![0u8; buffer_bytes.max(1)];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        writer.write_all(&buf[..n])?;
        total += n as u64;
    }
    Ok(total)
}

/// Copy `reader` into a new file at `dest` (replacing any existing file).
///
/// On error the temp file is removed and `dest` is untouched.
pub fn copy_to_file<R>(reader: &mut R, dest: &Path, buffer_bytes: usize) -> io::Result<u64>
where
    R: Read + ?Sized,
{
    let mut part = PartFile::create(dest)?;
    let copied = copy_buffered(reader, part.writer(), buffer_bytes)?;
    part.finalize()?;
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailAfter {
        remaining: usize,
    }

    impl Read for FailAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.remaining == 0 {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "provider died"));
            }
            let n = buf.len().min(self.remaining);
            buf[..n].fill(0xAB);
            self.remaining -= n;
            Ok(n)
        }
    }

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("photo.png"));
        assert_eq!(p.to_string_lossy(), "photo.png.part");
        let p2 = temp_path(Path::new("/data/files/a.jpg"));
        assert_eq!(p2.to_string_lossy(), "/data/files/a.jpg.part");
    }

    #[test]
    fn copy_buffered_crosses_buffer_boundaries() {
        let body: Vec<u8> = (0u8..=255).cycle().take(DEFAULT_BUFFER_BYTES * 3 + 17).collect();
        let mut out = Vec::new();
        let n = copy_buffered(&mut body.as_slice(), &mut out, DEFAULT_BUFFER_BYTES).unwrap();
        assert_eq!(n, body.len() as u64);
        assert_eq!(out, body);
    }

    #[test]
    fn copy_to_file_replaces_destination() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("photo.png");
        std::fs::write(&dest, b"old contents that are longer").unwrap();

        let n = copy_to_file(&mut &b"new"[..], &dest, 4).unwrap();
        assert_eq!(n, 3);
        assert_eq!(std::fs::read(&dest).unwrap(), b"new");
        assert!(!temp_path(&dest).exists());
    }

    #[test]
    fn failed_copy_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("photo.png");
        let mut reader = FailAfter { remaining: 10_000 };

        let err = copy_to_file(&mut reader, &dest, DEFAULT_BUFFER_BYTES).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
        assert!(!dest.exists());
        assert!(!temp_path(&dest).exists());
    }
}
