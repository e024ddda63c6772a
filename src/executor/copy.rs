//! Atomic file copy implementation

use crate::types::{map_io_error, BucketizeError};
use std::ffi::{OsStr, OsString};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

const COPY_BUFFER_SIZE: usize = 128 * 1024;

/// Copy a file atomically using the write-then-rename strategy
///
/// 1. Write to a uniquely named `.<name>.<random>.part` file beside the
///    destination
/// 2. Flush and sync to disk
/// 3. Carry over permissions and modification time from the source
/// 4. Rename onto the final destination, replacing whatever is there
///
/// The part file is created exclusively, so no existing file in the bucket
/// is ever truncated by it. The destination's parent directory must already
/// exist. The part file is removed when any step fails.
///
/// # Returns
/// * `Ok(u64)` - Number of bytes copied
/// * `Err(BucketizeError)` - IO error or other failure
///
/// # Example
/// ```no_run
/// use bucketize::executor::copy_file_atomic;
/// use std::path::Path;
///
/// let bytes = copy_file_atomic(
///     Path::new("card/DCIM/clip.mp4"),
///     Path::new("archive/2023/2023-05-14/clip.mp4"),
/// )?;
/// # Ok::<(), bucketize::BucketizeError>(())
/// ```
pub fn copy_file_atomic(src: &Path, dest: &Path) -> Result<u64, BucketizeError> {
    let part = create_part_file(dest)?;
    let (part, bytes) = write_part(src, part)?;

    // Dropping the handle on failure removes the part file
    part.persist(dest).map_err(|e| map_io_error(dest, e.error))?;

    Ok(bytes)
}

/// `clip.mp4` -> `.clip.mp4.XXXXXX.part` in the destination's directory.
fn create_part_file(dest: &Path) -> Result<NamedTempFile, BucketizeError> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut prefix = OsString::from(".");
    prefix.push(dest.file_name().unwrap_or(OsStr::new("transfer")));
    prefix.push(".");

    tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".part")
        .tempfile_in(dir)
        .map_err(|e| map_io_error(dir, e))
}

fn write_part(
    src: &Path,
    mut part: NamedTempFile,
) -> Result<(NamedTempFile, u64), BucketizeError> {
    let mut src_file = File::open(src).map_err(|e| map_io_error(src, e))?;

    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = src_file.read(&mut buffer).map_err(BucketizeError::Io)?;
        if bytes_read == 0 {
            break;
        }
        part.as_file_mut()
            .write_all(&buffer[..bytes_read])
            .map_err(BucketizeError::Io)?;
        total_bytes += bytes_read as u64;
    }

    part.as_file().sync_all().map_err(BucketizeError::Io)?;

    let src_metadata = fs::metadata(src).map_err(BucketizeError::Io)?;
    fs::set_permissions(part.path(), src_metadata.permissions()).map_err(BucketizeError::Io)?;

    let mtime = src_metadata.modified().map_err(BucketizeError::Io)?;
    filetime::set_file_mtime(part.path(), filetime::FileTime::from_system_time(mtime))
        .map_err(BucketizeError::Io)?;

    Ok((part, total_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_part_file_is_hidden_sibling_with_unique_name() {
        let dir = TempDir::new().expect("create dir");
        let dest = dir.path().join("clip.mp4");

        let first = create_part_file(&dest).expect("first part file");
        let second = create_part_file(&dest).expect("second part file");

        assert_ne!(first.path(), second.path());
        for part in [&first, &second] {
            assert_eq!(part.path().parent(), Some(dir.path()));
            let name = part
                .path()
                .file_name()
                .and_then(|n| n.to_str())
                .expect("utf8 name");
            assert!(name.starts_with(".clip.mp4."));
            assert!(name.ends_with(".part"));
        }
    }

    #[test]
    fn test_part_file_never_reuses_existing_name() {
        let dir = TempDir::new().expect("create dir");
        let occupant = dir.path().join("clip.mp4.part");
        fs::write(&occupant, b"keep me").expect("write occupant");

        let part = create_part_file(&dir.path().join("clip.mp4")).expect("part file");

        assert_ne!(part.path(), occupant.as_path());
        assert_eq!(fs::read(&occupant).expect("read occupant"), b"keep me");
    }
}
