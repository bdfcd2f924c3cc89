//! Single file copy with permission preservation

use crate::types::BatchError;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

const COPY_BUFFER_SIZE: usize = 128 * 1024;

/// Copy one file, creating the destination's parent directories as needed
///
/// Steps, each mapped to its own error variant:
/// 1. Open the source (`Open`)
/// 2. Ensure the destination parent chain exists (`DirCreate`)
/// 3. Create or truncate the destination (`Create`)
/// 4. Stream all bytes across (`Copy`)
/// 5. Sync the destination to disk (`Sync`)
/// 6. Read source metadata (`Stat`) and apply its permissions (`Chmod`)
///
/// There is no rollback: a failure after step 3 can leave a partially
/// written destination behind.
///
/// # Returns
/// * `Ok(u64)` - Number of bytes copied
/// * `Err(BatchError)` - The step that failed, with its path and IO cause
///
/// # Example
/// ```no_run
/// use kopy_batch::executor::copy_file;
/// use std::path::Path;
///
/// let bytes = copy_file(Path::new("source.txt"), Path::new("out/1/source.txt"))?;
/// # Ok::<(), kopy_batch::types::BatchError>(())
/// ```
pub fn copy_file(src: &Path, dst: &Path) -> Result<u64, BatchError> {
    let mut src_file = File::open(src).map_err(|source| BatchError::Open {
        path: src.to_path_buf(),
        source,
    })?;

    ensure_parent_dir(dst)?;

    let mut dst_file = File::create(dst).map_err(|source| BatchError::Create {
        path: dst.to_path_buf(),
        source,
    })?;

    let copy_err = |source: io::Error| BatchError::Copy {
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
        source,
    };

    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = src_file.read(&mut buffer).map_err(copy_err)?;

        if bytes_read == 0 {
            break; // EOF
        }

        dst_file
            .write_all(&buffer[..bytes_read])
            .map_err(copy_err)?;
        total_bytes += bytes_read as u64;
    }
    drop(src_file);

    dst_file.sync_all().map_err(|source| BatchError::Sync {
        path: dst.to_path_buf(),
        source,
    })?;
    drop(dst_file);

    let src_metadata = fs::metadata(src).map_err(|source| BatchError::Stat {
        path: src.to_path_buf(),
        source,
    })?;

    fs::set_permissions(dst, src_metadata.permissions()).map_err(|source| {
        BatchError::Chmod {
            path: dst.to_path_buf(),
            source,
        }
    })?;

    Ok(total_bytes)
}

/// Create every missing directory above `path`
///
/// Safe to call repeatedly; an existing directory is not an error.
pub fn ensure_parent_dir(path: &Path) -> Result<(), BatchError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|source| BatchError::DirCreate {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}
