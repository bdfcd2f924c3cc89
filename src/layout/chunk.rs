//! Chunk computation for `<target>/<batch>/<chunk>` placement

use crate::types::ChunkMode;
use std::path::{Component, Path, PathBuf};

/// Compute the path fragment appended after the batch folder
///
/// `Relative` strips `source_root` from `path`. `Legacy` strips the file's
/// grandparent directory instead, keeping `<parent>/<file>`; when neither
/// prefix applies the whole path is used.
///
/// The result only ever contains normal components, so joining it onto a
/// batch folder cannot escape that folder.
///
/// # Example
/// ```
/// use kopy_batch::layout::chunk_for;
/// use kopy_batch::types::ChunkMode;
/// use std::path::{Path, PathBuf};
///
/// let root = Path::new("photos");
/// let file = Path::new("photos/2023/trip/img.jpg");
///
/// assert_eq!(chunk_for(file, root, ChunkMode::Relative), PathBuf::from("2023/trip/img.jpg"));
/// assert_eq!(chunk_for(file, root, ChunkMode::Legacy), PathBuf::from("trip/img.jpg"));
/// ```
pub fn chunk_for(path: &Path, source_root: &Path, mode: ChunkMode) -> PathBuf {
    let raw = match mode {
        ChunkMode::Relative => path
            .strip_prefix(source_root)
            .unwrap_or_else(|_| legacy_chunk(path)),
        ChunkMode::Legacy => legacy_chunk(path),
    };

    sanitize(raw)
}

/// `<target>/<batch>/<chunk>`
pub fn destination_for(target: &Path, batch: u64, chunk: &Path) -> PathBuf {
    target.join(batch.to_string()).join(chunk)
}

fn legacy_chunk(path: &Path) -> &Path {
    path.parent()
        .and_then(Path::parent)
        .and_then(|grandparent| path.strip_prefix(grandparent).ok())
        .unwrap_or(path)
}

fn sanitize(path: &Path) -> PathBuf {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part),
            Component::Prefix(_)
            | Component::RootDir
            | Component::CurDir
            | Component::ParentDir => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_top_level_file() {
        let chunk = chunk_for(Path::new("src/a.txt"), Path::new("src"), ChunkMode::Relative);
        assert_eq!(chunk, PathBuf::from("a.txt"));
    }

    #[test]
    fn test_relative_nested_file() {
        let chunk = chunk_for(
            Path::new("/data/src/sub/deep/b.txt"),
            Path::new("/data/src"),
            ChunkMode::Relative,
        );
        assert_eq!(chunk, PathBuf::from("sub/deep/b.txt"));
    }

    #[test]
    fn test_relative_with_trailing_slash_root() {
        // Path::strip_prefix compares components, so a trailing slash is harmless.
        let chunk = chunk_for(
            Path::new("/data/src/sub/b.txt"),
            Path::new("/data/src/"),
            ChunkMode::Relative,
        );
        assert_eq!(chunk, PathBuf::from("sub/b.txt"));
    }

    #[test]
    fn test_relative_falls_back_to_legacy_outside_root() {
        let chunk = chunk_for(
            Path::new("/elsewhere/dir/c.txt"),
            Path::new("/data/src"),
            ChunkMode::Relative,
        );
        assert_eq!(chunk, PathBuf::from("dir/c.txt"));
    }

    #[test]
    fn test_legacy_keeps_parent_and_file() {
        let chunk = chunk_for(
            Path::new("src/sub/deep/b.txt"),
            Path::new("src"),
            ChunkMode::Legacy,
        );
        assert_eq!(chunk, PathBuf::from("deep/b.txt"));
    }

    #[test]
    fn test_legacy_shallow_path_keeps_whole_path() {
        let chunk = chunk_for(Path::new("src/a.txt"), Path::new("src"), ChunkMode::Legacy);
        assert_eq!(chunk, PathBuf::from("src/a.txt"));
    }

    #[test]
    fn test_legacy_absolute_single_segment_is_made_relative() {
        let chunk = chunk_for(Path::new("/a.txt"), Path::new("/"), ChunkMode::Legacy);
        assert_eq!(chunk, PathBuf::from("a.txt"));
    }

    #[test]
    fn test_sanitize_drops_parent_and_current_dir() {
        assert_eq!(sanitize(Path::new("./x/../y.txt")), PathBuf::from("x/y.txt"));
    }

    #[test]
    fn test_destination_for_joins_batch_number() {
        let dest = destination_for(Path::new("out"), 3, Path::new("sub/b.txt"));
        assert_eq!(dest, PathBuf::from("out/3/sub/b.txt"));
    }
}
