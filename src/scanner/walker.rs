//! Sequential source-tree walker

use crate::types::BatchError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Depth-first walk over every non-directory entry under a root
///
/// Built on `ignore::WalkBuilder` with every filter switched off: hidden
/// files, `.gitignore` and friends are all visited. Entries within a
/// directory come in file-name order and symlinks are not followed, so a
/// symlink shows up as an entry of its own.
///
/// Directories are descended into but never yielded. Regular files and
/// symlinks are yielded; FIFOs, sockets and device nodes are skipped, as is a
/// symlink pointing at one, since opening them can block forever. An entry the
/// walker could not read is yielded as `BatchError::Walk` and the walk goes on.
///
/// # Example
/// ```no_run
/// use kopy_batch::scanner::SourceWalker;
/// use std::path::Path;
///
/// for entry in SourceWalker::new(Path::new("photos")) {
///     match entry {
///         Ok(path) => println!("{}", path.display()),
///         Err(e) => eprintln!("{e}"),
///     }
/// }
/// ```
pub struct SourceWalker {
    inner: ignore::Walk,
}

impl SourceWalker {
    /// Start a walk rooted at `root_path`
    pub fn new(root_path: &Path) -> Self {
        let inner = ignore::WalkBuilder::new(root_path)
            .standard_filters(false) // Visit hidden and ignored files too
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        Self { inner }
    }
}

impl Iterator for SourceWalker {
    type Item = Result<PathBuf, BatchError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(BatchError::Walk(e))),
            };

            // Only stdin entries lack a file type; never produced for a path walk.
            let Some(file_type) = entry.file_type() else {
                continue;
            };

            if file_type.is_dir() {
                continue;
            }

            let copyable = if file_type.is_symlink() {
                symlink_target_copyable(entry.path())
            } else {
                file_type.is_file()
            };

            if !copyable {
                debug!(path = %entry.path().display(), "skipping special file");
                continue;
            }

            return Some(Ok(entry.into_path()));
        }
    }
}

/// Broken links and links to directories are still yielded; the copy step
/// reports them.
fn symlink_target_copyable(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(metadata) => metadata.is_file() || metadata.is_dir(),
        Err(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn collect_relative(root: &Path) -> Vec<PathBuf> {
        SourceWalker::new(root)
            .map(|entry| entry.expect("walk entry should be readable"))
            .map(|path| {
                path.strip_prefix(root)
                    .expect("walked path should sit under root")
                    .to_path_buf()
            })
            .collect()
    }

    #[test]
    fn test_walk_empty_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        assert!(collect_relative(temp_dir.path()).is_empty());
    }

    #[test]
    fn test_walk_skips_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();
        fs::create_dir_all(root.join("empty/nested")).expect("Failed to create dirs");
        fs::write(root.join("empty/nested/file.txt"), b"x").expect("Failed to write");

        assert_eq!(
            collect_relative(root),
            vec![PathBuf::from("empty/nested/file.txt")]
        );
    }

    #[test]
    fn test_walk_is_depth_first_in_name_order() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();
        fs::create_dir_all(root.join("sub")).expect("Failed to create sub");
        fs::write(root.join("sub/c.txt"), b"c").expect("Failed to write");
        fs::write(root.join("z.txt"), b"z").expect("Failed to write");
        fs::write(root.join("sub/b.txt"), b"b").expect("Failed to write");
        fs::write(root.join("a.txt"), b"a").expect("Failed to write");

        assert_eq!(
            collect_relative(root),
            vec![
                PathBuf::from("a.txt"),
                PathBuf::from("sub/b.txt"),
                PathBuf::from("sub/c.txt"),
                PathBuf::from("z.txt"),
            ]
        );
    }

    #[test]
    fn test_walk_visits_hidden_and_ignored_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();
        fs::write(root.join(".gitignore"), b"*.log\n").expect("Failed to write");
        fs::write(root.join(".hidden"), b"h").expect("Failed to write");
        fs::write(root.join("debug.log"), b"l").expect("Failed to write");

        let walked = collect_relative(root);
        assert_eq!(walked.len(), 3, "all entries should be visited: {walked:?}");
        assert!(walked.contains(&PathBuf::from(".hidden")));
        assert!(walked.contains(&PathBuf::from("debug.log")));
    }

    #[test]
    #[cfg(unix)]
    fn test_walk_yields_symlink_without_following() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();
        fs::create_dir_all(root.join("real")).expect("Failed to create dir");
        fs::write(root.join("real/f.txt"), b"f").expect("Failed to write");
        std::os::unix::fs::symlink(root.join("real"), root.join("link"))
            .expect("Failed to create symlink");

        let walked = collect_relative(root);
        assert_eq!(
            walked,
            vec![PathBuf::from("link"), PathBuf::from("real/f.txt")]
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_walk_skips_fifo_and_links_to_it() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();
        fs::write(root.join("a.txt"), b"a").expect("Failed to write");
        fs::write(root.join("c.txt"), b"c").expect("Failed to write");
        let status = std::process::Command::new("mkfifo")
            .arg(root.join("b.pipe"))
            .status()
            .expect("mkfifo should run");
        assert!(status.success(), "mkfifo failed");
        std::os::unix::fs::symlink(root.join("b.pipe"), root.join("b.link"))
            .expect("Failed to create symlink");

        assert_eq!(
            collect_relative(root),
            vec![PathBuf::from("a.txt"), PathBuf::from("c.txt")]
        );
    }
}
