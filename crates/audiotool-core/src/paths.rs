//! Library traversal helpers.
//!
//! All traversal the batch operations need, in one place: audio files
//! under a root, one representative audio file per directory, and the
//! directory tree itself. Unreadable entries are logged and skipped so
//! a single bad permission bit never aborts a batch.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::tag::is_audio_supported;

/// Every supported audio file under `root`, recursively.
pub fn audio_files(root: &Path) -> Vec<PathBuf> {
    walk(root)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_audio_supported(path))
        .collect()
}

/// At most one supported audio file per directory under `root`.
///
/// Directories where every track shares identical genre tags (the
/// common case for an album) only need one file inspected.
pub fn first_audio_per_dir(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();

    for entry in walk(root) {
        if !entry.file_type().is_file() || !is_audio_supported(entry.path()) {
            continue;
        }
        let parent = entry.path().parent().map(Path::to_path_buf);
        if seen.insert(parent) {
            out.push(entry.into_path());
        }
    }
    out
}

/// Directories under `root`, the root itself included, deepest first
/// so renaming a child never invalidates the recorded path of its
/// parent. With `with_files` set, only directories directly holding at
/// least one file are returned. The root qualifies like any other
/// directory, so a scan aimed straight at an album directory still
/// sees it.
pub fn directories(root: &Path, with_files: bool) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for entry in walk_contents_first(root) {
        if !entry.file_type().is_dir() {
            continue;
        }
        if with_files && !contains_files(entry.path()) {
            continue;
        }
        out.push(entry.into_path());
    }
    out
}

fn contains_files(dir: &Path) -> bool {
    std::fs::read_dir(dir)
        .map(|entries| entries.flatten().any(|e| e.path().is_file()))
        .unwrap_or(false)
}

fn walk(root: &Path) -> impl Iterator<Item = walkdir::DirEntry> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(log_and_skip)
}

fn walk_contents_first(root: &Path) -> impl Iterator<Item = walkdir::DirEntry> {
    WalkDir::new(root)
        .sort_by_file_name()
        .contents_first(true)
        .into_iter()
        .filter_map(log_and_skip)
}

fn log_and_skip(entry: walkdir::Result<walkdir::DirEntry>) -> Option<walkdir::DirEntry> {
    match entry {
        Ok(entry) => Some(entry),
        Err(e) => {
            warn!("skipping unreadable entry: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"").unwrap();
        path
    }

    #[test]
    fn test_audio_files_filters_by_extension() {
        let root = TempDir::new().unwrap();
        let a = touch(root.path(), "a.mp3");
        let b = touch(root.path(), "b.flac");
        touch(root.path(), "cover.jpg");
        touch(root.path(), "notes.txt");

        let files = audio_files(root.path());
        assert_eq!(files, vec![a, b]);
    }

    #[test]
    fn test_audio_files_recurses() {
        let root = TempDir::new().unwrap();
        let sub = root.path().join("album");
        fs::create_dir(&sub).unwrap();
        let a = touch(&sub, "track.ogg");

        assert_eq!(audio_files(root.path()), vec![a]);
    }

    #[test]
    fn test_first_audio_per_dir_takes_one_per_directory() {
        let root = TempDir::new().unwrap();
        let one = root.path().join("one");
        let two = root.path().join("two");
        fs::create_dir(&one).unwrap();
        fs::create_dir(&two).unwrap();
        let first = touch(&one, "01.mp3");
        touch(&one, "02.mp3");
        let other = touch(&two, "01.flac");

        assert_eq!(first_audio_per_dir(root.path()), vec![first, other]);
    }

    #[test]
    fn test_first_audio_per_dir_with_interleaved_subdir() {
        // "b" sorts between the two root-level tracks, so the walk
        // leaves the root directory and comes back to it.
        let root = TempDir::new().unwrap();
        let sub = root.path().join("b");
        fs::create_dir(&sub).unwrap();
        let a = touch(root.path(), "a.mp3");
        let inner = touch(&sub, "track.mp3");
        touch(root.path(), "c.mp3");

        assert_eq!(first_audio_per_dir(root.path()), vec![a, inner]);
    }

    #[test]
    fn test_directories_deepest_first() {
        let root = TempDir::new().unwrap();
        let outer = root.path().join("artist");
        let inner = outer.join("album");
        fs::create_dir_all(&inner).unwrap();
        touch(&outer, "loose.mp3");
        touch(&inner, "track.mp3");

        let dirs = directories(root.path(), false);
        assert_eq!(dirs, vec![inner, outer, root.path().to_path_buf()]);
    }

    #[test]
    fn test_directories_with_files_excludes_fileless() {
        let root = TempDir::new().unwrap();
        let empty = root.path().join("empty");
        let scans = root.path().join("scans");
        fs::create_dir(&empty).unwrap();
        fs::create_dir(&scans).unwrap();
        touch(&scans, "front.jpg");

        assert_eq!(directories(root.path(), true), vec![scans.clone()]);
        assert_eq!(
            directories(root.path(), false),
            vec![empty, scans, root.path().to_path_buf()]
        );
    }

    #[test]
    fn test_directories_includes_qualifying_root() {
        // A scan aimed straight at an album directory: the root holds
        // the files itself and has no subdirectories.
        let root = TempDir::new().unwrap();
        touch(root.path(), "track.mp3");

        assert_eq!(
            directories(root.path(), true),
            vec![root.path().to_path_buf()]
        );
    }
}
