//! Genre report accumulation and output.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Genre name a directory is filed under when its tracks carry no
/// genre tag at all.
pub const UNKNOWN_GENRE: &str = "(no genre)";

/// Accumulates which album directories belong to which genre.
///
/// Genres and directories both stay sorted, and repeated `add` calls
/// for the same pair are deduplicated, so the written report is stable
/// across runs regardless of traversal or thread scheduling.
#[derive(Debug, Default)]
pub struct GenreReport {
    genres: BTreeMap<String, BTreeSet<PathBuf>>,
}

impl GenreReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// File `directory` under `genre`. Pass [`UNKNOWN_GENRE`] for
    /// untagged directories.
    pub fn add(&mut self, genre: &str, directory: &Path) {
        self.genres
            .entry(genre.to_string())
            .or_default()
            .insert(directory.to_path_buf());
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }

    pub fn genre_count(&self) -> usize {
        self.genres.len()
    }

    /// Write the report to `path`, one block per genre:
    /// the genre name, each directory on its own line, a blank line.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        for (genre, dirs) in &self.genres {
            writeln!(out, "{genre}")?;
            for dir in dirs {
                writeln!(out, "{}", dir.display())?;
            }
            writeln!(out)?;
        }
        out.flush()?;
        Ok(())
    }
}
