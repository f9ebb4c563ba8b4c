//! The batch operations behind each CLI command.
//!
//! Per-file failures are reported and skipped so one unreadable track
//! never aborts a library-wide pass; only driver-level failures (for
//! example an unwritable report file) bubble up as errors.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Context;
use rayon::prelude::*;

use audiotool_core::normalize::normalize_string;
use audiotool_core::paths::{audio_files, directories, first_audio_per_dir};
use audiotool_core::tag::is_audio_supported;
use audiotool_core::{Artwork, GenreReport, Tag, TagKey, UNKNOWN_GENRE};

/// Tag fields fix-tags normalizes. Genre stays verbatim: genre names
/// are vocabulary, not titles.
const NORMALIZED_KEYS: [TagKey; 3] = [TagKey::Artist, TagKey::Album, TagKey::Title];

pub fn run_fix_tags(dir: &Path, cancelled: &Arc<AtomicBool>) -> anyhow::Result<()> {
    let files = audio_files(dir);
    println!("Checking {} audio files under {}", files.len(), dir.display());

    let fixed = AtomicUsize::new(0);
    let renamed = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    files.par_iter().for_each(|path| {
        if cancelled.load(Ordering::SeqCst) {
            return;
        }
        match fix_one_file(path) {
            Ok(outcome) => {
                if outcome.tags_changed {
                    fixed.fetch_add(1, Ordering::Relaxed);
                }
                if let Some(new_path) = outcome.renamed_to {
                    println!("{} -> {}", path.display(), new_path.display());
                    renamed.fetch_add(1, Ordering::Relaxed);
                }
            }
            Err(e) => {
                eprintln!("Warning: {}: {}", path.display(), e);
                failed.fetch_add(1, Ordering::Relaxed);
            }
        }
    });

    println!(
        "Fixed tags in {} files, renamed {}, {} failures",
        fixed.load(Ordering::Relaxed),
        renamed.load(Ordering::Relaxed),
        failed.load(Ordering::Relaxed)
    );
    Ok(())
}

struct FixOutcome {
    tags_changed: bool,
    renamed_to: Option<PathBuf>,
}

fn fix_one_file(path: &Path) -> anyhow::Result<FixOutcome> {
    let mut tag = Tag::open(path)?;

    let mut tags_changed = false;
    for key in NORMALIZED_KEYS {
        if let Some(value) = tag.text(key) {
            let normalized = normalize_string(&value);
            if normalized != value {
                tag.set_text(key, &normalized)?;
                tags_changed = true;
            }
        }
    }
    if tags_changed {
        tag.save()?;
    }

    let renamed_to = rename_normalized(path)?;
    Ok(FixOutcome {
        tags_changed,
        renamed_to,
    })
}

/// Rename the last path segment to its normalized form; `None` when it
/// is already normalized.
fn rename_normalized(path: &Path) -> anyhow::Result<Option<PathBuf>> {
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name,
        None => return Ok(None),
    };
    let normalized = normalize_string(name);
    if normalized == name {
        return Ok(None);
    }

    let new_path = match path.parent() {
        Some(parent) => parent.join(&normalized),
        None => PathBuf::from(&normalized),
    };
    fs::rename(path, &new_path)
        .with_context(|| format!("renaming to {}", new_path.display()))?;
    Ok(Some(new_path))
}

pub fn run_rename_dirs(dir: &Path, cancelled: &Arc<AtomicBool>) -> anyhow::Result<()> {
    // Deepest first: a directory is renamed only after everything
    // under it, so pending paths never go stale. The scan root stays
    // where the user pointed us.
    let mut renamed = 0usize;
    for subdir in directories(dir, false) {
        if cancelled.load(Ordering::SeqCst) {
            break;
        }
        if subdir == dir {
            continue;
        }
        match rename_normalized(&subdir) {
            Ok(Some(new_path)) => {
                println!("{} -> {}", subdir.display(), new_path.display());
                renamed += 1;
            }
            Ok(None) => {}
            Err(e) => eprintln!("Warning: {}: {}", subdir.display(), e),
        }
    }
    println!("Renamed {} directories", renamed);
    Ok(())
}

pub fn run_collect_genres(
    dir: &Path,
    output: &Path,
    cancelled: &Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let files = first_audio_per_dir(dir);
    println!("Reading genres from {} directories", files.len());

    let report = Mutex::new(GenreReport::new());

    files.par_iter().for_each(|path| {
        if cancelled.load(Ordering::SeqCst) {
            return;
        }
        let directory = match path.parent() {
            Some(parent) => parent,
            None => return,
        };
        let genre = match Tag::open(path) {
            Ok(tag) => tag.text(TagKey::Genre),
            Err(e) => {
                eprintln!("Warning: {}: {}", path.display(), e);
                return;
            }
        };
        let genre = genre.unwrap_or_else(|| UNKNOWN_GENRE.to_string());
        report.lock().unwrap().add(&genre, directory);
    });

    let report = report.into_inner().unwrap();
    report
        .write_to(output)
        .with_context(|| format!("writing {}", output.display()))?;
    println!(
        "Wrote {} genres to {}",
        report.genre_count(),
        output.display()
    );
    Ok(())
}

pub fn run_find_uncovered(dir: &Path, cancelled: &Arc<AtomicBool>) -> anyhow::Result<()> {
    let mut uncovered = 0usize;
    for subdir in directories(dir, true) {
        if cancelled.load(Ordering::SeqCst) {
            break;
        }
        if cover_image(&subdir).is_none() {
            println!("{}", subdir.display());
            uncovered += 1;
        }
    }
    eprintln!("{} directories without a cover image", uncovered);
    Ok(())
}

pub fn run_attach_artwork(dir: &Path, cancelled: &Arc<AtomicBool>) -> anyhow::Result<()> {
    let mut embedded = 0usize;
    let mut skipped = 0usize;

    for subdir in directories(dir, true) {
        if cancelled.load(Ordering::SeqCst) {
            break;
        }
        let image = match cover_image(&subdir) {
            Some(image) => image,
            None => continue,
        };
        let artwork = match Artwork::from_file(&image) {
            Ok(artwork) => artwork,
            Err(e) => {
                eprintln!("Warning: {}: {}", image.display(), e);
                continue;
            }
        };

        for track in direct_audio_files(&subdir) {
            if cancelled.load(Ordering::SeqCst) {
                break;
            }
            match embed_artwork(&track, artwork.clone()) {
                Ok(()) => embedded += 1,
                Err(e) => {
                    eprintln!("Warning: {}: {}", track.display(), e);
                    skipped += 1;
                }
            }
        }
    }

    println!("Embedded artwork in {} files, {} failures", embedded, skipped);
    Ok(())
}

fn embed_artwork(track: &Path, artwork: Artwork) -> anyhow::Result<()> {
    let mut tag = Tag::open(track)?;
    // Identical cover already embedded: skip the rewrite.
    if tag.artwork().as_ref() == Some(&artwork) {
        return Ok(());
    }
    tag.set_artwork(artwork)?;
    tag.save()?;
    Ok(())
}

/// First artwork-supported image directly inside `dir`, in name order.
fn cover_image(dir: &Path) -> Option<PathBuf> {
    let mut images: Vec<PathBuf> = fs::read_dir(dir)
        .ok()?
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_file() && Artwork::is_supported(p))
        .collect();
    images.sort();
    images.into_iter().next()
}

/// Supported audio files directly inside `dir` (no recursion).
pub(crate) fn direct_audio_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.is_file() && is_audio_supported(p))
            .collect(),
        Err(e) => {
            eprintln!("Warning: {}: {}", dir.display(), e);
            Vec::new()
        }
    };
    files.sort();
    files
}
