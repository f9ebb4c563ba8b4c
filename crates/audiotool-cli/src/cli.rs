//! Command-line parsing and dispatch
//!
//! Usage:
//!   audiotool fix-tags <dir>                 Normalize tags and filenames
//!   audiotool rename-dirs <dir>              Normalize directory names
//!   audiotool collect-genres <dir> [-o FILE] Write a genre report
//!   audiotool find-uncovered <dir>           List directories without cover images
//!   audiotool attach-artwork <dir>           Embed per-directory cover images

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::commands;

/// Default report filename for collect-genres.
const DEFAULT_REPORT: &str = "genres.txt";

#[derive(Debug, Clone)]
pub enum CliCommand {
    FixTags { dir: PathBuf },
    RenameDirs { dir: PathBuf },
    CollectGenres { dir: PathBuf, output: PathBuf },
    FindUncovered { dir: PathBuf },
    AttachArtwork { dir: PathBuf },
}

/// Parse CLI arguments into a command
pub fn parse_args(args: &[String]) -> Result<CliCommand, String> {
    let mut command: Option<&str> = None;
    let mut dir: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        match arg.as_str() {
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    return Err(format!("{} requires a value", arg));
                }
                output = Some(PathBuf::from(&args[i]));
            }
            "fix-tags" | "rename-dirs" | "collect-genres" | "find-uncovered"
            | "attach-artwork" => {
                if command.is_some() {
                    return Err(format!("Unexpected second command: {}", arg));
                }
                command = Some(arg.as_str());
            }
            other if other.starts_with('-') => {
                return Err(format!("Unknown option: {}", other));
            }
            other => {
                if command.is_none() {
                    return Err(format!("Unknown command: {}", other));
                }
                if dir.is_some() {
                    return Err(format!("Unexpected extra argument: {}", other));
                }
                dir = Some(PathBuf::from(other));
            }
        }
        i += 1;
    }

    let command = command.ok_or_else(|| {
        "No command specified. Use: fix-tags, rename-dirs, collect-genres, \
         find-uncovered, or attach-artwork"
            .to_string()
    })?;
    let dir = dir.ok_or_else(|| format!("{} requires a directory", command))?;
    if !dir.is_dir() {
        return Err(format!("Not a directory: {}", dir.display()));
    }
    if output.is_some() && command != "collect-genres" {
        return Err(format!("{} does not take --output", command));
    }

    Ok(match command {
        "fix-tags" => CliCommand::FixTags { dir },
        "rename-dirs" => CliCommand::RenameDirs { dir },
        "collect-genres" => CliCommand::CollectGenres {
            dir,
            output: output.unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT)),
        },
        "find-uncovered" => CliCommand::FindUncovered { dir },
        "attach-artwork" => CliCommand::AttachArtwork { dir },
        _ => unreachable!(),
    })
}

pub fn print_help() {
    println!("audiotool v{}", env!("CARGO_PKG_VERSION"));
    println!("Batch metadata and filename normalization for music libraries");
    println!();
    println!("USAGE:");
    println!("    audiotool <command> <directory> [options]");
    println!();
    println!("COMMANDS:");
    println!("    fix-tags <dir>         Normalize artist/album/title tags and filenames");
    println!("    rename-dirs <dir>      Normalize directory names, deepest first");
    println!("    collect-genres <dir>   Group album directories by genre tag");
    println!("    find-uncovered <dir>   List directories without a cover image file");
    println!("    attach-artwork <dir>   Embed each directory's cover image into its tracks");
    println!();
    println!("OPTIONS:");
    println!("    -o, --output <FILE>    Report file for collect-genres (default: genres.txt)");
    println!("    -h, --help             Show this help message");
    println!();
    println!("Ctrl-C finishes the file in flight, then stops.");
}

/// Run a parsed command with Ctrl-C cancellation wired up.
pub fn run(command: CliCommand) -> anyhow::Result<()> {
    let cancelled = Arc::new(AtomicBool::new(false));
    {
        let cancelled = Arc::clone(&cancelled);
        ctrlc::set_handler(move || {
            eprintln!("\nStopping after the current file...");
            cancelled.store(true, Ordering::SeqCst);
        })?;
    }

    match command {
        CliCommand::FixTags { dir } => commands::run_fix_tags(&dir, &cancelled),
        CliCommand::RenameDirs { dir } => commands::run_rename_dirs(&dir, &cancelled),
        CliCommand::CollectGenres { dir, output } => {
            commands::run_collect_genres(&dir, &output, &cancelled)
        }
        CliCommand::FindUncovered { dir } => commands::run_find_uncovered(&dir, &cancelled),
        CliCommand::AttachArtwork { dir } => commands::run_attach_artwork(&dir, &cancelled),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_fix_tags() {
        let dir = TempDir::new().unwrap();
        let parsed = parse_args(&args(&["fix-tags", dir.path().to_str().unwrap()])).unwrap();
        assert!(matches!(parsed, CliCommand::FixTags { .. }));
    }

    #[test]
    fn test_parse_collect_genres_default_output() {
        let dir = TempDir::new().unwrap();
        let parsed =
            parse_args(&args(&["collect-genres", dir.path().to_str().unwrap()])).unwrap();
        match parsed {
            CliCommand::CollectGenres { output, .. } => {
                assert_eq!(output, PathBuf::from("genres.txt"));
            }
            other => panic!("wrong command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_collect_genres_output_flag() {
        let dir = TempDir::new().unwrap();
        let parsed = parse_args(&args(&[
            "collect-genres",
            dir.path().to_str().unwrap(),
            "-o",
            "out.txt",
        ]))
        .unwrap();
        match parsed {
            CliCommand::CollectGenres { output, .. } => {
                assert_eq!(output, PathBuf::from("out.txt"));
            }
            other => panic!("wrong command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_output_outside_collect_genres() {
        let dir = TempDir::new().unwrap();
        let err = parse_args(&args(&[
            "fix-tags",
            dir.path().to_str().unwrap(),
            "-o",
            "out.txt",
        ]))
        .unwrap_err();
        assert!(err.contains("--output"), "{err}");
    }

    #[test]
    fn test_parse_rejects_unknown_command() {
        assert!(parse_args(&args(&["frobnicate", "/tmp"])).is_err());
    }

    #[test]
    fn test_parse_rejects_missing_directory() {
        assert!(parse_args(&args(&["fix-tags"])).is_err());
        assert!(parse_args(&args(&["fix-tags", "/definitely/not/here"])).is_err());
    }
}
