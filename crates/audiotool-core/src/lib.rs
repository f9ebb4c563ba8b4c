//! # audiotool-core
//!
//! Core library for batch-normalizing audio file metadata and filenames.
//!
//! This crate provides the foundational functionality for:
//! - Reading and writing the five logical tag fields
//!   (artist/album/title/genre/artwork) across MP3, FLAC, MP4 and
//!   Ogg Vorbis containers through one interface
//! - Embedded cover art handling with per-format encoding rules
//! - Word-boundary-safe capitalization normalization for tag values
//!   and path segments
//! - Enumerating audio files and album directories under a scan root
//! - Building the plain-text genre report
//!
//! ## Modules
//!
//! - [`artwork`] - Cover image value type and MIME mapping
//! - [`error`] - Error types and Result alias
//! - [`normalize`] - Small-word capitalization normalizer
//! - [`paths`] - Filesystem enumeration helpers
//! - [`report`] - Genre report accumulator and writer
//! - [`tag`] - Unified tag facade and the four format adapters
//!
//! ## Example
//!
//! ```no_run
//! use audiotool_core::normalize::normalize_string;
//! use audiotool_core::tag::{Tag, TagKey};
//!
//! let mut tag = Tag::open("album/01 - Control The Storm.mp3".as_ref())?;
//! if let Some(title) = tag.text(TagKey::Title) {
//!     tag.set_text(TagKey::Title, &normalize_string(&title))?;
//!     tag.save()?;
//! }
//! # Ok::<(), audiotool_core::Error>(())
//! ```

pub mod artwork;
pub mod error;
pub mod normalize;
pub mod paths;
pub mod report;
pub mod tag;

// Error types
pub use error::{Error, Result};

// Artwork
pub use artwork::{Artwork, Mime};

// Normalizer
pub use normalize::{normalize_path, normalize_string};

// Tag facade
pub use tag::{is_audio_supported, Tag, TagKey, TagValue};

// Genre report
pub use report::{GenreReport, UNKNOWN_GENRE};
