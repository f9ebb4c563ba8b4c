//! Unified tag access over the four supported container formats
//!
//! One capability set (artist, album, title, genre, artwork) exposed
//! identically over ID3v2 frames (MP3), vorbis comments + picture
//! blocks (FLAC), vorbis comments with a base64 picture entry
//! (Ogg Vorbis) and ilst atoms (MP4). Callers go through [`Tag::open`];
//! the adapters are never constructed directly.

mod flac;
mod mp3;
mod mp4;
mod ogg;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::artwork::Artwork;
use crate::error::{Error, Result};

/// Extensions the facade dispatches on. Extension is the only format
/// detection mechanism; there is no content sniffing at this layer.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "flac", "m4a", "ogg"];

/// The closed set of logical tag fields every adapter supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKey {
    Artist,
    Album,
    Title,
    Genre,
    Artwork,
}

impl TagKey {
    /// The four text-valued keys, in a stable order.
    pub const TEXT_KEYS: [TagKey; 4] =
        [TagKey::Artist, TagKey::Album, TagKey::Title, TagKey::Genre];

    pub fn as_str(self) -> &'static str {
        match self {
            TagKey::Artist => "artist",
            TagKey::Album => "album",
            TagKey::Title => "title",
            TagKey::Genre => "genre",
            TagKey::Artwork => "artwork",
        }
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TagKey {
    type Err = Error;

    /// Keys outside the capability set are a contract violation, not a
    /// missing optional.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "artist" => Ok(TagKey::Artist),
            "album" => Ok(TagKey::Album),
            "title" => Ok(TagKey::Title),
            "genre" => Ok(TagKey::Genre),
            "artwork" => Ok(TagKey::Artwork),
            other => Err(Error::UnknownKey(other.to_string())),
        }
    }
}

/// A value for one tag field: text for the four text keys, an
/// [`Artwork`] for the artwork key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue {
    Text(String),
    Artwork(Artwork),
}

impl TagValue {
    fn kind(&self) -> &'static str {
        match self {
            TagValue::Text(_) => "text",
            TagValue::Artwork(_) => "artwork",
        }
    }
}

/// The seam the four format adapters implement.
///
/// `get` returns `None` for an absent field; absence is a normal
/// state, never an error. `set` only mutates memory; nothing reaches
/// disk until `save`.
pub(crate) trait Backend {
    fn get(&self, key: TagKey) -> Option<TagValue>;
    fn set(&mut self, key: TagKey, value: TagValue) -> Result<()>;
    fn save(&mut self) -> Result<()>;
}

/// Reject a value whose type does not fit the key. Shared by all four
/// adapters so the capability-set contract cannot drift per format.
pub(crate) fn value_type_error(key: TagKey, value: &TagValue) -> Error {
    Error::ValueType {
        key: key.as_str(),
        given: value.kind(),
    }
}

/// One opened audio file's metadata.
///
/// Owns the parsed in-memory container plus unsaved mutations. Saving
/// re-serializes the whole container back over the source file; a `Tag`
/// that is never saved leaves the file untouched.
pub struct Tag {
    backend: Box<dyn Backend>,
    path: PathBuf,
}

impl Tag {
    /// Open the tags of an audio file, dispatching on its extension.
    ///
    /// Extensions outside the fixed table are
    /// [`Error::UnsupportedFormat`]; a file the matching container
    /// parser cannot parse is [`Error::Parse`].
    pub fn open(path: &Path) -> Result<Self> {
        let ext = lowercase_extension(path)
            .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))?;

        let backend: Box<dyn Backend> = match ext.as_str() {
            "mp3" => Box::new(mp3::Mp3Backend::open(path)?),
            "flac" => Box::new(flac::FlacBackend::open(path)?),
            "m4a" => Box::new(mp4::Mp4Backend::open(path)?),
            "ogg" => Box::new(ogg::OggBackend::open(path)?),
            _ => return Err(Error::UnsupportedFormat(ext)),
        };

        Ok(Self {
            backend,
            path: path.to_path_buf(),
        })
    }

    /// Current in-memory value for a field, reflecting the most recent
    /// `set` over the originally parsed value.
    pub fn get(&self, key: TagKey) -> Option<TagValue> {
        self.backend.get(key)
    }

    /// Set a field in memory. Type-checked against the key.
    pub fn set(&mut self, key: TagKey, value: TagValue) -> Result<()> {
        self.backend.set(key, value)
    }

    /// Serialize the container back over the source file.
    pub fn save(&mut self) -> Result<()> {
        self.backend.save()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Text value of a text key, `None` when absent (or when called on
    /// the artwork key).
    pub fn text(&self, key: TagKey) -> Option<String> {
        match self.backend.get(key) {
            Some(TagValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn set_text(&mut self, key: TagKey, value: &str) -> Result<()> {
        self.backend.set(key, TagValue::Text(value.to_string()))
    }

    pub fn artwork(&self) -> Option<Artwork> {
        match self.backend.get(TagKey::Artwork) {
            Some(TagValue::Artwork(art)) => Some(art),
            _ => None,
        }
    }

    pub fn set_artwork(&mut self, artwork: Artwork) -> Result<()> {
        self.backend.set(TagKey::Artwork, TagValue::Artwork(artwork))
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tag").field("path", &self.path).finish()
    }
}

/// Whether `path` has one of the supported audio extensions.
pub fn is_audio_supported(path: &Path) -> bool {
    lowercase_extension(path)
        .map(|ext| AUDIO_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}
