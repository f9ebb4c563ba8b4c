//! Vorbis-comment adapter for Ogg Vorbis files.
//!
//! Artwork rides in the `METADATA_BLOCK_PICTURE` comment as a base64
//! FLAC picture block; the codec below stores and parses that encoding
//! so the rest of the crate only ever sees raw image bytes.

use std::path::{Path, PathBuf};

use lofty::config::{ParseOptions, ParsingMode, WriteOptions};
use lofty::file::FileType;
use lofty::picture::{MimeType, Picture, PictureType};
use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::tag::TagType;

use crate::artwork::{Artwork, Mime};
use crate::error::{Error, Result};
use crate::tag::{value_type_error, Backend, TagKey, TagValue};

pub(crate) struct OggBackend {
    tag: lofty::tag::Tag,
    path: PathBuf,
}

impl OggBackend {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let parse = |e: &dyn std::fmt::Display| Error::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        let tagged_file = Probe::open(path)
            .map_err(|e| parse(&e))?
            .options(
                ParseOptions::new()
                    .read_cover_art(true)
                    .parsing_mode(ParsingMode::BestAttempt),
            )
            .read()
            .map_err(|e| parse(&e))?;

        // The extension table already filtered on .ogg; this rejects
        // other codecs (opus, speex) hiding behind the extension.
        if tagged_file.file_type() != FileType::Vorbis {
            return Err(parse(&"not an ogg vorbis stream"));
        }

        let tag = tagged_file
            .tag(TagType::VorbisComments)
            .cloned()
            .unwrap_or_else(|| lofty::tag::Tag::new(TagType::VorbisComments));

        Ok(Self {
            tag,
            path: path.to_path_buf(),
        })
    }
}

fn mime_of(picture: &Picture) -> Option<Mime> {
    match picture.mime_type()? {
        MimeType::Jpeg => Some(Mime::Jpeg),
        MimeType::Png => Some(Mime::Png),
        _ => None,
    }
}

impl Backend for OggBackend {
    fn get(&self, key: TagKey) -> Option<TagValue> {
        match key {
            TagKey::Artist => self.tag.artist().map(|s| TagValue::Text(s.to_string())),
            TagKey::Album => self.tag.album().map(|s| TagValue::Text(s.to_string())),
            TagKey::Title => self.tag.title().map(|s| TagValue::Text(s.to_string())),
            TagKey::Genre => self.tag.genre().map(|s| TagValue::Text(s.to_string())),
            TagKey::Artwork => {
                let picture = self.tag.pictures().first()?;
                let mime = mime_of(picture)?;
                Some(TagValue::Artwork(Artwork::new(
                    mime,
                    picture.data().to_vec(),
                )))
            }
        }
    }

    fn set(&mut self, key: TagKey, value: TagValue) -> Result<()> {
        match (key, value) {
            (TagKey::Artwork, TagValue::Artwork(art)) => {
                let mime = match art.mime() {
                    Mime::Jpeg => MimeType::Jpeg,
                    Mime::Png => MimeType::Png,
                };
                let picture = Picture::new_unchecked(
                    PictureType::CoverFront,
                    Some(mime),
                    None,
                    art.into_data(),
                );
                self.tag.remove_picture_type(PictureType::CoverFront);
                self.tag.push_picture(picture);
                Ok(())
            }
            (TagKey::Artwork, ref value) | (_, ref value @ TagValue::Artwork(_)) => {
                Err(value_type_error(key, value))
            }
            (text_key, TagValue::Text(s)) => {
                match text_key {
                    TagKey::Artist => self.tag.set_artist(s),
                    TagKey::Album => self.tag.set_album(s),
                    TagKey::Title => self.tag.set_title(s),
                    TagKey::Genre => self.tag.set_genre(s),
                    TagKey::Artwork => unreachable!("artwork handled above"),
                }
                Ok(())
            }
        }
    }

    fn save(&mut self) -> Result<()> {
        self.tag
            .save_to_path(&self.path, WriteOptions::default())
            .map_err(|e| Error::Save {
                path: self.path.clone(),
                message: e.to_string(),
            })
    }
}
