//! ID3v2 adapter for MP3 files.

use std::path::{Path, PathBuf};

use id3::frame::{Picture, PictureType};
use id3::{Content, TagLike, Version};

use crate::artwork::{Artwork, Mime};
use crate::error::{Error, Result};
use crate::tag::{value_type_error, Backend, TagKey, TagValue};

/// ID3v2 frame id for each text key.
fn frame_id(key: TagKey) -> &'static str {
    match key {
        TagKey::Artist => "TPE1",
        TagKey::Album => "TALB",
        TagKey::Title => "TIT2",
        TagKey::Genre => "TCON",
        TagKey::Artwork => "APIC",
    }
}

pub(crate) struct Mp3Backend {
    tag: id3::Tag,
    path: PathBuf,
}

impl Mp3Backend {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        // A file with no ID3 tag at all still opens, with an empty tag.
        let tag = match id3::Tag::read_from_path(path) {
            Ok(tag) => tag,
            Err(id3::Error {
                kind: id3::ErrorKind::NoTag,
                ..
            }) => id3::Tag::new(),
            Err(e) => {
                return Err(Error::Parse {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };
        Ok(Self {
            tag,
            path: path.to_path_buf(),
        })
    }

    fn front_cover(&self) -> Option<&Picture> {
        self.tag
            .pictures()
            .find(|p| p.picture_type == PictureType::CoverFront)
            .or_else(|| self.tag.pictures().next())
    }
}

impl Backend for Mp3Backend {
    fn get(&self, key: TagKey) -> Option<TagValue> {
        match key {
            TagKey::Artwork => {
                let picture = self.front_cover()?;
                let mime = Mime::from_mime(&picture.mime_type)?;
                Some(TagValue::Artwork(Artwork::new(
                    mime,
                    picture.data.clone(),
                )))
            }
            text_key => {
                let frame = self.tag.get(frame_id(text_key))?;
                match frame.content() {
                    Content::Text(s) => Some(TagValue::Text(s.clone())),
                    _ => None,
                }
            }
        }
    }

    fn set(&mut self, key: TagKey, value: TagValue) -> Result<()> {
        match (key, value) {
            (TagKey::Artwork, TagValue::Artwork(art)) => {
                self.tag.remove_picture_by_type(PictureType::CoverFront);
                self.tag.add_frame(Picture {
                    mime_type: art.mime().as_str().to_string(),
                    picture_type: PictureType::CoverFront,
                    description: String::new(),
                    data: art.into_data(),
                });
                Ok(())
            }
            (TagKey::Artwork, ref value) | (_, ref value @ TagValue::Artwork(_)) => {
                Err(value_type_error(key, value))
            }
            (text_key, TagValue::Text(s)) => {
                self.tag.set_text(frame_id(text_key), s);
                Ok(())
            }
        }
    }

    fn save(&mut self) -> Result<()> {
        self.tag
            .write_to_path(&self.path, Version::Id3v23)
            .map_err(|e| Error::Save {
                path: self.path.clone(),
                message: e.to_string(),
            })
    }
}
