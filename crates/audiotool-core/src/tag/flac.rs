//! Vorbis-comment + picture-block adapter for FLAC files.

use std::path::{Path, PathBuf};

use metaflac::block::PictureType;
use metaflac::BlockType;

use crate::artwork::{Artwork, Mime};
use crate::error::{Error, Result};
use crate::tag::{value_type_error, Backend, TagKey, TagValue};

/// Comments are written uppercase per convention; reads accept either
/// case since other writers disagree.
fn comment_name(key: TagKey) -> &'static str {
    match key {
        TagKey::Artist => "ARTIST",
        TagKey::Album => "ALBUM",
        TagKey::Title => "TITLE",
        TagKey::Genre => "GENRE",
        TagKey::Artwork => unreachable!("artwork lives in picture blocks"),
    }
}

pub(crate) struct FlacBackend {
    tag: metaflac::Tag,
    path: PathBuf,
}

impl FlacBackend {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let tag = metaflac::Tag::read_from_path(path).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self {
            tag,
            path: path.to_path_buf(),
        })
    }

    fn comment(&self, name: &str) -> Option<String> {
        let values = self
            .tag
            .get_vorbis(name)
            .or_else(|| self.tag.get_vorbis(&name.to_ascii_lowercase()))?;
        values.into_iter().next().map(|v| v.to_string())
    }
}

impl Backend for FlacBackend {
    fn get(&self, key: TagKey) -> Option<TagValue> {
        match key {
            TagKey::Artwork => {
                let picture = self.tag.pictures().next()?;
                let mime = Mime::from_mime(&picture.mime_type)?;
                Some(TagValue::Artwork(Artwork::new(
                    mime,
                    picture.data.clone(),
                )))
            }
            text_key => self.comment(comment_name(text_key)).map(TagValue::Text),
        }
    }

    fn set(&mut self, key: TagKey, value: TagValue) -> Result<()> {
        match (key, value) {
            (TagKey::Artwork, TagValue::Artwork(art)) => {
                // Single front cover: drop every existing picture block
                // rather than accumulating covers of differing types.
                self.tag.remove_blocks(BlockType::Picture);
                self.tag.add_picture(
                    art.mime().as_str().to_string(),
                    PictureType::CoverFront,
                    art.into_data(),
                );
                Ok(())
            }
            (TagKey::Artwork, ref value) | (_, ref value @ TagValue::Artwork(_)) => {
                Err(value_type_error(key, value))
            }
            (text_key, TagValue::Text(s)) => {
                self.tag.set_vorbis(comment_name(text_key), vec![s]);
                Ok(())
            }
        }
    }

    fn save(&mut self) -> Result<()> {
        self.tag.write_to_path(&self.path).map_err(|e| Error::Save {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }
}
