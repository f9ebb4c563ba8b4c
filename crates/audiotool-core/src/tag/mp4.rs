//! ilst atom adapter for MP4 (.m4a) files.

use std::path::{Path, PathBuf};

use mp4ameta::{Img, ImgFmt};

use crate::artwork::{Artwork, Mime};
use crate::error::{Error, Result};
use crate::tag::{value_type_error, Backend, TagKey, TagValue};

pub(crate) struct Mp4Backend {
    tag: mp4ameta::Tag,
    path: PathBuf,
}

impl Mp4Backend {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let tag = mp4ameta::Tag::read_from_path(path).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self {
            tag,
            path: path.to_path_buf(),
        })
    }
}

fn mime_to_fmt(mime: Mime) -> ImgFmt {
    match mime {
        Mime::Jpeg => ImgFmt::Jpeg,
        Mime::Png => ImgFmt::Png,
    }
}

impl Backend for Mp4Backend {
    fn get(&self, key: TagKey) -> Option<TagValue> {
        let text = |s: Option<&str>| s.map(|s| TagValue::Text(s.to_string()));
        match key {
            TagKey::Artist => text(self.tag.artist()),
            TagKey::Album => text(self.tag.album()),
            TagKey::Title => text(self.tag.title()),
            TagKey::Genre => text(self.tag.genre()),
            TagKey::Artwork => {
                let img = self.tag.artwork()?;
                // BMP covers exist in the wild but are outside the
                // supported artwork set, so they read as absent.
                let mime = match img.fmt {
                    ImgFmt::Jpeg => Mime::Jpeg,
                    ImgFmt::Png => Mime::Png,
                    ImgFmt::Bmp => return None,
                };
                Some(TagValue::Artwork(Artwork::new(mime, img.data.to_vec())))
            }
        }
    }

    fn set(&mut self, key: TagKey, value: TagValue) -> Result<()> {
        match (key, value) {
            (TagKey::Artwork, TagValue::Artwork(art)) => {
                let fmt = mime_to_fmt(art.mime());
                self.tag.set_artwork(Img::new(fmt, art.into_data()));
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
        self.tag.write_to_path(&self.path).map_err(|e| Error::Save {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }
}
