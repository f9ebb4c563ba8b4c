//! Embedded cover art value type and MIME mapping

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Image MIME types an [`Artwork`] can carry.
///
/// The set is closed: every supported container encodes cover art as
/// either JPEG or PNG, and the driver only picks up `.jpg`/`.jpeg`/`.png`
/// cover files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mime {
    Jpeg,
    Png,
}

impl Mime {
    /// The canonical MIME string stored in tag containers.
    pub fn as_str(self) -> &'static str {
        match self {
            Mime::Jpeg => "image/jpeg",
            Mime::Png => "image/png",
        }
    }

    /// Parse a MIME string read back from a container.
    ///
    /// Returns `None` for anything outside the supported set; callers
    /// treat such artwork as absent.
    pub fn from_mime(s: &str) -> Option<Self> {
        match s {
            "image/jpeg" | "image/jpg" => Some(Mime::Jpeg),
            "image/png" => Some(Mime::Png),
            _ => None,
        }
    }

    fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "jpg" | "jpeg" => Some(Mime::Jpeg),
            "png" => Some(Mime::Png),
            _ => None,
        }
    }
}

/// One embedded cover image: raw bytes plus their MIME type.
///
/// Equality is structural (same MIME and same bytes), which is what the
/// attach-artwork operation relies on to detect no-op writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artwork {
    mime: Mime,
    data: Vec<u8>,
}

impl Artwork {
    /// Build an artwork value from already-decoded parts (adapters use
    /// this when reading cover art back out of a container).
    pub fn new(mime: Mime, data: Vec<u8>) -> Self {
        Self { mime, data }
    }

    /// Read an image file and derive its MIME type from the extension.
    ///
    /// The extension is the only format detection performed; an
    /// unmapped extension is [`Error::UnsupportedImage`] and no file
    /// read happens in that case.
    pub fn from_file(path: &Path) -> Result<Self> {
        let mime = mime_for_path(path)
            .ok_or_else(|| Error::UnsupportedImage(path.display().to_string()))?;
        let data = fs::read(path)?;
        Ok(Self { mime, data })
    }

    /// Whether `path` has a recognized cover-image extension.
    /// Pure extension check, no I/O.
    pub fn is_supported(path: &Path) -> bool {
        mime_for_path(path).is_some()
    }

    pub fn mime(&self) -> Mime {
        self.mime
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the artwork, yielding the raw image bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

fn mime_for_path(path: &Path) -> Option<Mime> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    Mime::from_extension(&ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_supported() {
        assert!(Artwork::is_supported(Path::new("cover.jpg")));
        assert!(Artwork::is_supported(Path::new("cover.jpeg")));
        assert!(Artwork::is_supported(Path::new("cover.png")));
        assert!(Artwork::is_supported(Path::new("Cover.JPG")));
        assert!(!Artwork::is_supported(Path::new("cover.gif")));
        assert!(!Artwork::is_supported(Path::new("cover.bmp")));
        assert!(!Artwork::is_supported(Path::new("cover")));
    }

    #[test]
    fn test_from_file_unsupported_extension() {
        let err = Artwork::from_file(Path::new("cover.gif")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedImage(_)));
    }

    #[test]
    fn test_from_file_reads_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("front.png");
        std::fs::write(&path, b"not really a png").unwrap();

        let art = Artwork::from_file(&path).unwrap();
        assert_eq!(art.mime(), Mime::Png);
        assert_eq!(art.data(), b"not really a png");
    }

    #[test]
    fn test_structural_equality() {
        let a = Artwork::new(Mime::Jpeg, vec![1, 2, 3]);
        let b = Artwork::new(Mime::Jpeg, vec![1, 2, 3]);
        let c = Artwork::new(Mime::Png, vec![1, 2, 3]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_mime_roundtrip() {
        assert_eq!(Mime::from_mime("image/jpeg"), Some(Mime::Jpeg));
        assert_eq!(Mime::from_mime("image/png"), Some(Mime::Png));
        assert_eq!(Mime::from_mime("image/gif"), None);
        assert_eq!(Mime::from_mime(Mime::Jpeg.as_str()), Some(Mime::Jpeg));
    }
}
