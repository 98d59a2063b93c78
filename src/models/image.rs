use crate::error::{LensError, Result};
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use std::fs;
use std::path::Path;

/// A base64-encoded image together with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub mime_type: String,
    pub data: String,
}

impl ImageData {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(mime_type, BASE64_STANDARD.encode(bytes))
    }

    /// Read an image file, rejecting anything whose extension is not an image type.
    pub fn from_path(path: &Path) -> Result<Self> {
        let mime_type = mime_type_for_path(path).ok_or_else(|| {
            LensError::InvalidImage(format!("{} is not a supported image file", path.display()))
        })?;
        let bytes = fs::read(path)?;
        if bytes.is_empty() {
            return Err(LensError::InvalidImage(format!(
                "{} is empty",
                path.display()
            )));
        }
        Ok(Self::from_bytes(mime_type, &bytes))
    }

    /// Parse a `data:<mime>;base64,<payload>` URL.
    pub fn from_data_url(url: &str) -> Result<Self> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| LensError::InvalidImage("missing data: prefix".to_string()))?;
        let (header, data) = rest
            .split_once(',')
            .ok_or_else(|| LensError::InvalidImage("missing data URL payload".to_string()))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| LensError::InvalidImage("data URL is not base64".to_string()))?;
        if !mime_type.starts_with("image/") {
            return Err(LensError::InvalidImage(format!(
                "{} is not an image type",
                mime_type
            )));
        }
        Ok(Self::new(mime_type, data))
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

pub fn mime_type_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_data_url_round_trip() {
        let image = ImageData::from_data_url("data:image/webp;base64,UklGRg==").unwrap();
        assert_eq!(image.mime_type, "image/webp");
        assert_eq!(image.data, "UklGRg==");
        assert_eq!(image.to_data_url(), "data:image/webp;base64,UklGRg==");
    }

    #[test]
    fn test_data_url_rejects_non_image() {
        assert!(ImageData::from_data_url("data:text/plain;base64,aGk=").is_err());
        assert!(ImageData::from_data_url("image/png;base64,aGk=").is_err());
        assert!(ImageData::from_data_url("data:image/png,raw").is_err());
    }

    #[test]
    fn test_from_path_encodes_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("desk.JPG");
        fs::write(&path, b"hi").unwrap();

        let image = ImageData::from_path(&path).unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.data, "aGk=");
    }

    #[test]
    fn test_from_path_rejects_other_extensions() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        fs::write(&path, b"hi").unwrap();

        match ImageData::from_path(&path) {
            Err(LensError::InvalidImage(_)) => {}
            other => panic!("expected InvalidImage, got {:?}", other),
        }
    }
}
