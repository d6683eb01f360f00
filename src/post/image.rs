use std::{fmt, path::Path};

use log::debug;
use mime_guess::MimeGuess;

/// An image picked for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = MimeGuess::from_path(&file_name)
            .first_or_octet_stream()
            .to_string();
        Self {
            file_name,
            mime,
            bytes,
        }
    }

    /// Read an image from disk, guessing its MIME type from the extension.
    pub async fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());

        let bytes = tokio::fs::read(path).await?;
        let image = Self::new(file_name, bytes);
        debug!(
            "Loaded {} ({}, {} bytes)",
            path.display(),
            image.mime,
            image.size()
        );
        Ok(image)
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("size", &self.bytes.len())
            .finish()
    }
}
