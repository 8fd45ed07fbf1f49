//! # Intake Module
//!
//! Accepts the two uploaded images.
//!
//! An [`ImageAsset`] is created once per upload and never changes. The
//! raw bytes are kept exactly as uploaded: they are what gets digested and
//! submitted. Decoding only validates the upload and reads its dimensions.
//!
//! Only PNG and JPEG are accepted.

mod decode;
pub mod preview;

pub use decode::{FastDecoder, ImageFormat};
pub use preview::{render_preview, Preview};

use crate::error::InvalidImageError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which of the two uploads an asset fills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageSlot {
    /// The reference face ("Image 1")
    Source,
    /// The image searched for the reference face ("Image 2")
    Target,
}

impl std::fmt::Display for ImageSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageSlot::Source => write!(f, "Image 1"),
            ImageSlot::Target => write!(f, "Image 2"),
        }
    }
}

/// An uploaded, decodable image
#[derive(Clone)]
pub struct ImageAsset {
    bytes: Vec<u8>,
    filename: String,
    dimensions: (u32, u32),
    format: ImageFormat,
}

impl ImageAsset {
    /// Accept uploaded bytes.
    ///
    /// Fails if the bytes are empty, not PNG/JPEG, or cannot be decoded.
    pub fn from_bytes(
        filename: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, InvalidImageError> {
        let filename = filename.into();

        if bytes.is_empty() {
            return Err(InvalidImageError::Empty { filename });
        }

        let format = ImageFormat::sniff(&bytes).map_err(|detected| {
            InvalidImageError::UnsupportedFormat {
                filename: filename.clone(),
                detected,
            }
        })?;

        let decoded = FastDecoder::decode(&filename, &bytes, format)?;
        let dimensions = (decoded.width(), decoded.height());

        tracing::debug!(
            filename = %filename,
            format = %format,
            width = dimensions.0,
            height = dimensions.1,
            bytes = bytes.len(),
            "Image accepted"
        );

        Ok(Self {
            bytes,
            filename,
            dimensions,
            format,
        })
    }

    /// Read and accept an image file
    pub fn from_path(path: &Path) -> Result<Self, InvalidImageError> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();

        if !ImageFilter::new().should_include(path) {
            let detected = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("no extension")
                .to_string();
            return Err(InvalidImageError::UnsupportedFormat { filename, detected });
        }

        let bytes = std::fs::read(path).map_err(|source| InvalidImageError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_bytes(filename, bytes)
    }

    /// The bytes exactly as uploaded
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Decoded (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for ImageAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageAsset")
            .field("filename", &self.filename)
            .field("format", &self.format)
            .field("dimensions", &self.dimensions)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Filters file paths to the accepted upload types
pub struct ImageFilter {
    extensions: Vec<&'static str>,
}

impl ImageFilter {
    pub fn new() -> Self {
        Self {
            extensions: vec!["png", "jpg", "jpeg"],
        }
    }

    /// Check if a file has an accepted extension
    pub fn should_include(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| {
                let ext = ext.to_lowercase();
                self.extensions.iter().any(|accepted| *accepted == ext)
            })
            .unwrap_or(false)
    }
}

impl Default for ImageFilter {
    fn default() -> Self {
        Self::new()
    }
}
