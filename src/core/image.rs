//! Image uploads: load a photographed equation from disk and encode it for the solver.

use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

/// Max upload size (200MB).
pub const MAX_IMAGE_BYTES: u64 = 200 * 1024 * 1024;

/// Accepted extensions and their MIME types.
const SUPPORTED: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
];

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("Unsupported image type '{0}' (expected png, jpg or jpeg)")]
    Unsupported(String),
    #[error("Image '{path}' is too large ({bytes} bytes, max 200MB)")]
    TooLarge { path: PathBuf, bytes: u64 },
    #[error("Image '{path}' is empty")]
    Empty { path: PathBuf },
    #[error("Failed to read image '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// An image ready to upload: file name, MIME type, raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ImagePayload {
    /// `data:<mime>;base64,<payload>` URL for the image_url content part.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, BASE64.encode(&self.bytes))
    }

    /// Short label for the chat history, e.g. "photo.png (1024 bytes)".
    pub fn label(&self) -> String {
        format!("{} ({} bytes)", self.name, self.bytes.len())
    }
}

/// MIME type for a path based on its extension (case-insensitive).
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    SUPPORTED
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

/// Read an image from disk after checking its extension and size.
pub fn load(path: &Path) -> Result<ImagePayload, ImageError> {
    let mime_type = mime_for_path(path).ok_or_else(|| {
        ImageError::Unsupported(
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_string(),
        )
    })?;

    let metadata = fs::metadata(path).map_err(|source| ImageError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if metadata.len() > MAX_IMAGE_BYTES {
        return Err(ImageError::TooLarge {
            path: path.to_path_buf(),
            bytes: metadata.len(),
        });
    }

    let bytes = fs::read(path).map_err(|source| ImageError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if bytes.is_empty() {
        return Err(ImageError::Empty {
            path: path.to_path_buf(),
        });
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    log::debug!("Loaded image {} ({} bytes, {})", name, bytes.len(), mime_type);

    Ok(ImagePayload {
        name,
        mime_type,
        bytes,
    })
}
