use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("failed to read photo {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{filename} is not an image (detected {mime_type})")]
    NotAnImage { filename: String, mime_type: String },
}

/// An image attached to a product draft, uploaded after the product exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Photo {
    /// Accepts only files whose extension maps to an `image/*` type.
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Result<Self, PhotoError> {
        let filename = filename.into();
        let mime_type = mime_guess::from_path(&filename)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        if !mime_type.starts_with("image/") {
            return Err(PhotoError::NotAnImage {
                filename,
                mime_type,
            });
        }
        Ok(Self {
            filename,
            mime_type,
            bytes,
        })
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, PhotoError> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".to_string());
        let bytes = tokio::fs::read(path).await.map_err(|source| PhotoError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(filename, bytes)
    }
}
