//! Asset Upload Service seam
//!
//! `upload(file) -> url`. The concrete CDN client lives in `vitrina-client`.

use async_trait::async_trait;
use shared::CatalogError;
use std::path::Path;
use thiserror::Error;

/// An image file picked in the admin form, not yet uploaded
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Read a file from disk
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self { file_name, bytes })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFile")
            .field("file_name", &self.file_name)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Named upload preset plus destination folder tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadProfile {
    pub preset: String,
    pub folder: String,
}

impl UploadProfile {
    pub fn new(preset: impl Into<String>, folder: impl Into<String>) -> Self {
        Self {
            preset: preset.into(),
            folder: folder.into(),
        }
    }
}

/// Upload error types (opaque: no structured code from the service)
#[derive(Debug, Clone, Error)]
pub enum UploadError {
    #[error("Empty file provided")]
    EmptyFile,

    #[error("Upload rejected: {0}")]
    Rejected(String),

    #[error("Upload transport failed: {0}")]
    Transport(String),

    #[error("Upload response carried no URL")]
    MissingUrl,

    #[error("No upload service configured")]
    NotConfigured,
}

impl From<UploadError> for CatalogError {
    fn from(err: UploadError) -> Self {
        CatalogError::Upload(err.to_string())
    }
}

/// Image hosting endpoint returning a secure delivery URL
#[async_trait]
pub trait AssetUploader: Send + Sync {
    async fn upload(&self, file: &ImageFile, profile: &UploadProfile) -> Result<String, UploadError>;
}
