//! Image CDN uploader
//!
//! Multipart `file` + `upload_preset` + `folder`; the response carries the
//! delivery URL in `secure_url`.

use crate::HttpClient;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use vitrina_core::{AssetUploader, ImageFile, UploadError, UploadProfile};

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    secure_url: Option<String>,
}

fn secure_url(response: UploadResponse) -> Result<String, UploadError> {
    response
        .secure_url
        .filter(|url| !url.trim().is_empty())
        .ok_or(UploadError::MissingUrl)
}

#[derive(Debug, Clone)]
pub struct CloudinaryUploader {
    http: HttpClient,
}

impl CloudinaryUploader {
    /// `http` is bound to the full upload endpoint URL
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    fn form(file: &ImageFile, profile: &UploadProfile) -> Form {
        let part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
        Form::new()
            .part("file", part)
            .text("upload_preset", profile.preset.clone())
            .text("folder", profile.folder.clone())
    }
}

#[async_trait]
impl AssetUploader for CloudinaryUploader {
    async fn upload(&self, file: &ImageFile, profile: &UploadProfile) -> Result<String, UploadError> {
        if file.is_empty() {
            return Err(UploadError::EmptyFile);
        }

        let response: UploadResponse = self
            .http
            .post_multipart("", Self::form(file, profile))
            .await
            .map_err(UploadError::from)?;
        let url = secure_url(response)?;
        tracing::debug!(file = %file.file_name, url = %url, "Uploaded image");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_secure_url_required() {
        let ok: UploadResponse = serde_json::from_value(json!({
            "secure_url": "https://res.cloudinary.com/demo/image/upload/v1/a.jpg",
            "public_id": "a"
        }))
        .unwrap();
        assert!(secure_url(ok).unwrap().ends_with("/a.jpg"));

        let missing: UploadResponse = serde_json::from_value(json!({"error": {}})).unwrap();
        assert!(matches!(secure_url(missing), Err(UploadError::MissingUrl)));

        let blank: UploadResponse = serde_json::from_value(json!({"secure_url": " "})).unwrap();
        assert!(matches!(secure_url(blank), Err(UploadError::MissingUrl)));
    }
}
