//! Merchant platform endpoints.
//!
//! Thin wrappers over the dispatcher's file-upload mode. The platform
//! takes the image bytes as the raw request body and the file name as
//! a query parameter.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::api::{Client, ClientError, RequestBody};

/// Path of the common image upload endpoint under the merchant prefix
const UPLOAD_IMG_PATH: &str = "/common/upload_img";

impl Client {
    /// Upload image bytes to the merchant platform.
    /// `filename` is what the platform records, not a local path.
    pub async fn upload_image(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<Value, ClientError> {
        let uri = format!("{}{}", self.config().merchant_base_url, UPLOAD_IMG_PATH);
        self.request(&uri, Some(RequestBody::Raw(bytes)), &[("filename", filename)])
            .await
    }

    /// Read an image from disk and upload it under its file name
    pub async fn upload_image_from_path(&self, path: &Path) -> Result<Value> {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .with_context(|| format!("No usable file name in {}", path.display()))?;
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        self.upload_image(filename, bytes)
            .await
            .with_context(|| format!("Failed to upload {}", filename))
    }
}
