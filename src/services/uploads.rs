// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Asset-upload service client (listing images).
//!
//! Uploads go straight from the client to the hosted service using an
//! unsigned preset; the API only ever sees the resulting URLs.

use crate::error::AppError;
use futures_util::{stream, StreamExt};
use serde::Deserialize;
use std::time::Duration;

const UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);
/// Parallel uploads per batch.
const MAX_CONCURRENT_UPLOADS: usize = 4;

/// Successful upload response.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub secure_url: String,
}

/// Upload service client.
#[derive(Clone)]
pub struct UploadsClient {
    http: reqwest::Client,
    upload_url: String,
    preset: String,
}

impl UploadsClient {
    pub fn new(upload_url: impl Into<String>, preset: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(UPLOAD_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            http,
            upload_url: upload_url.into(),
            preset: preset.into(),
        }
    }

    /// Upload one image, returning its hosted URL.
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, AppError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", self.preset.clone());

        let response = self
            .http
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upload(format!("HTTP {}: {}", status, body)));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upload(format!("JSON parse error: {}", e)))?;

        Ok(uploaded.secure_url)
    }

    /// Upload a batch with bounded concurrency, returning the URLs that
    /// succeeded. Individual failures are logged and skipped so one bad
    /// image doesn't sink the whole listing.
    pub async fn upload_many(&self, files: Vec<(String, Vec<u8>)>) -> Vec<String> {
        stream::iter(files)
            .map(|(name, bytes)| async move {
                match self.upload(&name, bytes).await {
                    Ok(url) => Some(url),
                    Err(e) => {
                        tracing::warn!(file = %name, error = %e, "Image upload failed, skipping");
                        None
                    }
                }
            })
            .buffer_unordered(MAX_CONCURRENT_UPLOADS)
            .filter_map(|url| async move { url })
            .collect()
            .await
    }
}
