// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared HTTP plumbing for the marketplace REST API.
//!
//! All typed API clients go through [`ApiClient`], which owns the base URL,
//! bearer-token handling and the check-status-then-parse response path.

use crate::error::AppError;
use serde::Deserialize;
use std::time::Duration;

/// Low-level marketplace API client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
    #[serde(default)]
    details: Option<String>,
}

/// Generic success/message response for endpoints without a richer payload.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiClient {
    /// Create a client rooted at the API base URL.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET returning JSON.
    pub async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, AppError> {
        let mut request = self.http.get(self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Api(e.to_string()))?;
        self.check_response_json(response).await
    }

    /// GET with query parameters, returning JSON.
    pub async fn get_json_with_query<T, Q>(
        &self,
        path: &str,
        token: Option<&str>,
        query: &Q,
    ) -> Result<T, AppError>
    where
        T: for<'de> Deserialize<'de>,
        Q: serde::Serialize + ?Sized,
    {
        let mut request = self.http.get(self.url(path)).query(query);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Api(e.to_string()))?;
        self.check_response_json(response).await
    }

    /// POST with a JSON body, returning JSON.
    pub async fn post_json<T, B>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, AppError>
    where
        T: for<'de> Deserialize<'de>,
        B: serde::Serialize + ?Sized,
    {
        self.send_json(reqwest::Method::POST, path, token, body)
            .await
    }

    /// PUT with a JSON body, returning JSON.
    pub async fn put_json<T, B>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, AppError>
    where
        T: for<'de> Deserialize<'de>,
        B: serde::Serialize + ?Sized,
    {
        self.send_json(reqwest::Method::PUT, path, token, body).await
    }

    /// PATCH with a JSON body, returning JSON.
    pub async fn patch_json<T, B>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, AppError>
    where
        T: for<'de> Deserialize<'de>,
        B: serde::Serialize + ?Sized,
    {
        self.send_json(reqwest::Method::PATCH, path, token, body)
            .await
    }

    /// DELETE returning JSON.
    pub async fn delete_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, AppError> {
        let mut request = self.http.delete(self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Api(e.to_string()))?;
        self.check_response_json(response).await
    }

    async fn send_json<T, B>(
        &self,
        method: reqwest::Method,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, AppError>
    where
        T: for<'de> Deserialize<'de>,
        B: serde::Serialize + ?Sized,
    {
        let mut request = self.http.request(method, self.url(path)).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Api(e.to_string()))?;
        self.check_response_json(response).await
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let parsed: Option<ApiErrorBody> = serde_json::from_str(&body).ok();
            let detail = parsed
                .map(|e| e.details.unwrap_or(e.error))
                .unwrap_or_else(|| body.clone());

            return Err(match status.as_u16() {
                401 => AppError::Unauthorized,
                403 => AppError::Forbidden(detail),
                404 => AppError::NotFound(detail),
                400 => AppError::BadRequest(detail),
                _ => AppError::Api(format!("HTTP {}: {}", status, detail)),
            });
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Api(format!("JSON parse error: {}", e)))
    }
}
