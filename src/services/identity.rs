// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity provider client.
//!
//! Handles:
//! - Email/password sign-up and sign-in
//! - OAuth authorize-URL construction and code exchange
//! - Refresh-token grants for fresh bearer tokens
//! - Verification and password-reset emails

use crate::error::AppError;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// OAuth providers supported for popup sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
    Facebook,
}

impl OAuthProvider {
    /// Provider id as the identity service expects it.
    pub fn id(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "google.com",
            OAuthProvider::Facebook => "facebook.com",
        }
    }

    fn authorize_base(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "https://accounts.google.com/o/oauth2/v2/auth",
            OAuthProvider::Facebook => "https://www.facebook.com/v19.0/dialog/oauth",
        }
    }

    fn scope(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "openid email profile",
            OAuthProvider::Facebook => "email,public_profile",
        }
    }
}

/// Tokens and identity attributes returned by sign-up/sign-in.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub id_token: String,
    pub refresh_token: String,
    /// Token lifetime in seconds (the service sends it as a string)
    pub expires_in: String,
    /// Identity provider uid
    pub local_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
}

impl AuthTokens {
    /// Parsed token lifetime, defaulting to an hour on a malformed value.
    pub fn expires_in_secs(&self) -> i64 {
        self.expires_in.parse().unwrap_or(3600)
    }
}

/// Refresh-grant response. The token endpoint speaks snake_case, unlike the
/// account endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshedTokens {
    pub id_token: String,
    pub refresh_token: String,
    pub expires_in: String,
    pub user_id: String,
}

impl RefreshedTokens {
    pub fn expires_in_secs(&self) -> i64 {
        self.expires_in.parse().unwrap_or(3600)
    }
}

/// Error body returned by the identity service.
#[derive(Debug, Deserialize)]
struct IdentityErrorBody {
    error: IdentityErrorDetail,
}

#[derive(Debug, Deserialize)]
struct IdentityErrorDetail {
    message: String,
}

/// Identity provider REST client.
#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl IdentityClient {
    /// Create a new identity client with the public web API key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}?key={}", self.base_url, path, self.api_key)
    }

    /// Create a new account with email and password.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<AuthTokens, AppError> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
            "displayName": display_name,
            "returnSecureToken": true,
        });

        self.post_json("/v1/accounts:signUp", &body).await
    }

    /// Sign in an existing account with email and password.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthTokens, AppError> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });

        self.post_json("/v1/accounts:signInWithPassword", &body).await
    }

    /// Exchange an OAuth authorization code for a session.
    ///
    /// The UI runs the popup flow against the URL from
    /// [`authorize_url`](Self::authorize_url) and hands the resulting code
    /// back here.
    pub async fn exchange_oauth_code(
        &self,
        provider: OAuthProvider,
        code: &str,
        redirect_uri: &str,
    ) -> Result<AuthTokens, AppError> {
        let body = serde_json::json!({
            "providerId": provider.id(),
            "code": code,
            "redirectUri": redirect_uri,
            "returnSecureToken": true,
        });

        self.post_json("/v1/accounts:signInWithIdp", &body).await
    }

    /// Build the provider authorization URL for the popup flow.
    pub fn authorize_url(
        &self,
        provider: OAuthProvider,
        client_id: &str,
        redirect_uri: &str,
        state: &str,
    ) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}",
            provider.authorize_base(),
            client_id,
            urlencoding::encode(redirect_uri),
            urlencoding::encode(provider.scope()),
            urlencoding::encode(state),
        )
    }

    /// Exchange a refresh token for a fresh bearer token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshedTokens, AppError> {
        let response = self
            .http
            .post(self.url("/v1/token"))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await
            .map_err(|e| AppError::Identity(format!("Token refresh request failed: {}", e)))?;

        self.check_response_json(response).await
    }

    /// Send a verification email for the signed-in account.
    pub async fn send_email_verification(&self, id_token: &str) -> Result<(), AppError> {
        let body = serde_json::json!({
            "requestType": "VERIFY_EMAIL",
            "idToken": id_token,
        });

        let _: serde_json::Value = self.post_json("/v1/accounts:sendOobCode", &body).await?;
        Ok(())
    }

    /// Send a password-reset email.
    pub async fn send_password_reset(&self, email: &str) -> Result<(), AppError> {
        let body = serde_json::json!({
            "requestType": "PASSWORD_RESET",
            "email": email,
        });

        let _: serde_json::Value = self.post_json("/v1/accounts:sendOobCode", &body).await?;
        Ok(())
    }

    async fn post_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, AppError> {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Identity(e.to_string()))?;

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
            let message = serde_json::from_str::<IdentityErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("HTTP {}", status));

            // Expired/revoked refresh tokens are the signed-out case for the
            // session holder, not a surfaced failure.
            if message.contains("TOKEN_EXPIRED") || message.contains("INVALID_REFRESH_TOKEN") {
                return Err(AppError::Identity(
                    AppError::IDENTITY_TOKEN_ERROR.to_string(),
                ));
            }

            return Err(AppError::Identity(message));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Identity(format!("JSON parse error: {}", e)))
    }
}
