// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types shared across the client core.

/// Client-side error type.
///
/// "No session" and "no profile" are not errors anywhere in this crate: the
/// session holder and profile resolver degrade to the absent state, and the
/// guard reports denial as a state rather than an error.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Not allowed: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Marketplace API error: {0}")]
    Api(String),

    #[error("Identity provider error: {0}")]
    Identity(String),

    #[error("Upload service error: {0}")]
    Upload(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Marker message for an identity token the provider rejected
    /// (expired or revoked refresh token).
    pub const IDENTITY_TOKEN_ERROR: &'static str = "identity_token_rejected";

    /// True if this error means the identity token is no longer usable.
    pub fn is_identity_token_error(&self) -> bool {
        matches!(self, AppError::Identity(msg) if msg.contains(Self::IDENTITY_TOKEN_ERROR))
    }

    /// True if the remote API rejected our credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Unauthorized)
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, AppError>;
