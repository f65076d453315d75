// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Users API client: profile fetch/update plus the admin moderation surface.

use crate::error::AppError;
use crate::models::{NewUser, Profile, ProfileUpdate, UserFilters};
use crate::services::api::{ApiClient, MessageResponse};

/// Typed client for the `/users` endpoints.
#[derive(Clone)]
pub struct UsersClient {
    api: ApiClient,
}

impl UsersClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Register the server-side user record after identity signup.
    ///
    /// Owners come back already approved; agents and builders start pending.
    pub async fn create(&self, new_user: &NewUser) -> Result<Profile, AppError> {
        self.api.post_json("/users/create", None, new_user).await
    }

    /// Fetch a profile by identity-provider uid.
    pub async fn get_profile(&self, external_id: &str, token: &str) -> Result<Profile, AppError> {
        self.api
            .get_json(&format!("/users/profile/{}", external_id), Some(token))
            .await
    }

    /// Update the signed-in user's own profile.
    pub async fn update_profile(
        &self,
        external_id: &str,
        changes: &ProfileUpdate,
        token: &str,
    ) -> Result<Profile, AppError> {
        self.api
            .put_json(&format!("/users/profile/{}", external_id), Some(token), changes)
            .await
    }

    // ─── Admin moderation ────────────────────────────────────────────────

    /// List users matching the given filters. Admin only.
    pub async fn list(&self, filters: &UserFilters, token: &str) -> Result<Vec<Profile>, AppError> {
        self.api
            .get_json_with_query("/users/all", Some(token), filters)
            .await
    }

    /// Approve a pending provider. Admin only.
    pub async fn approve(&self, user_id: u64, token: &str) -> Result<Profile, AppError> {
        self.api
            .patch_json(
                &format!("/users/{}/approve", user_id),
                Some(token),
                &serde_json::json!({}),
            )
            .await
    }

    /// Reject a pending provider with a reason. Admin only.
    pub async fn reject(&self, user_id: u64, reason: &str, token: &str) -> Result<Profile, AppError> {
        self.api
            .patch_json(
                &format!("/users/{}/reject", user_id),
                Some(token),
                &serde_json::json!({ "reason": reason }),
            )
            .await
    }

    /// Flip a user's active flag. Admin only.
    pub async fn toggle_status(&self, user_id: u64, token: &str) -> Result<Profile, AppError> {
        self.api
            .patch_json(
                &format!("/users/{}/toggle-status", user_id),
                Some(token),
                &serde_json::json!({}),
            )
            .await
    }

    /// Delete a user record. Admin only.
    pub async fn delete(&self, user_id: u64, token: &str) -> Result<MessageResponse, AppError> {
        self.api
            .delete_json(&format!("/users/{}", user_id), Some(token))
            .await
    }
}
