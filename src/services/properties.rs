// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Properties API client for browsing, posting and moderating listings.

use crate::error::AppError;
use crate::models::{Property, PropertyDraft, PropertyFilters, PropertyPage};
use crate::services::api::{ApiClient, MessageResponse};

/// Typed client for the `/properties` endpoints.
#[derive(Clone)]
pub struct PropertiesClient {
    api: ApiClient,
}

impl PropertiesClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// List approved properties with filtering and pagination. Public.
    pub async fn list(&self, filters: &PropertyFilters) -> Result<PropertyPage, AppError> {
        self.api
            .get_json_with_query("/properties", None, filters)
            .await
    }

    /// Featured listings for the landing carousel. Public.
    pub async fn featured(&self) -> Result<Vec<Property>, AppError> {
        self.api.get_json("/properties/featured", None).await
    }

    /// Fetch a single listing. Public.
    pub async fn get(&self, id: u64) -> Result<Property, AppError> {
        self.api
            .get_json(&format!("/properties/{}", id), None)
            .await
    }

    /// The signed-in provider's own listings, whatever their moderation
    /// state.
    pub async fn my_properties(&self, token: &str) -> Result<Vec<Property>, AppError> {
        self.api
            .get_json("/properties/user/my-properties", Some(token))
            .await
    }

    /// Post a new listing. The draft is validated locally first so form
    /// errors surface without a round trip.
    pub async fn create(&self, draft: &PropertyDraft, token: &str) -> Result<Property, AppError> {
        draft.validate_for_submit()?;
        self.api.post_json("/properties", Some(token), draft).await
    }

    /// Update an existing listing.
    pub async fn update(
        &self,
        id: u64,
        draft: &PropertyDraft,
        token: &str,
    ) -> Result<Property, AppError> {
        draft.validate_for_submit()?;
        self.api
            .put_json(&format!("/properties/{}", id), Some(token), draft)
            .await
    }

    /// Delete a listing.
    pub async fn delete(&self, id: u64, token: &str) -> Result<MessageResponse, AppError> {
        self.api
            .delete_json(&format!("/properties/{}", id), Some(token))
            .await
    }

    // ─── Admin moderation ────────────────────────────────────────────────

    /// Approve a pending listing. Admin only.
    pub async fn approve(&self, id: u64, token: &str) -> Result<Property, AppError> {
        self.api
            .patch_json(
                &format!("/properties/admin/{}/approve", id),
                Some(token),
                &serde_json::json!({}),
            )
            .await
    }

    /// Reject a pending listing with a reason. Admin only.
    pub async fn reject(&self, id: u64, reason: &str, token: &str) -> Result<Property, AppError> {
        self.api
            .patch_json(
                &format!("/properties/admin/{}/reject", id),
                Some(token),
                &serde_json::json!({ "reason": reason }),
            )
            .await
    }
}
