// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Wishlist API client with an in-memory membership cache.
//!
//! Listing pages check membership per card; the cache keeps that from
//! refetching on every render. Mutations update the cache in place and
//! sign-out clears it.

use crate::error::AppError;
use crate::models::{WishlistCheck, WishlistItem};
use crate::services::api::{ApiClient, MessageResponse};
use dashmap::DashMap;
use std::sync::Arc;

/// Shared membership cache type: property id -> in wishlist.
pub type MembershipCache = Arc<DashMap<u64, bool>>;

/// Typed client for the `/wishlist` endpoints.
#[derive(Clone)]
pub struct WishlistClient {
    api: ApiClient,
    membership: MembershipCache,
}

impl WishlistClient {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            membership: Arc::new(DashMap::new()),
        }
    }

    /// The signed-in user's saved listings.
    pub async fn list(&self, token: &str) -> Result<Vec<WishlistItem>, AppError> {
        let items: Vec<WishlistItem> = self.api.get_json("/wishlist", Some(token)).await?;

        // A full listing is authoritative for membership.
        self.membership.clear();
        for item in &items {
            self.membership.insert(item.property.id, true);
        }

        Ok(items)
    }

    /// Save a listing.
    pub async fn add(&self, property_id: u64, token: &str) -> Result<(), AppError> {
        let _: MessageResponse = self
            .api
            .post_json(
                "/wishlist",
                Some(token),
                &serde_json::json!({ "propertyId": property_id }),
            )
            .await?;

        self.membership.insert(property_id, true);
        Ok(())
    }

    /// Remove a saved listing.
    pub async fn remove(&self, property_id: u64, token: &str) -> Result<(), AppError> {
        let _: MessageResponse = self
            .api
            .delete_json(&format!("/wishlist/{}", property_id), Some(token))
            .await?;

        self.membership.insert(property_id, false);
        Ok(())
    }

    /// Membership check, served from cache when possible.
    pub async fn contains(&self, property_id: u64, token: &str) -> Result<bool, AppError> {
        if let Some(cached) = self.membership.get(&property_id) {
            return Ok(*cached);
        }

        let check: WishlistCheck = self
            .api
            .get_json(&format!("/wishlist/check/{}", property_id), Some(token))
            .await?;

        self.membership.insert(property_id, check.in_wishlist);
        Ok(check.in_wishlist)
    }

    /// Drop all cached membership state. Called on sign-out so one user's
    /// wishlist never bleeds into the next session.
    pub fn clear_cache(&self) {
        self.membership.clear();
    }

    /// Number of cached membership entries (for tests and diagnostics).
    pub fn cached_len(&self) -> usize {
        self.membership.len()
    }
}
