// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tests for the wishlist client's membership cache.

use nestfind_client::services::{ApiClient, WishlistClient};
use std::sync::atomic::Ordering;
use std::time::Duration;

mod common;
use common::{serve, ApiStub};

async fn client(stub: &ApiStub) -> WishlistClient {
    let api_url = serve(stub.router()).await;
    WishlistClient::new(ApiClient::new(api_url, Duration::from_secs(5)))
}

#[tokio::test]
async fn membership_checks_are_cached() {
    let stub = ApiStub::default();
    let wishlist = client(&stub).await;

    assert!(wishlist.contains(7, "token-1").await.expect("first check"));
    assert!(wishlist.contains(7, "token-1").await.expect("second check"));

    // Second check came from cache.
    assert_eq!(stub.wishlist_check_hits.load(Ordering::SeqCst), 1);
    assert_eq!(wishlist.cached_len(), 1);
}

#[tokio::test]
async fn clear_cache_forces_refetch() {
    let stub = ApiStub::default();
    let wishlist = client(&stub).await;

    wishlist.contains(7, "token-1").await.expect("first check");
    wishlist.clear_cache();
    assert_eq!(wishlist.cached_len(), 0);

    wishlist.contains(7, "token-1").await.expect("after clear");
    assert_eq!(stub.wishlist_check_hits.load(Ordering::SeqCst), 2);
}
