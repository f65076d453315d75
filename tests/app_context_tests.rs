// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end scenarios through the wired-up application context.

use nestfind_client::auth::{DenialReason, GuardState, RouteRequirement};
use nestfind_client::config::Config;
use nestfind_client::AppContext;
use std::sync::atomic::Ordering;
use std::time::Duration;

mod common;
use common::{admin_profile, identity_stub_router, seeker_profile, serve, ApiStub};

async fn app(stub: &ApiStub) -> AppContext {
    let identity_url = serve(identity_stub_router()).await;
    let api_url = serve(stub.router()).await;

    let config = Config {
        api_url,
        identity_url,
        ..Config::default()
    };

    AppContext::new(config)
}

/// Poll until the condition holds, with a deadline.
async fn wait_until<F: Fn() -> bool>(cond: F) {
    tokio::time::timeout(Duration::from_secs(2), async {
        while !cond() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("condition within deadline");
}

#[tokio::test]
async fn new_seeker_account_end_to_end() {
    let stub = ApiStub::with_profiles(vec![seeker_profile("uid-alice")]);
    let app = app(&stub).await;

    app.auth.sessions().restore(None).await;
    app.auth
        .sessions()
        .sign_in("alice@example.com", "hunter2")
        .await
        .expect("sign in");

    wait_until(|| !app.auth.loading() && app.auth.profile().is_some()).await;

    // Seekers browse; they never post.
    assert!(app.auth.is_seeker());
    assert!(!app.auth.can_post_property());
    assert!(!app.auth.needs_approval());
    assert_eq!(app.auth.display_type(), "Seeker");

    // A plain protected route opens once session and profile resolve.
    let mut protected = app.auth.guard(RouteRequirement::authenticated());
    let state = tokio::time::timeout(Duration::from_secs(2), protected.decided())
        .await
        .expect("guard decided");
    assert_eq!(state, GuardState::Granted);

    // The admin panel stays shut.
    let mut admin = app.auth.guard(RouteRequirement::admin_only());
    let state = tokio::time::timeout(Duration::from_secs(2), admin.decided())
        .await
        .expect("guard decided");
    assert_eq!(state, GuardState::Denied(DenialReason::InsufficientRole));
}

#[tokio::test]
async fn admin_account_reaches_admin_routes() {
    let stub = ApiStub::with_profiles(vec![admin_profile("uid-root")]);
    let app = app(&stub).await;

    app.auth.sessions().restore(None).await;
    app.auth
        .sessions()
        .sign_in("root@example.com", "hunter2")
        .await
        .expect("sign in");

    wait_until(|| app.auth.profile().is_some()).await;
    assert!(app.auth.is_admin());

    let mut admin = app.auth.guard(RouteRequirement::admin_only());
    let state = tokio::time::timeout(Duration::from_secs(2), admin.decided())
        .await
        .expect("guard decided");
    assert_eq!(state, GuardState::Granted);
}

#[tokio::test]
async fn signed_out_guard_denies_to_login() {
    let stub = ApiStub::default();
    let app = app(&stub).await;

    app.auth.sessions().restore(None).await;

    let mut protected = app.auth.guard(RouteRequirement::authenticated());
    let state = tokio::time::timeout(Duration::from_secs(2), protected.decided())
        .await
        .expect("guard decided");

    assert_eq!(state, GuardState::Denied(DenialReason::NoSession));
}

#[tokio::test]
async fn sign_out_clears_wishlist_cache() {
    let stub = ApiStub::with_profiles(vec![seeker_profile("uid-alice")]);
    let app = app(&stub).await;

    app.auth.sessions().restore(None).await;
    app.auth
        .sessions()
        .sign_in("alice@example.com", "hunter2")
        .await
        .expect("sign in");

    let token = app.auth.sessions().token().await.expect("token");
    app.wishlist.contains(7, &token).await.expect("check");
    assert_eq!(app.wishlist.cached_len(), 1);

    app.auth.sessions().sign_out().await;
    wait_until(|| app.wishlist.cached_len() == 0).await;

    assert_eq!(stub.wishlist_check_hits.load(Ordering::SeqCst), 1);
}
