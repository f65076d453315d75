// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! NestFind client core: session, authorization and API plumbing for the
//! NestFind real-estate marketplace client.
//!
//! This crate is the non-visual half of the client application. It owns
//! session state against the hosted identity provider, resolves the
//! server-side profile, derives role/capability predicates, guards
//! protected routes, and wraps the marketplace REST API and the asset
//! upload service in typed clients. UI layers consume it through
//! [`AppContext`].

pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;

use auth::{AuthContext, ProfileResolver, SessionHolder, SessionState};
use config::Config;
use services::{
    ApiClient, IdentityClient, PropertiesClient, UploadsClient, UsersClient, WishlistClient,
};
use std::time::Duration;

/// Everything the client application depends on, built once at startup.
///
/// This is deliberately an owned value passed into consumers, not ambient
/// state: there is exactly one profile cache and one session holder, and
/// their lifetime is the lifetime of this struct.
#[derive(Clone)]
pub struct AppContext {
    pub config: Config,
    /// Identity provider client (OAuth authorize URLs etc.); session
    /// operations go through `auth`.
    pub identity: IdentityClient,
    pub auth: AuthContext,
    pub users: UsersClient,
    pub properties: PropertiesClient,
    pub wishlist: WishlistClient,
    pub uploads: UploadsClient,
}

impl AppContext {
    /// Wire up all clients and the auth core.
    ///
    /// Must be called within a tokio runtime (the profile resolver starts
    /// its session watcher here). Call
    /// [`SessionHolder::restore`](auth::SessionHolder::restore) afterwards
    /// to resolve the initial session.
    pub fn new(config: Config) -> Self {
        let api = ApiClient::new(
            config.api_url.clone(),
            Duration::from_secs(config.http_timeout_secs),
        );
        let identity = IdentityClient::new(
            config.identity_url.clone(),
            config.identity_api_key.clone(),
        );

        let sessions = SessionHolder::new(identity.clone());
        let users = UsersClient::new(api.clone());
        let resolver = ProfileResolver::spawn(users.clone(), sessions.clone());
        let auth = AuthContext::new(sessions, resolver);

        let properties = PropertiesClient::new(api.clone());
        let wishlist = WishlistClient::new(api);
        let uploads = UploadsClient::new(config.upload_url.clone(), config.upload_preset.clone());

        // One user's wishlist must not bleed into the next session.
        let mut session_rx = auth.sessions().subscribe();
        let wishlist_for_watcher = wishlist.clone();
        tokio::spawn(async move {
            while session_rx.changed().await.is_ok() {
                if matches!(*session_rx.borrow(), SessionState::SignedOut) {
                    wishlist_for_watcher.clear_cache();
                }
            }
        });

        Self {
            config,
            identity,
            auth,
            users,
            properties,
            wishlist,
            uploads,
        }
    }
}
