// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile resolver: fetches and caches the server-side user record for the
//! current session.
//!
//! Ordering and cancellation rules:
//! - No fetch is issued before the session holder reports its first
//!   definitive state.
//! - A fetch in flight when the session changes is discarded, never applied
//!   to the new (or absent) session.
//! - Any failure (network, non-2xx, malformed payload, timeout) clears the
//!   profile to absent; stale data is never retained.

use crate::auth::session::{SessionHolder, SessionState};
use crate::models::Profile;
use crate::services::users::UsersClient;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// A hung fetch must not park the route guard in `resolving` forever, so
/// fetches time out and the timeout counts as a failure.
const PROFILE_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Cached profile plus the resolver's loading flag.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileState {
    pub loading: bool,
    pub profile: Option<Profile>,
}

impl Default for ProfileState {
    fn default() -> Self {
        Self {
            loading: true,
            profile: None,
        }
    }
}

/// Single writer of the process-wide profile cache.
#[derive(Clone)]
pub struct ProfileResolver {
    users: UsersClient,
    sessions: SessionHolder,
    state_tx: Arc<watch::Sender<ProfileState>>,
    /// Bumped on every session transition; fetches tagged with an older
    /// epoch discard their result.
    epoch: Arc<AtomicU64>,
}

impl ProfileResolver {
    /// Create the resolver and start its session watcher.
    ///
    /// Must be called within a tokio runtime. The watcher lives as long as
    /// the session holder does.
    pub fn spawn(users: UsersClient, sessions: SessionHolder) -> Self {
        let (state_tx, _) = watch::channel(ProfileState::default());

        let resolver = Self {
            users,
            sessions,
            state_tx: Arc::new(state_tx),
            epoch: Arc::new(AtomicU64::new(0)),
        };

        tokio::spawn(resolver.clone().run());
        resolver
    }

    /// Current state snapshot.
    pub fn state(&self) -> ProfileState {
        self.state_tx.borrow().clone()
    }

    /// Cached profile, if resolved.
    pub fn profile(&self) -> Option<Profile> {
        self.state().profile
    }

    /// True while the profile for the current session is unresolved.
    pub fn loading(&self) -> bool {
        self.state().loading
    }

    /// Subscribe to profile-state changes. Dropping the receiver
    /// unsubscribes.
    pub fn subscribe(&self) -> watch::Receiver<ProfileState> {
        self.state_tx.subscribe()
    }

    /// Re-fetch the profile for the current session.
    ///
    /// Idempotent and safe to call repeatedly (e.g. polling while waiting
    /// for an approval decision). Does not flip the loading flag, so guards
    /// don't bounce through `resolving` during a refresh. No session means
    /// nothing to do.
    pub async fn refresh(&self) {
        let Some(session) = self.sessions.state().session().cloned() else {
            return;
        };

        let epoch = self.epoch.load(Ordering::SeqCst);
        self.fetch_and_apply(&session.uid, epoch).await;
    }

    /// Session watcher: drives the resolver through session transitions.
    async fn run(self) {
        let mut rx = self.sessions.subscribe();

        loop {
            let state = rx.borrow_and_update().clone();
            match state {
                // First definitive session state not known yet; no fetch.
                SessionState::Resolving => {}
                SessionState::SignedOut => {
                    self.epoch.fetch_add(1, Ordering::SeqCst);
                    self.state_tx.send_replace(ProfileState {
                        loading: false,
                        profile: None,
                    });
                }
                SessionState::SignedIn(session) => {
                    let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
                    self.state_tx.send_replace(ProfileState {
                        loading: true,
                        profile: None,
                    });

                    // Fetch off-watcher so a sign-out arriving mid-fetch is
                    // seen immediately and invalidates the epoch.
                    let resolver = self.clone();
                    tokio::spawn(async move {
                        resolver.fetch_and_apply(&session.uid, epoch).await;
                    });
                }
            }

            if rx.changed().await.is_err() {
                break;
            }
        }
    }

    async fn fetch_and_apply(&self, uid: &str, epoch: u64) {
        let result = tokio::time::timeout(PROFILE_FETCH_TIMEOUT, self.fetch_profile(uid)).await;

        let profile = match result {
            Ok(Some(profile)) => Some(profile),
            Ok(None) => None,
            Err(_) => {
                tracing::warn!(uid, "Profile fetch timed out");
                None
            }
        };

        if self.epoch.load(Ordering::SeqCst) == epoch {
            self.state_tx.send_replace(ProfileState {
                loading: false,
                profile,
            });
        } else {
            tracing::debug!(uid, "Discarding profile fetch for superseded session");
        }
    }

    async fn fetch_profile(&self, uid: &str) -> Option<Profile> {
        // Treat "no token" as the unauthenticated case, same as no session.
        let token = self.sessions.token().await?;

        match self.users.get_profile(uid, &token).await {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::warn!(uid, error = %e, "Profile fetch failed");
                None
            }
        }
    }
}
