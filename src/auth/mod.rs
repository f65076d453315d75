// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authorization core: session, profile resolution, role predicates, and
//! route guarding.

pub mod classifier;
pub mod guard;
pub mod resolver;
pub mod session;

pub use guard::{DenialReason, GuardState, RedirectDestination, RouteGuard, RouteRequirement};
pub use resolver::{ProfileResolver, ProfileState};
pub use session::{Session, SessionHolder, SessionState};

use crate::models::Profile;

/// The authorization surface the rest of the application consumes.
///
/// Views read predicates, the cached profile, and the combined loading
/// flag from here — never raw profile fields — and obtain route guards for
/// protected screens. One instance is built at startup (see
/// [`crate::AppContext`]) and passed to consumers explicitly.
#[derive(Clone)]
pub struct AuthContext {
    sessions: SessionHolder,
    resolver: ProfileResolver,
}

impl AuthContext {
    pub fn new(sessions: SessionHolder, resolver: ProfileResolver) -> Self {
        Self { sessions, resolver }
    }

    /// Session operations (sign-in/out, tokens).
    pub fn sessions(&self) -> &SessionHolder {
        &self.sessions
    }

    /// The cached profile, if resolved.
    pub fn profile(&self) -> Option<Profile> {
        self.resolver.profile()
    }

    /// True while either the session or the profile is unresolved.
    pub fn loading(&self) -> bool {
        self.sessions.is_loading() || self.resolver.loading()
    }

    /// Re-fetch the profile (after a self-edit, or while polling for an
    /// approval decision). Idempotent.
    pub async fn refresh(&self) {
        self.resolver.refresh().await;
    }

    /// Subscribe to profile-state changes.
    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<ProfileState> {
        self.resolver.subscribe()
    }

    /// Build a live guard for a protected route.
    pub fn guard(&self, requirement: RouteRequirement) -> RouteGuard {
        RouteGuard::new(
            requirement,
            self.sessions.subscribe(),
            self.resolver.subscribe(),
        )
    }

    // ─── Classifier predicates ───────────────────────────────────────────

    pub fn is_admin(&self) -> bool {
        classifier::is_admin(self.profile().as_ref())
    }

    pub fn is_seeker(&self) -> bool {
        classifier::is_seeker(self.profile().as_ref())
    }

    pub fn is_provider(&self) -> bool {
        classifier::is_provider(self.profile().as_ref())
    }

    pub fn can_post_property(&self) -> bool {
        classifier::can_post_property(self.profile().as_ref())
    }

    pub fn needs_approval(&self) -> bool {
        classifier::needs_approval(self.profile().as_ref())
    }

    pub fn is_pending(&self) -> bool {
        classifier::is_pending(self.profile().as_ref())
    }

    pub fn is_approved(&self) -> bool {
        classifier::is_approved(self.profile().as_ref())
    }

    pub fn is_rejected(&self) -> bool {
        classifier::is_rejected(self.profile().as_ref())
    }

    pub fn rejection_reason(&self) -> Option<String> {
        self.profile().and_then(|p| p.rejection_reason)
    }

    pub fn display_type(&self) -> &'static str {
        classifier::display_type(self.profile().as_ref())
    }
}
