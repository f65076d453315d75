// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route guard: decides whether protected content renders, redirects, or
//! waits.
//!
//! The guard is a three-state machine over the session and profile states.
//! `Denied` carries its reason because the two denial cases redirect to
//! different destinations with different messaging ("please sign in" vs
//! "you don't have access"). Decisions are never one-shot: a live guard
//! re-evaluates on every session or profile change.

use crate::auth::classifier;
use crate::auth::resolver::ProfileState;
use crate::auth::session::SessionState;
use tokio::sync::watch;

/// Why a route was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// Nobody is signed in.
    NoSession,
    /// Signed in, but the route needs a role this account doesn't have.
    InsufficientRole,
}

/// Where to send a denied user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectDestination {
    Login,
    Home,
}

impl DenialReason {
    /// The user-facing destination for this denial.
    pub fn destination(&self) -> RedirectDestination {
        match self {
            DenialReason::NoSession => RedirectDestination::Login,
            DenialReason::InsufficientRole => RedirectDestination::Home,
        }
    }
}

/// Guard decision for a protected route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Session or profile still loading; render nothing yet.
    Resolving,
    Denied(DenialReason),
    Granted,
}

/// What a route requires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteRequirement {
    pub admin_only: bool,
}

impl RouteRequirement {
    /// Any signed-in account.
    pub const fn authenticated() -> Self {
        Self { admin_only: false }
    }

    /// Admin accounts only.
    pub const fn admin_only() -> Self {
        Self { admin_only: true }
    }
}

/// Pure guard decision over current session and profile state.
///
/// Admin routes can never reach `Granted` without `is_admin()`: an absent
/// or still-loading profile denies or waits, it never falls through.
pub fn evaluate(
    requirement: RouteRequirement,
    session: &SessionState,
    profile: &ProfileState,
) -> GuardState {
    match session {
        SessionState::Resolving => GuardState::Resolving,
        SessionState::SignedOut => GuardState::Denied(DenialReason::NoSession),
        SessionState::SignedIn(_) => {
            if profile.loading {
                return GuardState::Resolving;
            }

            if requirement.admin_only && !classifier::is_admin(profile.profile.as_ref()) {
                return GuardState::Denied(DenialReason::InsufficientRole);
            }

            GuardState::Granted
        }
    }
}

/// Live guard bound to one route's requirement.
///
/// Holds subscriptions to the session holder and profile resolver and
/// re-evaluates whenever either changes.
pub struct RouteGuard {
    requirement: RouteRequirement,
    sessions: watch::Receiver<SessionState>,
    profiles: watch::Receiver<ProfileState>,
}

impl RouteGuard {
    pub fn new(
        requirement: RouteRequirement,
        sessions: watch::Receiver<SessionState>,
        profiles: watch::Receiver<ProfileState>,
    ) -> Self {
        Self {
            requirement,
            sessions,
            profiles,
        }
    }

    /// Decision for the current states.
    pub fn state(&self) -> GuardState {
        evaluate(self.requirement, &self.sessions.borrow(), &self.profiles.borrow())
    }

    /// Wait for the next session or profile change, then re-evaluate.
    ///
    /// Returns the current decision if the underlying holders shut down.
    pub async fn changed(&mut self) -> GuardState {
        tokio::select! {
            _ = self.sessions.changed() => {}
            _ = self.profiles.changed() => {}
        }
        self.state()
    }

    /// Wait until the guard leaves `Resolving`.
    pub async fn decided(&mut self) -> GuardState {
        loop {
            let state = self.state();
            if state != GuardState::Resolving {
                return state;
            }

            tokio::select! {
                changed = self.sessions.changed() => {
                    if changed.is_err() {
                        return self.state();
                    }
                }
                changed = self.profiles.changed() => {
                    if changed.is_err() {
                        return self.state();
                    }
                }
            }
        }
    }
}
