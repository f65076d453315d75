// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session holder: the client's view of the identity provider.
//!
//! Holds the current session, broadcasts changes on a watch channel, and
//! manages the bearer-token lifecycle (expiry-margin refresh, serialized so
//! concurrent callers don't race duplicate refresh calls).

use crate::error::AppError;
use crate::services::identity::{AuthTokens, IdentityClient, OAuthProvider};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::{watch, Mutex, RwLock};

/// Margin before token expiration when we proactively refresh (5 minutes).
const TOKEN_REFRESH_MARGIN_SECS: i64 = 5 * 60;

/// An authenticated identity, as known to the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Identity provider uid
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub email_verified: bool,
}

/// Session lifecycle state.
///
/// `Resolving` lasts until the first definitive answer (restored session or
/// signed out) is known; consumers must not treat it as signed out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Resolving,
    SignedOut,
    SignedIn(Session),
}

impl SessionState {
    pub fn is_resolving(&self) -> bool {
        matches!(self, SessionState::Resolving)
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::SignedIn(session) => Some(session),
            _ => None,
        }
    }
}

/// Bearer token plus the refresh token that renews it.
#[derive(Clone)]
struct TokenSet {
    id_token: String,
    refresh_token: String,
    expires_at: DateTime<Utc>,
}

/// Process-wide session holder.
///
/// One instance is constructed at application start and shared by handle;
/// clones observe the same session. Subscriptions come from
/// [`subscribe`](Self::subscribe) and are cancelled by dropping the
/// receiver.
#[derive(Clone)]
pub struct SessionHolder {
    identity: IdentityClient,
    state_tx: Arc<watch::Sender<SessionState>>,
    tokens: Arc<RwLock<Option<TokenSet>>>,
    /// Serializes token refresh so only one task performs it.
    refresh_lock: Arc<Mutex<()>>,
}

impl SessionHolder {
    /// Create a holder in the `Resolving` state.
    pub fn new(identity: IdentityClient) -> Self {
        let (state_tx, _) = watch::channel(SessionState::Resolving);

        Self {
            identity,
            state_tx: Arc::new(state_tx),
            tokens: Arc::new(RwLock::new(None)),
            refresh_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Resolve the initial session from a persisted refresh token.
    ///
    /// Call exactly once at startup. `None` (nothing persisted) resolves to
    /// signed out immediately; a rejected token also resolves to signed out
    /// since that is the normal expired-session case.
    pub async fn restore(&self, persisted_refresh_token: Option<&str>) {
        let Some(refresh_token) = persisted_refresh_token else {
            self.state_tx.send_replace(SessionState::SignedOut);
            return;
        };

        match self.identity.refresh(refresh_token).await {
            Ok(refreshed) => {
                let session = Session {
                    uid: refreshed.user_id.clone(),
                    email: None,
                    display_name: None,
                    email_verified: false,
                };

                *self.tokens.write().await = Some(TokenSet {
                    id_token: refreshed.id_token.clone(),
                    refresh_token: refreshed.refresh_token.clone(),
                    expires_at: Utc::now() + Duration::seconds(refreshed.expires_in_secs()),
                });

                tracing::info!(uid = %session.uid, "Session restored");
                self.state_tx.send_replace(SessionState::SignedIn(session));
            }
            Err(e) => {
                if !e.is_identity_token_error() {
                    tracing::warn!(error = %e, "Session restore failed");
                }
                self.state_tx.send_replace(SessionState::SignedOut);
            }
        }
    }

    /// Sign in with email and password.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let tokens = self.identity.sign_in(email, password).await?;
        Ok(self.apply_auth_tokens(tokens).await)
    }

    /// Create an account, trigger its verification email, and sign in.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<Session, AppError> {
        let tokens = self.identity.sign_up(email, password, display_name).await?;

        if let Err(e) = self.identity.send_email_verification(&tokens.id_token).await {
            tracing::warn!(error = %e, "Verification email failed, continuing anyway");
        }

        Ok(self.apply_auth_tokens(tokens).await)
    }

    /// Complete an OAuth popup flow by exchanging the authorization code.
    pub async fn sign_in_with_oauth(
        &self,
        provider: OAuthProvider,
        code: &str,
        redirect_uri: &str,
    ) -> Result<Session, AppError> {
        let tokens = self
            .identity
            .exchange_oauth_code(provider, code, redirect_uri)
            .await?;
        Ok(self.apply_auth_tokens(tokens).await)
    }

    /// Sign out locally. Idempotent; safe to call when already signed out.
    pub async fn sign_out(&self) {
        *self.tokens.write().await = None;
        self.state_tx.send_replace(SessionState::SignedOut);
        tracing::info!("Signed out");
    }

    /// Current state snapshot.
    pub fn state(&self) -> SessionState {
        self.state_tx.borrow().clone()
    }

    /// Current session, if signed in.
    pub fn session(&self) -> Option<Session> {
        self.state().session().cloned()
    }

    /// True until the first definitive session state is known.
    pub fn is_loading(&self) -> bool {
        self.state().is_resolving()
    }

    /// Subscribe to session changes. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    /// A currently-valid bearer token, or `None` when there is no session.
    ///
    /// Refreshes proactively inside the expiry margin. Failure to obtain a
    /// token is the normal unauthenticated case for callers, never an
    /// error:
    /// 1. Fast path: current token still valid
    /// 2. Acquire the refresh lock
    /// 3. Re-check after the lock (another task may have refreshed)
    /// 4. Refresh-token grant against the identity provider
    pub async fn token(&self) -> Option<String> {
        let now = Utc::now();
        let margin = Duration::seconds(TOKEN_REFRESH_MARGIN_SECS);

        if let Some(tokens) = self.tokens.read().await.as_ref() {
            if now + margin < tokens.expires_at {
                return Some(tokens.id_token.clone());
            }
        }

        let _guard = self.refresh_lock.lock().await;

        // Double-check after acquiring the lock.
        let refresh_token = {
            let tokens = self.tokens.read().await;
            let tokens = tokens.as_ref()?;
            if now + margin < tokens.expires_at {
                return Some(tokens.id_token.clone());
            }
            tokens.refresh_token.clone()
        };

        match self.identity.refresh(&refresh_token).await {
            Ok(refreshed) => {
                let id_token = refreshed.id_token.clone();
                let expires_at = now + Duration::seconds(refreshed.expires_in_secs());
                *self.tokens.write().await = Some(TokenSet {
                    id_token: refreshed.id_token,
                    refresh_token: refreshed.refresh_token,
                    expires_at,
                });

                tracing::debug!("Bearer token refreshed");
                Some(id_token)
            }
            Err(e) if e.is_identity_token_error() => {
                // Refresh token revoked upstream: the session is over.
                tracing::info!("Refresh token rejected, signing out");
                *self.tokens.write().await = None;
                self.state_tx.send_replace(SessionState::SignedOut);
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh failed");
                None
            }
        }
    }

    /// Re-send the verification email for the signed-in account.
    pub async fn resend_verification(&self) -> Result<(), AppError> {
        let token = self.token().await.ok_or(AppError::Unauthorized)?;
        self.identity.send_email_verification(&token).await
    }

    /// Send a password-reset email. Works without a session.
    pub async fn forgot_password(&self, email: &str) -> Result<(), AppError> {
        self.identity.send_password_reset(email).await
    }

    /// The refresh token to persist across restarts, if signed in.
    ///
    /// The identity provider's storage owns persistence; this is the value
    /// the host hands back to [`restore`](Self::restore) next launch.
    pub async fn persistable_refresh_token(&self) -> Option<String> {
        self.tokens
            .read()
            .await
            .as_ref()
            .map(|t| t.refresh_token.clone())
    }

    async fn apply_auth_tokens(&self, tokens: AuthTokens) -> Session {
        let session = Session {
            uid: tokens.local_id.clone(),
            email: tokens.email.clone(),
            display_name: tokens.display_name.clone(),
            email_verified: tokens.email_verified,
        };

        *self.tokens.write().await = Some(TokenSet {
            id_token: tokens.id_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            expires_at: Utc::now() + Duration::seconds(tokens.expires_in_secs()),
        });

        tracing::info!(uid = %session.uid, "Signed in");
        self.state_tx
            .send_replace(SessionState::SignedIn(session.clone()));

        session
    }
}
