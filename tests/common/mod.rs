// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared test fixtures: profile builders and stub identity/API servers.

// Not every test binary uses every fixture.
#![allow(dead_code)]

use axum::extract::{Path, RawQuery, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use nestfind_client::models::{
    ApprovalStatus, Pagination, Profile, Property, PropertyPage, PropertyType, ProviderType,
    UserType,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::AtomicUsize;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Bind a stub router on an ephemeral port and return its base URL.
#[allow(dead_code)]
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve stub");
    });

    format!("http://{}", addr)
}

// ─── Profile fixtures ────────────────────────────────────────────

#[allow(dead_code)]
pub fn profile(
    uid: &str,
    user_type: UserType,
    provider_type: Option<ProviderType>,
    approval_status: ApprovalStatus,
) -> Profile {
    Profile {
        id: 1,
        external_id: uid.to_string(),
        email: format!("{}@example.com", uid),
        full_name: Some("Test User".to_string()),
        phone: None,
        user_type,
        provider_type,
        approval_status,
        rejection_reason: None,
        is_verified: true,
        is_active: true,
        created_at: None,
    }
}

#[allow(dead_code)]
pub fn seeker_profile(uid: &str) -> Profile {
    profile(uid, UserType::Seeker, None, ApprovalStatus::Approved)
}

#[allow(dead_code)]
pub fn admin_profile(uid: &str) -> Profile {
    profile(uid, UserType::Admin, None, ApprovalStatus::Approved)
}

#[allow(dead_code)]
pub fn provider_profile(
    uid: &str,
    provider_type: ProviderType,
    approval_status: ApprovalStatus,
) -> Profile {
    profile(
        uid,
        UserType::Provider,
        Some(provider_type),
        approval_status,
    )
}

#[allow(dead_code)]
pub fn sample_property(id: u64) -> Property {
    Property {
        id,
        title: format!("Listing {}", id),
        description: "Bright corner unit".to_string(),
        property_type: PropertyType::Apartment,
        listing_type: nestfind_client::models::ListingType::Sale,
        price: Some(4_500_000.0),
        rent_per_month: None,
        price_per_sqft: None,
        bedrooms: 2,
        bathrooms: Some(2),
        area: 980.0,
        address: None,
        city: "Pune".to_string(),
        images: vec![],
        amenities: vec![],
        approval_status: ApprovalStatus::Approved,
        rejection_reason: None,
        is_featured: false,
        owner_id: 42,
        created_at: None,
    }
}

// ─── Identity provider stub ──────────────────────────────────────
//
// Email conventions steer behavior:
// - a local part starting with "short" gets a 60s token, inside the
//   session holder's refresh margin, so the next token() refreshes
// - a local part starting with "revoked" additionally gets a refresh
//   token the /v1/token endpoint rejects

#[allow(dead_code)]
pub fn identity_stub_router() -> Router {
    Router::new()
        .route("/v1/accounts:signInWithPassword", post(identity_sign_in))
        .route("/v1/accounts:signUp", post(identity_sign_in))
        .route("/v1/accounts:signInWithIdp", post(identity_sign_in))
        .route("/v1/accounts:sendOobCode", post(identity_oob))
        .route("/v1/token", post(identity_token))
}

fn auth_tokens_for(email: &str) -> Value {
    let local = email.split('@').next().unwrap_or("user");
    let short_lived = local.starts_with("short") || local.starts_with("revoked");
    let refresh_token = if local.starts_with("revoked") {
        "refresh-revoked".to_string()
    } else {
        format!("refresh-{}", local)
    };

    json!({
        "idToken": format!("id-initial-{}", local),
        "refreshToken": refresh_token,
        "expiresIn": if short_lived { "60" } else { "3600" },
        "localId": format!("uid-{}", local),
        "email": email,
        "emailVerified": false,
    })
}

async fn identity_sign_in(Json(body): Json<Value>) -> Json<Value> {
    let email = body["email"].as_str().unwrap_or("user@example.com");
    Json(auth_tokens_for(email))
}

async fn identity_oob(Json(_body): Json<Value>) -> Json<Value> {
    Json(json!({ "email": "sent" }))
}

async fn identity_token(
    Form(params): Form<HashMap<String, String>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let refresh_token = params.get("refresh_token").cloned().unwrap_or_default();

    if refresh_token.contains("revoked") || refresh_token.contains("expired") {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": { "message": "TOKEN_EXPIRED" } })),
        ));
    }

    let local = refresh_token.trim_start_matches("refresh-");
    Ok(Json(json!({
        "id_token": format!("id-refreshed-{}", local),
        "refresh_token": refresh_token,
        "expires_in": "3600",
        "user_id": format!("uid-{}", local),
    })))
}

// ─── Marketplace API stub ────────────────────────────────────────

#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct ApiStub {
    pub profiles: Arc<Mutex<HashMap<String, Profile>>>,
    pub properties: Arc<Mutex<Vec<Property>>>,
    /// Artificial latency for the profile endpoint, in milliseconds.
    pub profile_delay_ms: Arc<AtomicUsize>,
    pub profile_hits: Arc<AtomicUsize>,
    pub wishlist_check_hits: Arc<AtomicUsize>,
    pub last_list_query: Arc<Mutex<Option<String>>>,
}

#[allow(dead_code)]
impl ApiStub {
    pub fn with_profiles(profiles: Vec<Profile>) -> Self {
        let stub = Self::default();
        {
            let mut map = stub.profiles.lock().unwrap();
            for profile in profiles {
                map.insert(profile.external_id.clone(), profile);
            }
        }
        stub
    }

    pub fn upsert(&self, profile: Profile) {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.external_id.clone(), profile);
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/users/profile/{uid}", get(get_profile))
            .route("/properties", get(list_properties).post(create_property))
            .route("/properties/featured", get(featured_properties))
            .route("/properties/{id}", get(get_property))
            .route("/wishlist/check/{id}", get(check_wishlist))
            .with_state(self.clone())
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty() && *t != "bad-token")
        .map(|t| t.to_string())
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "unauthorized" })),
    )
}

async fn get_profile(
    State(stub): State<ApiStub>,
    Path(uid): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Profile>, (StatusCode, Json<Value>)> {
    if bearer_token(&headers).is_none() {
        return Err(unauthorized());
    }

    let delay = stub
        .profile_delay_ms
        .load(std::sync::atomic::Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay as u64)).await;
    }

    stub.profile_hits
        .fetch_add(1, std::sync::atomic::Ordering::SeqCst);

    let profile = stub.profiles.lock().unwrap().get(&uid).cloned();
    profile.map(Json).ok_or((
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "not_found", "details": uid })),
    ))
}

async fn list_properties(State(stub): State<ApiStub>, RawQuery(query): RawQuery) -> Json<PropertyPage> {
    *stub.last_list_query.lock().unwrap() = query;

    let properties = stub.properties.lock().unwrap().clone();
    let total = properties.len() as u64;
    Json(PropertyPage {
        properties,
        pagination: Pagination {
            page: 1,
            pages: 1,
            total,
        },
    })
}

async fn featured_properties(State(stub): State<ApiStub>) -> Json<Vec<Property>> {
    let featured = stub
        .properties
        .lock()
        .unwrap()
        .iter()
        .filter(|p| p.is_featured)
        .cloned()
        .collect();
    Json(featured)
}

async fn get_property(
    State(stub): State<ApiStub>,
    Path(id): Path<u64>,
) -> Result<Json<Property>, (StatusCode, Json<Value>)> {
    let property = stub
        .properties
        .lock()
        .unwrap()
        .iter()
        .find(|p| p.id == id)
        .cloned();

    property.map(Json).ok_or((
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "not_found", "details": format!("property {}", id) })),
    ))
}

async fn create_property(
    State(stub): State<ApiStub>,
    headers: HeaderMap,
    Json(draft): Json<Value>,
) -> Result<Json<Property>, (StatusCode, Json<Value>)> {
    if bearer_token(&headers).is_none() {
        return Err(unauthorized());
    }

    let mut created = sample_property(101);
    if let Some(title) = draft["title"].as_str() {
        created.title = title.to_string();
    }
    created.approval_status = ApprovalStatus::Pending;

    stub.properties.lock().unwrap().push(created.clone());
    Ok(Json(created))
}

async fn check_wishlist(
    State(stub): State<ApiStub>,
    Path(_id): Path<u64>,
    headers: HeaderMap,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if bearer_token(&headers).is_none() {
        return Err(unauthorized());
    }

    stub.wishlist_check_hits
        .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    Ok(Json(json!({ "inWishlist": true })))
}
