//! User profile model as served by the marketplace API.

use serde::{Deserialize, Serialize};

/// Account role, fixed at account creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Browses, wishlists and compares listings.
    Seeker,
    /// May post listings, subject to approval.
    Provider,
    /// Moderates users and listings.
    Admin,
}

/// Provider subtype. Present only for provider accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    Owner,
    Agent,
    Builder,
}

/// Moderation state. Owners are approved at creation; agents and builders
/// start pending and move to approved/rejected through admin action. The
/// same states moderate property listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

/// Server-side user record, fetched once per session and cached by the
/// profile resolver.
///
/// Consumers should not branch on `user_type`/`provider_type`/
/// `approval_status` directly; the classifier predicates in
/// [`crate::auth::classifier`] are the supported surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Server row id (admin moderation endpoints key on this)
    pub id: u64,
    /// Identity provider uid
    pub external_id: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub user_type: UserType,
    /// Non-null iff `user_type` is `Provider`
    #[serde(default)]
    pub provider_type: Option<ProviderType>,
    pub approval_status: ApprovalStatus,
    /// Present only when `approval_status` is `Rejected`
    #[serde(default)]
    pub rejection_reason: Option<String>,
    pub is_verified: bool,
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// New-user payload sent to the API right after identity signup.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub external_id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub user_type: UserType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_type: Option<ProviderType>,
}

/// Partial self-edit of a profile.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Admin filters for the user listing.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<UserType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_type: Option<ProviderType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_status: Option<ApprovalStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}
