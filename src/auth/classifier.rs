// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Role and capability predicates over the profile record.
//!
//! This is the one place role rules live. Every predicate is total: an
//! absent profile gets the restrictive answer. Views consume these instead
//! of branching on raw `user_type`/`provider_type`/`approval_status`
//! fields, which keeps the approval invariants in one place instead of
//! drifting across call sites.

use crate::models::{ApprovalStatus, Profile, ProviderType, UserType};

/// True for admin accounts.
pub fn is_admin(profile: Option<&Profile>) -> bool {
    matches!(profile, Some(p) if p.user_type == UserType::Admin)
}

/// True for seeker accounts.
pub fn is_seeker(profile: Option<&Profile>) -> bool {
    matches!(profile, Some(p) if p.user_type == UserType::Seeker)
}

/// True for provider accounts of any subtype.
pub fn is_provider(profile: Option<&Profile>) -> bool {
    matches!(profile, Some(p) if p.user_type == UserType::Provider)
}

/// Whether this account may post listings.
///
/// Owners may post immediately; agents and builders only once approved.
pub fn can_post_property(profile: Option<&Profile>) -> bool {
    let Some(profile) = profile else {
        return false;
    };

    if profile.user_type != UserType::Provider {
        return false;
    }

    match profile.provider_type {
        Some(ProviderType::Owner) => true,
        Some(ProviderType::Agent) | Some(ProviderType::Builder) => {
            profile.approval_status == ApprovalStatus::Approved
        }
        None => false,
    }
}

/// True for provider subtypes that go through moderation at all.
pub fn needs_approval(profile: Option<&Profile>) -> bool {
    matches!(
        profile,
        Some(p) if p.user_type == UserType::Provider
            && matches!(
                p.provider_type,
                Some(ProviderType::Agent) | Some(ProviderType::Builder)
            )
    )
}

/// True while moderation is pending.
pub fn is_pending(profile: Option<&Profile>) -> bool {
    matches!(profile, Some(p) if p.approval_status == ApprovalStatus::Pending)
}

/// True once approved. Seekers and admins carry `approved` by construction,
/// so this never blocks them.
pub fn is_approved(profile: Option<&Profile>) -> bool {
    matches!(profile, Some(p) if p.approval_status == ApprovalStatus::Approved)
}

/// True when moderation rejected the account.
pub fn is_rejected(profile: Option<&Profile>) -> bool {
    matches!(profile, Some(p) if p.approval_status == ApprovalStatus::Rejected)
}

/// The rejection reason exactly as the record carries it; never fabricated.
pub fn rejection_reason(profile: Option<&Profile>) -> Option<&str> {
    profile.and_then(|p| p.rejection_reason.as_deref())
}

/// Human-readable account label for headers and badges.
pub fn display_type(profile: Option<&Profile>) -> &'static str {
    let Some(profile) = profile else {
        return "User";
    };

    match profile.user_type {
        UserType::Admin => "Admin",
        UserType::Seeker => "Seeker",
        UserType::Provider => match profile.provider_type {
            Some(ProviderType::Owner) => "Property Owner",
            Some(ProviderType::Agent) => "Real Estate Agent",
            Some(ProviderType::Builder) => "Builder/Developer",
            None => "Provider",
        },
    }
}
