// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod profile;
pub mod property;
pub mod wishlist;

pub use profile::{
    ApprovalStatus, NewUser, Profile, ProfileUpdate, ProviderType, UserFilters, UserType,
};
pub use property::{
    ListingType, Pagination, Property, PropertyDraft, PropertyFilters, PropertyPage, PropertyType,
};
pub use wishlist::{WishlistCheck, WishlistItem};
