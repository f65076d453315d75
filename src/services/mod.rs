// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - HTTP clients for the remote collaborators.

pub mod api;
pub mod identity;
pub mod properties;
pub mod uploads;
pub mod users;
pub mod wishlist;

pub use api::{ApiClient, MessageResponse};
pub use identity::{AuthTokens, IdentityClient, OAuthProvider, RefreshedTokens};
pub use properties::PropertiesClient;
pub use uploads::UploadsClient;
pub use users::UsersClient;
pub use wishlist::WishlistClient;
