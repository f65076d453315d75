//! Wishlist models.

use crate::models::property::Property;
use serde::{Deserialize, Serialize};

/// A saved listing in the signed-in user's wishlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub property: Property,
    #[serde(default)]
    pub added_at: Option<String>,
}

/// Response of the membership check endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistCheck {
    pub in_wishlist: bool,
}
