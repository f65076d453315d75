// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Property listing models: the listing record, the validated draft used
//! when posting, and the list-endpoint filter/pagination envelope.

use crate::models::profile::ApprovalStatus;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Sale vs rental listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    Sale,
    Rent,
}

/// Kind of property being listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Apartment,
    House,
    Villa,
    Plot,
    Commercial,
}

/// A property listing as served by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub property_type: PropertyType,
    pub listing_type: ListingType,
    /// Sale price; present for sale listings
    #[serde(default)]
    pub price: Option<f64>,
    /// Monthly rent; present for rental listings
    #[serde(default)]
    pub rent_per_month: Option<f64>,
    #[serde(default)]
    pub price_per_sqft: Option<f64>,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: Option<u32>,
    /// Built-up area in square feet
    pub area: f64,
    #[serde(default)]
    pub address: Option<String>,
    pub city: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Listings are admin-moderated with the same states as providers
    pub approval_status: ApprovalStatus,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    /// Server id of the posting provider
    pub owner_id: u64,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Draft listing posted by a provider. Validated client-side before the
/// request goes out, mirroring the posting form's rules.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDraft {
    #[validate(length(min = 1, max = 200, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    pub property_type: PropertyType,
    pub listing_type: ListingType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rent_per_month: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_sqft: Option<f64>,
    pub bedrooms: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    #[validate(range(min = 1.0, message = "area is required"))]
    pub area: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    pub images: Vec<String>,
    pub amenities: Vec<String>,
}

impl PropertyDraft {
    /// Field validation plus the cross-field pricing rule: sale listings
    /// need a price, rentals a monthly rent.
    pub fn validate_for_submit(&self) -> Result<(), validator::ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => validator::ValidationErrors::new(),
            Err(errors) => errors,
        };

        match self.listing_type {
            ListingType::Sale if self.price.is_none() => {
                errors.add(
                    "price".into(),
                    validator::ValidationError::new("sale_price_required"),
                );
            }
            ListingType::Rent if self.rent_per_month.is_none() => {
                errors.add(
                    "rentPerMonth".into(),
                    validator::ValidationError::new("rent_required"),
                );
            }
            _ => {}
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Price per sqft derived from the sale price, when both inputs exist.
    pub fn derived_price_per_sqft(&self) -> Option<f64> {
        match (self.price, self.area) {
            (Some(price), area) if area > 0.0 => Some(price / area),
            _ => None,
        }
    }
}

/// Query filters for the public listings endpoint. Absent fields are left
/// out of the query string entirely, matching the API's expectations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_type: Option<ListingType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    /// Pagination: page number (1-indexed)
    pub page: u32,
    /// Pagination: items per page
    pub per_page: u32,
}

impl Default for PropertyFilters {
    fn default() -> Self {
        Self {
            search: None,
            listing_type: None,
            property_type: None,
            city: None,
            min_price: None,
            max_price: None,
            bedrooms: None,
            page: 1,
            per_page: 12,
        }
    }
}

/// Pagination envelope returned alongside listing pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub pages: u32,
    pub total: u64,
}

/// One page of listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyPage {
    pub properties: Vec<Property>,
    pub pagination: Pagination,
}
