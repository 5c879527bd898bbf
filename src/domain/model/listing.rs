use crate::domain::error::MarketResult;
use crate::domain::model::{require_amount, require_text};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A hostable property. Owned (by reference) by exactly one host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: Uuid,
    pub title: String,
    /// Free text; matched case-insensitively as a substring when filtering.
    pub location: String,
    /// Nightly rate in whole currency units.
    pub price: f64,
    pub description: String,
    /// Absolute URL or a path relative to the media host.
    pub image_ref: String,
    pub host_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    pub title: String,
    pub location: String,
    pub price: f64,
    pub description: String,
    pub image_ref: String,
}

impl NewListing {
    pub fn validate(&self) -> MarketResult<()> {
        require_text("title", &self.title)?;
        require_text("location", &self.location)?;
        require_text("description", &self.description)?;
        require_text("imageRef", &self.image_ref)?;
        require_amount("price", self.price)
    }

    pub fn into_listing(self, host_id: Uuid) -> Listing {
        Listing {
            id: Uuid::new_v4(),
            title: self.title,
            location: self.location,
            price: self.price,
            description: self.description,
            image_ref: self.image_ref,
            host_id,
        }
    }
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingUpdate {
    pub title: Option<String>,
    pub location: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub image_ref: Option<String>,
}

impl ListingUpdate {
    pub fn validate(&self) -> MarketResult<()> {
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        if let Some(location) = &self.location {
            require_text("location", location)?;
        }
        if let Some(description) = &self.description {
            require_text("description", description)?;
        }
        if let Some(image_ref) = &self.image_ref {
            require_text("imageRef", image_ref)?;
        }
        if let Some(price) = self.price {
            require_amount("price", price)?;
        }
        Ok(())
    }

    pub fn apply_to(self, listing: &mut Listing) {
        if let Some(title) = self.title {
            listing.title = title;
        }
        if let Some(location) = self.location {
            listing.location = location;
        }
        if let Some(price) = self.price {
            listing.price = price;
        }
        if let Some(description) = self.description {
            listing.description = description;
        }
        if let Some(image_ref) = self.image_ref {
            listing.image_ref = image_ref;
        }
    }
}

/// One bar of the host analytics chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationCount {
    pub location: String,
    pub listings: usize,
}
