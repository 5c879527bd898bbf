//! Listing filter: narrows a listing collection for display.
//!
//! Pure and order-preserving. The source collection is only borrowed, so the
//! same listings can be filtered again with different criteria.

use crate::domain::model::Listing;
use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};

/// User-supplied constraints. An unset field imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the listing location.
    pub location: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub min_price: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub max_price: Option<f64>,
    /// Carried through for the caller; no availability filtering is done.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub end_date: Option<NaiveDate>,
}

/// Query strings carry every value as text, and a search form submits untouched
/// fields as `minPrice=`. Empty or blank text reads as unset.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text.parse::<T>().map(Some).map_err(de::Error::custom),
    }
}

impl FilterCriteria {
    pub fn matches(&self, listing: &Listing) -> bool {
        self.matches_location(listing) && self.matches_price(listing)
    }

    fn matches_location(&self, listing: &Listing) -> bool {
        match self.location.as_deref() {
            None => true,
            Some(needle) if needle.trim().is_empty() => true,
            Some(needle) => listing
                .location
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        }
    }

    fn matches_price(&self, listing: &Listing) -> bool {
        self.min_price.map_or(true, |min| listing.price >= min)
            && self.max_price.map_or(true, |max| listing.price <= max)
    }
}

pub fn filter_listings<'a>(listings: &'a [Listing], criteria: &FilterCriteria) -> Vec<&'a Listing> {
    listings.iter().filter(|l| criteria.matches(l)).collect()
}
