use crate::domain::error::MarketResult;
use crate::domain::model::{require_amount, Listing};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A confirmed reservation. Written once, never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub user_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
}

/// Input of the booking recorder.
///
/// `total_price` is taken as given; the recorder does not recompute it from
/// the listing, and it does not check that the referenced listing exists.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub listing_id: Uuid,
    pub user_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: f64,
}

impl NewBooking {
    pub fn validate(&self) -> MarketResult<()> {
        require_amount("totalPrice", self.total_price)
    }

    pub fn into_booking(self) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            listing_id: self.listing_id,
            user_id: self.user_id,
            start_date: self.start_date,
            end_date: self.end_date,
            total_price: self.total_price,
            created_at: Utc::now(),
        }
    }
}

/// A booking joined with the current state of its listing.
///
/// `listing` is `None` when the listing was deleted after the booking was made.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingWithListing {
    pub booking: Booking,
    pub listing: Option<Listing>,
}
