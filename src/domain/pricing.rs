//! Stay pricing: date range and nightly rate to a total with service fee.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::domain::error::MarketError;

/// Service fee charged on top of the subtotal.
pub const SERVICE_FEE_RATE: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub nights: i64,
    pub nightly_rate: f64,
    pub subtotal: f64,
    pub service_fee: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PricingError {
    #[error("end date {end} must be after start date {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("nightly rate must be a non-negative number")]
    InvalidRate,
}

impl From<PricingError> for MarketError {
    fn from(err: PricingError) -> Self {
        MarketError::Validation(err.to_string())
    }
}

/// Whole nights between two calendar dates; zero or negative when `end` is not after `start`.
pub fn nights(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

pub fn quote(start: NaiveDate, end: NaiveDate, nightly_rate: f64) -> Result<PriceQuote, PricingError> {
    if !nightly_rate.is_finite() || nightly_rate < 0.0 {
        return Err(PricingError::InvalidRate);
    }
    let n = nights(start, end);
    if n <= 0 {
        return Err(PricingError::InvalidRange { start, end });
    }

    let subtotal = n as f64 * nightly_rate;
    // Fees are non-negative, so rounding half away from zero rounds half up.
    let service_fee = (subtotal * SERVICE_FEE_RATE).round();

    Ok(PriceQuote {
        start_date: start,
        end_date: end,
        nights: n,
        nightly_rate,
        subtotal,
        service_fee,
        total: subtotal + service_fee,
    })
}
