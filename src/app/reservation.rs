//! Reservation flow: quote, availability check, payment capture, then booking.
//!
//! Payment is captured before anything is written, so a declined payment never
//! leaves a booking behind. The availability check and the booking write are
//! two separate requests; two reservations racing for the same dates can both
//! pass the check.

use crate::app::booking_recorder::BookingRecorder;
use crate::domain::availability::{find_conflict, StayRange};
use crate::domain::context::CallerContext;
use crate::domain::error::{MarketError, MarketResult};
use crate::domain::model::{Booking, Listing, NewBooking};
use crate::domain::pricing::{self, PriceQuote};
use crate::infra::payment::{PaymentConfirmation, PaymentGateway};
use crate::storage::MarketStore;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub booking: Booking,
    pub quote: PriceQuote,
    pub payment: PaymentConfirmation,
}

#[derive(Clone)]
pub struct ReservationDesk {
    store: Arc<dyn MarketStore>,
    recorder: BookingRecorder,
    payments: Arc<dyn PaymentGateway>,
    currency: String,
}

impl ReservationDesk {
    pub fn new(
        store: Arc<dyn MarketStore>,
        payments: Arc<dyn PaymentGateway>,
        currency: String,
    ) -> Self {
        Self {
            recorder: BookingRecorder::new(store.clone()),
            store,
            payments,
            currency,
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Prices a stay at the listing's current nightly rate.
    pub async fn quote(
        &self,
        listing_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> MarketResult<PriceQuote> {
        let listing = self
            .store
            .get_listing(listing_id)
            .await?
            .ok_or_else(|| MarketError::not_found("listing"))?;
        Ok(pricing::quote(start, end, listing.price)?)
    }

    pub async fn ensure_available(&self, listing_id: Uuid, stay: &StayRange) -> MarketResult<()> {
        let existing = self.store.bookings_for_listing(listing_id).await?;
        if let Some(clash) = find_conflict(stay, &existing) {
            return Err(MarketError::Unavailable(format!(
                "listing is already booked from {} to {}",
                clash.start_date, clash.end_date
            )));
        }
        Ok(())
    }

    /// Reserves `listing` for the quoted stay on behalf of the caller.
    pub async fn reserve(
        &self,
        ctx: &CallerContext,
        listing: &Listing,
        quote: &PriceQuote,
    ) -> MarketResult<Reservation> {
        let stay = StayRange::new(quote.start_date, quote.end_date);
        self.ensure_available(listing.id, &stay).await?;

        let payment = self.payments.capture(quote.total, &self.currency).await?;
        tracing::info!(
            listing_id = %listing.id,
            user_id = %ctx.user_id,
            reference = %payment.reference,
            amount = payment.amount,
            "payment captured"
        );

        let booking = self
            .recorder
            .create(NewBooking {
                listing_id: listing.id,
                user_id: ctx.user_id,
                start_date: quote.start_date,
                end_date: quote.end_date,
                total_price: quote.total,
            })
            .await
            .map_err(|e| {
                tracing::error!(
                    reference = %payment.reference,
                    error = %e,
                    "payment captured but booking was not recorded"
                );
                e
            })?;

        Ok(Reservation {
            booking,
            quote: *quote,
            payment,
        })
    }

    /// Quote-then-reserve in one call, as used by the HTTP reservation endpoint.
    pub async fn reserve_dates(
        &self,
        ctx: &CallerContext,
        listing_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> MarketResult<Reservation> {
        let listing = self
            .store
            .get_listing(listing_id)
            .await?
            .ok_or_else(|| MarketError::not_found("listing"))?;
        let quote = pricing::quote(start, end, listing.price)?;
        self.reserve(ctx, &listing, &quote).await
    }
}
