//! Persists bookings and reads them back joined with their listings.

use crate::domain::error::MarketResult;
use crate::domain::model::{Booking, BookingWithListing, Listing, NewBooking};
use crate::storage::MarketStore;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct BookingRecorder {
    store: Arc<dyn MarketStore>,
}

impl BookingRecorder {
    pub fn new(store: Arc<dyn MarketStore>) -> Self {
        Self { store }
    }

    /// Writes the booking as given. References are not checked and the total is not
    /// recomputed; a store failure is returned to the caller without retrying.
    pub async fn create(&self, request: NewBooking) -> MarketResult<Booking> {
        request.validate()?;
        let booking = request.into_booking();
        if let Err(e) = self.store.insert_booking(&booking).await {
            tracing::error!(listing_id = %booking.listing_id, error = %e, "booking write failed");
            return Err(e);
        }
        tracing::info!(
            booking_id = %booking.id,
            listing_id = %booking.listing_id,
            user_id = %booking.user_id,
            total_price = booking.total_price,
            "booking recorded"
        );
        Ok(booking)
    }

    /// Every booking of `user_id`, each with the current state of its listing.
    ///
    /// A booking whose listing has been deleted is kept, with `listing: None`.
    pub async fn list_for_user(&self, user_id: Uuid) -> MarketResult<Vec<BookingWithListing>> {
        let bookings = self.store.bookings_for_user(user_id).await?;

        let mut ids: Vec<Uuid> = bookings.iter().map(|b| b.listing_id).collect();
        ids.sort();
        ids.dedup();
        let listings: HashMap<Uuid, Listing> = self
            .store
            .listings_by_ids(&ids)
            .await?
            .into_iter()
            .map(|l| (l.id, l))
            .collect();

        Ok(bookings
            .into_iter()
            .map(|booking| {
                let listing = listings.get(&booking.listing_id).cloned();
                BookingWithListing { booking, listing }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::MarketError;
    use crate::storage::{BookingStore, ListingStore, MemoryStore};
    use chrono::NaiveDate;

    fn request(listing_id: Uuid, user_id: Uuid) -> NewBooking {
        NewBooking {
            listing_id,
            user_id,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            total_price: 10080.0,
        }
    }

    #[tokio::test]
    async fn unreachable_store_fails_the_write_and_stores_nothing() {
        let store = Arc::new(MemoryStore::new());
        let recorder = BookingRecorder::new(store.clone());
        let user = Uuid::new_v4();

        store.set_offline(true);
        let err = recorder.create(request(Uuid::new_v4(), user)).await.unwrap_err();
        assert!(matches!(err, MarketError::Persistence(_)));

        store.set_offline(false);
        assert!(store.bookings_for_user(user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn total_is_stored_as_given_without_checking_the_listing() {
        let store = Arc::new(MemoryStore::new());
        let recorder = BookingRecorder::new(store.clone());
        let user = Uuid::new_v4();

        let booking = recorder.create(request(Uuid::new_v4(), user)).await.unwrap();
        assert_eq!(booking.total_price, 10080.0);
        assert_eq!(store.bookings_for_user(user).await.unwrap(), vec![booking]);
    }

    #[tokio::test]
    async fn negative_total_is_rejected() {
        let recorder = BookingRecorder::new(Arc::new(MemoryStore::new()));
        let mut bad = request(Uuid::new_v4(), Uuid::new_v4());
        bad.total_price = -1.0;
        assert!(matches!(
            recorder.create(bad).await,
            Err(MarketError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn bookings_without_a_listing_are_kept_with_none() {
        let store = Arc::new(MemoryStore::new());
        let recorder = BookingRecorder::new(store.clone());
        let user = Uuid::new_v4();
        let listing = Listing {
            id: Uuid::new_v4(),
            title: "Beachside Cottage".into(),
            location: "Goa".into(),
            price: 3200.0,
            description: String::new(),
            image_ref: String::new(),
            host_id: Uuid::new_v4(),
        };
        store.insert_listing(&listing).await.unwrap();

        recorder.create(request(listing.id, user)).await.unwrap();
        recorder.create(request(Uuid::new_v4(), user)).await.unwrap();

        let joined = recorder.list_for_user(user).await.unwrap();
        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0].listing.as_ref(), Some(&listing));
        assert_eq!(joined[1].listing, None);
    }
}
