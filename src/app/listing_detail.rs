//! Listing detail session: what a guest does on one listing's page.
//!
//! Opening fetches the listing and, best-effort, its map position. From there
//! the guest can price a date range, reserve the priced stay, and toggle the
//! listing in their favorites.

use crate::app::reservation::Reservation;
use crate::app::Marketplace;
use crate::domain::context::CallerContext;
use crate::domain::error::{MarketError, MarketResult};
use crate::domain::favorite_cache::FavoriteCache;
use crate::domain::model::Listing;
use crate::domain::pricing::{self, PriceQuote};
use crate::infra::geocoding::Coordinates;
use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingView {
    pub listing: Listing,
    /// Absent when the location could not be geocoded; the map is then hidden.
    pub coordinates: Option<Coordinates>,
    pub favorited: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailPhase {
    Browsing,
    Quoted(PriceQuote),
    Confirmed(Reservation),
}

pub struct ListingDetail {
    market: Marketplace,
    ctx: CallerContext,
    listing: Listing,
    coordinates: Option<Coordinates>,
    favorites: FavoriteCache,
    phase: DetailPhase,
}

impl ListingDetail {
    /// Fails with `NotFound` when the listing does not exist. Geocoding and the
    /// favorites read never fail the view: without coordinates the map is hidden,
    /// and a failed favorites read opens the view with `favorited: false` after
    /// logging the error.
    pub async fn open(market: &Marketplace, ctx: CallerContext, listing_id: Uuid) -> MarketResult<Self> {
        let listing = market.catalog.get(listing_id).await?;

        let coordinates = match market.geocoder.locate(&listing.location).await {
            Ok(c) => Some(c),
            Err(e) => {
                tracing::warn!(%listing_id, location = %listing.location, error = %e, "geocoding failed");
                None
            }
        };

        let mut favorites = FavoriteCache::new();
        match market.favorites.list_favorites(ctx.user_id).await {
            Ok(saved) => favorites.seed(saved.into_iter().map(|l| l.id)),
            Err(e) => {
                tracing::warn!(user_id = %ctx.user_id, error = %e, "could not load favorites");
            }
        }

        Ok(Self {
            market: market.clone(),
            ctx,
            listing,
            coordinates,
            favorites,
            phase: DetailPhase::Browsing,
        })
    }

    pub fn view(&self) -> ListingView {
        ListingView {
            listing: self.listing.clone(),
            coordinates: self.coordinates,
            favorited: self.is_favorited(),
        }
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn phase(&self) -> &DetailPhase {
        &self.phase
    }

    pub fn is_favorited(&self) -> bool {
        self.favorites.is_favorited(self.listing.id)
    }

    pub fn favorite_cache(&self) -> &FavoriteCache {
        &self.favorites
    }

    /// Prices the stay. An invalid range drops any earlier quote so it cannot be reserved.
    pub fn quote(&mut self, start: NaiveDate, end: NaiveDate) -> MarketResult<PriceQuote> {
        if let DetailPhase::Confirmed(_) = self.phase {
            return Err(MarketError::validation("this stay is already reserved"));
        }
        match pricing::quote(start, end, self.listing.price) {
            Ok(q) => {
                self.phase = DetailPhase::Quoted(q);
                Ok(q)
            }
            Err(e) => {
                self.phase = DetailPhase::Browsing;
                Err(e.into())
            }
        }
    }

    /// Reserves the quoted stay and moves the session to its confirmation state.
    pub async fn reserve(&mut self) -> MarketResult<Reservation> {
        let quote = match &self.phase {
            DetailPhase::Quoted(q) => *q,
            DetailPhase::Browsing => {
                return Err(MarketError::validation(
                    "select dates and check the price before reserving",
                ))
            }
            DetailPhase::Confirmed(_) => {
                return Err(MarketError::validation("this stay is already reserved"))
            }
        };

        let reservation = self
            .market
            .reservations
            .reserve(&self.ctx, &self.listing, &quote)
            .await?;
        self.phase = DetailPhase::Confirmed(reservation.clone());
        Ok(reservation)
    }

    /// Flips the favorite state optimistically, then syncs it with the store.
    /// On failure the local state is rolled back and the error returned.
    pub async fn toggle_favorite(&mut self) -> MarketResult<bool> {
        let listing_id = self.listing.id;
        let action = self.favorites.begin_toggle(listing_id)?;

        match self
            .market
            .favorites
            .set_favorite(self.ctx.user_id, listing_id, action)
            .await
        {
            Ok(()) => {
                self.favorites.confirm(listing_id)?;
                Ok(self.is_favorited())
            }
            Err(e) => {
                tracing::warn!(%listing_id, ?action, error = %e, "favorite sync failed, rolling back");
                self.favorites.roll_back(listing_id)?;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::assistant::DisabledAssistant;
    use crate::infra::geocoding::{DisabledGeocoder, Geocoder};
    use crate::infra::payment::InstantApproval;
    use crate::storage::{BookingStore, FavoriteStore, ListingStore, MemoryStore};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct FixedGeocoder;

    #[async_trait]
    impl Geocoder for FixedGeocoder {
        async fn locate(&self, _location: &str) -> anyhow::Result<Coordinates> {
            Ok(Coordinates {
                lat: 24.5854,
                lng: 73.7125,
            })
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, d).unwrap()
    }

    async fn setup(geocoder: Arc<dyn Geocoder>) -> (Arc<MemoryStore>, Marketplace, Listing) {
        let store = Arc::new(MemoryStore::new());
        let listing = Listing {
            id: Uuid::new_v4(),
            title: "Heritage Haveli in Udaipur".into(),
            location: "Udaipur".into(),
            price: 4000.0,
            description: "Lake-facing rooms".into(),
            image_ref: "/uploads/udaipur.jpg".into(),
            host_id: Uuid::new_v4(),
        };
        store.insert_listing(&listing).await.unwrap();
        let market = Marketplace::new(
            store.clone(),
            geocoder,
            Arc::new(InstantApproval),
            Arc::new(DisabledAssistant),
            "INR".into(),
        );
        (store, market, listing)
    }

    #[tokio::test]
    async fn geocoding_failure_only_hides_the_map() {
        let (_store, market, listing) = setup(Arc::new(DisabledGeocoder)).await;
        let detail = ListingDetail::open(&market, CallerContext::user(Uuid::new_v4()), listing.id)
            .await
            .unwrap();

        let view = detail.view();
        assert_eq!(view.listing, listing);
        assert_eq!(view.coordinates, None);
        assert!(!view.favorited);
    }

    #[tokio::test]
    async fn open_resolves_coordinates_and_saved_favorite() {
        let (store, market, listing) = setup(Arc::new(FixedGeocoder)).await;
        let user = Uuid::new_v4();
        store
            .add_favorite(&crate::domain::model::Favorite::new(user, listing.id))
            .await
            .unwrap();

        let detail = ListingDetail::open(&market, CallerContext::user(user), listing.id)
            .await
            .unwrap();
        assert!(detail.coordinates().is_some());
        assert!(detail.is_favorited());
    }

    #[tokio::test]
    async fn unknown_listing_is_not_found() {
        let (_store, market, _listing) = setup(Arc::new(DisabledGeocoder)).await;
        let err = ListingDetail::open(&market, CallerContext::user(Uuid::new_v4()), Uuid::new_v4())
            .await
            .err()
            .unwrap();
        assert_eq!(err, MarketError::not_found("listing"));
    }

    #[tokio::test]
    async fn reserve_requires_a_quote_and_records_the_quoted_total() {
        let (store, market, listing) = setup(Arc::new(DisabledGeocoder)).await;
        let user = Uuid::new_v4();
        let mut detail = ListingDetail::open(&market, CallerContext::user(user), listing.id)
            .await
            .unwrap();

        assert!(matches!(detail.reserve().await, Err(MarketError::Validation(_))));

        assert!(detail.quote(day(10), day(10)).is_err());
        assert_eq!(detail.phase(), &DetailPhase::Browsing);

        let quote = detail.quote(day(10), day(12)).unwrap();
        assert_eq!(quote.total, 8400.0);

        let reservation = detail.reserve().await.unwrap();
        assert_eq!(reservation.booking.total_price, 8400.0);
        assert!(matches!(detail.phase(), DetailPhase::Confirmed(_)));

        let saved = store.bookings_for_user(user).await.unwrap();
        assert_eq!(saved.len(), 1);
        assert!(detail.reserve().await.is_err());
    }

    #[tokio::test]
    async fn failed_favorite_sync_rolls_back() {
        let (store, market, listing) = setup(Arc::new(DisabledGeocoder)).await;
        let user = Uuid::new_v4();
        let mut detail = ListingDetail::open(&market, CallerContext::user(user), listing.id)
            .await
            .unwrap();

        assert!(detail.toggle_favorite().await.unwrap());

        store.set_offline(true);
        let err = detail.toggle_favorite().await.unwrap_err();
        assert!(matches!(err, MarketError::Persistence(_)));
        assert!(detail.is_favorited());

        store.set_offline(false);
        assert!(!detail.toggle_favorite().await.unwrap());
        assert!(store.favorites_for_user(user).await.unwrap().is_empty());
    }
}
