//! Persistent store seams.
//!
//! One repository trait per record kind; `MarketStore` bundles them so services
//! can hold a single `Arc<dyn MarketStore>`. Two backends exist: Postgres for
//! deployments and an in-memory store for local runs and tests.

use crate::domain::error::MarketResult;
use crate::domain::model::{Booking, ChatHistory, ChatMessage, CommunityPost, Favorite, Listing};
use async_trait::async_trait;
use uuid::Uuid;

pub mod memory;
pub mod postgres;
pub mod seed;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait ListingStore: Send + Sync {
    async fn insert_listing(&self, listing: &Listing) -> MarketResult<()>;

    async fn get_listing(&self, id: Uuid) -> MarketResult<Option<Listing>>;

    /// Every listing, in natural store order.
    async fn all_listings(&self) -> MarketResult<Vec<Listing>>;

    async fn listings_by_host(&self, host_id: Uuid) -> MarketResult<Vec<Listing>>;

    /// Listings among `ids` that still exist. Missing ids are skipped, order is unspecified.
    async fn listings_by_ids(&self, ids: &[Uuid]) -> MarketResult<Vec<Listing>>;

    /// Overwrites the stored listing. Returns false when it no longer exists.
    async fn update_listing(&self, listing: &Listing) -> MarketResult<bool>;

    /// Returns false when there was nothing to delete. Does not cascade.
    async fn delete_listing(&self, id: Uuid) -> MarketResult<bool>;
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn insert_booking(&self, booking: &Booking) -> MarketResult<()>;

    async fn bookings_for_user(&self, user_id: Uuid) -> MarketResult<Vec<Booking>>;

    async fn bookings_for_listing(&self, listing_id: Uuid) -> MarketResult<Vec<Booking>>;
}

#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// Inserts the pair unless it already exists. Returns whether a row was added.
    async fn add_favorite(&self, favorite: &Favorite) -> MarketResult<bool>;

    /// Deletes the pair if present. Returns whether a row was removed.
    async fn remove_favorite(&self, user_id: Uuid, listing_id: Uuid) -> MarketResult<bool>;

    async fn favorites_for_user(&self, user_id: Uuid) -> MarketResult<Vec<Favorite>>;
}

#[async_trait]
pub trait CommunityStore: Send + Sync {
    async fn insert_post(&self, post: &CommunityPost) -> MarketResult<()>;

    /// All posts, newest first.
    async fn recent_posts(&self) -> MarketResult<Vec<CommunityPost>>;
}

#[async_trait]
pub trait ChatStore: Send + Sync {
    /// Appends to the user's history in order, creating it on first use.
    /// Either every message is stored or none is.
    async fn append_chat_messages(
        &self,
        user_id: Uuid,
        messages: &[ChatMessage],
    ) -> MarketResult<ChatHistory>;

    async fn chat_history(&self, user_id: Uuid) -> MarketResult<Option<ChatHistory>>;
}

#[async_trait]
pub trait MarketStore: ListingStore + BookingStore + FavoriteStore + CommunityStore + ChatStore {
    /// Cheap reachability probe used by the health endpoint.
    async fn ping(&self) -> MarketResult<()>;

    fn backend_name(&self) -> &'static str;
}
