//! Application services. Each one owns a handle to the store and enforces the
//! rules of its slice of the marketplace; `Marketplace` wires them together.

pub mod booking_recorder;
pub mod catalog;
pub mod chat_history;
pub mod community;
pub mod favorites;
pub mod listing_detail;
pub mod reservation;

pub use booking_recorder::BookingRecorder;
pub use catalog::CatalogService;
pub use chat_history::ChatHistoryService;
pub use community::CommunityBoard;
pub use favorites::FavoriteToggle;
pub use listing_detail::{DetailPhase, ListingDetail, ListingView};
pub use reservation::{Reservation, ReservationDesk};

use crate::infra::assistant::AssistantModel;
use crate::infra::geocoding::Geocoder;
use crate::infra::payment::PaymentGateway;
use crate::storage::MarketStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct Marketplace {
    pub catalog: CatalogService,
    pub bookings: BookingRecorder,
    pub favorites: FavoriteToggle,
    pub community: CommunityBoard,
    pub chat: ChatHistoryService,
    pub reservations: ReservationDesk,
    pub geocoder: Arc<dyn Geocoder>,
}

impl Marketplace {
    pub fn new(
        store: Arc<dyn MarketStore>,
        geocoder: Arc<dyn Geocoder>,
        payments: Arc<dyn PaymentGateway>,
        assistant: Arc<dyn AssistantModel>,
        currency: String,
    ) -> Self {
        Self {
            catalog: CatalogService::new(store.clone()),
            bookings: BookingRecorder::new(store.clone()),
            favorites: FavoriteToggle::new(store.clone()),
            community: CommunityBoard::new(store.clone()),
            chat: ChatHistoryService::new(store.clone(), assistant),
            reservations: ReservationDesk::new(store, payments, currency),
            geocoder,
        }
    }
}
