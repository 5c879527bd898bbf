pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{
    BookingRecorder, CatalogService, ChatHistoryService, CommunityBoard, FavoriteToggle,
    ListingDetail, Marketplace, ReservationDesk,
};
pub use domain::context::{CallerContext, Role};
pub use domain::error::{MarketError, MarketResult};
pub use infra::config::Config;
pub use storage::{MarketStore, MemoryStore, PgStore};
