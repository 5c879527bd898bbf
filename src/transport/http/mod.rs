pub mod extract;
pub mod router;
pub mod types;
pub mod handlers {
    pub mod bookings;
    pub mod chat;
    pub mod common;
    pub mod community;
    pub mod favorites;
    pub mod health;
    pub mod listings;
}

pub use router::{create_router, ApiDoc};
pub use types::AppState;
