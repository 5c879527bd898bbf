//! Record shapes persisted by the marketplace, with their boundary validation.
//!
//! Every entity has an explicit schema: required fields are plain values,
//! optional ones are `Option`. Validation happens once, when a request body is
//! turned into a record.

use crate::domain::error::{MarketError, MarketResult};

pub mod booking;
pub mod chat;
pub mod community;
pub mod favorite;
pub mod listing;

pub use booking::{Booking, BookingWithListing, NewBooking};
pub use chat::{
    AppendChatMessage, AskAssistant, AssistantReply, ChatHistory, ChatMessage, ChatSender,
};
pub use community::{CommunityPost, NewCommunityPost};
pub use favorite::{Favorite, FavoriteAction};
pub use listing::{Listing, ListingUpdate, LocationCount, NewListing};

pub(crate) fn require_text(field: &str, value: &str) -> MarketResult<()> {
    if value.trim().is_empty() {
        return Err(MarketError::validation(format!("{} is required", field)));
    }
    Ok(())
}

pub(crate) fn require_amount(field: &str, value: f64) -> MarketResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(MarketError::validation(format!(
            "{} must be a non-negative number",
            field
        )));
    }
    Ok(())
}
