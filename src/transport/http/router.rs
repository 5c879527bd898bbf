use crate::app::{ListingView, Reservation};
use crate::domain::filter::FilterCriteria;
use crate::domain::model::{
    AppendChatMessage, AskAssistant, AssistantReply, Booking, BookingWithListing, ChatHistory,
    ChatMessage, ChatSender, CommunityPost, FavoriteAction, Listing, ListingUpdate, LocationCount,
    NewBooking, NewCommunityPost, NewListing,
};
use crate::domain::pricing::PriceQuote;
use crate::infra::geocoding::Coordinates;
use crate::infra::payment::PaymentConfirmation;
use crate::transport::http::handlers::{bookings, chat, community, favorites, health, listings};
use crate::transport::http::types::{
    ApiResponse, AppState, FavoriteRequest, FavoritesResponse, ReserveRequest,
};
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        listings::browse_listings_handler,
        listings::get_listing_handler,
        listings::listing_detail_handler,
        listings::quote_handler,
        listings::reserve_handler,
        listings::host_listings_handler,
        listings::host_stats_handler,
        listings::create_listing_handler,
        listings::update_listing_handler,
        listings::delete_listing_handler,
        bookings::create_booking_handler,
        bookings::user_bookings_handler,
        favorites::set_favorite_handler,
        favorites::list_favorites_handler,
        community::create_post_handler,
        community::list_posts_handler,
        chat::ask_assistant_handler,
        chat::append_chat_handler,
        chat::chat_history_handler
    ),
    components(schemas(
        ApiResponse,
        Listing,
        NewListing,
        ListingUpdate,
        LocationCount,
        ListingView,
        Coordinates,
        FilterCriteria,
        PriceQuote,
        ReserveRequest,
        Reservation,
        PaymentConfirmation,
        Booking,
        NewBooking,
        BookingWithListing,
        FavoriteRequest,
        FavoriteAction,
        FavoritesResponse,
        CommunityPost,
        NewCommunityPost,
        ChatSender,
        ChatMessage,
        ChatHistory,
        AppendChatMessage,
        AskAssistant,
        AssistantReply
    ))
)]
#[allow(dead_code)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/api/listings",
            get(listings::browse_listings_handler).post(listings::create_listing_handler),
        )
        .route("/api/listings/host/all", get(listings::host_listings_handler))
        .route("/api/listings/host/stats", get(listings::host_stats_handler))
        .route(
            "/api/listings/:id",
            get(listings::get_listing_handler)
                .put(listings::update_listing_handler)
                .delete(listings::delete_listing_handler),
        )
        .route("/api/listings/:id/detail", get(listings::listing_detail_handler))
        .route("/api/listings/:id/quote", get(listings::quote_handler))
        .route("/api/listings/:id/reserve", post(listings::reserve_handler))
        .route("/api/bookings", post(bookings::create_booking_handler))
        .route("/api/bookings/user/:user_id", get(bookings::user_bookings_handler))
        .route("/api/favorites", post(favorites::set_favorite_handler))
        .route("/api/favorites/:user_id", get(favorites::list_favorites_handler))
        .route(
            "/api/community",
            get(community::list_posts_handler).post(community::create_post_handler),
        )
        .route("/api/chat", post(chat::ask_assistant_handler))
        .route("/api/chat/history", post(chat::append_chat_handler))
        .route("/api/chat/history/:user_id", get(chat::chat_history_handler))
        .with_state(app_state)
}
