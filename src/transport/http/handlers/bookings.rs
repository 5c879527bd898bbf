use crate::domain::model::{Booking, BookingWithListing, NewBooking};
use crate::transport::http::handlers::common::{parse_id, respond, respond_with};
use crate::transport::http::types::{json_422, AppState};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = NewBooking,
    responses(
        (status = 201, description = "Booking recorded", body = ApiResponse),
        (status = 400, description = "Invalid total price", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Store write failed", body = ApiResponse)
    )
)]
pub async fn create_booking_handler(
    State(state): State<AppState>,
    request: Result<Json<NewBooking>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_422(
                e,
                "{\"listingId\", \"userId\", \"startDate\", \"endDate\", \"totalPrice\"}",
            )
            .into_response()
        }
    };
    respond_with::<Booking>(StatusCode::CREATED, state.market.bookings.create(request).await)
}

#[utoipa::path(
    get,
    path = "/api/bookings/user/{user_id}",
    params(("user_id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "The user's bookings, each with its listing (null once deleted)", body = ApiResponse),
        (status = 400, description = "Malformed user id", body = ApiResponse)
    )
)]
pub async fn user_bookings_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    let user_id = match parse_id(&user_id, "user") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    respond::<Vec<BookingWithListing>>(state.market.bookings.list_for_user(user_id).await)
}
