use crate::app::{ListingDetail, ListingView, Reservation};
use crate::domain::error::MarketError;
use crate::domain::filter::FilterCriteria;
use crate::domain::model::{Listing, ListingUpdate, LocationCount, NewListing};
use crate::domain::pricing::PriceQuote;
use crate::transport::http::extract::Caller;
use crate::transport::http::handlers::common::{failure, parse_id, respond, respond_with};
use crate::transport::http::types::{json_422, AppState, ReserveRequest, StayQuery};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

fn bad_query(err: QueryRejection) -> Response {
    failure(MarketError::validation(format!("Invalid query: {}", err)))
}

#[utoipa::path(
    get,
    path = "/api/listings",
    params(FilterCriteria),
    responses(
        (status = 200, description = "Listings matching the filter, in store order", body = ApiResponse),
        (status = 400, description = "Malformed filter", body = ApiResponse)
    )
)]
pub async fn browse_listings_handler(
    State(state): State<AppState>,
    criteria: Result<Query<FilterCriteria>, QueryRejection>,
) -> impl IntoResponse {
    let Query(criteria) = match criteria {
        Ok(q) => q,
        Err(e) => return bad_query(e),
    };
    respond::<Vec<Listing>>(state.market.catalog.browse(&criteria).await)
}

#[utoipa::path(
    get,
    path = "/api/listings/{id}",
    params(("id" = String, Path, description = "Listing id")),
    responses(
        (status = 200, description = "The listing", body = ApiResponse),
        (status = 404, description = "No such listing", body = ApiResponse)
    )
)]
pub async fn get_listing_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let id = match parse_id(&id, "listing") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    respond(state.market.catalog.get(id).await)
}

#[utoipa::path(
    get,
    path = "/api/listings/{id}/detail",
    params(("id" = String, Path, description = "Listing id")),
    responses(
        (status = 200, description = "Listing with map position and the caller's favorite flag", body = ApiResponse),
        (status = 401, description = "Missing caller identity", body = ApiResponse),
        (status = 404, description = "No such listing", body = ApiResponse)
    )
)]
pub async fn listing_detail_handler(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let id = match parse_id(&id, "listing") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let view: Result<ListingView, _> = ListingDetail::open(&state.market, ctx, id)
        .await
        .map(|detail| detail.view());
    respond(view)
}

#[utoipa::path(
    get,
    path = "/api/listings/{id}/quote",
    params(("id" = String, Path, description = "Listing id"), StayQuery),
    responses(
        (status = 200, description = "Price breakdown for the stay", body = ApiResponse),
        (status = 400, description = "End date not after start date", body = ApiResponse),
        (status = 404, description = "No such listing", body = ApiResponse)
    )
)]
pub async fn quote_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    stay: Result<Query<StayQuery>, QueryRejection>,
) -> impl IntoResponse {
    let id = match parse_id(&id, "listing") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let Query(stay) = match stay {
        Ok(q) => q,
        Err(e) => return bad_query(e),
    };
    respond::<PriceQuote>(
        state
            .market
            .reservations
            .quote(id, stay.start_date, stay.end_date)
            .await,
    )
}

#[utoipa::path(
    post,
    path = "/api/listings/{id}/reserve",
    params(("id" = String, Path, description = "Listing id")),
    request_body = ReserveRequest,
    responses(
        (status = 201, description = "Payment captured and booking recorded", body = ApiResponse),
        (status = 400, description = "Invalid stay dates", body = ApiResponse),
        (status = 402, description = "Payment declined", body = ApiResponse),
        (status = 404, description = "No such listing", body = ApiResponse),
        (status = 409, description = "Dates already booked", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn reserve_handler(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(id): Path<String>,
    request: Result<Json<ReserveRequest>, JsonRejection>,
) -> impl IntoResponse {
    let id = match parse_id(&id, "listing") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_422(e, "{\"startDate\": \"YYYY-MM-DD\", \"endDate\": \"YYYY-MM-DD\"}")
                .into_response()
        }
    };
    respond_with::<Reservation>(
        StatusCode::CREATED,
        state
            .market
            .reservations
            .reserve_dates(&ctx, id, request.start_date, request.end_date)
            .await,
    )
}

#[utoipa::path(
    get,
    path = "/api/listings/host/all",
    responses(
        (status = 200, description = "The caller's own listings", body = ApiResponse),
        (status = 403, description = "Caller is not a host", body = ApiResponse)
    )
)]
pub async fn host_listings_handler(
    State(state): State<AppState>,
    Caller(ctx): Caller,
) -> impl IntoResponse {
    respond::<Vec<Listing>>(state.market.catalog.host_listings(&ctx).await)
}

#[utoipa::path(
    get,
    path = "/api/listings/host/stats",
    responses(
        (status = 200, description = "Count of the caller's listings per location", body = ApiResponse),
        (status = 403, description = "Caller is not a host", body = ApiResponse)
    )
)]
pub async fn host_stats_handler(
    State(state): State<AppState>,
    Caller(ctx): Caller,
) -> impl IntoResponse {
    respond::<Vec<LocationCount>>(state.market.catalog.host_stats(&ctx).await)
}

#[utoipa::path(
    post,
    path = "/api/listings",
    request_body = NewListing,
    responses(
        (status = 201, description = "Listing created", body = ApiResponse),
        (status = 400, description = "Missing or invalid field", body = ApiResponse),
        (status = 403, description = "Caller is not a host", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn create_listing_handler(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    request: Result<Json<NewListing>, JsonRejection>,
) -> impl IntoResponse {
    let Json(draft) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_422(
                e,
                "{\"title\", \"location\", \"price\", \"description\", \"imageRef\"}",
            )
            .into_response()
        }
    };
    respond_with(StatusCode::CREATED, state.market.catalog.create(&ctx, draft).await)
}

#[utoipa::path(
    put,
    path = "/api/listings/{id}",
    params(("id" = String, Path, description = "Listing id")),
    request_body = ListingUpdate,
    responses(
        (status = 200, description = "Updated listing", body = ApiResponse),
        (status = 403, description = "Caller does not own the listing", body = ApiResponse),
        (status = 404, description = "No such listing", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn update_listing_handler(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(id): Path<String>,
    request: Result<Json<ListingUpdate>, JsonRejection>,
) -> impl IntoResponse {
    let id = match parse_id(&id, "listing") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let Json(changes) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "a partial listing object").into_response(),
    };
    respond(state.market.catalog.update(&ctx, id, changes).await)
}

#[utoipa::path(
    delete,
    path = "/api/listings/{id}",
    params(("id" = String, Path, description = "Listing id")),
    responses(
        (status = 200, description = "Listing deleted", body = ApiResponse),
        (status = 403, description = "Caller does not own the listing", body = ApiResponse),
        (status = 404, description = "No such listing", body = ApiResponse)
    )
)]
pub async fn delete_listing_handler(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let id = match parse_id(&id, "listing") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    respond(
        state
            .market
            .catalog
            .delete(&ctx, id)
            .await
            .map(|()| serde_json::json!({ "deleted": id })),
    )
}
