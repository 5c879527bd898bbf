use crate::domain::model::FavoriteAction;
use crate::transport::http::handlers::common::{parse_id, respond};
use crate::transport::http::types::{json_422, AppState, FavoriteRequest, FavoritesResponse};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    post,
    path = "/api/favorites",
    request_body = FavoriteRequest,
    responses(
        (status = 200, description = "Membership set; repeating the call changes nothing", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body or unknown action)", body = ApiResponse),
        (status = 500, description = "Store write failed", body = ApiResponse)
    )
)]
pub async fn set_favorite_handler(
    State(state): State<AppState>,
    request: Result<Json<FavoriteRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_422(
                e,
                "{\"userId\", \"listingId\", \"action\": \"add\" | \"remove\"}",
            )
            .into_response()
        }
    };
    let result = state
        .market
        .favorites
        .set_favorite(request.user_id, request.listing_id, request.action)
        .await
        .map(|()| {
            serde_json::json!({
                "listingId": request.listing_id,
                "favorited": request.action == FavoriteAction::Added,
            })
        });
    respond(result)
}

#[utoipa::path(
    get,
    path = "/api/favorites/{user_id}",
    params(("user_id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "`{favorites: [Listing]}` in the order they were saved", body = ApiResponse),
        (status = 400, description = "Malformed user id", body = ApiResponse)
    )
)]
pub async fn list_favorites_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    let user_id = match parse_id(&user_id, "user") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    respond(
        state
            .market
            .favorites
            .list_favorites(user_id)
            .await
            .map(|favorites| FavoritesResponse { favorites }),
    )
}
