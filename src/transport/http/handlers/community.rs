use crate::domain::model::{CommunityPost, NewCommunityPost};
use crate::transport::http::handlers::common::{respond, respond_with};
use crate::transport::http::types::{json_422, AppState};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    post,
    path = "/api/community",
    request_body = NewCommunityPost,
    responses(
        (status = 201, description = "Post saved", body = ApiResponse),
        (status = 400, description = "Empty content", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn create_post_handler(
    State(state): State<AppState>,
    request: Result<Json<NewCommunityPost>, JsonRejection>,
) -> impl IntoResponse {
    let Json(draft) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"userId\", \"name\"?, \"content\"}").into_response(),
    };
    respond_with::<CommunityPost>(StatusCode::CREATED, state.market.community.post(draft).await)
}

#[utoipa::path(
    get,
    path = "/api/community",
    responses(
        (status = 200, description = "All posts, newest first", body = ApiResponse)
    )
)]
pub async fn list_posts_handler(State(state): State<AppState>) -> impl IntoResponse {
    respond::<Vec<CommunityPost>>(state.market.community.recent().await)
}
