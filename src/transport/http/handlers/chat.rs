use crate::domain::model::{AppendChatMessage, AskAssistant, AssistantReply, ChatHistory};
use crate::transport::http::handlers::common::{parse_id, respond};
use crate::transport::http::types::{json_422, AppState};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = AskAssistant,
    responses(
        (status = 200, description = "The assistant's reply; the exchange is added to the user's history", body = ApiResponse),
        (status = 400, description = "Empty message", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (missing message or userId)", body = ApiResponse),
        (status = 502, description = "The assistant model did not answer", body = ApiResponse)
    )
)]
pub async fn ask_assistant_handler(
    State(state): State<AppState>,
    request: Result<Json<AskAssistant>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"userId\", \"message\"}").into_response(),
    };
    respond::<AssistantReply>(state.market.chat.ask(request).await)
}

#[utoipa::path(
    post,
    path = "/api/chat/history",
    request_body = AppendChatMessage,
    responses(
        (status = 200, description = "The user's history including the new message", body = ApiResponse),
        (status = 400, description = "Empty message", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn append_chat_handler(
    State(state): State<AppState>,
    request: Result<Json<AppendChatMessage>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_422(e, "{\"userId\", \"sender\": \"user\" | \"bot\", \"text\"}")
                .into_response()
        }
    };
    respond::<ChatHistory>(state.market.chat.append(request).await)
}

#[utoipa::path(
    get,
    path = "/api/chat/history/{user_id}",
    params(("user_id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "The user's history; empty when they never chatted", body = ApiResponse),
        (status = 400, description = "Malformed user id", body = ApiResponse)
    )
)]
pub async fn chat_history_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    let user_id = match parse_id(&user_id, "user") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    respond(state.market.chat.history(user_id).await)
}
