use crate::domain::error::{MarketError, MarketResult};
use crate::transport::http::types::ApiResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

pub fn status_for(err: &MarketError) -> StatusCode {
    match err {
        MarketError::NotFound { .. } => StatusCode::NOT_FOUND,
        MarketError::Validation(_) => StatusCode::BAD_REQUEST,
        MarketError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        MarketError::Unauthorized(_) => StatusCode::FORBIDDEN,
        MarketError::Unavailable(_) => StatusCode::CONFLICT,
        MarketError::Payment(_) => StatusCode::PAYMENT_REQUIRED,
        MarketError::Upstream(_) => StatusCode::BAD_GATEWAY,
    }
}

pub fn success<T: Serialize>(status: StatusCode, data: &T) -> Response {
    match serde_json::to_value(data) {
        Ok(value) => (
            status,
            Json(ApiResponse {
                success: true,
                data: Some(value),
                error: None,
            }),
        )
            .into_response(),
        Err(e) => failure(MarketError::Persistence(format!(
            "response serialization failed: {}",
            e
        ))),
    }
}

pub fn failure(err: MarketError) -> Response {
    let status = status_for(&err);
    if status.is_server_error() {
        tracing::error!(category = err.category(), error = %err, "request failed");
    } else {
        tracing::debug!(category = err.category(), error = %err, "request rejected");
    }
    (
        status,
        Json(ApiResponse {
            success: false,
            data: Some(serde_json::json!({ "code": err.category() })),
            error: Some(err.to_string()),
        }),
    )
        .into_response()
}

/// 200 with the value on success, the mapped error status otherwise.
pub fn respond<T: Serialize>(result: MarketResult<T>) -> Response {
    respond_with(StatusCode::OK, result)
}

pub fn respond_with<T: Serialize>(status: StatusCode, result: MarketResult<T>) -> Response {
    match result {
        Ok(data) => success(status, &data),
        Err(e) => failure(e),
    }
}

/// Parses an id path segment; a malformed id is a validation error.
pub fn parse_id(raw: &str, what: &str) -> Result<Uuid, Response> {
    raw.trim()
        .parse::<Uuid>()
        .map_err(|_| failure(MarketError::validation(format!("invalid {} id '{}'", what, raw))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_error_category_has_its_status() {
        assert_eq!(status_for(&MarketError::not_found("listing")), StatusCode::NOT_FOUND);
        assert_eq!(status_for(&MarketError::validation("x")), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(&MarketError::Persistence("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(status_for(&MarketError::Unauthorized("x".into())), StatusCode::FORBIDDEN);
        assert_eq!(status_for(&MarketError::Unavailable("x".into())), StatusCode::CONFLICT);
        assert_eq!(
            status_for(&MarketError::Payment("x".into())),
            StatusCode::PAYMENT_REQUIRED
        );
        assert_eq!(status_for(&MarketError::Upstream("x".into())), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn malformed_ids_are_rejected() {
        assert!(parse_id("not-a-uuid", "listing").is_err());
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "listing").ok(), Some(id));
    }
}
