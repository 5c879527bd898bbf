use crate::app::Marketplace;
use crate::domain::model::{FavoriteAction, Listing};
use crate::infra::assistant::AssistantModel;
use crate::infra::geocoding::Geocoder;
use crate::infra::payment::PaymentGateway;
use crate::storage::MarketStore;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MarketStore>,
    pub market: Marketplace,
}

impl AppState {
    pub fn new(
        store: Arc<dyn MarketStore>,
        geocoder: Arc<dyn Geocoder>,
        payments: Arc<dyn PaymentGateway>,
        assistant: Arc<dyn AssistantModel>,
        currency: String,
    ) -> Self {
        Self {
            market: Marketplace::new(store.clone(), geocoder, payments, assistant, currency),
            store,
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    pub user_id: Uuid,
    pub listing_id: Uuid,
    pub action: FavoriteAction,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct FavoritesResponse {
    pub favorites: Vec<Listing>,
}

/// Stay dates for a quote, `endDate` exclusive.
#[derive(Deserialize, Debug, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StayQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReserveRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(format!("Invalid JSON body: {} (expected: {})", err, expected)),
        }),
    )
}
