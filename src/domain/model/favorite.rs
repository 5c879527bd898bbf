use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Saved-for-later relation. At most one record per (user, listing) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub user_id: Uuid,
    pub listing_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Favorite {
    pub fn new(user_id: Uuid, listing_id: Uuid) -> Self {
        Self {
            user_id,
            listing_id,
            created_at: Utc::now(),
        }
    }
}

/// Desired membership of a listing in a user's favorites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum FavoriteAction {
    #[serde(rename = "add")]
    Added,
    #[serde(rename = "remove")]
    Removed,
}

impl FavoriteAction {
    pub fn for_membership(favorited: bool) -> Self {
        if favorited {
            FavoriteAction::Added
        } else {
            FavoriteAction::Removed
        }
    }
}
