use crate::domain::error::MarketResult;
use crate::domain::model::require_text;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommunityPost {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Display name chosen by the author, if any.
    pub name: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewCommunityPost {
    pub user_id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    pub content: String,
}

impl NewCommunityPost {
    pub fn validate(&self) -> MarketResult<()> {
        require_text("content", &self.content)
    }

    pub fn into_post(self) -> CommunityPost {
        CommunityPost {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            name: self.name.filter(|n| !n.trim().is_empty()),
            content: self.content,
            created_at: Utc::now(),
        }
    }
}
