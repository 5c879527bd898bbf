use crate::domain::error::MarketResult;
use crate::domain::model::{CommunityPost, NewCommunityPost};
use crate::storage::MarketStore;
use std::sync::Arc;

/// Public message board shared by all users.
#[derive(Clone)]
pub struct CommunityBoard {
    store: Arc<dyn MarketStore>,
}

impl CommunityBoard {
    pub fn new(store: Arc<dyn MarketStore>) -> Self {
        Self { store }
    }

    pub async fn post(&self, draft: NewCommunityPost) -> MarketResult<CommunityPost> {
        draft.validate()?;
        let post = draft.into_post();
        self.store.insert_post(&post).await?;
        tracing::info!(post_id = %post.id, user_id = %post.user_id, "community post saved");
        Ok(post)
    }

    pub async fn recent(&self) -> MarketResult<Vec<CommunityPost>> {
        self.store.recent_posts().await
    }
}
