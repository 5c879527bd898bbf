//! Server side of the favorite toggle.

use crate::domain::error::MarketResult;
use crate::domain::model::{Favorite, FavoriteAction, Listing};
use crate::storage::MarketStore;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct FavoriteToggle {
    store: Arc<dyn MarketStore>,
}

impl FavoriteToggle {
    pub fn new(store: Arc<dyn MarketStore>) -> Self {
        Self { store }
    }

    /// Converges the (user, listing) pair to `desired`. Repeating a call is harmless.
    pub async fn set_favorite(
        &self,
        user_id: Uuid,
        listing_id: Uuid,
        desired: FavoriteAction,
    ) -> MarketResult<()> {
        let changed = match desired {
            FavoriteAction::Added => {
                self.store
                    .add_favorite(&Favorite::new(user_id, listing_id))
                    .await?
            }
            FavoriteAction::Removed => self.store.remove_favorite(user_id, listing_id).await?,
        };
        tracing::debug!(%user_id, %listing_id, ?desired, changed, "favorite set");
        Ok(())
    }

    /// Listings the user saved, in the order they were saved. Pairs whose listing no
    /// longer exists are skipped.
    pub async fn list_favorites(&self, user_id: Uuid) -> MarketResult<Vec<Listing>> {
        let favorites = self.store.favorites_for_user(user_id).await?;
        let ids: Vec<Uuid> = favorites.iter().map(|f| f.listing_id).collect();
        let mut found: HashMap<Uuid, Listing> = self
            .store
            .listings_by_ids(&ids)
            .await?
            .into_iter()
            .map(|l| (l.id, l))
            .collect();

        Ok(favorites
            .iter()
            .filter_map(|f| found.remove(&f.listing_id))
            .collect())
    }
}
