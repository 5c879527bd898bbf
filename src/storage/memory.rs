//! In-process store. Keeps insertion order, which stands in for "natural store order".

use crate::domain::error::{MarketError, MarketResult};
use crate::domain::model::{Booking, ChatHistory, ChatMessage, CommunityPost, Favorite, Listing};
use crate::storage::{
    BookingStore, ChatStore, CommunityStore, FavoriteStore, ListingStore, MarketStore,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    listings: Vec<Listing>,
    bookings: Vec<Booking>,
    favorites: Vec<Favorite>,
    posts: Vec<CommunityPost>,
    chats: HashMap<Uuid, ChatHistory>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail as if the store were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> MarketResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(MarketError::Persistence("store unreachable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ListingStore for MemoryStore {
    async fn insert_listing(&self, listing: &Listing) -> MarketResult<()> {
        self.check_online()?;
        self.tables.write().await.listings.push(listing.clone());
        Ok(())
    }

    async fn get_listing(&self, id: Uuid) -> MarketResult<Option<Listing>> {
        self.check_online()?;
        let tables = self.tables.read().await;
        Ok(tables.listings.iter().find(|l| l.id == id).cloned())
    }

    async fn all_listings(&self) -> MarketResult<Vec<Listing>> {
        self.check_online()?;
        Ok(self.tables.read().await.listings.clone())
    }

    async fn listings_by_host(&self, host_id: Uuid) -> MarketResult<Vec<Listing>> {
        self.check_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .listings
            .iter()
            .filter(|l| l.host_id == host_id)
            .cloned()
            .collect())
    }

    async fn listings_by_ids(&self, ids: &[Uuid]) -> MarketResult<Vec<Listing>> {
        self.check_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .listings
            .iter()
            .filter(|l| ids.contains(&l.id))
            .cloned()
            .collect())
    }

    async fn update_listing(&self, listing: &Listing) -> MarketResult<bool> {
        self.check_online()?;
        let mut tables = self.tables.write().await;
        match tables.listings.iter_mut().find(|l| l.id == listing.id) {
            Some(slot) => {
                *slot = listing.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_listing(&self, id: Uuid) -> MarketResult<bool> {
        self.check_online()?;
        let mut tables = self.tables.write().await;
        let before = tables.listings.len();
        tables.listings.retain(|l| l.id != id);
        Ok(tables.listings.len() != before)
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn insert_booking(&self, booking: &Booking) -> MarketResult<()> {
        self.check_online()?;
        self.tables.write().await.bookings.push(booking.clone());
        Ok(())
    }

    async fn bookings_for_user(&self, user_id: Uuid) -> MarketResult<Vec<Booking>> {
        self.check_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn bookings_for_listing(&self, listing_id: Uuid) -> MarketResult<Vec<Booking>> {
        self.check_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .bookings
            .iter()
            .filter(|b| b.listing_id == listing_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl FavoriteStore for MemoryStore {
    async fn add_favorite(&self, favorite: &Favorite) -> MarketResult<bool> {
        self.check_online()?;
        let mut tables = self.tables.write().await;
        let exists = tables
            .favorites
            .iter()
            .any(|f| f.user_id == favorite.user_id && f.listing_id == favorite.listing_id);
        if exists {
            return Ok(false);
        }
        tables.favorites.push(favorite.clone());
        Ok(true)
    }

    async fn remove_favorite(&self, user_id: Uuid, listing_id: Uuid) -> MarketResult<bool> {
        self.check_online()?;
        let mut tables = self.tables.write().await;
        let before = tables.favorites.len();
        tables
            .favorites
            .retain(|f| !(f.user_id == user_id && f.listing_id == listing_id));
        Ok(tables.favorites.len() != before)
    }

    async fn favorites_for_user(&self, user_id: Uuid) -> MarketResult<Vec<Favorite>> {
        self.check_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .favorites
            .iter()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CommunityStore for MemoryStore {
    async fn insert_post(&self, post: &CommunityPost) -> MarketResult<()> {
        self.check_online()?;
        self.tables.write().await.posts.push(post.clone());
        Ok(())
    }

    async fn recent_posts(&self) -> MarketResult<Vec<CommunityPost>> {
        self.check_online()?;
        let mut posts = self.tables.read().await.posts.clone();
        // Stable sort: posts created within the same instant stay newest-inserted first.
        posts.reverse();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }
}

#[async_trait]
impl ChatStore for MemoryStore {
    async fn append_chat_messages(
        &self,
        user_id: Uuid,
        messages: &[ChatMessage],
    ) -> MarketResult<ChatHistory> {
        self.check_online()?;
        let mut tables = self.tables.write().await;
        let history = tables
            .chats
            .entry(user_id)
            .or_insert_with(|| ChatHistory::empty(user_id));
        history.messages.extend_from_slice(messages);
        Ok(history.clone())
    }

    async fn chat_history(&self, user_id: Uuid) -> MarketResult<Option<ChatHistory>> {
        self.check_online()?;
        Ok(self.tables.read().await.chats.get(&user_id).cloned())
    }
}

#[async_trait]
impl MarketStore for MemoryStore {
    async fn ping(&self) -> MarketResult<()> {
        self.check_online()
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(host_id: Uuid) -> Listing {
        Listing {
            id: Uuid::new_v4(),
            title: "Heritage Villa by the Lake".into(),
            location: "Udaipur".into(),
            price: 4000.0,
            description: "Lakefront villa".into(),
            image_ref: "/uploads/udaipur.jpg".into(),
            host_id,
        }
    }

    #[tokio::test]
    async fn favorite_pair_is_unique() {
        let store = MemoryStore::new();
        let fav = Favorite::new(Uuid::new_v4(), Uuid::new_v4());
        assert!(store.add_favorite(&fav).await.unwrap());
        assert!(!store.add_favorite(&fav).await.unwrap());
        assert_eq!(store.favorites_for_user(fav.user_id).await.unwrap().len(), 1);
        assert!(store.remove_favorite(fav.user_id, fav.listing_id).await.unwrap());
        assert!(!store.remove_favorite(fav.user_id, fav.listing_id).await.unwrap());
    }

    #[tokio::test]
    async fn offline_store_reports_persistence_errors() {
        let store = MemoryStore::new();
        store.set_offline(true);
        let err = store.insert_listing(&listing(Uuid::new_v4())).await.unwrap_err();
        assert!(matches!(err, MarketError::Persistence(_)));
        store.set_offline(false);
        assert!(store.ping().await.is_ok());
    }

    #[tokio::test]
    async fn delete_does_not_cascade() {
        let store = MemoryStore::new();
        let host = Uuid::new_v4();
        let l = listing(host);
        store.insert_listing(&l).await.unwrap();
        store
            .add_favorite(&Favorite::new(Uuid::new_v4(), l.id))
            .await
            .unwrap();

        assert!(store.delete_listing(l.id).await.unwrap());
        assert!(!store.delete_listing(l.id).await.unwrap());
        assert_eq!(store.tables.read().await.favorites.len(), 1);
    }

    #[tokio::test]
    async fn posts_come_back_newest_first_and_chats_accumulate() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let base = chrono::Utc::now();
        for (i, content) in ["first", "second", "third"].into_iter().enumerate() {
            store
                .insert_post(&CommunityPost {
                    id: Uuid::new_v4(),
                    user_id: user,
                    name: None,
                    content: content.into(),
                    created_at: base + chrono::Duration::seconds(i as i64),
                })
                .await
                .unwrap();
        }
        let order: Vec<String> = store
            .recent_posts()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.content)
            .collect();
        assert_eq!(order, vec!["third", "second", "first"]);

        assert!(store.chat_history(user).await.unwrap().is_none());
        for text in ["hi", "hello"] {
            let msg = ChatMessage {
                sender: crate::domain::model::ChatSender::User,
                text: text.into(),
                timestamp: chrono::Utc::now(),
            };
            store.append_chat_messages(user, &[msg]).await.unwrap();
        }
        let history = store.chat_history(user).await.unwrap().unwrap();
        assert_eq!(history.messages.len(), 2);
        assert_eq!(history.messages[1].text, "hello");
    }
}
