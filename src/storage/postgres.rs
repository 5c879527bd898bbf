//! Postgres-backed store.
//!
//! Tables are created on connect if missing. Listings, bookings and favorites
//! hold references by id only; there are no foreign keys, so deleting a listing
//! leaves its bookings and favorites in place.

use crate::domain::error::MarketResult;
use crate::domain::model::{
    Booking, ChatHistory, ChatMessage, ChatSender, CommunityPost, Favorite, Listing,
};
use crate::storage::{
    BookingStore, ChatStore, CommunityStore, FavoriteStore, ListingStore, MarketStore,
};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use uuid::Uuid;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS listings (
        id UUID PRIMARY KEY,
        title TEXT NOT NULL,
        location TEXT NOT NULL,
        price DOUBLE PRECISION NOT NULL CHECK (price >= 0),
        description TEXT NOT NULL,
        image_ref TEXT NOT NULL,
        host_id UUID NOT NULL,
        seq BIGSERIAL
    )",
    "CREATE INDEX IF NOT EXISTS listings_host_idx ON listings (host_id)",
    "CREATE TABLE IF NOT EXISTS bookings (
        id UUID PRIMARY KEY,
        listing_id UUID NOT NULL,
        user_id UUID NOT NULL,
        start_date DATE NOT NULL,
        end_date DATE NOT NULL,
        total_price DOUBLE PRECISION NOT NULL,
        created_at TIMESTAMPTZ NOT NULL,
        seq BIGSERIAL
    )",
    "CREATE INDEX IF NOT EXISTS bookings_user_idx ON bookings (user_id)",
    "CREATE INDEX IF NOT EXISTS bookings_listing_idx ON bookings (listing_id)",
    "CREATE TABLE IF NOT EXISTS favorites (
        user_id UUID NOT NULL,
        listing_id UUID NOT NULL,
        created_at TIMESTAMPTZ NOT NULL,
        seq BIGSERIAL,
        UNIQUE (user_id, listing_id)
    )",
    "CREATE TABLE IF NOT EXISTS community_posts (
        id UUID PRIMARY KEY,
        user_id UUID NOT NULL,
        name TEXT,
        content TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS chat_messages (
        seq BIGSERIAL PRIMARY KEY,
        user_id UUID NOT NULL,
        sender TEXT NOT NULL,
        text TEXT NOT NULL,
        sent_at TIMESTAMPTZ NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS chat_messages_user_idx ON chat_messages (user_id, seq)",
];

const LISTING_COLUMNS: &str = "id, title, location, price, description, image_ref, host_id";
const BOOKING_COLUMNS: &str =
    "id, listing_id, user_id, start_date, end_date, total_price, created_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connects and makes sure every table exists.
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn ensure_schema(&self) -> anyhow::Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}

fn listing_from_row(row: &PgRow) -> Result<Listing, sqlx::Error> {
    Ok(Listing {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        location: row.try_get("location")?,
        price: row.try_get("price")?,
        description: row.try_get("description")?,
        image_ref: row.try_get("image_ref")?,
        host_id: row.try_get("host_id")?,
    })
}

fn booking_from_row(row: &PgRow) -> Result<Booking, sqlx::Error> {
    Ok(Booking {
        id: row.try_get("id")?,
        listing_id: row.try_get("listing_id")?,
        user_id: row.try_get("user_id")?,
        start_date: row.try_get("start_date")?,
        end_date: row.try_get("end_date")?,
        total_price: row.try_get("total_price")?,
        created_at: row.try_get("created_at")?,
    })
}

fn favorite_from_row(row: &PgRow) -> Result<Favorite, sqlx::Error> {
    Ok(Favorite {
        user_id: row.try_get("user_id")?,
        listing_id: row.try_get("listing_id")?,
        created_at: row.try_get("created_at")?,
    })
}

fn post_from_row(row: &PgRow) -> Result<CommunityPost, sqlx::Error> {
    Ok(CommunityPost {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        name: row.try_get("name")?,
        content: row.try_get("content")?,
        created_at: row.try_get("created_at")?,
    })
}

fn chat_message_from_row(row: &PgRow) -> MarketResult<ChatMessage> {
    let sender: String = row.try_get("sender")?;
    Ok(ChatMessage {
        sender: sender.parse::<ChatSender>()?,
        text: row.try_get("text")?,
        timestamp: row.try_get("sent_at")?,
    })
}

fn map_rows<T>(
    rows: Vec<PgRow>,
    map: fn(&PgRow) -> Result<T, sqlx::Error>,
) -> MarketResult<Vec<T>> {
    rows.iter()
        .map(|r| map(r).map_err(Into::into))
        .collect()
}

#[async_trait]
impl ListingStore for PgStore {
    async fn insert_listing(&self, listing: &Listing) -> MarketResult<()> {
        sqlx::query(
            "INSERT INTO listings (id, title, location, price, description, image_ref, host_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(listing.id)
        .bind(&listing.title)
        .bind(&listing.location)
        .bind(listing.price)
        .bind(&listing.description)
        .bind(&listing.image_ref)
        .bind(listing.host_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_listing(&self, id: Uuid) -> MarketResult<Option<Listing>> {
        let sql = format!("SELECT {} FROM listings WHERE id = $1", LISTING_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(listing_from_row).transpose()?)
    }

    async fn all_listings(&self) -> MarketResult<Vec<Listing>> {
        let sql = format!("SELECT {} FROM listings ORDER BY seq", LISTING_COLUMNS);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        map_rows(rows, listing_from_row)
    }

    async fn listings_by_host(&self, host_id: Uuid) -> MarketResult<Vec<Listing>> {
        let sql = format!(
            "SELECT {} FROM listings WHERE host_id = $1 ORDER BY seq",
            LISTING_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(host_id)
            .fetch_all(&self.pool)
            .await?;
        map_rows(rows, listing_from_row)
    }

    async fn listings_by_ids(&self, ids: &[Uuid]) -> MarketResult<Vec<Listing>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!("SELECT {} FROM listings WHERE id = ANY($1)", LISTING_COLUMNS);
        let rows = sqlx::query(&sql)
            .bind(ids.to_vec())
            .fetch_all(&self.pool)
            .await?;
        map_rows(rows, listing_from_row)
    }

    async fn update_listing(&self, listing: &Listing) -> MarketResult<bool> {
        let result = sqlx::query(
            "UPDATE listings
             SET title = $2, location = $3, price = $4, description = $5, image_ref = $6
             WHERE id = $1",
        )
        .bind(listing.id)
        .bind(&listing.title)
        .bind(&listing.location)
        .bind(listing.price)
        .bind(&listing.description)
        .bind(&listing.image_ref)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_listing(&self, id: Uuid) -> MarketResult<bool> {
        let result = sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl BookingStore for PgStore {
    async fn insert_booking(&self, booking: &Booking) -> MarketResult<()> {
        sqlx::query(
            "INSERT INTO bookings (id, listing_id, user_id, start_date, end_date, total_price, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(booking.id)
        .bind(booking.listing_id)
        .bind(booking.user_id)
        .bind(booking.start_date)
        .bind(booking.end_date)
        .bind(booking.total_price)
        .bind(booking.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn bookings_for_user(&self, user_id: Uuid) -> MarketResult<Vec<Booking>> {
        let sql = format!(
            "SELECT {} FROM bookings WHERE user_id = $1 ORDER BY seq",
            BOOKING_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        map_rows(rows, booking_from_row)
    }

    async fn bookings_for_listing(&self, listing_id: Uuid) -> MarketResult<Vec<Booking>> {
        let sql = format!(
            "SELECT {} FROM bookings WHERE listing_id = $1 ORDER BY seq",
            BOOKING_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(listing_id)
            .fetch_all(&self.pool)
            .await?;
        map_rows(rows, booking_from_row)
    }
}

#[async_trait]
impl FavoriteStore for PgStore {
    async fn add_favorite(&self, favorite: &Favorite) -> MarketResult<bool> {
        let result = sqlx::query(
            "INSERT INTO favorites (user_id, listing_id, created_at) VALUES ($1, $2, $3)
             ON CONFLICT (user_id, listing_id) DO NOTHING",
        )
        .bind(favorite.user_id)
        .bind(favorite.listing_id)
        .bind(favorite.created_at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove_favorite(&self, user_id: Uuid, listing_id: Uuid) -> MarketResult<bool> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND listing_id = $2")
            .bind(user_id)
            .bind(listing_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn favorites_for_user(&self, user_id: Uuid) -> MarketResult<Vec<Favorite>> {
        let rows = sqlx::query(
            "SELECT user_id, listing_id, created_at FROM favorites WHERE user_id = $1 ORDER BY seq",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        map_rows(rows, favorite_from_row)
    }
}

#[async_trait]
impl CommunityStore for PgStore {
    async fn insert_post(&self, post: &CommunityPost) -> MarketResult<()> {
        sqlx::query(
            "INSERT INTO community_posts (id, user_id, name, content, created_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(post.id)
        .bind(post.user_id)
        .bind(&post.name)
        .bind(&post.content)
        .bind(post.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn recent_posts(&self) -> MarketResult<Vec<CommunityPost>> {
        let rows = sqlx::query(
            "SELECT id, user_id, name, content, created_at FROM community_posts
             ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        map_rows(rows, post_from_row)
    }
}

#[async_trait]
impl ChatStore for PgStore {
    async fn append_chat_messages(
        &self,
        user_id: Uuid,
        messages: &[ChatMessage],
    ) -> MarketResult<ChatHistory> {
        let mut tx = self.pool.begin().await?;
        for message in messages {
            sqlx::query(
                "INSERT INTO chat_messages (user_id, sender, text, sent_at) VALUES ($1, $2, $3, $4)",
            )
            .bind(user_id)
            .bind(message.sender.as_str())
            .bind(&message.text)
            .bind(message.timestamp)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Ok(self
            .chat_history(user_id)
            .await?
            .unwrap_or_else(|| ChatHistory::empty(user_id)))
    }

    async fn chat_history(&self, user_id: Uuid) -> MarketResult<Option<ChatHistory>> {
        let rows = sqlx::query(
            "SELECT sender, text, sent_at FROM chat_messages WHERE user_id = $1 ORDER BY seq",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        if rows.is_empty() {
            return Ok(None);
        }
        let messages = rows
            .iter()
            .map(chat_message_from_row)
            .collect::<MarketResult<Vec<_>>>()?;
        Ok(Some(ChatHistory { user_id, messages }))
    }
}

#[async_trait]
impl MarketStore for PgStore {
    async fn ping(&self) -> MarketResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
