//! Listing catalog: browse for guests, CRUD for hosts.

use crate::domain::context::CallerContext;
use crate::domain::error::{MarketError, MarketResult};
use crate::domain::filter::{filter_listings, FilterCriteria};
use crate::domain::model::{Listing, ListingUpdate, LocationCount, NewListing};
use crate::storage::MarketStore;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn MarketStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn MarketStore>) -> Self {
        Self { store }
    }

    /// All listings matching `criteria`, in store order.
    pub async fn browse(&self, criteria: &FilterCriteria) -> MarketResult<Vec<Listing>> {
        let all = self.store.all_listings().await?;
        Ok(filter_listings(&all, criteria).into_iter().cloned().collect())
    }

    pub async fn get(&self, id: Uuid) -> MarketResult<Listing> {
        self.store
            .get_listing(id)
            .await?
            .ok_or_else(|| MarketError::not_found("listing"))
    }

    pub async fn host_listings(&self, ctx: &CallerContext) -> MarketResult<Vec<Listing>> {
        ctx.require_host()?;
        self.store.listings_by_host(ctx.user_id).await
    }

    /// Number of the host's listings per location, alphabetically by location.
    pub async fn host_stats(&self, ctx: &CallerContext) -> MarketResult<Vec<LocationCount>> {
        let listings = self.host_listings(ctx).await?;
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for listing in &listings {
            let key = if listing.location.trim().is_empty() {
                "Unknown".to_string()
            } else {
                listing.location.clone()
            };
            *counts.entry(key).or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(location, listings)| LocationCount { location, listings })
            .collect())
    }

    pub async fn create(&self, ctx: &CallerContext, draft: NewListing) -> MarketResult<Listing> {
        ctx.require_host()?;
        draft.validate()?;
        let listing = draft.into_listing(ctx.user_id);
        self.store.insert_listing(&listing).await?;
        tracing::info!(listing_id = %listing.id, host_id = %ctx.user_id, "listing created");
        Ok(listing)
    }

    pub async fn update(
        &self,
        ctx: &CallerContext,
        id: Uuid,
        changes: ListingUpdate,
    ) -> MarketResult<Listing> {
        changes.validate()?;
        let mut listing = self.owned_listing(ctx, id).await?;
        changes.apply_to(&mut listing);
        if !self.store.update_listing(&listing).await? {
            return Err(MarketError::not_found("listing"));
        }
        tracing::info!(listing_id = %id, "listing updated");
        Ok(listing)
    }

    /// Deletes the listing. Bookings and favorites that reference it are left as they are.
    pub async fn delete(&self, ctx: &CallerContext, id: Uuid) -> MarketResult<()> {
        self.owned_listing(ctx, id).await?;
        if !self.store.delete_listing(id).await? {
            return Err(MarketError::not_found("listing"));
        }
        tracing::info!(listing_id = %id, "listing deleted");
        Ok(())
    }

    async fn owned_listing(&self, ctx: &CallerContext, id: Uuid) -> MarketResult<Listing> {
        let listing = self.get(id).await?;
        if listing.host_id != ctx.user_id {
            return Err(MarketError::Unauthorized(
                "listing belongs to another host".to_string(),
            ));
        }
        Ok(listing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn draft(location: &str, price: f64) -> NewListing {
        NewListing {
            title: format!("Stay in {}", location),
            location: location.to_string(),
            price,
            description: "Nice place".to_string(),
            image_ref: "/uploads/x.jpg".to_string(),
        }
    }

    #[tokio::test]
    async fn only_the_owner_may_change_a_listing() {
        let catalog = CatalogService::new(Arc::new(MemoryStore::new()));
        let owner = CallerContext::host(Uuid::new_v4());
        let intruder = CallerContext::host(Uuid::new_v4());

        let listing = catalog.create(&owner, draft("Goa", 3200.0)).await.unwrap();
        let err = catalog.delete(&intruder, listing.id).await.unwrap_err();
        assert!(matches!(err, MarketError::Unauthorized(_)));

        catalog.delete(&owner, listing.id).await.unwrap();
        assert_eq!(
            catalog.get(listing.id).await.unwrap_err(),
            MarketError::not_found("listing")
        );
    }

    #[tokio::test]
    async fn guests_cannot_create_listings() {
        let catalog = CatalogService::new(Arc::new(MemoryStore::new()));
        let guest = CallerContext::user(Uuid::new_v4());
        assert!(matches!(
            catalog.create(&guest, draft("Goa", 1.0)).await,
            Err(MarketError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn stats_count_listings_per_location() {
        let catalog = CatalogService::new(Arc::new(MemoryStore::new()));
        let host = CallerContext::host(Uuid::new_v4());
        for (loc, price) in [("Goa", 1.0), ("Mumbai", 2.0), ("Goa", 3.0)] {
            catalog.create(&host, draft(loc, price)).await.unwrap();
        }
        let other = CallerContext::host(Uuid::new_v4());
        catalog.create(&other, draft("Goa", 4.0)).await.unwrap();

        let stats = catalog.host_stats(&host).await.unwrap();
        assert_eq!(
            stats,
            vec![
                LocationCount { location: "Goa".into(), listings: 2 },
                LocationCount { location: "Mumbai".into(), listings: 1 },
            ]
        );
    }
}
