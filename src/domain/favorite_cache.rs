//! Client-side mirror of a user's favorites with explicit sync state.
//!
//! A toggle is applied to the mirror immediately and marked pending. Once the
//! store answers, the entry is either confirmed or rolled back to the
//! membership it had before the toggle.

use crate::domain::error::{MarketError, MarketResult};
use crate::domain::model::FavoriteAction;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Sent to the store, no answer yet. `previous` is the membership to restore on failure.
    Pending { previous: bool },
    Confirmed,
    RolledBack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Membership {
    pub favorited: bool,
    pub state: SyncState,
}

#[derive(Debug, Clone, Default)]
pub struct FavoriteCache {
    entries: HashMap<Uuid, Membership>,
}

impl FavoriteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the mirror with the memberships read from the store.
    pub fn seed<I: IntoIterator<Item = Uuid>>(&mut self, listing_ids: I) {
        self.entries = listing_ids
            .into_iter()
            .map(|id| {
                (
                    id,
                    Membership {
                        favorited: true,
                        state: SyncState::Confirmed,
                    },
                )
            })
            .collect();
    }

    pub fn is_favorited(&self, listing_id: Uuid) -> bool {
        self.entries
            .get(&listing_id)
            .map_or(false, |m| m.favorited)
    }

    pub fn membership(&self, listing_id: Uuid) -> Option<Membership> {
        self.entries.get(&listing_id).copied()
    }

    /// Flips the mirrored membership and returns the action to send to the store.
    ///
    /// Fails while a previous toggle of the same listing is still pending, so two
    /// unordered actions for one pair are never in flight.
    pub fn begin_toggle(&mut self, listing_id: Uuid) -> MarketResult<FavoriteAction> {
        let current = self.membership(listing_id);
        if let Some(Membership {
            state: SyncState::Pending { .. },
            ..
        }) = current
        {
            return Err(MarketError::validation(
                "a favorite update for this listing is already in flight",
            ));
        }

        let previous = current.map_or(false, |m| m.favorited);
        let next = !previous;
        self.entries.insert(
            listing_id,
            Membership {
                favorited: next,
                state: SyncState::Pending { previous },
            },
        );
        Ok(FavoriteAction::for_membership(next))
    }

    pub fn confirm(&mut self, listing_id: Uuid) -> MarketResult<()> {
        let entry = self.pending_entry(listing_id)?;
        entry.state = SyncState::Confirmed;
        Ok(())
    }

    pub fn roll_back(&mut self, listing_id: Uuid) -> MarketResult<()> {
        let entry = self.pending_entry(listing_id)?;
        if let SyncState::Pending { previous } = entry.state {
            entry.favorited = previous;
        }
        entry.state = SyncState::RolledBack;
        Ok(())
    }

    /// Listings currently shown as favorited, pending ones included.
    pub fn favorited_ids(&self) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = self
            .entries
            .iter()
            .filter(|(_, m)| m.favorited)
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }

    fn pending_entry(&mut self, listing_id: Uuid) -> MarketResult<&mut Membership> {
        match self.entries.get_mut(&listing_id) {
            Some(m) if matches!(m.state, SyncState::Pending { .. }) => Ok(m),
            _ => Err(MarketError::validation(
                "no favorite update is pending for this listing",
            )),
        }
    }
}
