//! Single-item synchronization against the remote store
//!
//! Create, read, status transition and delete, plus the campus listing for
//! filter UIs. Collaborators are injected at construction; there are no
//! globals. Ownership (`created_by == current identity`) is a client-side
//! UI affordance only — the store enforces nothing, and calling the
//! mutations directly still performs the write.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use reclaim_domain::{
    validate_draft, CampusId, Item, ItemId, ItemStatus, NewItem,
};

use crate::error::StoreError;
use crate::identity::{ensure_identity, IdentityProvider};
use crate::store::{CollectionClient, ItemMutation};

/// Item create/read/update/delete service backing the detail screens.
///
/// Holds the locally cached copy of the item currently on screen and keeps
/// it consistent with successful remote mutations, so the presentation
/// layer never needs a re-fetch after a write.
pub struct ItemService {
    client: Arc<dyn CollectionClient>,
    identity: Arc<dyn IdentityProvider>,
    current: Option<Item>,
}

impl ItemService {
    pub fn new(client: Arc<dyn CollectionClient>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            client,
            identity,
            current: None,
        }
    }

    /// Submit a new report.
    ///
    /// Validation failures block locally — nothing reaches the store.
    /// `created_at` is the caller-captured submit time; `created_by` comes
    /// from the identity provider, signing in anonymously on first use.
    /// Exactly one remote write per successful call, no retries.
    pub async fn create(
        &self,
        draft: NewItem,
        created_at: DateTime<Utc>,
    ) -> Result<ItemId, StoreError> {
        let errors = validate_draft(&draft);
        if !errors.is_empty() {
            return Err(StoreError::Validation(errors));
        }

        let created_by = ensure_identity(self.identity.as_ref()).await?;
        let record = draft.into_record(created_by, created_at);
        self.client.create(record).await
    }

    /// Load a single item and cache it as the current one.
    ///
    /// An absent document is `NotFound`, distinguishable from a transport
    /// failure of an unreachable store.
    pub async fn get_by_id(&mut self, id: &str) -> Result<Item, StoreError> {
        match self.client.get(id).await? {
            Some(item) => {
                self.current = Some(item.clone());
                Ok(item)
            }
            None => {
                self.current = None;
                Err(StoreError::NotFound(id.to_string()))
            }
        }
    }

    /// Mark an item as returned to its owner.
    ///
    /// Stamps `updated_at` alongside the status and mirrors both onto the
    /// cached copy. Callers are expected to have checked [`Self::is_owner`]
    /// first; this primitive itself performs the write regardless.
    pub async fn mark_returned(&mut self, id: &str) -> Result<(), StoreError> {
        let now = Utc::now();
        self.client
            .update(
                id,
                vec![
                    ItemMutation::SetStatus(ItemStatus::Returned),
                    ItemMutation::SetUpdatedAt(now),
                ],
            )
            .await?;

        if let Some(current) = self.current.as_mut() {
            if current.id == id {
                current.status = ItemStatus::Returned;
                current.updated_at = Some(now);
            }
        }
        Ok(())
    }

    /// Delete an item. Same ownership caveat as [`Self::mark_returned`].
    pub async fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        self.client.delete(id).await?;
        if self.current.as_ref().is_some_and(|c| c.id == id) {
            self.current = None;
        }
        Ok(())
    }

    /// Campus id → display name, for filter and selection UIs.
    ///
    /// Read failures degrade to an empty map with the failure logged;
    /// inactive campuses are included.
    pub async fn list_campuses(&self) -> BTreeMap<CampusId, String> {
        match self.client.campuses().await {
            Ok(campuses) => campuses.into_iter().map(|c| (c.id, c.name)).collect(),
            Err(err) => {
                tracing::warn!(error = %err, "campus listing failed, degrading to empty map");
                BTreeMap::new()
            }
        }
    }

    /// UI gate: does the current identity own this item?
    pub fn is_owner(&self, item: &Item) -> bool {
        self.identity
            .current_identity()
            .is_some_and(|me| me == item.created_by)
    }

    /// The locally cached copy of the item on screen, if any.
    pub fn current_item(&self) -> Option<&Item> {
        self.current.as_ref()
    }
}
