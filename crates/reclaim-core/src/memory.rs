//! In-memory backend implementing the store trait
//!
//! Used by tests and demos. Executes query plans the way the remote store
//! would: equality on campus, lexicographic title range, descending
//! `(created_at, id)` order, exclusive start-after cursor, limit. The
//! `offline` toggle makes every call fail with a transport error.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use reclaim_domain::{Campus, Item, ItemId, ItemRecord};

use crate::error::StoreError;
use crate::query::{ItemQuery, PageCursor};
use crate::store::{CollectionClient, ItemMutation, Page};

pub struct MemoryCollection {
    items: Mutex<BTreeMap<ItemId, Item>>,
    campuses: Mutex<Vec<Campus>>,
    offline: AtomicBool,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(BTreeMap::new()),
            campuses: Mutex::new(Vec::new()),
            offline: AtomicBool::new(false),
        }
    }

    /// Collection pre-seeded with campus entries.
    pub fn with_campuses(campuses: Vec<Campus>) -> Self {
        let collection = Self::new();
        *collection
            .campuses
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = campuses;
        collection
    }

    /// Simulate the remote collaborator becoming unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn reachable(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(StoreError::Transport("collection unreachable".into()))
        } else {
            Ok(())
        }
    }

    fn lock_items(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<ItemId, Item>>, StoreError> {
        self.items
            .lock()
            .map_err(|e| StoreError::Transport(e.to_string()))
    }

    /// Number of stored items (test assertions on write counts).
    pub fn len(&self) -> usize {
        self.items.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryCollection {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CollectionClient for MemoryCollection {
    async fn query(&self, query: &ItemQuery) -> Result<Page, StoreError> {
        self.reachable()?;
        let plan = query.plan()?;
        let items = self.lock_items()?;

        let mut matching: Vec<Item> = items
            .values()
            .filter(|item| plan.matches(item))
            .filter(|item| match &plan.start_after {
                Some(cursor) => cursor.admits(item),
                None => true,
            })
            .cloned()
            .collect();

        // Descending by created_at, id as tiebreak for a stable order
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        matching.truncate(plan.limit);

        let next_cursor = matching.last().map(PageCursor::at);
        Ok(Page {
            items: matching,
            next_cursor,
        })
    }

    async fn get(&self, id: &str) -> Result<Option<Item>, StoreError> {
        self.reachable()?;
        Ok(self.lock_items()?.get(id).cloned())
    }

    async fn create(&self, record: ItemRecord) -> Result<ItemId, StoreError> {
        self.reachable()?;
        let id = Uuid::new_v4().to_string();
        let item = record.into_item(id.clone());
        self.lock_items()?.insert(id.clone(), item);
        Ok(id)
    }

    async fn update(&self, id: &str, mutations: Vec<ItemMutation>) -> Result<(), StoreError> {
        self.reachable()?;
        let mut items = self.lock_items()?;
        let item = items
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        for mutation in mutations {
            match mutation {
                ItemMutation::SetStatus(status) => item.status = status,
                ItemMutation::SetUpdatedAt(at) => item.updated_at = Some(at),
                ItemMutation::SetImageUrl(url) => item.image_url = url,
                ItemMutation::SetDescription(text) => item.description = text,
                ItemMutation::SetContact(contact) => item.contact = contact,
            }
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.reachable()?;
        self.lock_items()?.remove(id);
        Ok(())
    }

    async fn campuses(&self) -> Result<Vec<Campus>, StoreError> {
        self.reachable()?;
        Ok(self
            .campuses
            .lock()
            .map_err(|e| StoreError::Transport(e.to_string()))?
            .clone())
    }
}
