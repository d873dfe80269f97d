//! The remote document-store capability interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use reclaim_domain::{Campus, Item, ItemId, ItemRecord, ItemStatus};

use crate::error::StoreError;
use crate::query::{ItemQuery, PageCursor};

/// Mutation to apply to an item's mutable fields.
///
/// `id`, `created_by` and `created_at` have no mutation on purpose; they
/// are immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemMutation {
    SetStatus(ItemStatus),
    SetUpdatedAt(DateTime<Utc>),
    SetImageUrl(String),
    SetDescription(String),
    SetContact(String),
}

/// One page of a listing, with the cursor to resume after it.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub items: Vec<Item>,
    /// Position of the last returned document; `None` for an empty page,
    /// which signals end-of-stream to the caller.
    pub next_cursor: Option<PageCursor>,
}

impl Page {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_cursor: None,
        }
    }
}

/// The remote collection abstraction every backend implements.
///
/// The store executes queries, assigns document ids and provides
/// single-document atomicity; nothing here retries, times out or checks
/// authorization — callers own those policies.
#[async_trait]
pub trait CollectionClient: Send + Sync {
    /// Execute a compiled-compatible query and return one page.
    async fn query(&self, query: &ItemQuery) -> Result<Page, StoreError>;

    /// Fetch a single document; `Ok(None)` for an absent id.
    async fn get(&self, id: &str) -> Result<Option<Item>, StoreError>;

    /// Store a new record. The store assigns and returns the id.
    async fn create(&self, record: ItemRecord) -> Result<ItemId, StoreError>;

    /// Apply mutations to an existing document.
    async fn update(&self, id: &str, mutations: Vec<ItemMutation>) -> Result<(), StoreError>;

    /// Delete a document. Deleting an absent id succeeds (idempotent
    /// single-document write).
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// The full campus collection. Small and bounded, not paginated.
    async fn campuses(&self) -> Result<Vec<Campus>, StoreError>;
}
