//! Paginated, filtered item feed
//!
//! One feed instance backs one list view. It owns the cursor, the
//! accumulated pages and the end-of-stream flag; `fetch_next_page` takes
//! `&mut self`, so at most one fetch per feed can be in flight — the
//! single-flight rule is checked by the compiler, not at runtime.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use reclaim_domain::{CampusId, Item};

use crate::error::StoreError;
use crate::query::{Constraint, ItemQuery, PageCursor, DEFAULT_PAGE_SIZE};
use crate::store::CollectionClient;

/// User-facing filter state for a list view.
///
/// `None` and the empty string both mean "no filter", matching how a
/// search box and an unset campus picker present themselves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFilter {
    pub campus_id: Option<CampusId>,
    /// Title prefix; case- and diacritic-sensitive.
    pub search: Option<String>,
    /// Only items created strictly before this instant. Cannot be combined
    /// with `search` (two range fields, see [`ItemQuery::plan`]).
    pub created_before: Option<DateTime<Utc>>,
}

impl ItemFilter {
    fn constraints(&self) -> Vec<Constraint> {
        let mut constraints = Vec::new();
        if let Some(campus) = self.campus_id.as_deref() {
            if !campus.is_empty() {
                constraints.push(Constraint::CampusEq(campus.to_string()));
            }
        }
        if let Some(search) = self.search.as_deref() {
            if !search.is_empty() {
                constraints.push(Constraint::TitleStartsWith(search.to_string()));
            }
        }
        if let Some(bound) = self.created_before {
            constraints.push(Constraint::CreatedBefore(bound));
        }
        constraints
    }
}

/// Feed tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedConfig {
    pub page_size: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Query/pagination coordinator for one list view.
pub struct ItemFeed {
    client: Arc<dyn CollectionClient>,
    page_size: usize,
    cursor: Option<PageCursor>,
    items: Vec<Item>,
    end_reached: bool,
}

impl ItemFeed {
    pub fn new(client: Arc<dyn CollectionClient>) -> Self {
        Self::with_config(client, FeedConfig::default())
    }

    pub fn with_config(client: Arc<dyn CollectionClient>, config: FeedConfig) -> Self {
        Self {
            client,
            page_size: config.page_size,
            cursor: None,
            items: Vec::new(),
            end_reached: false,
        }
    }

    /// Fetch the next page for the given filter and append it.
    ///
    /// Returns the newly fetched slice. An empty slice after a successful
    /// call means end-of-stream. A transport failure is logged and degrades
    /// to an empty slice without touching the cursor or the end flag;
    /// an unsupported filter combination surfaces as an error before any
    /// remote call.
    pub async fn fetch_next_page(&mut self, filter: &ItemFilter) -> Result<&[Item], StoreError> {
        if self.end_reached {
            return Ok(&[]);
        }

        let mut query = ItemQuery::new(self.page_size);
        query.constraints = filter.constraints();
        query.start_after = self.cursor.clone();
        // Fail fast on filter combinations the store cannot serve
        query.plan()?;

        let page = match self.client.query(&query).await {
            Ok(page) => page,
            Err(err) if err.is_transport() => {
                tracing::warn!(error = %err, "item page fetch failed, degrading to empty page");
                return Ok(&[]);
            }
            Err(err) => return Err(err),
        };

        tracing::debug!(fetched = page.items.len(), "item page fetched");

        let start = self.items.len();
        if page.items.is_empty() {
            self.end_reached = true;
        } else {
            self.cursor = page.next_cursor;
        }
        self.items.extend(page.items);
        Ok(&self.items[start..])
    }

    /// Clear the cursor and the end flag so the next fetch starts over.
    ///
    /// The accumulated list is left alone; whether old pages stay visible
    /// on a filter change is the caller's call — see [`ItemFeed::clear`].
    pub fn reset_pagination(&mut self) {
        self.cursor = None;
        self.end_reached = false;
    }

    /// Drop the accumulated pages.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Everything fetched so far, in display order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// True once a fetch came back empty for the current pagination run.
    pub fn end_reached(&self) -> bool {
        self.end_reached
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_builds_no_constraints() {
        assert!(ItemFilter::default().constraints().is_empty());
    }

    #[test]
    fn empty_strings_are_treated_as_absent() {
        let filter = ItemFilter {
            campus_id: Some(String::new()),
            search: Some(String::new()),
            created_before: None,
        };
        assert!(filter.constraints().is_empty());
    }

    #[test]
    fn set_filters_map_to_constraints() {
        let filter = ItemFilter {
            campus_id: Some("c1".into()),
            search: Some("Umb".into()),
            created_before: None,
        };
        let constraints = filter.constraints();
        assert_eq!(constraints.len(), 2);
        assert!(constraints.contains(&Constraint::CampusEq("c1".into())));
        assert!(constraints.contains(&Constraint::TitleStartsWith("Umb".into())));
    }
}
