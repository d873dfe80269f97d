//! Query model: typed constraints, cursor pagination, plan compilation
//!
//! Listings are always ordered by `created_at` descending (document id
//! descending as tiebreak); constraints narrow the result and the cursor
//! resumes after the last document of the previous page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use reclaim_domain::{CampusId, Item, ItemId};

use crate::error::StoreError;

/// Maximal code point in Unicode's private-use area, appended to a prefix
/// to form the inclusive upper bound of the emulated prefix range.
pub const PREFIX_SENTINEL: char = '\u{f8ff}';

/// Default page size for listings.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Filter constraint for item queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Constraint {
    /// Equality on the campus reference.
    CampusEq(CampusId),
    /// Prefix match on the title, emulated with a lexicographic range.
    /// Case- and diacritic-sensitive; not a substring match.
    TitleStartsWith(String),
    /// Range on the creation timestamp (exclusive upper bound).
    CreatedBefore(DateTime<Utc>),
}

impl Constraint {
    /// The field a range-type constraint bounds, if it is one.
    fn range_field(&self) -> Option<&'static str> {
        match self {
            Constraint::CampusEq(_) => None,
            Constraint::TitleStartsWith(_) => Some("title"),
            Constraint::CreatedBefore(_) => Some("created_at"),
        }
    }
}

/// Opaque marker identifying the last document returned by a page fetch.
///
/// Callers thread it back into the next query unchanged; its contents are
/// an implementation detail of the ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageCursor {
    created_at: DateTime<Utc>,
    id: ItemId,
}

impl PageCursor {
    /// Cursor positioned at the given item.
    pub fn at(item: &Item) -> Self {
        Self {
            created_at: item.created_at,
            id: item.id.clone(),
        }
    }

    /// True when `item` sorts strictly after this cursor in descending
    /// `(created_at, id)` order, i.e. belongs to a later page.
    pub(crate) fn admits(&self, item: &Item) -> bool {
        match item.created_at.cmp(&self.created_at) {
            std::cmp::Ordering::Less => true,
            std::cmp::Ordering::Equal => item.id < self.id,
            std::cmp::Ordering::Greater => false,
        }
    }
}

/// A query against the item collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemQuery {
    pub constraints: Vec<Constraint>,
    pub limit: usize,
    pub start_after: Option<PageCursor>,
}

impl Default for ItemQuery {
    fn default() -> Self {
        Self {
            constraints: Vec::new(),
            limit: DEFAULT_PAGE_SIZE,
            start_after: None,
        }
    }
}

impl ItemQuery {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    pub fn campus(mut self, campus_id: impl Into<CampusId>) -> Self {
        self.constraints.push(Constraint::CampusEq(campus_id.into()));
        self
    }

    pub fn title_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.constraints
            .push(Constraint::TitleStartsWith(prefix.into()));
        self
    }

    pub fn created_before(mut self, bound: DateTime<Utc>) -> Self {
        self.constraints.push(Constraint::CreatedBefore(bound));
        self
    }

    pub fn start_after(mut self, cursor: PageCursor) -> Self {
        self.start_after = Some(cursor);
        self
    }

    /// Compile the query into an executable plan.
    ///
    /// Fails fast with [`StoreError::UnsupportedQuery`] when the query needs
    /// range bounds on more than one field (a composite-index requirement of
    /// the backing store) or repeats a constraint on the same field. A
    /// filter is never silently dropped.
    pub fn plan(&self) -> Result<QueryPlan, StoreError> {
        let mut plan = QueryPlan {
            campus: None,
            title_range: None,
            created_before: None,
            limit: self.limit,
            start_after: self.start_after.clone(),
        };

        let mut range_fields: Vec<&'static str> = Vec::new();
        for constraint in &self.constraints {
            if let Some(field) = constraint.range_field() {
                if !range_fields.contains(&field) {
                    range_fields.push(field);
                }
            }
            match constraint {
                Constraint::CampusEq(campus_id) => {
                    if plan.campus.replace(campus_id.clone()).is_some() {
                        return Err(StoreError::UnsupportedQuery(
                            "duplicate campus constraint".into(),
                        ));
                    }
                }
                Constraint::TitleStartsWith(prefix) => {
                    let range = (prefix.clone(), format!("{prefix}{PREFIX_SENTINEL}"));
                    if plan.title_range.replace(range).is_some() {
                        return Err(StoreError::UnsupportedQuery(
                            "duplicate title constraint".into(),
                        ));
                    }
                }
                Constraint::CreatedBefore(bound) => {
                    if plan.created_before.replace(*bound).is_some() {
                        return Err(StoreError::UnsupportedQuery(
                            "duplicate created_at constraint".into(),
                        ));
                    }
                }
            }
        }

        if range_fields.len() > 1 {
            return Err(StoreError::UnsupportedQuery(format!(
                "range filters on multiple fields ({}) need a composite index",
                range_fields.join(", ")
            )));
        }

        Ok(plan)
    }
}

/// Compiled form of an [`ItemQuery`]: one optional equality, at most one
/// range, fixed descending sort.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub campus: Option<CampusId>,
    /// Inclusive lexicographic bounds on the title.
    pub title_range: Option<(String, String)>,
    pub created_before: Option<DateTime<Utc>>,
    pub limit: usize,
    pub start_after: Option<PageCursor>,
}

impl QueryPlan {
    /// Whether an item satisfies every filter of the plan (the cursor is
    /// applied separately, after ordering).
    pub fn matches(&self, item: &Item) -> bool {
        if let Some(campus) = &self.campus {
            if &item.campus_id != campus {
                return false;
            }
        }
        if let Some((lower, upper)) = &self.title_range {
            if item.title < *lower || item.title > *upper {
                return false;
            }
        }
        if let Some(bound) = &self.created_before {
            if item.created_at >= *bound {
                return false;
            }
        }
        true
    }
}
