//! Item: a lost/found report

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque document identifier, assigned by the store at creation.
pub type ItemId = String;

/// Anonymous user identifier issued by the identity provider.
pub type UserId = String;

/// Campus document identifier.
pub type CampusId = String;

/// Lifecycle status of a report.
///
/// Earlier revisions kept two string fields (`status` and `type`) for this
/// concept; the canonical model is a single closed enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Lost,
    Found,
    Returned,
}

impl ItemStatus {
    /// True once the item has been handed back to its owner.
    pub fn is_returned(&self) -> bool {
        matches!(self, ItemStatus::Returned)
    }
}

/// A lost/found report as stored in the remote collection.
///
/// `id`, `created_by` and `created_at` are immutable after creation.
/// `created_at` is the sole sort key (descending) for listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub contact: String,
    /// Optional image reference; the empty string means "no image".
    pub image_url: String,
    pub campus_id: CampusId,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub status: ItemStatus,
}

/// User-supplied fields of a new report, before submission.
///
/// The service stamps `created_by` and `created_at`; the store assigns `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub title: String,
    pub description: String,
    pub location: String,
    pub contact: String,
    pub image_url: String,
    pub campus_id: CampusId,
    pub status: ItemStatus,
}

impl NewItem {
    /// Stamp creator and submit-time timestamp, producing the record sent
    /// to the store.
    pub fn into_record(self, created_by: UserId, created_at: DateTime<Utc>) -> ItemRecord {
        ItemRecord {
            title: self.title,
            description: self.description,
            location: self.location,
            contact: self.contact,
            image_url: self.image_url,
            campus_id: self.campus_id,
            created_by,
            created_at,
            updated_at: None,
            status: self.status,
        }
    }
}

/// A complete item record minus the store-assigned id.
///
/// `created_at` is the caller-captured submit time, not server time, so
/// clock skew across devices affects sort order. Known limitation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub title: String,
    pub description: String,
    pub location: String,
    pub contact: String,
    pub image_url: String,
    pub campus_id: CampusId,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub status: ItemStatus,
}

impl ItemRecord {
    /// Attach the store-assigned id, yielding the full item.
    pub fn into_item(self, id: ItemId) -> Item {
        Item {
            id,
            title: self.title,
            description: self.description,
            location: self.location,
            contact: self.contact,
            image_url: self.image_url,
            campus_id: self.campus_id,
            created_by: self.created_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ItemStatus::Lost).unwrap(), "\"lost\"");
        assert_eq!(
            serde_json::to_string(&ItemStatus::Returned).unwrap(),
            "\"returned\""
        );
        let back: ItemStatus = serde_json::from_str("\"found\"").unwrap();
        assert_eq!(back, ItemStatus::Found);
    }

    #[test]
    fn item_serde_round_trip() {
        let item = Item {
            id: "RrIRSE4ikVSGPFr2duSeJQzxlGt1".into(),
            title: "Black wallet".into(),
            description: "Leather, no cash inside".into(),
            location: "Library, 2nd floor".into(),
            contact: "(00) 00000-0000".into(),
            image_url: String::new(),
            campus_id: "campus-main".into(),
            created_by: "QoDU0OoPtzO6Nd8dvJiHTNour0X2".into(),
            created_at: Utc::now(),
            updated_at: None,
            status: ItemStatus::Lost,
        };
        let json = serde_json::to_string_pretty(&item).unwrap();
        let back: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(item, back);
    }

    #[test]
    fn record_stamps_survive_into_item() {
        let draft = NewItem {
            title: "Umbrella".into(),
            description: String::new(),
            location: "Cafeteria".into(),
            contact: "ana@example.edu".into(),
            image_url: String::new(),
            campus_id: "c1".into(),
            status: ItemStatus::Found,
        };
        let at = Utc::now();
        let item = draft
            .into_record("user-1".into(), at)
            .into_item("doc-9".into());
        assert_eq!(item.id, "doc-9");
        assert_eq!(item.created_by, "user-1");
        assert_eq!(item.created_at, at);
        assert_eq!(item.updated_at, None);
        assert_eq!(item.status, ItemStatus::Found);
    }
}
