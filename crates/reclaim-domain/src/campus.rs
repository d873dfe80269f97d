//! Campus: a filter dimension and display label

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::item::CampusId;

/// A campus entry from the campus collection.
///
/// `active` is carried as data but not enforced as a filter anywhere:
/// listings include inactive campuses and callers decide whether to hide
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campus {
    pub id: CampusId,
    pub name: String,
    pub description: String,
    pub address: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub active: bool,
}

impl Campus {
    /// Minimal campus with just an id and display name.
    pub fn new(id: impl Into<CampusId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            address: String::new(),
            created_at: None,
            updated_at: None,
            active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_campus_is_active() {
        let campus = Campus::new("c1", "North Campus");
        assert_eq!(campus.id, "c1");
        assert_eq!(campus.name, "North Campus");
        assert!(campus.active);
    }

    #[test]
    fn campus_serde_round_trip() {
        let campus = Campus {
            id: "c2".into(),
            name: "Downtown".into(),
            description: "City-center buildings".into(),
            address: "100 Main St".into(),
            created_at: Some(Utc::now()),
            updated_at: None,
            active: false,
        };
        let json = serde_json::to_string(&campus).unwrap();
        let back: Campus = serde_json::from_str(&json).unwrap();
        assert_eq!(campus, back);
    }
}
