//! Validation for new item drafts

use serde::{Deserialize, Serialize};

use crate::item::NewItem;

/// Severity of a validation error
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

/// A validation error or warning
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub severity: ValidationSeverity,
}

fn required(field: &str, message: &str) -> ValidationError {
    ValidationError {
        field: field.to_string(),
        message: message.to_string(),
        severity: ValidationSeverity::Error,
    }
}

/// Validate a draft and return errors/warnings.
///
/// These checks run client-side only; a draft with errors must never reach
/// the remote store.
pub fn validate_draft(draft: &NewItem) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // Required fields
    if draft.title.trim().is_empty() {
        errors.push(required("title", "Title is required"));
    }

    if draft.contact.trim().is_empty() {
        errors.push(required("contact", "Contact is required"));
    }

    if draft.campus_id.trim().is_empty() {
        errors.push(required("campus_id", "Campus is required"));
    }

    if draft.location.trim().is_empty() {
        errors.push(required("location", "Location is required"));
    }

    errors
}

/// Check if a draft is submittable (no errors)
pub fn is_valid(draft: &NewItem) -> bool {
    validate_draft(draft)
        .iter()
        .all(|e| e.severity != ValidationSeverity::Error)
}
