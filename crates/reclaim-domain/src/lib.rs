//! Domain types for the reclaim lost & found board
//!
//! Canonical models shared by the core library and any presentation layer:
//! - Item: a lost/found report with lifecycle status
//! - Campus: a filter dimension and display label
//! - Validation: client-side required-field checks before submission

pub mod campus;
pub mod item;
pub mod validation;

pub use campus::*;
pub use item::*;
pub use validation::*;
