//! Core library for the reclaim lost & found board
//!
//! The remote document store and the identity provider are external
//! collaborators, consumed through the [`CollectionClient`] and
//! [`IdentityProvider`] traits. This crate provides:
//! - the query model with cursor pagination and prefix-range emulation
//! - the [`ItemFeed`] pagination coordinator
//! - the [`ItemService`] create/read/update/delete synchronization layer
//! - an in-memory backend for tests and demos

pub mod error;
pub mod feed;
pub mod identity;
pub mod memory;
pub mod query;
pub mod service;
pub mod store;

pub use error::*;
pub use feed::*;
pub use identity::*;
pub use memory::MemoryCollection;
pub use query::*;
pub use service::*;
pub use store::*;
