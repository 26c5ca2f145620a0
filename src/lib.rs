// src/lib.rs
//! Data-access layer for a single MongoDB collection.
//!
//! A [`Client`] owns one logical connection, bound at construction to a fixed
//! database/collection pair. On top of it sit index administration (including
//! a configurable TTL expiry index), transaction tracking keyed by
//! caller-chosen identifiers, and a small CRUD/query facade. All operations
//! are blocking; the driver multiplexes concurrent calls over its own pool.
//!
//! ```no_run
//! use std::time::Duration;
//! use bson::doc;
//! use mongostore::{Client, StoreConfig};
//!
//! # fn main() -> mongostore::Result<()> {
//! let config = StoreConfig::new("mongodb://localhost:27017", "cogman", "tasks",
//!     Duration::from_secs(3600));
//! let client = Client::connect(config)?;
//!
//! client.set_ttl()?;
//! client.create(doc! { "name": "job-1", "created_at": bson::DateTime::now() })?;
//! let task = client.get(doc! { "name": "job-1" })?;
//! # let _ = task;
//! client.close();
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod crud;
pub mod error;
pub mod index;
pub mod session;

pub use client::Client;
pub use config::StoreConfig;
pub use crud::DocumentCursor;
pub use error::{Result, StoreError};
pub use index::{IndexKey, IndexSpec, CREATED_AT_FIELD, TTL_INDEX_NAME};
pub use session::SessionTracker;
