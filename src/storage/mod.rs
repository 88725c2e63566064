//! Persistence abstraction for contact inquiries.
//!
//! Two real backends exist: the relational table used by the V2 portal
//! ([`PgContactStore`]) and the legacy flat-file log used by V1
//! ([`FileContactStore`]). [`MemoryContactStore`] is the injectable fake used
//! by tests.
//!
//! Listing order is most-recent-first for every backend. The legacy log file
//! is written oldest-first (append order), so the file store reverses after
//! parsing; the relational store orders in the query.

pub mod logfile;
pub mod memory;
pub mod relational;

use crate::domain::{ContactInquiry, NewInquiry};
use async_trait::async_trait;
use thiserror::Error;

pub use logfile::FileContactStore;
pub use memory::MemoryContactStore;
pub use relational::PgContactStore;

/// A durable write or read against the backing store failed.
///
/// Never retried automatically; the transport layer surfaces it as a 500.
#[derive(Debug, Error)]
#[error("store failure: {0}")]
pub struct PersistenceError(#[from] pub anyhow::Error);

impl From<sqlx::Error> for PersistenceError {
    fn from(err: sqlx::Error) -> Self {
        PersistenceError(err.into())
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        PersistenceError(err.into())
    }
}

/// Persistence contract for contact inquiries.
///
/// Implementations must make `append` atomic: a failed append never leaves a
/// partially-written record observable to `list`.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Assigns `id` and `fecha`, writes the record durably and returns it.
    async fn append(&self, inquiry: NewInquiry) -> Result<ContactInquiry, PersistenceError>;

    /// Returns all records, most-recent-first. An empty store yields an empty
    /// vec, never an error.
    async fn list(&self) -> Result<Vec<ContactInquiry>, PersistenceError>;

    /// Total number of persisted records.
    async fn count(&self) -> Result<u64, PersistenceError>;
}
