//! In-memory contact store.
//!
//! The injectable fake behind the router in tests. A failure toggle makes the
//! persistence-error paths reachable without a real backend.

use crate::domain::{ContactInquiry, NewInquiry};
use crate::storage::{ContactStore, PersistenceError};
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

#[derive(Default)]
pub struct MemoryContactStore {
    records: Mutex<Vec<ContactInquiry>>,
    failing: AtomicBool,
}

impl MemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every store operation fails with a persistence error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_failing(&self) -> Result<(), PersistenceError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(PersistenceError(anyhow!("simulated store failure")));
        }
        Ok(())
    }
}

#[async_trait]
impl ContactStore for MemoryContactStore {
    async fn append(&self, inquiry: NewInquiry) -> Result<ContactInquiry, PersistenceError> {
        self.check_failing()?;
        let mut records = self.records.lock().await;
        let record = ContactInquiry {
            id: records.len() as i64 + 1,
            nombre: inquiry.nombre,
            email: inquiry.email,
            mensaje: inquiry.mensaje,
            fecha: Utc::now(),
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<ContactInquiry>, PersistenceError> {
        self.check_failing()?;
        let records = self.records.lock().await;
        // Stored oldest-first; canonical listing order is most-recent-first.
        let mut out = records.clone();
        out.reverse();
        Ok(out)
    }

    async fn count(&self) -> Result<u64, PersistenceError> {
        self.check_failing()?;
        Ok(self.records.lock().await.len() as u64)
    }
}
