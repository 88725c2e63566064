pub mod domain;
pub mod infra;
pub mod legacy;
pub mod seed;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use domain::contact::{validate_contact, ContactInquiry, NewInquiry, RawContactPayload};
pub use storage::{
    ContactStore, FileContactStore, MemoryContactStore, PersistenceError, PgContactStore,
};
