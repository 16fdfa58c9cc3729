//! In-memory storage backend.
//!
//! Implements every trait from `carelink-store` (and the audit sink) with
//! mutex-guarded maps. Per-record operations hold the map lock for their
//! whole read-modify-write, which gives the same per-document atomicity
//! the engine expects from a real document store.

pub mod audit;
pub mod card;
pub mod credential;
pub mod directory;
pub mod record;

pub use audit::MemoryAuditSink;
pub use card::MemoryCardStore;
pub use credential::MemoryCredentialStore;
pub use directory::MemoryDirectory;
pub use record::MemoryRecordStore;
