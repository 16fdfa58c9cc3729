//! The append-only event sink.

use carelink_store::StoreError;

use crate::AuditEvent;

/// Append-only audit sink, implemented by the surrounding application
/// (and by the in-memory store for tests).
pub trait AuditSink: Send + Sync {
    fn record(&self, event: &AuditEvent) -> Result<(), StoreError>;
}
