//! Best-effort audit recording.

use std::sync::Arc;

use crate::{AuditEvent, AuditSink};

/// Fire-and-forget wrapper around an [`AuditSink`].
///
/// Sink failures are logged for operational visibility and then dropped;
/// audit logging is observability, not a transactional guarantee.
#[derive(Clone)]
pub struct AuditRecorder {
    sink: Arc<dyn AuditSink>,
}

impl AuditRecorder {
    pub fn new(sink: Arc<dyn AuditSink>) -> Self {
        Self { sink }
    }

    pub fn record(&self, event: AuditEvent) {
        if let Err(e) = self.sink.record(&event) {
            tracing::warn!(
                action = event.action.as_str(),
                error = %e,
                "audit sink rejected event; continuing"
            );
        }
    }
}
