//! Audit trail for the emergency-access engine.
//!
//! Every issuance, verification, disclosure, and revocation is recorded.
//! Recording is strictly best-effort: a failing sink is logged and ignored,
//! never allowed to fail or roll back the operation it describes.

pub mod event;
pub mod recorder;
pub mod sink;

pub use event::{
    Actor, AuditAction, AuditEvent, AuditStatus, RequestContext, Target,
};
pub use recorder::AuditRecorder;
pub use sink::AuditSink;
