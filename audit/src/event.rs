//! Audit event model.

use carelink_types::{ActorRole, IdentityHandle, Timestamp};
use serde::{Deserialize, Serialize};

/// Who performed the action. For anonymous emergency scans the actor is the
/// scanned identity itself — the scanner is unauthenticated by definition.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Actor {
    pub role: Option<ActorRole>,
    pub identity: Option<IdentityHandle>,
    pub name: Option<String>,
}

impl Actor {
    pub fn identity_only(identity: IdentityHandle) -> Self {
        Self {
            role: None,
            identity: Some(identity),
            name: None,
        }
    }

    pub fn holder(identity: IdentityHandle) -> Self {
        Self {
            role: Some(ActorRole::Holder),
            identity: Some(identity),
            name: None,
        }
    }
}

/// What happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    CredentialIssued,
    CredentialVerified,
    ChannelDispatched,
    CardGenerated,
    CardRegenerated,
    CardDisabled,
    TokenScanned,
    DisclosureServed,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::CredentialIssued => "credential_issued",
            AuditAction::CredentialVerified => "credential_verified",
            AuditAction::ChannelDispatched => "channel_dispatched",
            AuditAction::CardGenerated => "card_generated",
            AuditAction::CardRegenerated => "card_regenerated",
            AuditAction::CardDisabled => "card_disabled",
            AuditAction::TokenScanned => "token_scanned",
            AuditAction::DisclosureServed => "disclosure_served",
        }
    }
}

/// What the action touched.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Target {
    pub kind: String,
    pub id: String,
}

impl Target {
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }
}

/// Request-level context forwarded by the surrounding application.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RequestContext {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    Success,
    Failure,
}

/// One appended audit record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuditEvent {
    pub actor: Actor,
    pub action: AuditAction,
    pub target: Option<Target>,
    pub metadata: serde_json::Value,
    pub context: Option<RequestContext>,
    pub status: AuditStatus,
    pub error: Option<String>,
    pub at: Timestamp,
}

impl AuditEvent {
    /// A successful event with empty metadata.
    pub fn success(actor: Actor, action: AuditAction, at: Timestamp) -> Self {
        Self {
            actor,
            action,
            target: None,
            metadata: serde_json::Value::Null,
            context: None,
            status: AuditStatus::Success,
            error: None,
            at,
        }
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_context(mut self, context: Option<RequestContext>) -> Self {
        self.context = context;
        self
    }

    pub fn failed(mut self, error: impl Into<String>) -> Self {
        self.status = AuditStatus::Failure;
        self.error = Some(error.into());
        self
    }
}
