//! Resolution of a presented token into a disclosure.

use std::sync::Arc;

use carelink_audit::{Actor, AuditAction, AuditEvent, AuditRecorder, RequestContext, Target};
use carelink_crypto::digest_sealed_token;
use carelink_store::{CardStore, EmergencyContact, MedicalRecordStore};
use carelink_token::TokenEngine;
use carelink_types::{Clock, EngineError, HealthId, Timestamp};

use crate::filter::{filter_record, DisclosedRecord};

/// What an anonymous scanner receives: the card snapshot plus the filtered
/// record.
#[derive(Clone, Debug)]
pub struct Disclosure {
    pub health_id: HealthId,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub blood_type: String,
    pub emergency_contact: EmergencyContact,
    pub city: Option<String>,
    pub state: Option<String>,
    pub record: DisclosedRecord,
    pub scanned_at: Timestamp,
}

/// Resolves sealed tokens for the emergency path.
///
/// The check chain is: token signature and expiry, then active card
/// lookup, then current-token digest comparison. A token that fails any
/// link resolves to the same uniform error.
pub struct DisclosureResolver {
    tokens: Arc<TokenEngine>,
    cards: Arc<dyn CardStore>,
    records: Arc<dyn MedicalRecordStore>,
    audit: AuditRecorder,
    clock: Arc<dyn Clock>,
}

impl DisclosureResolver {
    pub fn new(
        tokens: Arc<TokenEngine>,
        cards: Arc<dyn CardStore>,
        records: Arc<dyn MedicalRecordStore>,
        audit: AuditRecorder,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            tokens,
            cards,
            records,
            audit,
            clock,
        }
    }

    /// Resolve a presented token into the disclosable view of its holder.
    ///
    /// A missing medical record is not an error: the card snapshot still
    /// discloses, with empty fact lists.
    pub fn resolve(
        &self,
        sealed: &str,
        context: Option<RequestContext>,
    ) -> Result<Disclosure, EngineError> {
        let now = self.clock.now();
        let payload = self.tokens.verify(sealed, now)?;

        let card = self
            .cards
            .find_active_by_health_id(&payload.health_id)?
            .ok_or(EngineError::NotFoundOrExpired)?;

        if digest_sealed_token(sealed) != card.token_digest {
            tracing::info!(health_id = %payload.health_id, "token superseded by regeneration");
            return Err(EngineError::NotFoundOrExpired);
        }
        if card.identity != payload.identity {
            tracing::warn!(health_id = %payload.health_id, "token identity does not match card");
            return Err(EngineError::Integrity);
        }

        let stored = self.records.find_by_identity(&card.identity)?.unwrap_or_default();
        let record = filter_record(&stored);

        let actor = Actor::identity_only(card.identity.clone());
        let target = Target::new("health_card", card.health_id.as_str());
        self.audit.record(
            AuditEvent::success(actor.clone(), AuditAction::TokenScanned, now)
                .with_target(target.clone())
                .with_context(context.clone()),
        );
        self.audit.record(
            AuditEvent::success(actor, AuditAction::DisclosureServed, now)
                .with_target(target)
                .with_metadata(serde_json::json!({
                    "diseases_disclosed": record.diseases.len(),
                    "allergies_disclosed": record.allergies.len(),
                    "prescriptions_disclosed": record.prescriptions.len(),
                }))
                .with_context(context),
        );
        tracing::info!(health_id = %card.health_id, "emergency disclosure served");

        Ok(Disclosure {
            health_id: card.health_id,
            name: card.snapshot.name,
            age: card.snapshot.date_of_birth.age_in_years(now),
            gender: card.snapshot.gender,
            blood_type: card.snapshot.blood_type,
            emergency_contact: card.snapshot.emergency_contact,
            city: card.snapshot.city,
            state: card.snapshot.state,
            record,
            scanned_at: now,
        })
    }
}
