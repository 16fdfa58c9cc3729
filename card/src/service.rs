//! Card generation, regeneration, and disabling.

use std::sync::Arc;

use carelink_audit::{Actor, AuditAction, AuditEvent, AuditRecorder, RequestContext, Target};
use carelink_crypto::generate_health_id;
use carelink_store::{
    CardRecord, CardSnapshot, CardStore, Demographics, EmergencyContact, IdentityDirectory,
};
use carelink_token::TokenEngine;
use carelink_types::{Clock, EngineError, HealthId, IdentityHandle, Timestamp};

use crate::eligibility::check_eligibility;

/// Holder-facing view of a card. Everything here comes from the snapshot
/// and the card record; nothing is joined live.
#[derive(Clone, Debug)]
pub struct CardDisplay {
    pub health_id: HealthId,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub blood_type: String,
    pub emergency_contact: EmergencyContact,
    pub city: Option<String>,
    pub state: Option<String>,
    pub url: String,
    pub image: String,
    pub active: bool,
    pub regeneration_count: u32,
    pub generated_at: Timestamp,
}

/// Drives the card lifecycle.
///
/// At most one card exists per identity. The health id is minted once and
/// survives regeneration; only the token (and its digest) rotates.
pub struct CardService {
    cards: Arc<dyn CardStore>,
    directory: Arc<dyn IdentityDirectory>,
    tokens: Arc<TokenEngine>,
    audit: AuditRecorder,
    clock: Arc<dyn Clock>,
}

impl CardService {
    pub fn new(
        cards: Arc<dyn CardStore>,
        directory: Arc<dyn IdentityDirectory>,
        tokens: Arc<TokenEngine>,
        audit: AuditRecorder,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            cards,
            directory,
            tokens,
            audit,
            clock,
        }
    }

    /// Return the identity's active card, generating one if none exists.
    ///
    /// An existing active card is returned as-is. A disabled card is
    /// revived through the regeneration path so its old token stays dead.
    pub fn generate_or_fetch(
        &self,
        identity: &IdentityHandle,
        context: Option<RequestContext>,
    ) -> Result<CardRecord, EngineError> {
        if let Some(existing) = self.cards.find_by_identity(identity)? {
            if existing.active {
                return Ok(existing);
            }
            return self.rotate(existing, context, true);
        }

        let now = self.clock.now();
        let snapshot = self.fresh_snapshot(identity)?;
        let health_id = generate_health_id(now);
        let minted = self.tokens.mint(
            identity.clone(),
            health_id.clone(),
            snapshot.name.clone(),
            now,
        )?;

        let card = CardRecord {
            identity: identity.clone(),
            health_id: health_id.clone(),
            token: minted.token,
            token_digest: minted.token_digest,
            image: minted.image.0,
            url: minted.url,
            snapshot,
            active: true,
            revoked: false,
            revoked_reason: None,
            revoked_at: None,
            regeneration_count: 0,
            generated_at: now,
            regenerated_at: None,
        };
        self.cards.upsert(card.clone())?;

        self.audit.record(
            AuditEvent::success(Actor::holder(identity.clone()), AuditAction::CardGenerated, now)
                .with_target(Target::new("health_card", health_id.as_str()))
                .with_context(context),
        );
        tracing::info!(health_id = %card.health_id, "health card generated");
        Ok(card)
    }

    /// Rotate the card's token. The previous token stops resolving the
    /// moment the digest is replaced, even though it remains validly signed.
    pub fn regenerate(
        &self,
        identity: &IdentityHandle,
        context: Option<RequestContext>,
    ) -> Result<CardRecord, EngineError> {
        let card = self
            .cards
            .find_by_identity(identity)?
            .ok_or(EngineError::NotFoundOrExpired)?;
        self.rotate(card, context, false)
    }

    /// Disable the identity's card. Idempotent: disabling an already
    /// disabled card succeeds without touching the revocation record.
    pub fn disable(
        &self,
        identity: &IdentityHandle,
        reason: Option<String>,
        context: Option<RequestContext>,
    ) -> Result<CardRecord, EngineError> {
        let mut card = self
            .cards
            .find_by_identity(identity)?
            .ok_or(EngineError::NotFoundOrExpired)?;
        if !card.active {
            return Ok(card);
        }

        let now = self.clock.now();
        card.active = false;
        card.revoked = true;
        card.revoked_reason = reason.clone();
        card.revoked_at = Some(now);
        self.cards.upsert(card.clone())?;

        self.audit.record(
            AuditEvent::success(Actor::holder(identity.clone()), AuditAction::CardDisabled, now)
                .with_target(Target::new("health_card", card.health_id.as_str()))
                .with_metadata(serde_json::json!({ "reason": reason }))
                .with_context(context),
        );
        tracing::info!(health_id = %card.health_id, "health card disabled");
        Ok(card)
    }

    /// The holder-facing rendering of the card. Age is computed from the
    /// snapshot at call time; everything else is stored.
    pub fn display(&self, identity: &IdentityHandle) -> Result<CardDisplay, EngineError> {
        let card = self
            .cards
            .find_by_identity(identity)?
            .ok_or(EngineError::NotFoundOrExpired)?;
        let now = self.clock.now();
        Ok(CardDisplay {
            health_id: card.health_id,
            name: card.snapshot.name,
            age: card.snapshot.date_of_birth.age_in_years(now),
            gender: card.snapshot.gender,
            blood_type: card.snapshot.blood_type,
            emergency_contact: card.snapshot.emergency_contact,
            city: card.snapshot.city,
            state: card.snapshot.state,
            url: card.url,
            image: card.image,
            active: card.active,
            regeneration_count: card.regeneration_count,
            generated_at: card.generated_at,
        })
    }

    /// Check whether an identity may receive a card.
    pub fn eligibility(
        &self,
        identity: &IdentityHandle,
    ) -> Result<crate::EligibilityReport, EngineError> {
        let demographics = self.load_demographics(identity)?;
        Ok(check_eligibility(&demographics))
    }

    /// The shared regeneration path: new token, refreshed snapshot,
    /// counter bumped, flags cleared.
    fn rotate(
        &self,
        mut card: CardRecord,
        context: Option<RequestContext>,
        reviving: bool,
    ) -> Result<CardRecord, EngineError> {
        let now = self.clock.now();
        let snapshot = self.fresh_snapshot(&card.identity)?;
        let minted = self.tokens.mint(
            card.identity.clone(),
            card.health_id.clone(),
            snapshot.name.clone(),
            now,
        )?;

        card.token = minted.token;
        card.token_digest = minted.token_digest;
        card.image = minted.image.0;
        card.url = minted.url;
        card.snapshot = snapshot;
        card.active = true;
        card.revoked = false;
        card.revoked_reason = None;
        card.revoked_at = None;
        card.regeneration_count += 1;
        card.regenerated_at = Some(now);
        self.cards.upsert(card.clone())?;

        self.audit.record(
            AuditEvent::success(
                Actor::holder(card.identity.clone()),
                AuditAction::CardRegenerated,
                now,
            )
            .with_target(Target::new("health_card", card.health_id.as_str()))
            .with_metadata(serde_json::json!({
                "regeneration_count": card.regeneration_count,
                "reviving": reviving,
            }))
            .with_context(context),
        );
        tracing::info!(
            health_id = %card.health_id,
            regeneration_count = card.regeneration_count,
            "health card token rotated"
        );
        Ok(card)
    }

    fn load_demographics(&self, identity: &IdentityHandle) -> Result<Demographics, EngineError> {
        self.directory
            .demographics(identity)?
            .ok_or_else(|| EngineError::Validation("unknown identity".to_string()))
    }

    /// Snapshot the profile, failing with the list of missing fields when
    /// the profile is incomplete.
    fn fresh_snapshot(&self, identity: &IdentityHandle) -> Result<CardSnapshot, EngineError> {
        let d = self.load_demographics(identity)?;
        let report = check_eligibility(&d);
        if !report.eligible {
            return Err(EngineError::Validation(format!(
                "profile incomplete for card generation: missing {}",
                report.missing.join(", ")
            )));
        }
        // Eligibility guarantees presence of every required field.
        match (
            d.name,
            d.date_of_birth,
            d.gender,
            d.blood_type,
            d.emergency_contact,
        ) {
            (Some(name), Some(date_of_birth), Some(gender), Some(blood_type), Some(contact)) => {
                Ok(CardSnapshot {
                    name,
                    date_of_birth,
                    gender,
                    blood_type,
                    emergency_contact: contact,
                    city: d.city,
                    state: d.state,
                })
            }
            _ => Err(EngineError::Validation(
                "profile incomplete for card generation".to_string(),
            )),
        }
    }
}
