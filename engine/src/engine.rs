//! The engine facade.

use std::sync::Arc;

use carelink_audit::{AuditRecorder, AuditSink, RequestContext};
use carelink_card::{CardDisplay, CardService, EligibilityReport};
use carelink_channels::ChannelSender;
use carelink_crypto::TokenKeypair;
use carelink_disclosure::{Disclosure, DisclosureResolver};
use carelink_otp::{IssueReceipt, OtpEngine, VerifyReceipt};
use carelink_store::{
    CardRecord, CardStore, CredentialStore, DirectorySet, IdentityDirectory, MedicalRecordStore,
};
use carelink_token::{CodeRenderer, MintedToken, TokenEngine, TokenPayload};
use carelink_types::{
    ActorRole, Clock, ContactValue, CredentialPurpose, EmailAddress, EngineError, EngineParams,
    HealthId, IdentityHandle, IdentityRef, PhoneNumber, Subject,
};

/// Everything the surrounding application injects: storage, directories,
/// channel gateways, the code renderer, and the clock.
pub struct EngineDeps {
    pub credentials: Arc<dyn CredentialStore>,
    pub cards: Arc<dyn CardStore>,
    pub records: Arc<dyn MedicalRecordStore>,
    pub identities: Arc<dyn IdentityDirectory>,
    pub directories: DirectorySet,
    pub audit: Arc<dyn AuditSink>,
    pub senders: Vec<Arc<dyn ChannelSender>>,
    pub renderer: Arc<dyn CodeRenderer>,
    pub clock: Arc<dyn Clock>,
}

/// The assembled engine. Cheap to share behind an `Arc`; every subsystem
/// is internally synchronized.
pub struct AccessEngine {
    otp: OtpEngine,
    tokens: Arc<TokenEngine>,
    cards: CardService,
    disclosure: DisclosureResolver,
    directories: DirectorySet,
    clock: Arc<dyn Clock>,
    params: EngineParams,
}

impl AccessEngine {
    pub fn new(deps: EngineDeps, keypair: TokenKeypair, params: EngineParams) -> Self {
        let audit = AuditRecorder::new(deps.audit);
        let tokens = Arc::new(TokenEngine::new(
            keypair,
            deps.renderer,
            params.emergency_base_url.clone(),
            params.token_validity_secs,
        ));
        let otp = OtpEngine::new(
            deps.credentials,
            deps.senders,
            audit.clone(),
            deps.clock.clone(),
            params.clone(),
        );
        let cards = CardService::new(
            deps.cards.clone(),
            deps.identities,
            tokens.clone(),
            audit.clone(),
            deps.clock.clone(),
        );
        let disclosure = DisclosureResolver::new(
            tokens.clone(),
            deps.cards,
            deps.records,
            audit,
            deps.clock.clone(),
        );
        Self {
            otp,
            tokens,
            cards,
            disclosure,
            directories: deps.directories,
            clock: deps.clock,
            params,
        }
    }

    // ── Contact normalization ──────────────────────────────────────────

    /// Build a [`Subject`] from raw user input. This is the single place
    /// raw identifiers enter the engine; everything downstream sees
    /// normalized values only.
    pub fn subject_from_raw(
        &self,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Subject, EngineError> {
        let email = email.map(EmailAddress::parse).transpose()?;
        let phone = phone
            .map(|p| PhoneNumber::parse(p, &self.params.default_country_code))
            .transpose()?;
        Subject::new(email, phone)
    }

    /// Resolve a raw login identifier to an identity, searching only the
    /// directory for the stated role.
    pub fn lookup_identity(
        &self,
        role: ActorRole,
        raw_contact: &str,
    ) -> Result<Option<IdentityRef>, EngineError> {
        let contact = if raw_contact.contains('@') {
            ContactValue::Email(EmailAddress::parse(raw_contact)?)
        } else {
            ContactValue::Phone(PhoneNumber::parse(
                raw_contact,
                &self.params.default_country_code,
            )?)
        };
        Ok(self.directories.for_role(role).lookup_by_contact(&contact)?)
    }

    // ── One-time credentials ───────────────────────────────────────────

    pub async fn issue_credential(
        &self,
        subject: &Subject,
        purpose: CredentialPurpose,
        display_name: &str,
    ) -> Result<IssueReceipt, EngineError> {
        self.otp.issue(subject, purpose, display_name).await
    }

    pub fn verify_credential(
        &self,
        subject: &Subject,
        code: &str,
        purpose: CredentialPurpose,
    ) -> Result<VerifyReceipt, EngineError> {
        self.otp.verify(subject, code, purpose)
    }

    // ── Capability tokens ──────────────────────────────────────────────

    /// Mint a standalone access token. Card generation does this
    /// internally; this entry point exists for re-issuing a token for an
    /// identity that manages its card elsewhere.
    pub fn mint_access_token(
        &self,
        identity: IdentityHandle,
        health_id: HealthId,
        display_name: String,
    ) -> Result<MintedToken, EngineError> {
        self.tokens
            .mint(identity, health_id, display_name, self.clock.now())
    }

    /// Cryptographic check only: signature, payload integrity, expiry,
    /// all evaluated against the injected clock. Does not consult card
    /// state; use [`AccessEngine::resolve_disclosure`] for the full
    /// emergency path.
    pub fn verify_access_token(&self, sealed: &str) -> Result<TokenPayload, EngineError> {
        self.tokens.verify(sealed, self.clock.now())
    }

    // ── Health access cards ────────────────────────────────────────────

    pub fn generate_or_fetch_card(
        &self,
        identity: &IdentityHandle,
        context: Option<RequestContext>,
    ) -> Result<CardRecord, EngineError> {
        self.cards.generate_or_fetch(identity, context)
    }

    pub fn regenerate_card(
        &self,
        identity: &IdentityHandle,
        context: Option<RequestContext>,
    ) -> Result<CardRecord, EngineError> {
        self.cards.regenerate(identity, context)
    }

    pub fn disable_card(
        &self,
        identity: &IdentityHandle,
        reason: Option<String>,
        context: Option<RequestContext>,
    ) -> Result<CardRecord, EngineError> {
        self.cards.disable(identity, reason, context)
    }

    pub fn card_display(&self, identity: &IdentityHandle) -> Result<CardDisplay, EngineError> {
        self.cards.display(identity)
    }

    pub fn card_eligibility(
        &self,
        identity: &IdentityHandle,
    ) -> Result<EligibilityReport, EngineError> {
        self.cards.eligibility(identity)
    }

    // ── Emergency disclosure ───────────────────────────────────────────

    pub fn resolve_disclosure(
        &self,
        sealed: &str,
        context: Option<RequestContext>,
    ) -> Result<Disclosure, EngineError> {
        self.disclosure.resolve(sealed, context)
    }
}
