//! Issuance and verification of one-time credentials.

use std::sync::Arc;
use std::time::Duration;

use carelink_audit::{Actor, AuditAction, AuditEvent, AuditRecorder, Target};
use carelink_channels::{dispatch, ChannelSender, DispatchReport, DispatchRequest};
use carelink_crypto::{generate_code, hash_secret, verify_secret};
use carelink_store::{CredentialId, CredentialStore, NewCredential};
use carelink_types::{
    Clock, CredentialPurpose, EngineError, EngineParams, Subject, Timestamp,
};
use carelink_utils::mask_message;

use crate::Governor;

/// Result of a successful issuance. Channel outcomes are reported, not
/// thrown: issuance succeeded the moment the credential was persisted.
#[derive(Debug)]
pub struct IssueReceipt {
    pub credential_id: CredentialId,
    pub expires_at: Timestamp,
    pub dispatch: DispatchReport,
}

/// Result of a successful verification.
#[derive(Clone, Debug)]
pub struct VerifyReceipt {
    pub credential_id: CredentialId,
    pub verified_at: Timestamp,
}

/// The OTP engine. Holds injected collaborators; constructed once at
/// startup.
pub struct OtpEngine {
    credentials: Arc<dyn CredentialStore>,
    senders: Vec<Arc<dyn ChannelSender>>,
    audit: AuditRecorder,
    clock: Arc<dyn Clock>,
    params: EngineParams,
    governor: Governor,
}

impl OtpEngine {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        senders: Vec<Arc<dyn ChannelSender>>,
        audit: AuditRecorder,
        clock: Arc<dyn Clock>,
        params: EngineParams,
    ) -> Self {
        let governor = Governor::new(params.otp_cooldown_secs, params.otp_max_attempts);
        Self {
            credentials,
            senders,
            audit,
            clock,
            params,
            governor,
        }
    }

    /// Issue a one-time code for (subject, purpose) and dispatch it on all
    /// configured channels concurrently.
    ///
    /// Fails with `RateLimited` inside the cooldown window. Channel
    /// failures never fail the call; the receipt carries the per-channel
    /// outcomes.
    pub async fn issue(
        &self,
        subject: &Subject,
        purpose: CredentialPurpose,
        display_name: &str,
    ) -> Result<IssueReceipt, EngineError> {
        let now = self.clock.now();

        let last_created = self.credentials.latest_created_at(subject, purpose)?;
        self.governor.check_cooldown(last_created, now)?;

        let code = generate_code(self.params.effective_code_len());
        let secret_digest =
            hash_secret(&code).map_err(|e| EngineError::Dependency(e.to_string()))?;
        let expires_at = now.plus_secs(self.params.otp_expiry_secs);

        // The new credential supersedes any still-live predecessor.
        self.credentials.retire_live(subject, purpose, now)?;
        let credential = self.credentials.insert(NewCredential {
            subject: subject.clone(),
            secret_digest,
            purpose,
            expires_at,
            max_attempts: self.params.otp_max_attempts,
            created_at: now,
        })?;

        let message = format!(
            "Your Carelink code is {code}. Valid for {} minutes. Do not share this code.",
            self.params.otp_expiry_secs / 60
        );

        let report = dispatch(
            self.dispatch_plan(subject),
            &message,
            Duration::from_secs(self.params.channel_timeout_secs),
        )
        .await;

        self.audit_dispatch(&credential.id, &report, &message, &code, now);
        self.audit.record(
            AuditEvent::success(Actor::default(), AuditAction::CredentialIssued, now)
                .with_target(Target::new("credential", credential.id.to_string()))
                .with_metadata(serde_json::json!({
                    "purpose": purpose.as_str(),
                    "display_name": display_name,
                    "channels_attempted": report.attempts.len(),
                    "channels_sent": report.sent_count(),
                })),
        );

        tracing::info!(
            credential = %credential.id,
            purpose = purpose.as_str(),
            channels_sent = report.sent_count(),
            channels_attempted = report.attempts.len(),
            "one-time code issued"
        );

        Ok(IssueReceipt {
            credential_id: credential.id,
            expires_at,
            dispatch: report,
        })
    }

    /// Verify a submitted code against the most recent live credential.
    ///
    /// The attempt is consumed before the comparison; a crash between the
    /// two leaves the attempt spent, never refunded.
    pub fn verify(
        &self,
        subject: &Subject,
        code: &str,
        purpose: CredentialPurpose,
    ) -> Result<VerifyReceipt, EngineError> {
        let now = self.clock.now();

        let credential = self
            .credentials
            .latest_live(subject, purpose, now)?
            .ok_or(EngineError::NotFoundOrExpired)?;

        self.governor.check_ceiling(credential.attempts)?;

        let attempts_now = self.credentials.increment_attempts(credential.id)?;
        if attempts_now > self.governor.max_attempts() {
            // A concurrent attempt won the race for the last slot.
            return Err(EngineError::attempts_exhausted(self.governor.max_attempts()));
        }

        if !verify_secret(code, &credential.secret_digest) {
            tracing::info!(
                credential = %credential.id,
                attempts = attempts_now,
                "code mismatch"
            );
            return Err(EngineError::InvalidCode {
                attempts_remaining: self.governor.remaining(attempts_now),
            });
        }

        self.credentials.mark_verified(credential.id, now)?;
        self.audit.record(
            AuditEvent::success(Actor::default(), AuditAction::CredentialVerified, now)
                .with_target(Target::new("credential", credential.id.to_string()))
                .with_metadata(serde_json::json!({ "purpose": purpose.as_str() })),
        );
        tracing::info!(credential = %credential.id, "one-time code verified");

        Ok(VerifyReceipt {
            credential_id: credential.id,
            verified_at: now,
        })
    }

    /// Pair each configured channel with the subject identifier it can
    /// reach; channels without a usable identifier are skipped.
    fn dispatch_plan(&self, subject: &Subject) -> Vec<DispatchRequest> {
        self.senders
            .iter()
            .filter_map(|sender| {
                let destination = if sender.kind().is_phone_channel() {
                    subject.phone().map(|p| p.as_str().to_string())
                } else {
                    subject.email().map(|e| e.as_str().to_string())
                };
                destination.map(|destination| DispatchRequest {
                    sender: Arc::clone(sender),
                    destination,
                })
            })
            .collect()
    }

    /// One audit entry per channel attempt, code masked.
    fn audit_dispatch(
        &self,
        credential_id: &CredentialId,
        report: &DispatchReport,
        message: &str,
        code: &str,
        now: Timestamp,
    ) {
        for attempt in &report.attempts {
            let base = AuditEvent::success(Actor::default(), AuditAction::ChannelDispatched, now)
                .with_target(Target::new("credential", credential_id.to_string()))
                .with_metadata(serde_json::json!({
                    "channel": attempt.channel.as_str(),
                    "destination": attempt.destination,
                    "content": mask_message(message, code),
                }));
            let event = match &attempt.outcome {
                carelink_channels::SendOutcome::Sent { .. } => base,
                carelink_channels::SendOutcome::Failed { reason } => base.failed(reason.clone()),
            };
            self.audit.record(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carelink_channels::{ChannelKind, SendOutcome};
    use carelink_nullables::{NullClock, NullSender};
    use carelink_store_memory::{MemoryAuditSink, MemoryCredentialStore};
    use carelink_types::{EmailAddress, PhoneNumber};

    struct Harness {
        engine: OtpEngine,
        clock: Arc<NullClock>,
        sms: Arc<NullSender>,
        email: Arc<NullSender>,
        sink: Arc<MemoryAuditSink>,
    }

    fn harness_with_sms_outcomes(outcomes: Vec<SendOutcome>) -> Harness {
        let clock = Arc::new(NullClock::new(10_000));
        let sms = Arc::new(NullSender::with_outcomes(ChannelKind::Sms, outcomes));
        let email = Arc::new(NullSender::new(ChannelKind::Email));
        let sink = Arc::new(MemoryAuditSink::new());
        let engine = OtpEngine::new(
            Arc::new(MemoryCredentialStore::new()),
            vec![sms.clone(), email.clone()],
            AuditRecorder::new(sink.clone()),
            clock.clone(),
            EngineParams::default(),
        );
        Harness {
            engine,
            clock,
            sms,
            email,
            sink,
        }
    }

    fn harness() -> Harness {
        harness_with_sms_outcomes(Vec::new())
    }

    fn subject() -> Subject {
        Subject::new(
            Some(EmailAddress::parse("holder@example.com").unwrap()),
            Some(PhoneNumber::parse("+15551234567", "+91").unwrap()),
        )
        .unwrap()
    }

    /// Pull the plaintext code back out of a delivered message.
    fn delivered_code(sender: &NullSender) -> String {
        let (_, message) = sender.deliveries().last().cloned().unwrap();
        message
            .split_whitespace()
            .find_map(|w| {
                let trimmed = w.trim_end_matches('.');
                (trimmed.len() == 6 && trimmed.chars().all(|c| c.is_ascii_digit()))
                    .then(|| trimmed.to_string())
            })
            .unwrap()
    }

    #[tokio::test]
    async fn issue_then_verify_succeeds() {
        let h = harness();
        let receipt = h
            .engine
            .issue(&subject(), CredentialPurpose::Login, "Asha")
            .await
            .unwrap();
        assert_eq!(receipt.dispatch.sent_count(), 2);

        let code = delivered_code(&h.sms);
        assert_eq!(code, delivered_code(&h.email));
        h.engine
            .verify(&subject(), &code, CredentialPurpose::Login)
            .unwrap();
    }

    #[tokio::test]
    async fn cooldown_rejects_rapid_reissue() {
        let h = harness();
        h.engine
            .issue(&subject(), CredentialPurpose::Login, "Asha")
            .await
            .unwrap();

        h.clock.advance(30);
        let err = h
            .engine
            .issue(&subject(), CredentialPurpose::Login, "Asha")
            .await
            .unwrap_err();
        match err {
            EngineError::RateLimited {
                retry_after_secs, ..
            } => assert_eq!(retry_after_secs, Some(30)),
            other => panic!("unexpected: {other:?}"),
        }

        h.clock.advance(30);
        assert!(h
            .engine
            .issue(&subject(), CredentialPurpose::Login, "Asha")
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn reissue_supersedes_the_previous_code() {
        let h = harness();
        h.engine
            .issue(&subject(), CredentialPurpose::Login, "Asha")
            .await
            .unwrap();
        let old_code = delivered_code(&h.sms);

        h.clock.advance(60);
        h.engine
            .issue(&subject(), CredentialPurpose::Login, "Asha")
            .await
            .unwrap();
        let new_code = delivered_code(&h.sms);

        assert_eq!(
            h.engine
                .verify(&subject(), &old_code, CredentialPurpose::Login)
                .unwrap_err(),
            EngineError::NotFoundOrExpired
        );
        assert!(h
            .engine
            .verify(&subject(), &new_code, CredentialPurpose::Login)
            .is_ok());
    }

    #[tokio::test]
    async fn different_purpose_has_independent_cooldown() {
        let h = harness();
        h.engine
            .issue(&subject(), CredentialPurpose::Login, "Asha")
            .await
            .unwrap();
        assert!(h
            .engine
            .issue(&subject(), CredentialPurpose::PasswordReset, "Asha")
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn three_wrong_attempts_then_correct_code_still_fails() {
        let h = harness();
        h.engine
            .issue(&subject(), CredentialPurpose::Login, "Asha")
            .await
            .unwrap();
        let code = delivered_code(&h.sms);
        let wrong = if code == "000000" { "000001" } else { "000000" };

        for expected_remaining in [2u32, 1, 0] {
            let err = h
                .engine
                .verify(&subject(), wrong, CredentialPurpose::Login)
                .unwrap_err();
            assert_eq!(
                err,
                EngineError::InvalidCode {
                    attempts_remaining: expected_remaining
                }
            );
        }
        // Third failure said "0 attempts remaining"; the fourth attempt is
        // terminal even with the correct code.
        let err = h
            .engine
            .verify(&subject(), &code, CredentialPurpose::Login)
            .unwrap_err();
        assert!(matches!(err, EngineError::RateLimited { .. }));
    }

    #[tokio::test]
    async fn verified_credential_cannot_be_reverified() {
        let h = harness();
        h.engine
            .issue(&subject(), CredentialPurpose::Login, "Asha")
            .await
            .unwrap();
        let code = delivered_code(&h.sms);

        h.engine
            .verify(&subject(), &code, CredentialPurpose::Login)
            .unwrap();
        let err = h
            .engine
            .verify(&subject(), &code, CredentialPurpose::Login)
            .unwrap_err();
        assert_eq!(err, EngineError::NotFoundOrExpired);
    }

    #[tokio::test]
    async fn expired_credential_rejects_even_correct_code() {
        let h = harness();
        h.engine
            .issue(&subject(), CredentialPurpose::Login, "Asha")
            .await
            .unwrap();
        let code = delivered_code(&h.sms);

        h.clock.advance(EngineParams::default().otp_expiry_secs);
        let err = h
            .engine
            .verify(&subject(), &code, CredentialPurpose::Login)
            .unwrap_err();
        assert_eq!(err, EngineError::NotFoundOrExpired);
    }

    #[tokio::test]
    async fn channel_failure_does_not_fail_issuance() {
        let h = harness_with_sms_outcomes(vec![SendOutcome::failed("provider down")]);
        let receipt = h
            .engine
            .issue(&subject(), CredentialPurpose::Login, "Asha")
            .await
            .unwrap();
        assert_eq!(receipt.dispatch.sent_count(), 1);
        assert!(receipt.dispatch.any_sent());

        // The credential is still usable via the surviving channel.
        let code = delivered_code(&h.email);
        assert!(h
            .engine
            .verify(&subject(), &code, CredentialPurpose::Login)
            .is_ok());
    }

    #[tokio::test]
    async fn email_only_subject_skips_phone_channels() {
        let h = harness();
        let email_only = Subject::new(
            Some(EmailAddress::parse("holder@example.com").unwrap()),
            None,
        )
        .unwrap();
        let receipt = h
            .engine
            .issue(&email_only, CredentialPurpose::Login, "Asha")
            .await
            .unwrap();
        assert_eq!(receipt.dispatch.attempts.len(), 1);
        assert!(h.sms.deliveries().is_empty());
        assert_eq!(h.email.deliveries().len(), 1);
    }

    #[tokio::test]
    async fn audit_trail_never_contains_the_code() {
        let h = harness();
        h.engine
            .issue(&subject(), CredentialPurpose::Login, "Asha")
            .await
            .unwrap();
        let code = delivered_code(&h.sms);

        for event in h.sink.events() {
            let rendered = serde_json::to_string(&event.metadata).unwrap();
            assert!(
                !rendered.contains(&code),
                "audit metadata leaked the code: {rendered}"
            );
        }
    }

    #[tokio::test]
    async fn dispatch_is_audited_per_channel() {
        let h = harness();
        h.engine
            .issue(&subject(), CredentialPurpose::Login, "Asha")
            .await
            .unwrap();
        let dispatched = h
            .sink
            .events()
            .into_iter()
            .filter(|e| e.action == AuditAction::ChannelDispatched)
            .count();
        assert_eq!(dispatched, 2);
    }
}
