// --- File: crates/esign_docusign/src/service.rs ---

//! DocuSign implementation of [`SignatureEnvelopePort`].

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use esign_common::logging::log_swallowed;
use esign_common::models::{
    AdapterDescriptor, AdapterFeature, EnvelopeStatus, SignatureEnvelope, SignatureProvider,
};
use esign_common::services::{BoxFuture, SignatureEnvelopePort};

use crate::api::EnvelopesApi;
use crate::client::DocuSignClient;
use crate::correlation::EnvelopeIdIndex;
use crate::error::DocuSignError;
use crate::models::{
    parse_docusign_time, Envelope, EnvelopeDefinition, ListStatusChangesOptions,
};

// Provider status strings.
pub const DOCUSIGN_STATUS_ANY: &str = "any";
pub const DOCUSIGN_STATUS_CREATED: &str = "created";
pub const DOCUSIGN_STATUS_SENT: &str = "sent";
pub const DOCUSIGN_STATUS_COMPLETED: &str = "completed";
pub const DOCUSIGN_STATUS_VOIDED: &str = "voided";

/// How far back status-change listings look.
pub const LIST_LOOKBACK_DAYS: i64 = 30;

/// Status filter for list queries. Statuses without a direct DocuSign filter
/// fall back to `any`.
pub fn map_to_docusign_status(status: EnvelopeStatus) -> &'static str {
    match status {
        EnvelopeStatus::Draft => DOCUSIGN_STATUS_CREATED,
        EnvelopeStatus::Sent => DOCUSIGN_STATUS_SENT,
        EnvelopeStatus::Completed => DOCUSIGN_STATUS_COMPLETED,
        EnvelopeStatus::Voided => DOCUSIGN_STATUS_VOIDED,
        _ => DOCUSIGN_STATUS_ANY,
    }
}

/// Case-insensitive mapping of a DocuSign status onto [`EnvelopeStatus`].
pub fn map_from_docusign_status(status: &str) -> Result<EnvelopeStatus, DocuSignError> {
    match status.trim().to_ascii_lowercase().as_str() {
        "created" | "draft" => Ok(EnvelopeStatus::Draft),
        "sent" => Ok(EnvelopeStatus::Sent),
        "delivered" => Ok(EnvelopeStatus::Delivered),
        "signed" => Ok(EnvelopeStatus::Signed),
        "completed" => Ok(EnvelopeStatus::Completed),
        "declined" => Ok(EnvelopeStatus::Declined),
        "voided" => Ok(EnvelopeStatus::Voided),
        "expired" => Ok(EnvelopeStatus::Expired),
        _ => Err(DocuSignError::UnmappedStatus(status.to_string())),
    }
}

/// Describes [`DocuSignSignatureEnvelopeAdapter`]. Properties are keys of the
/// `[docusign]` config section.
pub static DOCUSIGN_ADAPTER_DESCRIPTOR: AdapterDescriptor = AdapterDescriptor {
    adapter_type: "docusign",
    provider: SignatureProvider::DocuSign,
    description: "DocuSign eSignature Envelope Adapter",
    supported_features: &[
        AdapterFeature::EsignatureEnvelopes,
        AdapterFeature::EsignatureRequests,
        AdapterFeature::SignatureValidation,
    ],
    required_properties: &["integration_key", "user_id", "account_id", "private_key"],
    optional_properties: &["base_url", "auth_server", "sandbox_mode"],
};

/// Envelope port backed by the DocuSign eSignature API.
///
/// Keeps the internal-id/DocuSign-id correlation in memory; envelopes created
/// by another process are unknown to it.
pub struct DocuSignSignatureEnvelopeAdapter<A = DocuSignClient> {
    api: A,
    account_id: String,
    index: EnvelopeIdIndex,
}

impl<A: EnvelopesApi> DocuSignSignatureEnvelopeAdapter<A> {
    pub fn new(api: A, account_id: impl Into<String>) -> Self {
        let account_id = account_id.into();
        info!("DocuSign envelope adapter initialized for account: {}", account_id);
        Self {
            api,
            account_id,
            index: EnvelopeIdIndex::new(),
        }
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// The correlation table, mostly for inspection.
    pub fn index(&self) -> &EnvelopeIdIndex {
        &self.index
    }

    fn require_external_id(&self, envelope_id: Uuid) -> Result<String, DocuSignError> {
        self.index
            .external_id(&envelope_id)
            .ok_or(DocuSignError::EnvelopeNotFound(envelope_id))
    }

    async fn fetch(&self, envelope_id: Uuid) -> Result<SignatureEnvelope, DocuSignError> {
        let external_id = self.require_external_id(envelope_id)?;
        let remote = self.api.get_envelope(&self.account_id, &external_id).await?;
        to_signature_envelope(envelope_id, &external_id, remote)
    }

    /// Pushes a status change and returns the refreshed envelope.
    async fn transition(
        &self,
        envelope_id: Uuid,
        update: Envelope,
    ) -> Result<SignatureEnvelope, DocuSignError> {
        let external_id = self.require_external_id(envelope_id)?;
        self.api.update(&self.account_id, &external_id, update).await?;
        self.fetch(envelope_id).await
    }

    async fn list_by_status(
        &self,
        status: EnvelopeStatus,
        limit: Option<u32>,
    ) -> Result<Vec<SignatureEnvelope>, DocuSignError> {
        let options = ListStatusChangesOptions {
            status: Some(map_to_docusign_status(status).to_string()),
            count: limit.map(|limit| limit.to_string()),
            from_date: Some((Utc::now() - Duration::days(LIST_LOOKBACK_DAYS)).to_rfc3339()),
        };
        let info = self.api.list_status_changes(&self.account_id, options).await?;

        let envelopes = info
            .envelopes
            .into_iter()
            .filter_map(|remote| {
                let external_id = remote.envelope_id.clone().unwrap_or_default();
                // Unknown to this process: a throwaway id, not recorded.
                let id = self
                    .index
                    .internal_id(&external_id)
                    .unwrap_or_else(Uuid::new_v4);
                match to_signature_envelope(id, &external_id, remote) {
                    Ok(envelope) => Some(envelope),
                    Err(e) => {
                        log_swallowed(&e, "Skipping listed DocuSign envelope");
                        None
                    }
                }
            })
            .collect();
        Ok(envelopes)
    }
}

/// Maps a DocuSign envelope onto the internal model.
fn to_signature_envelope(
    envelope_id: Uuid,
    known_external_id: &str,
    remote: Envelope,
) -> Result<SignatureEnvelope, DocuSignError> {
    let status = map_from_docusign_status(remote.status.as_deref().unwrap_or_default())?;
    let external_id = remote
        .envelope_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| known_external_id.to_string());

    let title = remote.email_subject.unwrap_or_default();
    let mut envelope = SignatureEnvelope::new(title, remote.email_blurb)
        .with_id(envelope_id)
        .with_external_envelope_id(external_id)
        .with_status(status)
        .with_provider(SignatureProvider::DocuSign);
    envelope.void_reason = remote.voided_reason;
    envelope.created_at = parse_docusign_time(remote.created_date_time.as_deref());
    envelope.modified_at = parse_docusign_time(
        remote
            .last_modified_date_time
            .as_deref()
            .or(remote.status_changed_date_time.as_deref()),
    );
    Ok(envelope)
}

impl<A: EnvelopesApi> SignatureEnvelopePort for DocuSignSignatureEnvelopeAdapter<A> {
    type Error = DocuSignError;

    fn descriptor(&self) -> Option<&'static AdapterDescriptor> {
        Some(&DOCUSIGN_ADAPTER_DESCRIPTOR)
    }

    fn create_envelope(
        &self,
        envelope: SignatureEnvelope,
    ) -> BoxFuture<'_, SignatureEnvelope, Self::Error> {
        Box::pin(async move {
            let envelope_id = envelope.id.unwrap_or_else(Uuid::new_v4);
            // No documents or recipients yet: DocuSign keeps it as a draft.
            let definition = EnvelopeDefinition {
                email_subject: Some(envelope.title.clone()),
                email_blurb: envelope.description.clone(),
                status: Some(DOCUSIGN_STATUS_CREATED.to_string()),
            };
            let summary = self
                .api
                .create_envelope(&self.account_id, definition)
                .await?;
            let external_id = summary
                .envelope_id
                .filter(|id| !id.is_empty())
                .ok_or_else(|| {
                    DocuSignError::InvalidResponse("envelope summary without envelopeId".into())
                })?;

            self.index.insert(envelope_id, external_id.clone());
            info!("Created DocuSign envelope {} for {}", external_id, envelope_id);

            let now = Utc::now();
            Ok(envelope
                .with_id(envelope_id)
                .with_external_envelope_id(external_id)
                .with_status(EnvelopeStatus::Draft)
                .with_provider(SignatureProvider::DocuSign)
                .with_created_at(now)
                .with_modified_at(now))
        })
    }

    fn get_envelope(&self, envelope_id: Uuid) -> BoxFuture<'_, SignatureEnvelope, Self::Error> {
        Box::pin(async move { self.fetch(envelope_id).await })
    }

    fn update_envelope(
        &self,
        envelope: SignatureEnvelope,
    ) -> BoxFuture<'_, SignatureEnvelope, Self::Error> {
        Box::pin(async move {
            let envelope_id = envelope.id.ok_or(DocuSignError::MissingEnvelopeId)?;
            let external_id = self.require_external_id(envelope_id)?;
            let update = Envelope {
                email_subject: Some(envelope.title.clone()),
                email_blurb: envelope.description.clone(),
                ..Envelope::default()
            };
            let summary = self.api.update(&self.account_id, &external_id, update).await?;
            if let Some(details) = summary.error_details {
                warn!(
                    "DocuSign reported {:?} while updating {}: {:?}",
                    details.error_code, external_id, details.message
                );
            }
            Ok(envelope.with_modified_at(Utc::now()))
        })
    }

    fn delete_envelope(&self, envelope_id: Uuid) -> BoxFuture<'_, (), Self::Error> {
        Box::pin(async move {
            let external_id = self.require_external_id(envelope_id)?;
            self.api
                .update(
                    &self.account_id,
                    &external_id,
                    Envelope::status_update(DOCUSIGN_STATUS_VOIDED),
                )
                .await?;
            self.index.remove(&envelope_id);
            info!("Voided and forgot DocuSign envelope {} ({})", external_id, envelope_id);
            Ok(())
        })
    }

    fn send_envelope(
        &self,
        envelope_id: Uuid,
        _sent_by: Uuid,
    ) -> BoxFuture<'_, SignatureEnvelope, Self::Error> {
        Box::pin(async move {
            self.transition(envelope_id, Envelope::status_update(DOCUSIGN_STATUS_SENT))
                .await
        })
    }

    fn void_envelope(
        &self,
        envelope_id: Uuid,
        void_reason: &str,
        _voided_by: Uuid,
    ) -> BoxFuture<'_, SignatureEnvelope, Self::Error> {
        let update = Envelope {
            status: Some(DOCUSIGN_STATUS_VOIDED.to_string()),
            voided_reason: Some(void_reason.to_string()),
            ..Envelope::default()
        };
        Box::pin(async move { self.transition(envelope_id, update).await })
    }

    fn exists_envelope(&self, envelope_id: Uuid) -> BoxFuture<'_, bool, Self::Error> {
        Box::pin(async move {
            let Some(external_id) = self.index.external_id(&envelope_id) else {
                return Ok(false);
            };
            match self.api.get_envelope(&self.account_id, &external_id).await {
                Ok(_) => Ok(true),
                Err(e) => {
                    log_swallowed(&e, "DocuSign existence check failed");
                    Ok(false)
                }
            }
        })
    }

    fn get_envelopes_by_status(
        &self,
        status: EnvelopeStatus,
        limit: Option<u32>,
    ) -> BoxFuture<'_, Vec<SignatureEnvelope>, Self::Error> {
        Box::pin(async move {
            match self.list_by_status(status, limit).await {
                Ok(envelopes) => Ok(envelopes),
                Err(e) => {
                    log_swallowed(&e, "Listing DocuSign envelopes failed");
                    Ok(Vec::new())
                }
            }
        })
    }

    fn get_envelopes_by_creator(
        &self,
        _created_by: Uuid,
        _limit: Option<u32>,
    ) -> BoxFuture<'_, Vec<SignatureEnvelope>, Self::Error> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn get_envelopes_by_sender(
        &self,
        _sent_by: Uuid,
        _limit: Option<u32>,
    ) -> BoxFuture<'_, Vec<SignatureEnvelope>, Self::Error> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn get_envelopes_by_provider(
        &self,
        _provider: SignatureProvider,
        _limit: Option<u32>,
    ) -> BoxFuture<'_, Vec<SignatureEnvelope>, Self::Error> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn get_expiring_envelopes(
        &self,
        _from_time: DateTime<Utc>,
        _to_time: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<SignatureEnvelope>, Self::Error> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn get_completed_envelopes(
        &self,
        _from_time: DateTime<Utc>,
        _to_time: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<SignatureEnvelope>, Self::Error> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn get_envelope_by_external_id(
        &self,
        external_envelope_id: &str,
        _provider: SignatureProvider,
    ) -> BoxFuture<'_, Option<SignatureEnvelope>, Self::Error> {
        let internal_id = self.index.internal_id(external_envelope_id);
        Box::pin(async move {
            match internal_id {
                Some(envelope_id) => self.fetch(envelope_id).await.map(Some),
                None => Ok(None),
            }
        })
    }

    fn sync_envelope_status(
        &self,
        envelope_id: Uuid,
    ) -> BoxFuture<'_, SignatureEnvelope, Self::Error> {
        Box::pin(async move {
            let envelope = self.fetch(envelope_id).await?;
            debug!("Synced {} -> {}", envelope_id, envelope.status);
            Ok(envelope)
        })
    }

    fn get_signing_url(
        &self,
        _envelope_id: Uuid,
        _signer_email: &str,
        _signer_name: &str,
        _client_user_id: &str,
    ) -> BoxFuture<'_, String, Self::Error> {
        Box::pin(async {
            Err(DocuSignError::Unsupported(
                "Embedded signing URL not implemented for DocuSign".to_string(),
            ))
        })
    }

    fn resend_envelope(&self, _envelope_id: Uuid) -> BoxFuture<'_, (), Self::Error> {
        Box::pin(async { Ok(()) })
    }

    fn archive_envelope(&self, envelope_id: Uuid) -> BoxFuture<'_, SignatureEnvelope, Self::Error> {
        Box::pin(async move { self.fetch(envelope_id).await })
    }
}
