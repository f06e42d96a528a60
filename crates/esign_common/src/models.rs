// Domain model shared by every signature provider, plus the request/response
// bodies used by the envelope routes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Lifecycle status of a signature envelope.
///
/// Transitions are owned by the provider; the adapters only observe them:
/// `Draft -> Sent -> Completed`, and `Draft | Sent -> Voided`.
///
/// Serialized as `SCREAMING_SNAKE_CASE`; deserialized case-insensitively
/// through [`FromStr`], so `?status=sent` and `"SENT"` are equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum EnvelopeStatus {
    Draft,
    Sent,
    Delivered,
    Signed,
    Completed,
    Declined,
    Voided,
    Expired,
}

impl EnvelopeStatus {
    pub const ALL: [EnvelopeStatus; 8] = [
        EnvelopeStatus::Draft,
        EnvelopeStatus::Sent,
        EnvelopeStatus::Delivered,
        EnvelopeStatus::Signed,
        EnvelopeStatus::Completed,
        EnvelopeStatus::Declined,
        EnvelopeStatus::Voided,
        EnvelopeStatus::Expired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnvelopeStatus::Draft => "DRAFT",
            EnvelopeStatus::Sent => "SENT",
            EnvelopeStatus::Delivered => "DELIVERED",
            EnvelopeStatus::Signed => "SIGNED",
            EnvelopeStatus::Completed => "COMPLETED",
            EnvelopeStatus::Declined => "DECLINED",
            EnvelopeStatus::Voided => "VOIDED",
            EnvelopeStatus::Expired => "EXPIRED",
        }
    }
}

impl fmt::Display for EnvelopeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnvelopeStatus {
    type Err = String;

    /// Case-insensitive parse of the enum names (`"sent"`, `"SENT"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        EnvelopeStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == upper)
            .ok_or_else(|| format!("unknown envelope status: {}", s))
    }
}

impl TryFrom<String> for EnvelopeStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The e-signature vendor backing an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureProvider {
    #[serde(rename = "DOCUSIGN")]
    DocuSign,
    #[serde(rename = "ADOBE_SIGN")]
    AdobeSign,
    #[serde(rename = "HELLOSIGN")]
    HelloSign,
}

impl SignatureProvider {
    /// The lower-case name used in configuration (`esignature.provider`).
    pub fn config_name(&self) -> &'static str {
        match self {
            SignatureProvider::DocuSign => "docusign",
            SignatureProvider::AdobeSign => "adobe-sign",
            SignatureProvider::HelloSign => "hellosign",
        }
    }
}

impl fmt::Display for SignatureProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_name())
    }
}

impl FromStr for SignatureProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match normalized.as_str() {
            "docusign" => Ok(SignatureProvider::DocuSign),
            "adobesign" => Ok(SignatureProvider::AdobeSign),
            "hellosign" => Ok(SignatureProvider::HelloSign),
            _ => Err(format!("unknown signature provider: {}", s)),
        }
    }
}

/// Capabilities an adapter can advertise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdapterFeature {
    EsignatureEnvelopes,
    EsignatureRequests,
    SignatureValidation,
}

/// Static description of a provider adapter: what it is, what it supports and
/// which configuration keys it reads (relative to its config section).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdapterDescriptor {
    pub adapter_type: &'static str,
    pub provider: SignatureProvider,
    pub description: &'static str,
    pub supported_features: &'static [AdapterFeature],
    pub required_properties: &'static [&'static str],
    pub optional_properties: &'static [&'static str],
}

impl AdapterDescriptor {
    pub fn supports(&self, feature: AdapterFeature) -> bool {
        self.supported_features.contains(&feature)
    }
}

/// Internal representation of a signature envelope.
///
/// Treated as an immutable value: the `with_*` methods consume the envelope
/// and return an updated copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureEnvelope {
    /// Internal identity, assigned on creation when absent.
    pub id: Option<Uuid>,
    /// Identifier of the same envelope at the provider.
    pub external_envelope_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub status: EnvelopeStatus,
    pub provider: SignatureProvider,
    pub void_reason: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl SignatureEnvelope {
    /// A new draft envelope without identity.
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: None,
            external_envelope_id: None,
            title: title.into(),
            description,
            status: EnvelopeStatus::Draft,
            provider: SignatureProvider::DocuSign,
            void_reason: None,
            created_at: None,
            modified_at: None,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_external_envelope_id(mut self, external_envelope_id: impl Into<String>) -> Self {
        self.external_envelope_id = Some(external_envelope_id.into());
        self
    }

    pub fn with_status(mut self, status: EnvelopeStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_provider(mut self, provider: SignatureProvider) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn with_modified_at(mut self, modified_at: DateTime<Utc>) -> Self {
        self.modified_at = Some(modified_at);
        self
    }
}

// --- Request / Response bodies for the envelope routes ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEnvelopeRequest {
    pub title: String,
    pub description: Option<String>,
    /// Optional caller-chosen identity.
    pub id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEnvelopeRequest {
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendEnvelopeRequest {
    pub sent_by: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoidEnvelopeRequest {
    pub reason: String,
    pub voided_by: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEnvelopesQuery {
    pub status: EnvelopeStatus,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalLookupQuery {
    /// Defaults to DocuSign when omitted.
    pub provider: Option<SignatureProvider>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExistsResponse {
    pub id: Uuid,
    pub exists: bool,
}
