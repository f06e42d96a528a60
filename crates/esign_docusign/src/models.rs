// --- File: crates/esign_docusign/src/models.rs ---

// Wire types for the DocuSign eSignature REST API (v2.1) and the OAuth service.
// Only the fields the adapter reads or writes are modelled.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Envelope payloads (camelCase JSON) ---

/// Body of `POST /v2.1/accounts/{accountId}/envelopes`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_blurb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeSummary {
    pub envelope_id: Option<String>,
    pub status: Option<String>,
    pub status_date_time: Option<String>,
    pub uri: Option<String>,
}

/// An envelope as returned by GET, and the partial body sent with PUT.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub envelope_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_blurb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voided_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_changed_date_time: Option<String>,
}

impl Envelope {
    /// Partial update that only changes the status.
    pub fn status_update(status: &str) -> Self {
        Self {
            status: Some(status.to_string()),
            ..Self::default()
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeUpdateSummary {
    pub envelope_id: Option<String>,
    pub error_details: Option<ErrorDetails>,
}

/// Result of `GET /v2.1/accounts/{accountId}/envelopes`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopesInformation {
    #[serde(default)]
    pub envelopes: Vec<Envelope>,
    pub result_set_size: Option<String>,
    pub total_set_size: Option<String>,
}

/// Error body of the REST API.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    pub error_code: Option<String>,
    pub message: Option<String>,
}

/// Query of the list-status-changes call. Serialized as `status=..&count=..&from_date=..`.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ListStatusChangesOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<String>,
}

// --- OAuth payloads (snake_case JSON) ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OAuthToken {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime in seconds.
    pub expires_in: i64,
}

/// Error body of the OAuth service (`consent_required`, `invalid_grant`, ...).
#[derive(Deserialize, Debug, Clone)]
pub struct OAuthErrorBody {
    pub error: String,
    pub error_description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserInfo {
    pub sub: String,
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub accounts: Vec<UserAccount>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserAccount {
    pub account_id: String,
    #[serde(default)]
    pub is_default: bool,
    pub account_name: Option<String>,
    pub base_uri: Option<String>,
}

/// JWT-bearer assertion claims.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JwtClaims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
    pub scope: String,
}

/// Parses a DocuSign timestamp (`2024-05-01T09:30:00.1230000Z`).
pub fn parse_docusign_time(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_envelope_skips_unset_fields() {
        let body = serde_json::to_value(Envelope::status_update("sent")).unwrap();
        assert_eq!(body, json!({ "status": "sent" }));
    }

    #[test]
    fn test_list_query_encoding() {
        let options = ListStatusChangesOptions {
            status: Some("completed".into()),
            count: Some("10".into()),
            from_date: Some("2024-01-01T00:00:00Z".into()),
        };
        let query = serde_urlencoded::to_string(&options).unwrap();
        assert_eq!(
            query,
            "status=completed&count=10&from_date=2024-01-01T00%3A00%3A00Z"
        );
    }

    #[test]
    fn test_envelopes_information_without_envelopes() {
        let info: EnvelopesInformation =
            serde_json::from_value(json!({ "resultSetSize": "0" })).unwrap();
        assert!(info.envelopes.is_empty());
    }

    #[test]
    fn test_parse_docusign_time_with_seven_fraction_digits() {
        let parsed = parse_docusign_time(Some("2024-05-01T09:30:00.1230000Z")).unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-05-01T09:30:00.123+00:00");
        assert!(parse_docusign_time(Some("yesterday")).is_none());
        assert!(parse_docusign_time(None).is_none());
    }
}
