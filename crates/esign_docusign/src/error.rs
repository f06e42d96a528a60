use esign_common::error::{EsignError, HttpStatusCode};
use thiserror::Error;
use uuid::Uuid;

const SERVICE_NAME: &str = "DocuSign";

#[derive(Error, Debug)]
pub enum DocuSignError {
    #[error("DocuSign API request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("DocuSign API error {status_code} ({error_code:?}): {message}")]
    Api {
        status_code: u16,
        error_code: Option<String>,
        message: String,
    },
    #[error("Failed to sign JWT assertion: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("Invalid RSA private key: {0}")]
    InvalidPrivateKey(String),
    #[error("DocuSign configuration error: {0}")]
    Config(String),
    #[error("User {user_id} has no access to DocuSign account {account_id}")]
    AccountAccessDenied { user_id: String, account_id: String },
    #[error("Envelope not found: {0}")]
    EnvelopeNotFound(Uuid),
    #[error("Envelope id is required")]
    MissingEnvelopeId,
    #[error("Unexpected DocuSign response: {0}")]
    InvalidResponse(String),
    #[error("Unmapped DocuSign envelope status: '{0}'")]
    UnmappedStatus(String),
    #[error("Failed to encode request: {0}")]
    Encoding(#[from] serde_urlencoded::ser::Error),
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

impl DocuSignError {
    /// `true` for a 404 from the API.
    pub fn is_remote_not_found(&self) -> bool {
        matches!(self, DocuSignError::Api { status_code: 404, .. })
    }
}

impl From<DocuSignError> for EsignError {
    fn from(err: DocuSignError) -> Self {
        match err {
            DocuSignError::Request(e) => EsignError::from(e),
            DocuSignError::Api {
                status_code: 401, ..
            } => EsignError::AuthError(err.to_string()),
            DocuSignError::Api {
                status_code: 404, ..
            } => EsignError::NotFoundError(err.to_string()),
            DocuSignError::Api { .. }
            | DocuSignError::InvalidResponse(_)
            | DocuSignError::UnmappedStatus(_) => EsignError::ExternalServiceError {
                service_name: SERVICE_NAME.to_string(),
                message: err.to_string(),
            },
            DocuSignError::Jwt(_)
            | DocuSignError::InvalidPrivateKey(_)
            | DocuSignError::AccountAccessDenied { .. } => EsignError::AuthError(err.to_string()),
            DocuSignError::Config(message) => EsignError::ConfigError(message),
            DocuSignError::EnvelopeNotFound(_) => EsignError::NotFoundError(err.to_string()),
            DocuSignError::MissingEnvelopeId => EsignError::ValidationError(err.to_string()),
            DocuSignError::Encoding(_) => EsignError::InternalError(err.to_string()),
            DocuSignError::Unsupported(message) => EsignError::UnsupportedError(message),
        }
    }
}

impl HttpStatusCode for DocuSignError {
    fn status_code(&self) -> u16 {
        match self {
            DocuSignError::Request(e) if e.is_timeout() => 504,
            DocuSignError::Request(_) => 500,
            DocuSignError::Api {
                status_code: 401, ..
            } => 401,
            DocuSignError::Api {
                status_code: 404, ..
            } => 404,
            DocuSignError::Api { .. } => 502,
            DocuSignError::Jwt(_) => 401,
            DocuSignError::InvalidPrivateKey(_) => 401,
            DocuSignError::Config(_) => 500,
            DocuSignError::AccountAccessDenied { .. } => 401,
            DocuSignError::EnvelopeNotFound(_) => 404,
            DocuSignError::MissingEnvelopeId => 400,
            DocuSignError::InvalidResponse(_) => 502,
            DocuSignError::UnmappedStatus(_) => 502,
            DocuSignError::Encoding(_) => 500,
            DocuSignError::Unsupported(_) => 501,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_keeps_taxonomy() {
        let id = Uuid::new_v4();
        let err: EsignError = DocuSignError::EnvelopeNotFound(id).into();
        assert!(matches!(err, EsignError::NotFoundError(_)));

        let err: EsignError = DocuSignError::Unsupported("signing url".into()).into();
        assert!(matches!(err, EsignError::UnsupportedError(_)));

        let err: EsignError = DocuSignError::Api {
            status_code: 400,
            error_code: Some("ENVELOPE_IS_INCOMPLETE".into()),
            message: "no documents".into(),
        }
        .into();
        assert!(matches!(
            err,
            EsignError::ExternalServiceError { ref service_name, .. } if service_name == "DocuSign"
        ));

        let err: EsignError = DocuSignError::AccountAccessDenied {
            user_id: "u".into(),
            account_id: "a".into(),
        }
        .into();
        assert!(matches!(err, EsignError::AuthError(_)));
    }

    #[test]
    fn test_status_codes_agree_with_common_error() {
        let cases = vec![
            DocuSignError::EnvelopeNotFound(Uuid::new_v4()),
            DocuSignError::MissingEnvelopeId,
            DocuSignError::UnmappedStatus("weird".into()),
            DocuSignError::Unsupported("x".into()),
            DocuSignError::Config("blank".into()),
        ];
        for err in cases {
            let code = err.status_code();
            let common: EsignError = err.into();
            assert_eq!(code, common.status_code());
        }
    }
}
