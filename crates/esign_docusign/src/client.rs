// --- File: crates/esign_docusign/src/client.rs ---

use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use esign_common::services::BoxFuture;

use crate::api::EnvelopesApi;
use crate::error::DocuSignError;
use crate::models::{
    Envelope, EnvelopeDefinition, EnvelopeSummary, EnvelopeUpdateSummary, EnvelopesInformation,
    ErrorDetails, ListStatusChangesOptions, OAuthErrorBody, OAuthToken,
};

const API_VERSION_PATH: &str = "v2.1";

/// Authenticated DocuSign REST client.
///
/// Holds the access token obtained at bootstrap. The token is not refreshed;
/// a process that outlives it has to be restarted.
#[derive(Clone, Debug)]
pub struct DocuSignClient {
    http: Client,
    base_path: String,
    access_token: String,
    token_expires_at: DateTime<Utc>,
}

impl DocuSignClient {
    /// Fails with [`DocuSignError::InvalidResponse`] when `expires_in` does
    /// not describe a representable point in time.
    pub fn new(
        http: Client,
        base_path: impl Into<String>,
        token: &OAuthToken,
    ) -> Result<Self, DocuSignError> {
        let token_expires_at = chrono::Duration::try_seconds(token.expires_in)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .ok_or_else(|| {
                DocuSignError::InvalidResponse(format!(
                    "token expires_in out of range: {}",
                    token.expires_in
                ))
            })?;

        Ok(Self {
            http,
            base_path: base_path.into().trim_end_matches('/').to_string(),
            access_token: token.access_token.clone(),
            token_expires_at,
        })
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn token_expires_at(&self) -> DateTime<Utc> {
        self.token_expires_at
    }

    pub fn is_token_expired(&self) -> bool {
        Utc::now() >= self.token_expires_at
    }

    fn envelopes_url(&self, account_id: &str) -> String {
        format!(
            "{}/{}/accounts/{}/envelopes",
            self.base_path, API_VERSION_PATH, account_id
        )
    }

    fn envelope_url(&self, account_id: &str, envelope_id: &str) -> String {
        format!("{}/{}", self.envelopes_url(account_id), envelope_id)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        if self.is_token_expired() {
            warn!("DocuSign access token expired at {}", self.token_expires_at);
        }
        request
            .bearer_auth(&self.access_token)
            .header(reqwest::header::ACCEPT, "application/json")
    }
}

/// Sends `request` and decodes a JSON body, turning non-2xx answers into
/// [`DocuSignError::Api`].
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
) -> Result<T, DocuSignError> {
    let response = request.send().await?;
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| {
        DocuSignError::InvalidResponse(format!("failed to parse response body: {}", e))
    })
}

/// Builds an API error from a failed response, understanding both the REST
/// (`errorCode`/`message`) and the OAuth (`error`/`error_description`) shapes.
pub(crate) async fn api_error(response: Response) -> DocuSignError {
    let status_code = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    debug!("DocuSign error response ({}): {}", status_code, body);

    if let Ok(details) = serde_json::from_str::<ErrorDetails>(&body) {
        if details.error_code.is_some() || details.message.is_some() {
            return DocuSignError::Api {
                status_code,
                error_code: details.error_code,
                message: details.message.unwrap_or_default(),
            };
        }
    }
    if let Ok(oauth) = serde_json::from_str::<OAuthErrorBody>(&body) {
        return DocuSignError::Api {
            status_code,
            message: oauth.error_description.unwrap_or_else(|| oauth.error.clone()),
            error_code: Some(oauth.error),
        };
    }
    DocuSignError::Api {
        status_code,
        error_code: None,
        message: body,
    }
}

impl EnvelopesApi for DocuSignClient {
    fn create_envelope(
        &self,
        account_id: &str,
        definition: EnvelopeDefinition,
    ) -> BoxFuture<'static, EnvelopeSummary, DocuSignError> {
        let request = self
            .authorized(self.http.post(self.envelopes_url(account_id)))
            .json(&definition);
        Box::pin(async move { send_json(request).await })
    }

    fn get_envelope(
        &self,
        account_id: &str,
        envelope_id: &str,
    ) -> BoxFuture<'static, Envelope, DocuSignError> {
        let request = self.authorized(self.http.get(self.envelope_url(account_id, envelope_id)));
        Box::pin(async move { send_json(request).await })
    }

    fn update(
        &self,
        account_id: &str,
        envelope_id: &str,
        envelope: Envelope,
    ) -> BoxFuture<'static, EnvelopeUpdateSummary, DocuSignError> {
        let request = self
            .authorized(self.http.put(self.envelope_url(account_id, envelope_id)))
            .json(&envelope);
        Box::pin(async move { send_json(request).await })
    }

    fn list_status_changes(
        &self,
        account_id: &str,
        options: ListStatusChangesOptions,
    ) -> BoxFuture<'static, EnvelopesInformation, DocuSignError> {
        let url = self.envelopes_url(account_id);
        let client = self.clone();
        Box::pin(async move {
            let query = serde_urlencoded::to_string(&options)?;
            let url = if query.is_empty() {
                url
            } else {
                format!("{}?{}", url, query)
            };
            send_json(client.authorized(client.http.get(url))).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(expires_in: i64) -> OAuthToken {
        OAuthToken {
            access_token: "token".to_string(),
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }

    #[test]
    fn test_new_records_token_expiry() {
        let client = DocuSignClient::new(Client::new(), "http://x/restapi/", &token(3600)).unwrap();
        assert_eq!(client.base_path(), "http://x/restapi");
        assert!(!client.is_token_expired());
        assert!(client.token_expires_at() > Utc::now() + chrono::Duration::minutes(59));
    }

    #[test]
    fn test_new_rejects_out_of_range_lifetime() {
        for expires_in in [i64::MAX, i64::MIN] {
            let result = DocuSignClient::new(Client::new(), "http://x", &token(expires_in));
            assert!(matches!(result, Err(DocuSignError::InvalidResponse(_))));
        }
    }
}
