// --- File: crates/esign_docusign/src/auth.rs ---

// Startup authentication against DocuSign: JWT-bearer grant, user info and
// account access check. Any failure here is fatal for the caller.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use tracing::{error, info};

use esign_common::http::client::{create_client, ClientSettings};
use esign_config::DocuSignConfig;

use crate::client::{api_error, send_json, DocuSignClient};
use crate::error::DocuSignError;
use crate::models::{JwtClaims, OAuthToken, UserAccount, UserInfo};

pub const SANDBOX_BASE_URL: &str = "https://demo.docusign.net/restapi";
pub const SANDBOX_AUTH_SERVER: &str = "https://account-d.docusign.com";

pub const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
pub const JWT_SCOPES: &str = "signature impersonation";

const USER_AGENT: &str = concat!("esign-docusign/", env!("CARGO_PKG_VERSION"));

/// REST base path and OAuth server the client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocuSignEndpoints {
    pub base_url: String,
    pub auth_server: String,
}

impl DocuSignEndpoints {
    /// Sandbox mode pins the demo endpoints; otherwise the configured ones are used.
    pub fn from_config(config: &DocuSignConfig) -> Self {
        if config.sandbox_mode {
            Self {
                base_url: SANDBOX_BASE_URL.to_string(),
                auth_server: SANDBOX_AUTH_SERVER.to_string(),
            }
        } else {
            Self {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                auth_server: config.auth_server.trim_end_matches('/').to_string(),
            }
        }
    }

    /// Host of the OAuth server, used as the JWT audience.
    pub fn oauth_host(&self) -> &str {
        self.auth_server
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/')
    }

    fn token_url(&self) -> String {
        format!("{}/oauth/token", self.auth_server)
    }

    fn userinfo_url(&self) -> String {
        format!("{}/oauth/userinfo", self.auth_server)
    }
}

/// HTTP client settings derived from the adapter configuration.
pub fn client_settings(config: &DocuSignConfig) -> ClientSettings {
    ClientSettings {
        connect_timeout: Duration::from_secs(config.connection_timeout_secs),
        request_timeout: Duration::from_secs(config.read_timeout_secs),
        user_agent: USER_AGENT.to_string(),
    }
}

/// Keys pasted into environment variables often carry literal `\n` sequences.
fn normalize_pem(private_key: &str) -> String {
    private_key.trim().replace("\\n", "\n")
}

/// Signs the RS256 JWT-bearer assertion.
pub fn build_jwt_assertion(
    config: &DocuSignConfig,
    endpoints: &DocuSignEndpoints,
) -> Result<String, DocuSignError> {
    let key = EncodingKey::from_rsa_pem(normalize_pem(&config.private_key).as_bytes())
        .map_err(|e| DocuSignError::InvalidPrivateKey(e.to_string()))?;

    let iat = Utc::now().timestamp();
    let claims = JwtClaims {
        iss: config.integration_key.clone(),
        sub: config.user_id.clone(),
        aud: endpoints.oauth_host().to_string(),
        iat,
        exp: iat + config.jwt_expiration_secs as i64,
        scope: JWT_SCOPES.to_string(),
    };

    Ok(encode(&Header::new(Algorithm::RS256), &claims, &key)?)
}

/// Exchanges a signed assertion for an access token.
pub async fn request_jwt_user_token(
    http: &Client,
    endpoints: &DocuSignEndpoints,
    config: &DocuSignConfig,
) -> Result<OAuthToken, DocuSignError> {
    let assertion = build_jwt_assertion(config, endpoints)?;
    let body = serde_urlencoded::to_string(&[
        ("grant_type", JWT_BEARER_GRANT_TYPE),
        ("assertion", assertion.as_str()),
    ])?;

    let response = http
        .post(endpoints.token_url())
        .header(
            reqwest::header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        )
        .body(body)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    let token: OAuthToken = response
        .json()
        .await
        .map_err(|e| DocuSignError::InvalidResponse(format!("token response: {}", e)))?;
    Ok(token)
}

pub async fn get_user_info(
    http: &Client,
    endpoints: &DocuSignEndpoints,
    access_token: &str,
) -> Result<UserInfo, DocuSignError> {
    send_json(http.get(endpoints.userinfo_url()).bearer_auth(access_token)).await
}

/// Finds `account_id` among the accounts the user may act on.
pub fn validate_account_access<'a>(
    user_info: &'a UserInfo,
    config: &DocuSignConfig,
) -> Result<&'a UserAccount, DocuSignError> {
    user_info
        .accounts
        .iter()
        .find(|account| account.account_id == config.account_id)
        .ok_or_else(|| {
            error!(
                "DocuSign user {} has no access to account {}",
                config.user_id, config.account_id
            );
            DocuSignError::AccountAccessDenied {
                user_id: config.user_id.clone(),
                account_id: config.account_id.clone(),
            }
        })
}

/// Builds an authenticated client: HTTP client, JWT grant, user info and
/// account access check, in that order. No step is retried.
pub async fn bootstrap(config: &DocuSignConfig) -> Result<DocuSignClient, DocuSignError> {
    config
        .validate()
        .map_err(|e| DocuSignError::Config(e.to_string()))?;

    let endpoints = DocuSignEndpoints::from_config(config);
    info!(
        "Configuring DocuSign client for account {} (base {}, auth {})",
        config.account_id, endpoints.base_url, endpoints.auth_server
    );

    let http = create_client(&client_settings(config))?;

    let token = request_jwt_user_token(&http, &endpoints, config).await?;
    let client = DocuSignClient::new(http.clone(), endpoints.base_url.clone(), &token)?;
    let user_info = get_user_info(&http, &endpoints, &token.access_token).await?;
    info!(
        "Authenticated DocuSign user {} ({})",
        user_info.name.as_deref().unwrap_or("<unnamed>"),
        user_info.sub
    );

    let account = validate_account_access(&user_info, config)?;
    info!(
        "Validated access to DocuSign account {} ({})",
        account.account_id,
        account.account_name.as_deref().unwrap_or("-")
    );

    Ok(client)
}
