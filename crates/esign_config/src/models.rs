// --- File: crates/esign_config/src/models.rs ---

use serde::{Deserialize, Serialize};

use crate::ConfigValidationError;

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

// --- E-Signature Selection ---
// Names the active provider, e.g. ESIGN__ESIGNATURE__PROVIDER=docusign
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct EsignatureConfig {
    #[serde(default)]
    pub provider: Option<String>,
}

pub const DOCUSIGN_DEFAULT_BASE_URL: &str = "https://na3.docusign.net/restapi";
pub const DOCUSIGN_DEFAULT_AUTH_SERVER: &str = "https://account.docusign.com";

fn default_base_url() -> String {
    DOCUSIGN_DEFAULT_BASE_URL.to_string()
}
fn default_auth_server() -> String {
    DOCUSIGN_DEFAULT_AUTH_SERVER.to_string()
}
fn default_connection_timeout_secs() -> u64 {
    30
}
fn default_read_timeout_secs() -> u64 {
    60
}
fn default_max_retries() -> u32 {
    3
}
fn default_jwt_expiration_secs() -> u64 {
    3600
}
fn default_enable_polling() -> bool {
    true
}
fn default_polling_interval_secs() -> u64 {
    300
}
fn default_email_subject() -> String {
    "Please sign this document".to_string()
}
fn default_email_message() -> String {
    "Please review and sign the attached document(s).".to_string()
}

// --- DocuSign Config ---
// The private key is usually injected via the `secret_from_env` marker:
// DOCUSIGN_PRIVATE_KEY or ESIGN_SECRET_DOCUSIGN_PRIVATE_KEY
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DocuSignConfig {
    pub integration_key: String, // Mandatory
    pub user_id: String,         // Mandatory
    pub account_id: String,      // Mandatory
    /// RSA private key in PEM form used to sign the JWT grant.
    pub private_key: String, // Mandatory
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_auth_server")]
    pub auth_server: String,
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(default)]
    pub webhook_secret: Option<String>,
    #[serde(default)]
    pub sandbox_mode: bool,
    #[serde(default = "default_connection_timeout_secs")]
    pub connection_timeout_secs: u64,
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
    /// Not consulted by the adapter yet.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_jwt_expiration_secs")]
    pub jwt_expiration_secs: u64,
    /// Not consulted by the adapter yet.
    #[serde(default = "default_enable_polling")]
    pub enable_polling: bool,
    /// Not consulted by the adapter yet.
    #[serde(default = "default_polling_interval_secs")]
    pub polling_interval_secs: u64,
    #[serde(default = "default_email_subject")]
    pub default_email_subject: String,
    #[serde(default = "default_email_message")]
    pub default_email_message: String,
}

impl DocuSignConfig {
    /// Creates a config with the mandatory credentials and defaults for everything else.
    pub fn new(
        integration_key: impl Into<String>,
        user_id: impl Into<String>,
        account_id: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        Self {
            integration_key: integration_key.into(),
            user_id: user_id.into(),
            account_id: account_id.into(),
            private_key: private_key.into(),
            base_url: default_base_url(),
            auth_server: default_auth_server(),
            webhook_url: None,
            webhook_secret: None,
            sandbox_mode: false,
            connection_timeout_secs: default_connection_timeout_secs(),
            read_timeout_secs: default_read_timeout_secs(),
            max_retries: default_max_retries(),
            jwt_expiration_secs: default_jwt_expiration_secs(),
            enable_polling: default_enable_polling(),
            polling_interval_secs: default_polling_interval_secs(),
            default_email_subject: default_email_subject(),
            default_email_message: default_email_message(),
        }
    }

    /// Rejects blank mandatory fields.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let required = [
            ("docusign.integration_key", &self.integration_key),
            ("docusign.user_id", &self.user_id),
            ("docusign.account_id", &self.account_id),
            ("docusign.private_key", &self.private_key),
        ];
        for (path, value) in required {
            if value.trim().is_empty() || value == crate::SECRET_FROM_ENV_MARKER {
                return Err(ConfigValidationError::Blank(path.to_string()));
            }
        }
        if self.connection_timeout_secs == 0 || self.read_timeout_secs == 0 {
            return Err(ConfigValidationError::Invalid(
                "docusign timeouts must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub esignature: EsignatureConfig,

    // --- Optional Provider Configurations ---
    #[serde(default)]
    pub docusign: Option<DocuSignConfig>,
}
