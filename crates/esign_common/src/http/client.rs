use reqwest::{Client, Error as ReqwestError};
use std::time::Duration;

/// Timeouts and identification for an outbound provider client.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub connect_timeout: Duration,
    /// Upper bound for a whole request, including reading the body.
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(60),
            user_agent: concat!("esign/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Creates a new HTTP client with the given settings.
///
/// Redirects are followed with reqwest's default policy.
pub fn create_client(settings: &ClientSettings) -> Result<Client, ReqwestError> {
    Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .user_agent(settings.user_agent.clone())
        .redirect(reqwest::redirect::Policy::default())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_with_defaults() {
        let settings = ClientSettings::default();
        assert!(settings.user_agent.starts_with("esign/"));
        assert!(create_client(&settings).is_ok());
    }
}
