//! Provider selection helpers.
//!
//! Which signature provider backs the envelope port is decided at runtime from
//! `esignature.provider`.

use esign_config::AppConfig;

use crate::error::{config_error, EsignError};
use crate::models::SignatureProvider;

/// Parse the configured provider name.
///
/// Returns `Ok(None)` when no provider is configured and a configuration
/// error when the name is not a known provider.
pub fn selected_provider(config: &AppConfig) -> Result<Option<SignatureProvider>, EsignError> {
    match config.esignature.provider.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(name) => name.parse::<SignatureProvider>().map(Some).map_err(config_error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esign_config::{DocuSignConfig, EsignatureConfig};

    fn config_with(provider: Option<&str>, docusign: bool) -> AppConfig {
        AppConfig {
            esignature: EsignatureConfig {
                provider: provider.map(str::to_string),
            },
            docusign: docusign.then(|| DocuSignConfig::new("ik", "user", "account", "pem")),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_no_provider_selects_nothing() {
        assert!(matches!(selected_provider(&config_with(None, true)), Ok(None)));
        assert!(matches!(selected_provider(&config_with(Some("  "), true)), Ok(None)));
    }

    #[test]
    fn test_provider_name_is_normalized() {
        assert!(matches!(
            selected_provider(&config_with(Some("DocuSign"), true)),
            Ok(Some(SignatureProvider::DocuSign))
        ));
        assert!(matches!(
            selected_provider(&config_with(Some(" hellosign "), false)),
            Ok(Some(SignatureProvider::HelloSign))
        ));
    }

    #[test]
    fn test_unknown_provider_is_config_error() {
        let config = config_with(Some("pandadoc"), false);
        assert!(matches!(
            selected_provider(&config),
            Err(EsignError::ConfigError(_))
        ));
    }
}
