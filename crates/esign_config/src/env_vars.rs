//! Environment variable handling for the e-signature configuration.
//!
//! Configuration keys map to `ESIGN__SECTION__KEY`; secret keys map to
//! `ESIGN_SECRET_SECTION_KEY` with a fallback to the legacy `SECTION_KEY`
//! form (e.g. `DOCUSIGN_PRIVATE_KEY`).

use std::env;

use tracing::warn;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "ESIGN";

/// The prefix for secret environment variables
pub const SECRET_PREFIX: &str = "ESIGN_SECRET";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// The separator for secret environment variables
pub const SECRET_SEPARATOR: &str = "_";

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a configuration path to an environment variable name
///
/// `docusign.account_id` becomes `ESIGN__DOCUSIGN__ACCOUNT_ID`.
pub fn config_path_to_env_var(path: &str) -> String {
    let prefix = get_config_prefix();
    let path = path.replace('.', CONFIG_SEPARATOR);
    format!("{}{}{}", prefix, CONFIG_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to an environment variable name
///
/// `docusign.private_key` becomes `ESIGN_SECRET_DOCUSIGN_PRIVATE_KEY`.
pub fn secret_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', SECRET_SEPARATOR);
    format!("{}{}{}", SECRET_PREFIX, SECRET_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to its legacy environment variable name
///
/// `docusign.private_key` becomes `DOCUSIGN_PRIVATE_KEY`.
pub fn legacy_secret_path_to_env_var(path: &str) -> String {
    let parts: Vec<&str> = path.split('.').collect();
    if parts.len() < 2 {
        return path.to_uppercase();
    }

    let service = parts[0];
    let key = parts[1..].join(SECRET_SEPARATOR);
    format!("{}_{}", service, key).to_uppercase()
}

/// Get an environment variable for a configuration path
pub fn get_config_env_var(path: &str) -> Option<String> {
    env::var(config_path_to_env_var(path)).ok()
}

/// Get an environment variable for a secret path, trying the prefixed name first.
pub fn get_secret_env_var(path: &str) -> Option<String> {
    if let Ok(value) = env::var(secret_path_to_env_var(path)) {
        return Some(value);
    }
    env::var(legacy_secret_path_to_env_var(path)).ok()
}

/// Paths containing "secret", "key", "password" or "token" are treated as secrets.
pub fn is_secret_path(path: &str) -> bool {
    let path_lower = path.to_lowercase();
    path_lower.contains("secret")
        || path_lower.contains("key")
        || path_lower.contains("password")
        || path_lower.contains("token")
}

/// Resolve a path through the secret or config naming scheme.
pub fn get_env_var(path: &str) -> Option<String> {
    if is_secret_path(path) {
        get_secret_env_var(path)
    } else {
        get_config_env_var(path)
    }
}

/// Replace every `secret_from_env` string in `value` with its environment variable.
///
/// Returns `true` if any value was replaced. Markers without a matching
/// variable are left in place and logged.
pub fn inject_env_vars(value: &mut serde_json::Value) -> bool {
    use serde_json::Value;

    fn walk(path: Vec<String>, obj: &mut Value) -> bool {
        let mut replaced = false;

        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    let mut new_path = path.clone();
                    new_path.push(k.to_string());
                    replaced |= walk(new_path, v);
                }
            }
            Value::Array(arr) => {
                for (i, v) in arr.iter_mut().enumerate() {
                    let mut new_path = path.clone();
                    new_path.push(i.to_string());
                    replaced |= walk(new_path, v);
                }
            }
            Value::String(s) if s == crate::SECRET_FROM_ENV_MARKER => {
                let path_str = path.join(".");
                if let Some(env_val) = get_env_var(&path_str) {
                    *s = env_val;
                    replaced = true;
                } else {
                    warn!("env var for {} not found", path_str);
                }
            }
            _ => {}
        }

        replaced
    }

    walk(vec![], value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_to_env_var() {
        assert_eq!(
            config_path_to_env_var("server.host"),
            "ESIGN__SERVER__HOST"
        );
        assert_eq!(
            config_path_to_env_var("docusign.account_id"),
            "ESIGN__DOCUSIGN__ACCOUNT_ID"
        );
    }

    #[test]
    fn test_secret_path_to_env_var() {
        assert_eq!(
            secret_path_to_env_var("docusign.private_key"),
            "ESIGN_SECRET_DOCUSIGN_PRIVATE_KEY"
        );
        assert_eq!(
            secret_path_to_env_var("docusign.webhook_secret"),
            "ESIGN_SECRET_DOCUSIGN_WEBHOOK_SECRET"
        );
    }

    #[test]
    fn test_legacy_secret_path_to_env_var() {
        assert_eq!(
            legacy_secret_path_to_env_var("docusign.private_key"),
            "DOCUSIGN_PRIVATE_KEY"
        );
        assert_eq!(legacy_secret_path_to_env_var("token"), "TOKEN");
    }

    #[test]
    fn test_is_secret_path() {
        assert!(is_secret_path("docusign.private_key"));
        assert!(is_secret_path("docusign.integration_key"));
        assert!(is_secret_path("docusign.webhook_secret"));
        assert!(!is_secret_path("docusign.account_id"));
        assert!(!is_secret_path("server.host"));
    }

    #[test]
    fn test_inject_env_vars_replaces_marker() {
        env::set_var(
            "ESIGN_SECRET_DOCUSIGN_WEBHOOK_SECRET",
            "whsec_injected_for_test",
        );
        let mut value = serde_json::json!({
            "docusign": { "webhook_secret": "secret_from_env", "account_id": "aid" }
        });

        assert!(inject_env_vars(&mut value));
        assert_eq!(value["docusign"]["webhook_secret"], "whsec_injected_for_test");
        assert_eq!(value["docusign"]["account_id"], "aid");
    }

    #[test]
    fn test_inject_env_vars_leaves_unresolved_marker() {
        let mut value = serde_json::json!({
            "unit_test_missing_section": { "api_secret": "secret_from_env" }
        });

        assert!(!inject_env_vars(&mut value));
        assert_eq!(
            value["unit_test_missing_section"]["api_secret"],
            "secret_from_env"
        );
    }
}
