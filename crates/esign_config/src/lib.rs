use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub mod env_vars;
pub mod models;
pub use models::*;

/// Marker value in config files whose real value comes from the environment.
pub const SECRET_FROM_ENV_MARKER: &str = "secret_from_env";

/// Reasons a loaded configuration section is unusable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("required configuration value is blank: {0}")]
    Blank(String),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigValidationError> for ConfigError {
    fn from(err: ConfigValidationError) -> Self {
        ConfigError::Message(err.to_string())
    }
}

/// Loads the configuration from `config/` (or `$CONFIG_DIR`) and the environment.
///
/// Sources, later ones overriding earlier ones:
/// 1. `<dir>/default.{toml,yaml,json}` (optional)
/// 2. `<dir>/<RUN_ENV>.{toml,yaml,json}` (optional, `RUN_ENV` defaults to `debug`)
/// 3. Environment variables `ESIGN__SECTION__KEY`
///
/// Afterwards every `secret_from_env` marker is replaced from the environment.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();
    let config_dir = env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    load_config_from(Path::new(&config_dir))
}

/// Same as [`load_config`], with an explicit config directory.
pub fn load_config_from(config_dir: &Path) -> Result<AppConfig, ConfigError> {
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env_vars::get_config_prefix();

    let default_path: PathBuf = config_dir.join("default");
    let env_path: PathBuf = config_dir.join(&run_env);
    debug!(
        "loading config from {} and {} (prefix {})",
        default_path.display(),
        env_path.display(),
        prefix
    );

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(
            Environment::with_prefix(&prefix)
                .prefix_separator(env_vars::CONFIG_SEPARATOR)
                .separator(env_vars::CONFIG_SEPARATOR)
                .try_parsing(true),
        );

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    apply_env_overrides_from_marker(raw_config)
}

/// Applies environment overrides based on `secret_from_env` markers in the serialized config
pub fn apply_env_overrides_from_marker(config: AppConfig) -> Result<AppConfig, ConfigError> {
    let mut json = serde_json::to_value(&config)
        .map_err(|err| ConfigError::Message(format!("failed to serialize config: {err}")))?;
    if env_vars::inject_env_vars(&mut json) {
        debug!("injected secrets from environment");
    }
    serde_json::from_value(json)
        .map_err(|err| ConfigError::Message(format!("failed to rebuild config: {err}")))
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the dotenv file into the process environment, once.
///
/// The file is taken from `DOTENV_OVERRIDE`, else from the first command line
/// argument if it starts with `.env`, else `.env`. Returns the path used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_config_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!(
            "esign-config-test-{}-{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_config_from_toml_file() {
        let dir = temp_config_dir("toml");
        fs::write(
            dir.join("default.toml"),
            r#"
[server]
host = "0.0.0.0"
port = 9090

[esignature]
provider = "docusign"

[docusign]
integration_key = "ik"
user_id = "uid"
account_id = "aid"
private_key = "pem"
sandbox_mode = true
read_timeout_secs = 15
"#,
        )
        .unwrap();

        let config = load_config_from(&dir).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.esignature.provider.as_deref(), Some("docusign"));
        let docusign = config.docusign.unwrap();
        assert!(docusign.sandbox_mode);
        assert_eq!(docusign.read_timeout_secs, 15);
        assert_eq!(docusign.connection_timeout_secs, 30);
    }

    #[test]
    fn test_load_config_from_missing_dir_uses_defaults() {
        let dir = env::temp_dir().join("esign-config-test-does-not-exist");
        let config = load_config_from(&dir).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_secret_marker_resolved_from_legacy_env_var() {
        env::set_var("UNITTESTPROVIDER_API_TOKEN", "resolved-token");
        let mut json = serde_json::to_value(AppConfig::default()).unwrap();
        json["unittestprovider"] = serde_json::json!({ "api_token": SECRET_FROM_ENV_MARKER });

        assert!(env_vars::inject_env_vars(&mut json));
        assert_eq!(json["unittestprovider"]["api_token"], "resolved-token");
    }
}
