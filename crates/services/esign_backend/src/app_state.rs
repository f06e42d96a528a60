// --- File: crates/services/esign_backend/src/app_state.rs ---
use esign_common::services::ServiceFactory;
use esign_config::AppConfig;
use std::sync::Arc;

/// Application state shared by the server.
#[derive(Clone)]
pub struct AppState {
    /// The configuration loaded at startup.
    pub config: Arc<AppConfig>,

    /// Access to the provider services the server was wired with.
    pub service_factory: Arc<dyn ServiceFactory>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, service_factory: Arc<dyn ServiceFactory>) -> Self {
        Self {
            config,
            service_factory,
        }
    }

    /// `host:port` to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.config.server.host, self.config.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service_factory::mock::MockServiceFactory;

    #[test]
    fn test_bind_address_uses_server_config() {
        let mut config = AppConfig::default();
        config.server.port = 9090;
        let state = AppState::new(Arc::new(config), Arc::new(MockServiceFactory::new()));
        assert_eq!(state.bind_address(), "127.0.0.1:9090");
        assert!(state.service_factory.envelope_port().is_none());
    }
}
