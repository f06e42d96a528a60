// --- File: crates/services/esign_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! Decides, once at startup, which envelope port the application talks to.
use esign_common::error::{config_error, EsignError};
use esign_common::features::selected_provider;
use esign_common::models::SignatureProvider;
use esign_common::services::{DynEnvelopePort, ServiceFactory};
use esign_config::AppConfig;
use std::sync::Arc;
use tracing::{info, warn};

#[cfg(feature = "docusign")]
use {
    esign_common::logging::log_error,
    esign_common::services::{ErasedEnvelopePort, SignatureEnvelopePort},
    esign_docusign::{bootstrap, DocuSignSignatureEnvelopeAdapter},
};

/// Service factory for the backend.
///
/// An envelope port registered through [`EsignServiceFactoryBuilder::with_envelope_port`]
/// always wins. Otherwise the provider named by `esignature.provider` is
/// bootstrapped; failures abort startup.
pub struct EsignServiceFactory {
    config: Arc<AppConfig>,
    envelope_port: Option<DynEnvelopePort>,
}

pub struct EsignServiceFactoryBuilder {
    config: Arc<AppConfig>,
    envelope_port: Option<DynEnvelopePort>,
}

impl EsignServiceFactoryBuilder {
    /// Register a port explicitly; the configured provider is then not bootstrapped.
    pub fn with_envelope_port(mut self, port: DynEnvelopePort) -> Self {
        self.envelope_port = Some(port);
        self
    }

    pub async fn build(self) -> Result<EsignServiceFactory, EsignError> {
        let envelope_port = match self.envelope_port {
            Some(port) => {
                info!("ℹ️ Using explicitly registered envelope port.");
                Some(port)
            }
            None => default_envelope_port(&self.config).await?,
        };
        Ok(EsignServiceFactory {
            config: self.config,
            envelope_port,
        })
    }
}

impl EsignServiceFactory {
    /// Create a factory from configuration alone.
    pub async fn new(config: Arc<AppConfig>) -> Result<Self, EsignError> {
        Self::builder(config).build().await
    }

    /// The configuration the factory was built from.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn builder(config: Arc<AppConfig>) -> EsignServiceFactoryBuilder {
        EsignServiceFactoryBuilder {
            config,
            envelope_port: None,
        }
    }
}

impl ServiceFactory for EsignServiceFactory {
    fn envelope_port(&self) -> Option<DynEnvelopePort> {
        self.envelope_port.clone()
    }
}

async fn default_envelope_port(config: &AppConfig) -> Result<Option<DynEnvelopePort>, EsignError> {
    match selected_provider(config)? {
        None => {
            warn!("⚠️ No esignature.provider configured; envelope port disabled.");
            Ok(None)
        }
        Some(SignatureProvider::DocuSign) => docusign_port(config).await.map(Some),
        Some(other) => Err(config_error(format!(
            "no adapter available for signature provider '{}'",
            other
        ))),
    }
}

#[cfg(feature = "docusign")]
async fn docusign_port(config: &AppConfig) -> Result<DynEnvelopePort, EsignError> {
    let docusign = config.docusign.as_ref().ok_or_else(|| {
        config_error("esignature.provider is 'docusign' but the [docusign] section is missing")
    })?;

    info!("ℹ️ Initializing DocuSign envelope adapter...");
    let client = bootstrap(docusign).await.map_err(|e| {
        log_error(&e, "🚨 DocuSign bootstrap failed");
        e
    })?;
    let port = ErasedEnvelopePort::into_dyn(DocuSignSignatureEnvelopeAdapter::new(
        client,
        docusign.account_id.clone(),
    ));
    if let Some(descriptor) = port.descriptor() {
        info!(
            "✅ {} initialized (features: {:?}).",
            descriptor.description, descriptor.supported_features
        );
    }
    Ok(port)
}

#[cfg(not(feature = "docusign"))]
async fn docusign_port(_config: &AppConfig) -> Result<DynEnvelopePort, EsignError> {
    Err(config_error(
        "esignature.provider is 'docusign' but the backend was built without the docusign feature",
    ))
}
