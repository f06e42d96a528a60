// --- File: crates/esign_common/src/lib.rs ---

pub mod error; // Error taxonomy shared by all providers
pub mod features; // Provider selection helpers
pub mod handlers; // HTTP handlers over the envelope port
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Domain model and request/response bodies
pub mod routes; // Route definitions
#[cfg(test)]
mod routes_test;
pub mod services; // Port traits

// Re-export the routes function to be used by the backend service
pub use routes::routes;

pub use error::{config_error, not_found, validation_error, EsignError, HttpStatusCode};

pub use http::{
    client::{create_client, ClientSettings},
    IntoHttpResponse,
};

pub use logging::{init, init_with_level, log_error, log_swallowed};

pub use features::selected_provider;

pub use models::{
    AdapterDescriptor, AdapterFeature, EnvelopeStatus, SignatureEnvelope, SignatureProvider,
};

pub use services::{
    BoxFuture, DynEnvelopePort, ErasedEnvelopePort, ServiceFactory, SignatureEnvelopePort,
};
