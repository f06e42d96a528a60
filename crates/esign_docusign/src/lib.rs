// --- File: crates/esign_docusign/src/lib.rs ---
pub mod api;
pub mod auth;
pub mod client;
pub mod correlation;
pub mod error;
pub mod models;
pub mod service;

pub use auth::{bootstrap, DocuSignEndpoints};
pub use client::DocuSignClient;
pub use error::DocuSignError;
pub use service::{DocuSignSignatureEnvelopeAdapter, DOCUSIGN_ADAPTER_DESCRIPTOR};
