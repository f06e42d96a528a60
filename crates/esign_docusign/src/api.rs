//! The slice of the DocuSign Envelopes API the adapter depends on.
//!
//! [`crate::client::DocuSignClient`] implements it over HTTP; tests substitute
//! the in-memory [`mock::InMemoryEnvelopesApi`] or a `mockall` mock.

use esign_common::services::BoxFuture;

use crate::error::DocuSignError;
use crate::models::{
    Envelope, EnvelopeDefinition, EnvelopeSummary, EnvelopeUpdateSummary, EnvelopesInformation,
    ListStatusChangesOptions,
};

/// Envelope operations of the DocuSign REST API.
///
/// Futures are `'static`: implementations capture owned copies of their inputs.
#[cfg_attr(test, mockall::automock)]
pub trait EnvelopesApi: Send + Sync {
    fn create_envelope(
        &self,
        account_id: &str,
        definition: EnvelopeDefinition,
    ) -> BoxFuture<'static, EnvelopeSummary, DocuSignError>;

    fn get_envelope(
        &self,
        account_id: &str,
        envelope_id: &str,
    ) -> BoxFuture<'static, Envelope, DocuSignError>;

    /// Partial update: only the `Some` fields of `envelope` are changed.
    fn update(
        &self,
        account_id: &str,
        envelope_id: &str,
        envelope: Envelope,
    ) -> BoxFuture<'static, EnvelopeUpdateSummary, DocuSignError>;

    fn list_status_changes(
        &self,
        account_id: &str,
        options: ListStatusChangesOptions,
    ) -> BoxFuture<'static, EnvelopesInformation, DocuSignError>;
}
