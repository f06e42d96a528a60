//! Service abstractions for signature providers.
//!
//! `SignatureEnvelopePort` is the capability set every provider adapter
//! implements. The application only talks to it through
//! `Arc<dyn SignatureEnvelopePort<Error = EsignError>>`, which keeps the
//! provider selection a wiring-time decision.

use chrono::{DateTime, Utc};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::EsignError;
use crate::models::{AdapterDescriptor, EnvelopeStatus, SignatureEnvelope, SignatureProvider};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A trait for signature envelope operations.
///
/// Every operation returns a future that does nothing until it is awaited.
pub trait SignatureEnvelopePort: Send + Sync {
    /// Error type returned by the port operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// What the backing adapter is and supports, if it describes itself.
    fn descriptor(&self) -> Option<&'static AdapterDescriptor> {
        None
    }

    /// Create an envelope at the provider and start tracking its identity.
    fn create_envelope(
        &self,
        envelope: SignatureEnvelope,
    ) -> BoxFuture<'_, SignatureEnvelope, Self::Error>;

    /// Fetch the current provider view of an envelope.
    fn get_envelope(&self, envelope_id: Uuid) -> BoxFuture<'_, SignatureEnvelope, Self::Error>;

    /// Push title/description changes to the provider.
    fn update_envelope(
        &self,
        envelope: SignatureEnvelope,
    ) -> BoxFuture<'_, SignatureEnvelope, Self::Error>;

    /// Void the envelope at the provider and forget its identity.
    fn delete_envelope(&self, envelope_id: Uuid) -> BoxFuture<'_, (), Self::Error>;

    /// Send the envelope to its recipients.
    fn send_envelope(
        &self,
        envelope_id: Uuid,
        sent_by: Uuid,
    ) -> BoxFuture<'_, SignatureEnvelope, Self::Error>;

    /// Void the envelope with a reason.
    fn void_envelope(
        &self,
        envelope_id: Uuid,
        void_reason: &str,
        voided_by: Uuid,
    ) -> BoxFuture<'_, SignatureEnvelope, Self::Error>;

    /// `false` when the envelope is unknown or the provider cannot confirm it.
    fn exists_envelope(&self, envelope_id: Uuid) -> BoxFuture<'_, bool, Self::Error>;

    fn get_envelopes_by_status(
        &self,
        status: EnvelopeStatus,
        limit: Option<u32>,
    ) -> BoxFuture<'_, Vec<SignatureEnvelope>, Self::Error>;

    fn get_envelopes_by_creator(
        &self,
        created_by: Uuid,
        limit: Option<u32>,
    ) -> BoxFuture<'_, Vec<SignatureEnvelope>, Self::Error>;

    fn get_envelopes_by_sender(
        &self,
        sent_by: Uuid,
        limit: Option<u32>,
    ) -> BoxFuture<'_, Vec<SignatureEnvelope>, Self::Error>;

    fn get_envelopes_by_provider(
        &self,
        provider: SignatureProvider,
        limit: Option<u32>,
    ) -> BoxFuture<'_, Vec<SignatureEnvelope>, Self::Error>;

    fn get_expiring_envelopes(
        &self,
        from_time: DateTime<Utc>,
        to_time: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<SignatureEnvelope>, Self::Error>;

    fn get_completed_envelopes(
        &self,
        from_time: DateTime<Utc>,
        to_time: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<SignatureEnvelope>, Self::Error>;

    /// Reverse lookup by provider id; `None` when the id is not tracked.
    fn get_envelope_by_external_id(
        &self,
        external_envelope_id: &str,
        provider: SignatureProvider,
    ) -> BoxFuture<'_, Option<SignatureEnvelope>, Self::Error>;

    fn sync_envelope_status(
        &self,
        envelope_id: Uuid,
    ) -> BoxFuture<'_, SignatureEnvelope, Self::Error>;

    /// Embedded signing URL for a recipient.
    fn get_signing_url(
        &self,
        envelope_id: Uuid,
        signer_email: &str,
        signer_name: &str,
        client_user_id: &str,
    ) -> BoxFuture<'_, String, Self::Error>;

    fn resend_envelope(&self, envelope_id: Uuid) -> BoxFuture<'_, (), Self::Error>;

    fn archive_envelope(&self, envelope_id: Uuid) -> BoxFuture<'_, SignatureEnvelope, Self::Error>;
}

/// Type-erased port handed to the rest of the application.
pub type DynEnvelopePort = Arc<dyn SignatureEnvelopePort<Error = EsignError>>;

/// Adapts any port whose error converts into [`EsignError`] to the shared error type.
pub struct ErasedEnvelopePort<P> {
    inner: P,
}

impl<P> ErasedEnvelopePort<P>
where
    P: SignatureEnvelopePort + 'static,
    P::Error: Into<EsignError>,
{
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    /// Wraps `inner` straight into a [`DynEnvelopePort`].
    pub fn into_dyn(inner: P) -> DynEnvelopePort {
        Arc::new(Self::new(inner))
    }
}

impl<P> SignatureEnvelopePort for ErasedEnvelopePort<P>
where
    P: SignatureEnvelopePort,
    P::Error: Into<EsignError>,
{
    type Error = EsignError;

    fn descriptor(&self) -> Option<&'static AdapterDescriptor> {
        self.inner.descriptor()
    }

    fn create_envelope(
        &self,
        envelope: SignatureEnvelope,
    ) -> BoxFuture<'_, SignatureEnvelope, Self::Error> {
        Box::pin(async move { self.inner.create_envelope(envelope).await.map_err(Into::into) })
    }

    fn get_envelope(&self, envelope_id: Uuid) -> BoxFuture<'_, SignatureEnvelope, Self::Error> {
        Box::pin(async move { self.inner.get_envelope(envelope_id).await.map_err(Into::into) })
    }

    fn update_envelope(
        &self,
        envelope: SignatureEnvelope,
    ) -> BoxFuture<'_, SignatureEnvelope, Self::Error> {
        Box::pin(async move { self.inner.update_envelope(envelope).await.map_err(Into::into) })
    }

    fn delete_envelope(&self, envelope_id: Uuid) -> BoxFuture<'_, (), Self::Error> {
        Box::pin(async move { self.inner.delete_envelope(envelope_id).await.map_err(Into::into) })
    }

    fn send_envelope(
        &self,
        envelope_id: Uuid,
        sent_by: Uuid,
    ) -> BoxFuture<'_, SignatureEnvelope, Self::Error> {
        Box::pin(async move {
            self.inner
                .send_envelope(envelope_id, sent_by)
                .await
                .map_err(Into::into)
        })
    }

    fn void_envelope(
        &self,
        envelope_id: Uuid,
        void_reason: &str,
        voided_by: Uuid,
    ) -> BoxFuture<'_, SignatureEnvelope, Self::Error> {
        let void_reason = void_reason.to_string();
        Box::pin(async move {
            self.inner
                .void_envelope(envelope_id, &void_reason, voided_by)
                .await
                .map_err(Into::into)
        })
    }

    fn exists_envelope(&self, envelope_id: Uuid) -> BoxFuture<'_, bool, Self::Error> {
        Box::pin(async move { self.inner.exists_envelope(envelope_id).await.map_err(Into::into) })
    }

    fn get_envelopes_by_status(
        &self,
        status: EnvelopeStatus,
        limit: Option<u32>,
    ) -> BoxFuture<'_, Vec<SignatureEnvelope>, Self::Error> {
        Box::pin(async move {
            self.inner
                .get_envelopes_by_status(status, limit)
                .await
                .map_err(Into::into)
        })
    }

    fn get_envelopes_by_creator(
        &self,
        created_by: Uuid,
        limit: Option<u32>,
    ) -> BoxFuture<'_, Vec<SignatureEnvelope>, Self::Error> {
        Box::pin(async move {
            self.inner
                .get_envelopes_by_creator(created_by, limit)
                .await
                .map_err(Into::into)
        })
    }

    fn get_envelopes_by_sender(
        &self,
        sent_by: Uuid,
        limit: Option<u32>,
    ) -> BoxFuture<'_, Vec<SignatureEnvelope>, Self::Error> {
        Box::pin(async move {
            self.inner
                .get_envelopes_by_sender(sent_by, limit)
                .await
                .map_err(Into::into)
        })
    }

    fn get_envelopes_by_provider(
        &self,
        provider: SignatureProvider,
        limit: Option<u32>,
    ) -> BoxFuture<'_, Vec<SignatureEnvelope>, Self::Error> {
        Box::pin(async move {
            self.inner
                .get_envelopes_by_provider(provider, limit)
                .await
                .map_err(Into::into)
        })
    }

    fn get_expiring_envelopes(
        &self,
        from_time: DateTime<Utc>,
        to_time: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<SignatureEnvelope>, Self::Error> {
        Box::pin(async move {
            self.inner
                .get_expiring_envelopes(from_time, to_time)
                .await
                .map_err(Into::into)
        })
    }

    fn get_completed_envelopes(
        &self,
        from_time: DateTime<Utc>,
        to_time: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<SignatureEnvelope>, Self::Error> {
        Box::pin(async move {
            self.inner
                .get_completed_envelopes(from_time, to_time)
                .await
                .map_err(Into::into)
        })
    }

    fn get_envelope_by_external_id(
        &self,
        external_envelope_id: &str,
        provider: SignatureProvider,
    ) -> BoxFuture<'_, Option<SignatureEnvelope>, Self::Error> {
        let external_envelope_id = external_envelope_id.to_string();
        Box::pin(async move {
            self.inner
                .get_envelope_by_external_id(&external_envelope_id, provider)
                .await
                .map_err(Into::into)
        })
    }

    fn sync_envelope_status(
        &self,
        envelope_id: Uuid,
    ) -> BoxFuture<'_, SignatureEnvelope, Self::Error> {
        Box::pin(async move {
            self.inner
                .sync_envelope_status(envelope_id)
                .await
                .map_err(Into::into)
        })
    }

    fn get_signing_url(
        &self,
        envelope_id: Uuid,
        signer_email: &str,
        signer_name: &str,
        client_user_id: &str,
    ) -> BoxFuture<'_, String, Self::Error> {
        let signer_email = signer_email.to_string();
        let signer_name = signer_name.to_string();
        let client_user_id = client_user_id.to_string();
        Box::pin(async move {
            self.inner
                .get_signing_url(envelope_id, &signer_email, &signer_name, &client_user_id)
                .await
                .map_err(Into::into)
        })
    }

    fn resend_envelope(&self, envelope_id: Uuid) -> BoxFuture<'_, (), Self::Error> {
        Box::pin(async move { self.inner.resend_envelope(envelope_id).await.map_err(Into::into) })
    }

    fn archive_envelope(&self, envelope_id: Uuid) -> BoxFuture<'_, SignatureEnvelope, Self::Error> {
        Box::pin(async move { self.inner.archive_envelope(envelope_id).await.map_err(Into::into) })
    }
}

/// A factory for the provider services the application was wired with.
pub trait ServiceFactory: Send + Sync {
    /// The active envelope port, if a provider is configured.
    fn envelope_port(&self) -> Option<DynEnvelopePort>;
}
