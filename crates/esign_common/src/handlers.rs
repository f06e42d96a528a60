// --- File: crates/esign_common/src/handlers.rs ---

// Thin HTTP handlers over whichever envelope port the backend was wired with.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use tracing::info;
use uuid::Uuid;

use crate::error::{not_found, validation_error, EsignError};
use crate::models::{
    CreateEnvelopeRequest, ExistsResponse, ExternalLookupQuery, ListEnvelopesQuery,
    SendEnvelopeRequest, SignatureEnvelope, SignatureProvider, UpdateEnvelopeRequest,
    VoidEnvelopeRequest,
};
use crate::services::DynEnvelopePort;

type JsonResult<T> = Result<Json<T>, EsignError>;

/// Handler to create a new envelope at the provider.
pub async fn create_envelope_handler(
    State(port): State<DynEnvelopePort>,
    Json(payload): Json<CreateEnvelopeRequest>,
) -> Result<(StatusCode, Json<SignatureEnvelope>), EsignError> {
    if payload.title.trim().is_empty() {
        return Err(validation_error("title must not be empty"));
    }

    let mut envelope = SignatureEnvelope::new(payload.title, payload.description);
    if let Some(id) = payload.id {
        envelope = envelope.with_id(id);
    }

    let created = port.create_envelope(envelope).await?;
    info!(
        "Created envelope {:?} (external {:?})",
        created.id, created.external_envelope_id
    );
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_envelopes_handler(
    State(port): State<DynEnvelopePort>,
    Query(query): Query<ListEnvelopesQuery>,
) -> JsonResult<Vec<SignatureEnvelope>> {
    let envelopes = port.get_envelopes_by_status(query.status, query.limit).await?;
    Ok(Json(envelopes))
}

pub async fn get_envelope_handler(
    State(port): State<DynEnvelopePort>,
    Path(id): Path<Uuid>,
) -> JsonResult<SignatureEnvelope> {
    Ok(Json(port.get_envelope(id).await?))
}

/// Handler to change title and description of an existing envelope.
pub async fn update_envelope_handler(
    State(port): State<DynEnvelopePort>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEnvelopeRequest>,
) -> JsonResult<SignatureEnvelope> {
    let mut current = port.get_envelope(id).await?;
    current.title = payload.title;
    current.description = payload.description;
    Ok(Json(port.update_envelope(current).await?))
}

pub async fn delete_envelope_handler(
    State(port): State<DynEnvelopePort>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, EsignError> {
    port.delete_envelope(id).await?;
    info!("Deleted envelope {}", id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn exists_envelope_handler(
    State(port): State<DynEnvelopePort>,
    Path(id): Path<Uuid>,
) -> JsonResult<ExistsResponse> {
    let exists = port.exists_envelope(id).await?;
    Ok(Json(ExistsResponse { id, exists }))
}

pub async fn send_envelope_handler(
    State(port): State<DynEnvelopePort>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SendEnvelopeRequest>,
) -> JsonResult<SignatureEnvelope> {
    Ok(Json(port.send_envelope(id, payload.sent_by).await?))
}

pub async fn void_envelope_handler(
    State(port): State<DynEnvelopePort>,
    Path(id): Path<Uuid>,
    Json(payload): Json<VoidEnvelopeRequest>,
) -> JsonResult<SignatureEnvelope> {
    if payload.reason.trim().is_empty() {
        return Err(validation_error("void reason must not be empty"));
    }
    Ok(Json(
        port.void_envelope(id, &payload.reason, payload.voided_by)
            .await?,
    ))
}

pub async fn sync_envelope_handler(
    State(port): State<DynEnvelopePort>,
    Path(id): Path<Uuid>,
) -> JsonResult<SignatureEnvelope> {
    Ok(Json(port.sync_envelope_status(id).await?))
}

/// Reverse lookup by the provider's envelope id.
pub async fn get_by_external_id_handler(
    State(port): State<DynEnvelopePort>,
    Path(external_id): Path<String>,
    Query(query): Query<ExternalLookupQuery>,
) -> JsonResult<SignatureEnvelope> {
    let provider = query.provider.unwrap_or(SignatureProvider::DocuSign);
    port.get_envelope_by_external_id(&external_id, provider)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(format!("no envelope with external id {}", external_id)))
}
