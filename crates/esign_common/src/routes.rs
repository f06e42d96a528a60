// --- File: crates/esign_common/src/routes.rs ---

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{
    create_envelope_handler, delete_envelope_handler, exists_envelope_handler,
    get_by_external_id_handler, get_envelope_handler, list_envelopes_handler,
    send_envelope_handler, sync_envelope_handler, update_envelope_handler,
    void_envelope_handler,
};
use crate::services::DynEnvelopePort;

/// Creates a router with the envelope routes, backed by `port`.
pub fn routes(port: DynEnvelopePort) -> Router {
    Router::new()
        .route(
            "/esignature/envelopes",
            post(create_envelope_handler).get(list_envelopes_handler),
        )
        .route(
            "/esignature/envelopes/{id}",
            get(get_envelope_handler)
                .put(update_envelope_handler)
                .delete(delete_envelope_handler),
        )
        .route("/esignature/envelopes/{id}/exists", get(exists_envelope_handler))
        .route("/esignature/envelopes/{id}/send", post(send_envelope_handler))
        .route("/esignature/envelopes/{id}/void", post(void_envelope_handler))
        .route("/esignature/envelopes/{id}/sync", post(sync_envelope_handler))
        .route(
            "/esignature/envelopes/external/{external_id}",
            get(get_by_external_id_handler),
        )
        .with_state(port)
}
