//! Health check endpoint

use serde::Serialize;

use crate::api::types::Envelope;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: String,
}

/// Liveness probe - returns 200 whenever the process is up.
///
/// Responds through the envelope like every other endpoint, so probes see
/// the same content type and shape as API consumers.
pub async fn health_check() -> Envelope<HealthResponse> {
    Envelope::new(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
