//! HTTP route handlers

use crate::server::state::AppState;
use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::warn;

/// Health check endpoint handler
///
/// Reports `degraded` with 503 when the role store cannot be reached.
pub async fn health_check(data: web::Data<AppState>) -> HttpResponse {
    let (mut response, status, storage) = match data.rbac.store().health_check().await {
        Ok(()) => (HttpResponse::Ok(), "healthy", "ok"),
        Err(e) => {
            warn!("Role store health check failed: {}", e);
            (HttpResponse::ServiceUnavailable(), "degraded", "unavailable")
        }
    };

    response.json(json!({
        "status": status,
        "storage": storage,
        "club_type": data.rbac.club_type(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
