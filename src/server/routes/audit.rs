//! Denial audit endpoint

use super::{AUDIT_VIEW, ApiResponse, ApiRoute};
use crate::auth::rbac::PermissionRegistryBuilder;
use crate::server::AppState;
use crate::utils::error::{ClubhouseError, Result};
use actix_web::http::Method;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

const RESOURCE: &str = "audit";
const MAX_LIMIT: usize = 1000;

pub fn declare(builder: PermissionRegistryBuilder) -> PermissionRegistryBuilder {
    builder.require(RESOURCE, "denials", AUDIT_VIEW)
}

pub fn routes() -> Vec<ApiRoute> {
    vec![ApiRoute::new(Method::GET, "/audit/denials", RESOURCE, "denials", |r| {
        r.to(list_denials)
    })]
}

#[derive(Debug, Deserialize)]
pub struct DenialQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

/// GET /api/audit/denials?limit=N
pub async fn list_denials(
    data: web::Data<AppState>,
    query: web::Query<DenialQuery>,
) -> Result<HttpResponse> {
    if query.limit == 0 || query.limit > MAX_LIMIT {
        return Err(ClubhouseError::bad_request(format!(
            "limit must be between 1 and {}",
            MAX_LIMIT
        )));
    }

    let denials = data.audit.recent(query.limit);
    Ok(ApiResponse::success(denials).to_http_response())
}
