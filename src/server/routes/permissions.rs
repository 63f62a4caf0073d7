//! Permissions of the calling user

use super::{ApiResponse, ApiRoute};
use crate::server::AppState;
use crate::server::middleware::Caller;
use crate::utils::error::Result;
use actix_web::http::Method;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use std::collections::BTreeSet;

const RESOURCE: &str = "permissions";

/// No permission is declared: every caller may ask for their own set
pub fn routes() -> Vec<ApiRoute> {
    vec![ApiRoute::new(Method::GET, "/permissions/me", RESOURCE, "me", |r| {
        r.to(my_permissions)
    })]
}

#[derive(Debug, Serialize)]
pub struct CallerPermissions {
    pub user_id: Option<String>,
    pub permissions: BTreeSet<String>,
}

/// GET /api/permissions/me
///
/// Anonymous callers get an empty set.
pub async fn my_permissions(data: web::Data<AppState>, caller: Caller) -> Result<HttpResponse> {
    let permissions = match caller.user_id() {
        Some(user_id) => data.rbac.effective_permissions(user_id).await?,
        None => BTreeSet::new(),
    };

    Ok(ApiResponse::success(CallerPermissions {
        user_id: caller.into_inner(),
        permissions,
    })
    .to_http_response())
}
