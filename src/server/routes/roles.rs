//! Role administration endpoints

use super::{ApiResponse, ApiRoute, ROLES_MANAGE};
use crate::auth::rbac::{NewRole, PermissionRegistryBuilder, RoleUpdate};
use crate::server::AppState;
use crate::utils::error::Result;
use actix_web::http::Method;
use actix_web::{HttpResponse, web};
use serde_json::json;

const RESOURCE: &str = "roles";

pub fn declare(builder: PermissionRegistryBuilder) -> PermissionRegistryBuilder {
    builder.require_for_resource(RESOURCE, ROLES_MANAGE)
}

pub fn routes() -> Vec<ApiRoute> {
    vec![
        ApiRoute::new(Method::GET, "/roles", RESOURCE, "index", |r| r.to(list_roles)),
        ApiRoute::new(Method::POST, "/roles", RESOURCE, "create", |r| r.to(create_role)),
        ApiRoute::new(Method::GET, "/roles/{id}", RESOURCE, "show", |r| r.to(get_role)),
        ApiRoute::new(Method::PUT, "/roles/{id}", RESOURCE, "update", |r| r.to(update_role)),
        ApiRoute::new(Method::DELETE, "/roles/{id}", RESOURCE, "destroy", |r| {
            r.to(delete_role)
        }),
    ]
}

/// GET /api/roles
pub async fn list_roles(data: web::Data<AppState>) -> Result<HttpResponse> {
    let roles = data.rbac.list_roles().await?;
    Ok(ApiResponse::success(roles).to_http_response())
}

/// POST /api/roles
pub async fn create_role(
    data: web::Data<AppState>,
    payload: web::Json<NewRole>,
) -> Result<HttpResponse> {
    let role = data.rbac.create_role(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(role)))
}

/// GET /api/roles/{id}
pub async fn get_role(data: web::Data<AppState>, path: web::Path<i32>) -> Result<HttpResponse> {
    let role = data.rbac.get_role(path.into_inner()).await?;
    Ok(ApiResponse::success(role).to_http_response())
}

/// PUT /api/roles/{id}
pub async fn update_role(
    data: web::Data<AppState>,
    path: web::Path<i32>,
    payload: web::Json<RoleUpdate>,
) -> Result<HttpResponse> {
    let role = data
        .rbac
        .update_role(path.into_inner(), payload.into_inner())
        .await?;
    Ok(ApiResponse::success(role).to_http_response())
}

/// DELETE /api/roles/{id}
pub async fn delete_role(data: web::Data<AppState>, path: web::Path<i32>) -> Result<HttpResponse> {
    let role_id = path.into_inner();
    data.rbac.delete_role(role_id).await?;
    Ok(ApiResponse::success(json!({ "id": role_id })).to_http_response())
}
