//! Role assignment endpoints

use super::{ApiResponse, ApiRoute, ROLES_MANAGE};
use crate::auth::rbac::{PermissionRegistryBuilder, Role};
use crate::server::AppState;
use crate::utils::error::Result;
use actix_web::http::Method;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeSet;

const RESOURCE: &str = "assignments";

pub fn declare(builder: PermissionRegistryBuilder) -> PermissionRegistryBuilder {
    builder.require_for_resource(RESOURCE, ROLES_MANAGE)
}

pub fn routes() -> Vec<ApiRoute> {
    vec![
        ApiRoute::new(Method::GET, "/users/{user_id}/roles", RESOURCE, "index", |r| {
            r.to(list_user_roles)
        }),
        ApiRoute::new(Method::DELETE, "/users/{user_id}/roles", RESOURCE, "revoke_all", |r| {
            r.to(remove_user)
        }),
        ApiRoute::new(
            Method::PUT,
            "/users/{user_id}/roles/{role_id}",
            RESOURCE,
            "assign",
            |r| r.to(assign_role),
        ),
        ApiRoute::new(
            Method::DELETE,
            "/users/{user_id}/roles/{role_id}",
            RESOURCE,
            "revoke",
            |r| r.to(revoke_role),
        ),
        ApiRoute::new(
            Method::GET,
            "/users/{user_id}/permissions",
            RESOURCE,
            "permissions",
            |r| r.to(user_permissions),
        ),
    ]
}

/// Directly assigned roles of a user
#[derive(Debug, Serialize)]
pub struct UserRoles {
    pub user_id: String,
    pub roles: Vec<Role>,
}

/// Effective permissions of a user and the roles they come from
#[derive(Debug, Serialize)]
pub struct UserPermissions {
    pub user_id: String,
    pub roles: Vec<String>,
    pub permissions: BTreeSet<String>,
}

async fn user_roles(data: &AppState, user_id: String) -> Result<HttpResponse> {
    let roles = data.rbac.roles_for_user(&user_id).await?;
    Ok(ApiResponse::success(UserRoles { user_id, roles }).to_http_response())
}

/// GET /api/users/{user_id}/roles
pub async fn list_user_roles(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    user_roles(&data, path.into_inner()).await
}

/// PUT /api/users/{user_id}/roles/{role_id}
pub async fn assign_role(
    data: web::Data<AppState>,
    path: web::Path<(String, i32)>,
) -> Result<HttpResponse> {
    let (user_id, role_id) = path.into_inner();
    data.rbac.assign_role(&user_id, role_id).await?;
    user_roles(&data, user_id).await
}

/// DELETE /api/users/{user_id}/roles/{role_id}
pub async fn revoke_role(
    data: web::Data<AppState>,
    path: web::Path<(String, i32)>,
) -> Result<HttpResponse> {
    let (user_id, role_id) = path.into_inner();
    data.rbac.revoke_role(&user_id, role_id).await?;
    user_roles(&data, user_id).await
}

/// DELETE /api/users/{user_id}/roles
///
/// Called by the platform when a user is removed.
pub async fn remove_user(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let user_id = path.into_inner();
    let removed = data.rbac.remove_user(&user_id).await?;
    Ok(ApiResponse::success(json!({ "user_id": user_id, "removed": removed })).to_http_response())
}

/// GET /api/users/{user_id}/permissions
pub async fn user_permissions(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let user_id = path.into_inner();
    let roles = data.rbac.effective_roles(&user_id).await?;
    let permissions = roles
        .iter()
        .flat_map(|role| role.permissions.iter().cloned())
        .collect();

    Ok(ApiResponse::success(UserPermissions {
        user_id,
        roles: roles.into_iter().map(|role| role.name).collect(),
        permissions,
    })
    .to_http_response())
}
