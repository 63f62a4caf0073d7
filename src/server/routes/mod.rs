//! HTTP route modules
//!
//! Each module lists its endpoints once as [`ApiRoute`]s and declares the
//! permissions they need. Handlers and route bindings are both derived from
//! that list.

pub mod assignments;
pub mod audit;
pub mod permissions;
pub mod roles;

use crate::auth::rbac::PermissionRegistryBuilder;
use actix_web::http::Method;
use actix_web::{HttpResponse, Route, web};

/// Prefix of every API route; unbound paths below it are denied
pub const API_PREFIX: &str = "/api";

/// Manage roles and role assignments
pub const ROLES_MANAGE: &str = "roles.manage";
/// Read the denial audit trail
pub const AUDIT_VIEW: &str = "audit.view";

/// Standard API response structure
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiResponse<T> {
    /// Always `"success"`
    pub status: &'static str,
    /// Response data
    pub data: T,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            status: "success",
            data,
        }
    }

    /// Convert the API response to an HTTP 200 response
    pub fn to_http_response(&self) -> HttpResponse {
        HttpResponse::Ok().json(self)
    }
}

/// One API endpoint and the operation it performs
pub struct ApiRoute {
    pub method: Method,
    /// Pattern below [`API_PREFIX`]
    pub path: &'static str,
    pub resource: &'static str,
    pub operation: &'static str,
    handler: fn(Route) -> Route,
}

impl ApiRoute {
    pub fn new(
        method: Method,
        path: &'static str,
        resource: &'static str,
        operation: &'static str,
        handler: fn(Route) -> Route,
    ) -> Self {
        Self {
            method,
            path,
            resource,
            operation,
            handler,
        }
    }

    /// Full pattern including the API prefix
    pub fn pattern(&self) -> String {
        format!("{}{}", API_PREFIX, self.path)
    }

    fn into_route(self) -> Route {
        (self.handler)(web::method(self.method))
    }
}

/// Every API endpoint
pub fn api_routes() -> Vec<ApiRoute> {
    roles::routes()
        .into_iter()
        .chain(assignments::routes())
        .chain(permissions::routes())
        .chain(audit::routes())
        .collect()
}

/// Declare the permissions and route bindings of every API operation
pub fn declare_operations(builder: PermissionRegistryBuilder) -> PermissionRegistryBuilder {
    let builder = roles::declare(builder.protect_prefix(API_PREFIX));
    let builder = assignments::declare(builder);
    let builder = audit::declare(builder);

    api_routes().iter().fold(builder, |builder, route| {
        builder.bind_route(
            route.method.as_str(),
            route.pattern(),
            route.resource,
            route.operation,
        )
    })
}

/// Register every API route
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let scope = api_routes()
        .into_iter()
        .fold(web::scope(API_PREFIX), |scope, route| {
            let path = route.path;
            scope.route(path, route.into_route())
        });
    cfg.service(scope);
}
