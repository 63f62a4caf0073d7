//! Permission gate middleware
//!
//! Identifies the caller, asks the [`AuthorizationGate`] about the matched
//! operation and answers denials with 403 before any handler runs.
//!
//! [`AuthorizationGate`]: crate::auth::rbac::AuthorizationGate

use super::caller::Caller;
use crate::auth::rbac::GateDecision;
use crate::server::AppState;
use crate::utils::error::ClubhouseError;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{HttpMessage, web};
use futures::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::error;

/// Permission gate middleware for Actix-web
pub struct PermissionGate;

impl<S, B> Transform<S, ServiceRequest> for PermissionGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = PermissionGateService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(PermissionGateService {
            service: Rc::new(service),
        }))
    }
}

/// Service implementation for the permission gate
pub struct PermissionGateService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for PermissionGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                error!("Application state missing, refusing {}", req.path());
                let err = ClubhouseError::internal("Application state missing");
                return Ok(req.error_response(err).map_into_right_body());
            };

            // the router matches on the re-quoted path, not the raw URI
            let path = req.match_info().as_str().to_string();
            let caller = state.identity.identify(req.headers()).await;
            let decision = state
                .gate
                .authorize_route(req.method(), &path, caller.as_deref())
                .await;

            match decision {
                Ok(GateDecision::Allowed) => {
                    req.extensions_mut().insert(Caller::new(caller));
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Ok(GateDecision::Denied(reason)) => {
                    let err = ClubhouseError::from(reason);
                    Ok(req.error_response(err).map_into_right_body())
                }
                Err(e) => {
                    error!(
                        reason = e.reason_code(),
                        "Authorization of {} {} failed: {}",
                        req.method(),
                        path,
                        e
                    );
                    Ok(req.error_response(e).map_into_right_body())
                }
            }
        })
    }
}
