//! HTTP integration tests
//!
//! Requests go through the real application: tracing, the permission gate,
//! the route handlers and a SQLite role store.

#[cfg(test)]
mod tests {
    use crate::common::assertions::{assert_error_body, string_list, success_data};
    use crate::common::database::TestDatabase;
    use crate::common::fixtures::{USER_HEADER, club_config, club_state, club_state_with};
    use clubhouse::auth::rbac::NewRole;
    use clubhouse::config::IdentityMode;
    use clubhouse::server::routes::api_routes;
    use clubhouse::server::{AppState, create_app};
    use clubhouse::storage::MemoryRoleStore;
    use actix_web::http::{Method, StatusCode};
    use actix_web::{HttpResponse, test, web};
    use serde_json::{Value, json};
    use std::sync::Arc;

    async fn export_report() -> HttpResponse {
        HttpResponse::Ok().json(json!({ "status": "success", "data": "report.csv" }))
    }

    async fn calendar() -> HttpResponse {
        HttpResponse::Ok().json(json!({ "status": "success", "data": [] }))
    }

    macro_rules! club_app {
        ($state:expr) => {
            test::init_service(
                create_app(web::Data::new($state))
                    .route("/api/finance/export", web::get().to(export_report))
                    .route("/api/events/calendar", web::get().to(calendar)),
            )
            .await
        };
    }

    async fn sqlite_state() -> AppState {
        club_state(TestDatabase::new().await.store()).await
    }

    fn get(uri: &str, user: Option<&str>) -> test::TestRequest {
        let req = test::TestRequest::get().uri(uri);
        match user {
            Some(user) => req.insert_header((USER_HEADER, user)),
            None => req,
        }
    }

    #[actix_web::test]
    async fn test_treasurer_scenario() {
        let state = sqlite_state().await;
        let treasurer = state
            .rbac
            .create_role(NewRole::new("Treasurer").with_permissions(["finance.view", "finance.export"]))
            .await
            .unwrap();
        state.rbac.assign_role("alice", treasurer.id).await.unwrap();
        let app = club_app!(state);

        let resp = test::call_service(&app, get("/api/finance/export", Some("alice")).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(success_data(&body), "report.csv");

        let resp = test::call_service(&app, get("/api/finance/export", Some("bob")).to_request()).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(resp).await;
        assert_error_body(&body, "Missing permission: finance.export");
    }

    #[actix_web::test]
    async fn test_anonymous_callers() {
        let app = club_app!(sqlite_state().await);

        let resp = test::call_service(&app, get("/api/events/calendar", None).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = test::call_service(&app, get("/api/finance/export", None).to_request()).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(resp).await;
        assert_error_body(&body, "Authentication required");

        let resp = test::call_service(&app, get("/health", None).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "healthy");
    }

    #[actix_web::test]
    async fn test_role_administration() {
        let app = club_app!(sqlite_state().await);

        let req = test::TestRequest::post()
            .uri("/api/roles")
            .insert_header((USER_HEADER, "admin"))
            .set_json(json!({ "name": "Treasurer", "permissions": ["finance.export"] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let role = success_data(&body);
        assert_eq!(role["club_type"], "general");
        let role_id = role["id"].as_i64().unwrap();

        let req = test::TestRequest::put()
            .uri(&format!("/api/users/alice/roles/{}", role_id))
            .insert_header((USER_HEADER, "admin"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(success_data(&body)["roles"][0]["name"], "Treasurer");

        let body: Value = test::call_and_read_body_json(
            &app,
            get("/api/users/alice/permissions", Some("admin")).to_request(),
        )
        .await;
        assert_eq!(string_list(&success_data(&body)["permissions"]), vec!["finance.export"]);

        let resp = test::call_service(&app, get("/api/finance/export", Some("alice")).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/roles/{}", role_id))
            .insert_header((USER_HEADER, "admin"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        // deleting the role removed alice's assignment
        let resp = test::call_service(&app, get("/api/finance/export", Some("alice")).to_request()).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = test::call_service(
            &app,
            get(&format!("/api/roles/{}", role_id), Some("admin")).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_role_routes_require_roles_manage() {
        let app = club_app!(sqlite_state().await);

        let req = test::TestRequest::post()
            .uri("/api/roles")
            .insert_header((USER_HEADER, "alice"))
            .set_json(json!({ "name": "Sneaky", "permissions": ["roles.manage"] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(resp).await;
        assert_error_body(&body, "Missing permission: roles.manage");

        let resp = test::call_service(&app, get("/api/roles", Some("admin")).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        let names: Vec<&str> = success_data(&body)
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Administrator"]);
    }

    #[actix_web::test]
    async fn test_validation_and_lookup_errors() {
        let app = club_app!(sqlite_state().await);

        let req = test::TestRequest::post()
            .uri("/api/roles")
            .insert_header((USER_HEADER, "admin"))
            .set_json(json!({ "name": "Administrator" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_error_body(
            &body,
            "Validation error: Role 'Administrator' already exists for club type 'general'",
        );

        let req = test::TestRequest::put()
            .uri("/api/users/stranger/roles/1")
            .insert_header((USER_HEADER, "admin"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_error_body(&body, "Not found: User stranger");

        let resp = test::call_service(&app, get("/api/roles/abc", Some("admin")).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "error");
    }

    #[actix_web::test]
    async fn test_user_removal_drops_assignments() {
        let state = sqlite_state().await;
        let treasurer = state
            .rbac
            .create_role(NewRole::new("Treasurer").with_permissions(["finance.export"]))
            .await
            .unwrap();
        state.rbac.assign_role("alice", treasurer.id).await.unwrap();
        let app = club_app!(state);

        let req = test::TestRequest::delete()
            .uri("/api/users/alice/roles")
            .insert_header((USER_HEADER, "admin"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(success_data(&body)["removed"], 1);

        let resp = test::call_service(&app, get("/api/finance/export", Some("alice")).to_request()).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_my_permissions() {
        let app = club_app!(sqlite_state().await);

        let body: Value =
            test::call_and_read_body_json(&app, get("/api/permissions/me", Some("admin")).to_request())
                .await;
        let data = success_data(&body);
        assert_eq!(data["user_id"], "admin");
        assert_eq!(string_list(&data["permissions"]), vec!["audit.view", "roles.manage"]);

        let body: Value =
            test::call_and_read_body_json(&app, get("/api/permissions/me", None).to_request()).await;
        let data = success_data(&body);
        assert_eq!(data["user_id"], Value::Null);
        assert!(string_list(&data["permissions"]).is_empty());
    }

    #[actix_web::test]
    async fn test_denials_are_audited() {
        let app = club_app!(sqlite_state().await);

        let resp = test::call_service(&app, get("/api/finance/export", Some("bob")).to_request()).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = test::call_service(&app, get("/api/audit/denials", Some("alice")).to_request()).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let body: Value = test::call_and_read_body_json(
            &app,
            get("/api/audit/denials?limit=10", Some("admin")).to_request(),
        )
        .await;
        let denials = success_data(&body).as_array().unwrap().clone();
        assert_eq!(denials.len(), 2);
        assert_eq!(denials[0]["operation"], "audit#denials");
        assert_eq!(denials[0]["user_id"], "alice");
        assert_eq!(denials[1]["permission"], "finance.export");
        assert_eq!(denials[1]["route"], "GET /api/finance/export");
        assert_eq!(denials[1]["reason"], "missing_permission");

        let resp = test::call_service(
            &app,
            get("/api/audit/denials?limit=0", Some("admin")).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    async fn forbidden_message<B: actix_web::body::MessageBody>(
        resp: actix_web::dev::ServiceResponse<B>,
    ) -> String {
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(resp).await;
        body["message"].as_str().unwrap().to_string()
    }

    #[actix_web::test]
    async fn test_encoded_paths_are_gated() {
        let app = club_app!(sqlite_state().await);

        let resp = test::call_service(&app, get("/api/%72oles", Some("bob")).to_request()).await;
        assert_eq!(forbidden_message(resp).await, "Missing permission: roles.manage");

        let resp =
            test::call_service(&app, get("/api/audit/%64enials", Some("bob")).to_request()).await;
        assert_eq!(forbidden_message(resp).await, "Missing permission: audit.view");

        let req = test::TestRequest::put()
            .uri("/api/users/bob/%72oles/1")
            .insert_header((USER_HEADER, "bob"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(forbidden_message(resp).await, "Missing permission: roles.manage");

        // bob did not manage to grant himself anything
        let resp = test::call_service(&app, get("/api/roles", Some("bob")).to_request()).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        // holders still reach the handler through an encoded path
        let resp = test::call_service(&app, get("/api/%72oles", Some("admin")).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_slash_variants_are_gated() {
        let state = sqlite_state().await;
        let audit = state.audit.clone();
        let app = club_app!(state);

        let resp = test::call_service(&app, get("/api/roles/", Some("bob")).to_request()).await;
        assert_eq!(forbidden_message(resp).await, "Missing permission: roles.manage");

        let resp = test::call_service(&app, get("/api//roles", Some("bob")).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_error_body(&body, "Not found: Route GET /api//roles");

        let resp = test::call_service(&app, get("/api/unknown", None).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let recent = audit.recent(1);
        assert_eq!(recent[0].route.as_deref(), Some("GET /api/unknown"));
        assert_eq!(recent[0].operation, None);
    }

    #[actix_web::test]
    async fn test_every_api_route_is_gated() {
        let state = sqlite_state().await;
        let registry = state.gate.registry().clone();
        let app = club_app!(state);

        for route in api_routes() {
            let path: String = route
                .pattern()
                .split('/')
                .map(|segment| if segment.starts_with('{') { "1" } else { segment })
                .collect::<Vec<_>>()
                .join("/");
            let operation = registry
                .operation_for(&route.method, &path)
                .unwrap_or_else(|| panic!("{} {} is not bound", route.method, path));
            let protected = !registry.requirements(operation).is_empty();

            let req = test::TestRequest::default()
                .method(route.method.clone())
                .uri(&path)
                .to_request();
            let resp = test::call_service(&app, req).await;
            if protected {
                assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{} {}", route.method, path);
            } else {
                assert_eq!(route.method, Method::GET);
                assert_eq!(resp.status(), StatusCode::OK, "{} {}", route.method, path);
            }
        }
    }

    #[actix_web::test]
    async fn test_bearer_token_identity() {
        let mut config = club_config();
        config.app.auth.identity = IdentityMode::Jwt;
        let state = club_state_with(config, Arc::new(MemoryRoleStore::new())).await;
        let admin_token = state.jwt.create_access_token("admin").unwrap();
        let app = club_app!(state);

        let req = test::TestRequest::get()
            .uri("/api/roles")
            .insert_header(("Authorization", format!("Bearer {}", admin_token)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        // the trusted header means nothing in jwt mode
        let resp = test::call_service(&app, get("/api/roles", Some("admin")).to_request()).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get()
            .uri("/api/roles")
            .insert_header(("Authorization", "Bearer not-a-token"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: Value = test::read_body_json(resp).await;
        assert_error_body(&body, "Authentication required");
    }
}
