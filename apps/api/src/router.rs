use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post, put};
use paydesk_core::AppError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let rbac_routes = Router::new()
        .route(
            "/api/rbac/roles",
            get(handlers::rbac::list_roles_handler).post(handlers::rbac::create_role_handler),
        )
        .route(
            "/api/rbac/roles/{role_id}",
            put(handlers::rbac::update_role_handler)
                .delete(handlers::rbac::delete_role_handler),
        )
        .route(
            "/api/rbac/permissions",
            get(handlers::rbac::list_permissions_handler)
                .post(handlers::rbac::create_permission_handler),
        )
        .route(
            "/api/rbac/permissions/{permission_id}",
            put(handlers::rbac::update_permission_handler)
                .delete(handlers::rbac::delete_permission_handler),
        )
        .route(
            "/api/rbac/permission-groups",
            get(handlers::rbac::list_permission_groups_handler)
                .post(handlers::rbac::create_permission_group_handler),
        )
        .route(
            "/api/rbac/permission-groups/{group_id}",
            put(handlers::rbac::update_permission_group_handler)
                .delete(handlers::rbac::delete_permission_group_handler),
        )
        .route(
            "/api/rbac/user-roles",
            get(handlers::rbac::list_user_role_mappings_handler),
        )
        .route(
            "/api/rbac/roles-with-permissions",
            get(handlers::rbac::roles_with_permissions_handler),
        )
        .route(
            "/api/rbac/sync/{collection}",
            post(handlers::rbac::sync_collection_handler),
        );

    let session_routes = Router::new()
        .route(
            "/api/session/user",
            post(handlers::session::set_session_user_handler)
                .delete(handlers::session::clear_session_user_handler),
        )
        .route(
            "/api/session/access",
            get(handlers::session::session_access_handler),
        );

    let cors_layer = CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(frontend_url)
                .map_err(|error| AppError::Internal(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]);

    Ok(Router::new()
        .route("/api/health", get(handlers::health::health_handler))
        .merge(rbac_routes)
        .merge(session_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state))
}
