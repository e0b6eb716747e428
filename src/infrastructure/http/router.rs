use crate::infrastructure::http::controllers as api;
use crate::infrastructure::http::middleware::{require_auth, AppState};
use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn build_router(state: AppState) -> Router {
    // Build protected routes (require authentication)
    let protected = Router::new()
        .route("/api/auth/logout", post(api::auth::logout))
        .route("/api/auth/me", get(api::auth::me))
        .route("/api/teams/:id", get(api::teams::get_team))
        // User routes
        .route("/api/users", get(api::users::list_users))
        .route("/api/users/profile", patch(api::users::update_profile))
        .route("/api/users/:id", delete(api::users::delete_user))
        // Discussion routes
        .route("/api/discussions", get(api::discussions::list_discussions))
        .route("/api/discussions", post(api::discussions::create_discussion))
        .route("/api/discussions/:id", get(api::discussions::get_discussion))
        .route(
            "/api/discussions/:id",
            patch(api::discussions::update_discussion),
        )
        .route(
            "/api/discussions/:id",
            delete(api::discussions::delete_discussion),
        )
        // Comment routes
        .route("/api/comments", get(api::comments::list_comments))
        .route("/api/comments", post(api::comments::create_comment))
        .route("/api/comments/:id", delete(api::comments::delete_comment))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let public = Router::new()
        .route("/api/healthcheck", get(api::health::healthcheck))
        .route("/api/auth/register", post(api::auth::register))
        .route("/api/auth/login", post(api::auth::login))
        .route("/api/teams", get(api::teams::list_teams));

    Router::new()
        .merge(public)
        .merge(protected)
        .fallback(api::health::route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
