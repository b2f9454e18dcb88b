use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Router};
use eventhost_api::SessionCookieConfig;

use crate::api::rest::handlers;
use crate::domain::AccountsService;

/// Register the accounts REST routes onto `router`.
pub fn register_routes(
    router: Router,
    service: Arc<AccountsService>,
    cookies: Arc<SessionCookieConfig>,
) -> Router {
    let routes = Router::new()
        .route(
            "/api/auth/callback/credentials",
            post(handlers::sign_in_credentials),
        )
        .route(
            "/api/auth/callback/federated",
            post(handlers::sign_in_federated),
        )
        .route(
            "/api/auth/session",
            get(handlers::get_session).post(handlers::renew_session),
        )
        .route("/api/auth/signout", post(handlers::sign_out))
        .route("/api/set-role", post(handlers::set_role))
        .layer(Extension(service))
        .layer(Extension(cookies));

    router.merge(routes)
}
