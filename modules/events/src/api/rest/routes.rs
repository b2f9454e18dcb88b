use std::sync::Arc;

use axum::routing::get;
use axum::{Extension, Router};

use crate::api::rest::handlers;
use crate::domain::EventsService;

/// Register the events REST routes onto `router`.
pub fn register_routes(router: Router, service: Arc<EventsService>) -> Router {
    let routes = Router::new()
        .route("/api/events", get(handlers::list_events))
        .route("/api/events/{event_id}", get(handlers::list_attending_guests))
        .layer(Extension(service));

    router.merge(routes)
}
