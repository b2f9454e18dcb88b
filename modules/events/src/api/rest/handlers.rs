use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Path};
use tracing::{debug, field::Empty};

use crate::api::rest::dto::{EventDto, GuestDto};
use crate::domain::EventsService;

/// List configured events
pub async fn list_events(Extension(svc): Extension<Arc<EventsService>>) -> Json<Vec<EventDto>> {
    Json(svc.events().iter().map(EventDto::from).collect())
}

/// Attending guests of one event
#[tracing::instrument(skip(svc), fields(request_id = Empty))]
pub async fn list_attending_guests(
    Extension(svc): Extension<Arc<EventsService>>,
    Path(event_id): Path<String>,
) -> Json<Vec<GuestDto>> {
    let guests: Vec<GuestDto> = svc.attending_guests(&event_id).map(GuestDto::from).collect();
    debug!(count = guests.len(), "listed attending guests");
    Json(guests)
}
