use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tracing::info;

use crate::api::rest::routes::register_routes;
use crate::config::EventsConfig;
use crate::domain::EventsService;

/// Events module: event catalogue and guest lists.
pub struct EventsModule {
    service: Arc<EventsService>,
}

impl EventsModule {
    /// Build the module from its configuration section.
    ///
    /// # Errors
    /// Returns an error if the configured catalogue is invalid.
    pub fn from_config(cfg: &EventsConfig) -> anyhow::Result<Self> {
        let service = EventsService::from_config(cfg).context("invalid events configuration")?;
        info!(
            events = service.events().len(),
            guest_lists = cfg.guests.len(),
            "Events module initialized"
        );
        Ok(Self {
            service: Arc::new(service),
        })
    }

    /// Merge the events routes into `router`.
    #[must_use]
    pub fn register_rest(&self, router: Router) -> Router {
        register_routes(router, self.service.clone())
    }
}
