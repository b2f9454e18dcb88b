use std::collections::{HashMap, HashSet};

use super::error::DomainError;
use super::model::{Event, Guest};
use crate::config::{EventConfig, EventsConfig, GuestConfig};

/// Immutable event catalogue built from configuration.
#[derive(Debug, Default)]
pub struct EventsService {
    events: Vec<Event>,
    guests: HashMap<String, Vec<Guest>>,
}

impl EventsService {
    /// Build the catalogue, rejecting duplicate ids and blank names.
    ///
    /// # Errors
    /// Returns [`DomainError`] describing the first invalid entry.
    pub fn from_config(cfg: &EventsConfig) -> Result<Self, DomainError> {
        let mut seen = HashSet::new();
        let mut events = Vec::with_capacity(cfg.events.len());
        for event in &cfg.events {
            if event.id.trim().is_empty() {
                return Err(DomainError::validation("events.id", "must not be empty"));
            }
            if !seen.insert(event.id.as_str()) {
                return Err(DomainError::DuplicateEvent(event.id.clone()));
            }
            events.push(to_event(event));
        }

        let mut guests = HashMap::with_capacity(cfg.guests.len());
        for (event_id, list) in &cfg.guests {
            let mut ids = HashSet::new();
            for guest in list {
                if guest.name.trim().is_empty() {
                    return Err(DomainError::validation(
                        format!("guests.{event_id}.name"),
                        "must not be empty",
                    ));
                }
                if !ids.insert(guest.id.as_str()) {
                    return Err(DomainError::DuplicateGuest {
                        event_id: event_id.clone(),
                        guest_id: guest.id.clone(),
                    });
                }
            }
            guests.insert(event_id.clone(), list.iter().map(to_guest).collect());
        }

        Ok(Self { events, guests })
    }

    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Guests of `event_id` who answered yes, in configuration order. Unknown
    /// events have no guests.
    pub fn attending_guests(&self, event_id: &str) -> impl Iterator<Item = &Guest> {
        self.guests
            .get(event_id)
            .into_iter()
            .flatten()
            .filter(|g| g.is_attending())
    }
}

fn to_event(cfg: &EventConfig) -> Event {
    Event {
        id: cfg.id.clone(),
        name: cfg.name.clone(),
        date: cfg.date.clone(),
        location: cfg.location.clone(),
        rsvp_form: cfg.rsvp_form.clone(),
    }
}

fn to_guest(cfg: &GuestConfig) -> Guest {
    Guest {
        id: cfg.id.clone(),
        name: cfg.name.clone(),
        phone: cfg.phone.clone(),
        email: cfg.email.clone(),
        attending: cfg.attending,
        dietary: cfg.dietary.clone(),
        invitee: cfg.invitee.clone(),
        needs: cfg.needs.clone(),
    }
}
