use serde::Serialize;

use crate::domain::{Attendance, Event, Guest};

/// REST DTO for an event catalogue entry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    pub id: String,
    pub name: String,
    pub date: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsvp_form: Option<String>,
}

impl From<&Event> for EventDto {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.clone(),
            name: event.name.clone(),
            date: event.date.clone(),
            location: event.location.clone(),
            rsvp_form: event.rsvp_form.clone(),
        }
    }
}

/// REST DTO for a guest list entry. Optional text fields render as empty
/// strings so the guest list table always has every column.
#[derive(Debug, Clone, Serialize)]
pub struct GuestDto {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub attending: Attendance,
    pub dietary: String,
    pub invitee: String,
    pub needs: String,
}

impl From<&Guest> for GuestDto {
    fn from(guest: &Guest) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            id: guest.id.clone(),
            name: guest.name.clone(),
            phone: text(&guest.phone),
            email: text(&guest.email),
            attending: guest.attending,
            dietary: text(&guest.dietary),
            invitee: text(&guest.invitee),
            needs: text(&guest.needs),
        }
    }
}
