use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::Attendance;

/// Events module configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EventsConfig {
    pub events: Vec<EventConfig>,
    /// Guest lists keyed by event id. A list may exist for an event that has no
    /// catalogue entry.
    pub guests: BTreeMap<String, Vec<GuestConfig>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EventConfig {
    pub id: String,
    pub name: String,
    /// ISO date, e.g. `2025-06-01`.
    pub date: String,
    pub location: String,
    /// Name of the RSVP form used for this event.
    #[serde(default)]
    pub rsvp_form: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GuestConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub attending: Attendance,
    #[serde(default)]
    pub dietary: Option<String>,
    /// Invitee group, e.g. "Bride's Friends".
    #[serde(default)]
    pub invitee: Option<String>,
    #[serde(default)]
    pub needs: Option<String>,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn parses_guest_lists() {
        let cfg: EventsConfig = serde_json::from_value(serde_json::json!({
            "events": [
                {"id": "wedding123", "name": "Wedding", "date": "2025-06-01", "location": "Venue A"}
            ],
            "guests": {
                "wedding123": [
                    {"id": "1", "name": "Jane Doe", "attending": "yes"},
                    {"id": "2", "name": "John Smith", "attending": "no"}
                ]
            }
        }))
        .unwrap();

        assert_eq!(cfg.events.len(), 1);
        assert_eq!(cfg.guests["wedding123"][1].attending, Attendance::No);
    }

    #[test]
    fn unknown_attendance_is_rejected() {
        let result = serde_json::from_value::<GuestConfig>(serde_json::json!({
            "id": "1", "name": "Jane", "attending": "perhaps"
        }));
        assert!(result.is_err());
    }
}
