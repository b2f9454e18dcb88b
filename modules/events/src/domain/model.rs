use serde::{Deserialize, Serialize};

/// RSVP answer of a guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attendance {
    Yes,
    No,
    Maybe,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub date: String,
    pub location: String,
    pub rsvp_form: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guest {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub attending: Attendance,
    pub dietary: Option<String>,
    pub invitee: Option<String>,
    pub needs: Option<String>,
}

impl Guest {
    #[must_use]
    pub fn is_attending(&self) -> bool {
        self.attending == Attendance::Yes
    }
}
