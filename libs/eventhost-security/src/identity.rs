use serde::{Deserialize, Serialize};

use crate::role::Role;

/// `Identity` is the authenticated user resolved for a session.
///
/// Built by the `AuthN` Resolver after credential verification and embedded in the
/// signed session token. It never changes for the lifetime of that token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque user id issued by the identity provider.
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
    role: Role,
}

impl Identity {
    /// Create a new `Identity` builder
    #[must_use]
    pub fn builder() -> IdentityBuilder {
        IdentityBuilder::default()
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Default)]
pub struct IdentityBuilder {
    id: Option<String>,
    email: Option<String>,
    display_name: Option<String>,
    role: Option<Role>,
}

impl IdentityBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: Option<String>) -> Self {
        self.email = email;
        self
    }

    #[must_use]
    pub fn display_name(mut self, display_name: Option<String>) -> Self {
        self.display_name = display_name;
        self
    }

    #[must_use]
    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Build the identity. A missing role falls back to [`Role::Guest`], the least
    /// privileged one.
    #[must_use]
    pub fn build(self) -> Identity {
        Identity {
            id: self.id.unwrap_or_default(),
            email: self.email,
            display_name: self.display_name,
            role: self.role.unwrap_or(Role::Guest),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn builder_full() {
        let identity = Identity::builder()
            .id("uid-123")
            .email(Some("jane@example.com".to_owned()))
            .display_name(Some("Jane Doe".to_owned()))
            .role(Role::Organizer)
            .build();

        assert_eq!(identity.id(), "uid-123");
        assert_eq!(identity.email(), Some("jane@example.com"));
        assert_eq!(identity.display_name(), Some("Jane Doe"));
        assert_eq!(identity.role(), Role::Organizer);
        assert!(!identity.is_admin());
    }

    #[test]
    fn builder_minimal_defaults_to_guest() {
        let identity = Identity::builder().id("uid-1").build();

        assert_eq!(identity.role(), Role::Guest);
        assert!(identity.email().is_none());
        assert!(identity.display_name().is_none());
    }

    #[test]
    fn serialize_skips_absent_fields() {
        let identity = Identity::builder().id("uid-9").role(Role::Admin).build();

        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json, serde_json::json!({"id": "uid-9", "role": "admin"}));

        let back: Identity = serde_json::from_value(json).unwrap();
        assert_eq!(back, identity);
        assert!(back.is_admin());
    }
}
