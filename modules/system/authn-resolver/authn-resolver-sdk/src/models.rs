//! Models for the `AuthN` resolver module.

use chrono::{DateTime, Utc};
use eventhost_security::{Identity, Role, RoleParseError};
use serde::{Deserialize, Serialize};

/// An assertion issued by a federated identity provider (e.g. a Google ID token).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederatedAssertion {
    /// Provider name, e.g. `"google"`.
    pub provider: String,
    /// Opaque assertion string issued by the provider.
    pub assertion: String,
}

/// A user as reported by the identity provider after successful verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderUser {
    /// Stable provider-issued uid; also the user store key.
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

/// A user document as held by the user store.
///
/// The role is kept as the raw stored string; consumers parse it with
/// [`UserRecord::parsed_role`] so that an unknown value fails closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Record written on a user's first login.
    #[must_use]
    pub fn first_login(user: &ProviderUser, role: Role, created_at: DateTime<Utc>) -> Self {
        Self {
            id: user.uid.clone(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            role: Some(role.as_str().to_owned()),
            created_at,
        }
    }

    /// Parse the stored role. `None` when the record carries no role.
    #[must_use]
    pub fn parsed_role(&self) -> Option<Result<Role, RoleParseError>> {
        self.role.as_deref().map(str::parse)
    }
}

/// A signed session token together with its expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl SignedToken {
    /// Seconds until expiry, clamped at zero. Used as the cookie `Max-Age`.
    #[must_use]
    pub fn max_age_secs(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }
}

/// Result of a successful sign-in or renewal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionGrant {
    pub identity: Identity,
    pub token: SignedToken,
}
