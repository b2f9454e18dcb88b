//! Configuration for the static `AuthN` plugin.

use eventhost_security::Role;
use serde::Deserialize;

/// Plugin configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticAuthNPluginConfig {
    /// Email/password users. Each one also seeds a user store record.
    pub users: Vec<StaticUser>,

    /// Federated assertions accepted verbatim.
    pub federated: Vec<FederatedMapping>,
}

/// A password user.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticUser {
    pub uid: String,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Argon2 PHC string.
    pub password_hash: String,
    /// Role written to the seeded record. Omitted means the record carries no
    /// role and the resolver's baseline applies.
    #[serde(default)]
    pub role: Option<Role>,
}

/// Maps a federated assertion to the provider-side user it stands for.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FederatedMapping {
    pub provider: String,
    pub assertion: String,
    pub uid: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}
