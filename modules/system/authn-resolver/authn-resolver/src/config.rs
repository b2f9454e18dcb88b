//! Configuration for the `AuthN` resolver.

use eventhost_security::Role;
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

/// Configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthNResolverConfig {
    /// Session token signing and lifetime.
    pub token: TokenConfig,

    /// Role assumed for users whose record carries no role, and written on first
    /// federated login.
    pub baseline_role: Role,

    /// First-login record creation policy.
    pub first_login: FirstLoginConfig,
}

impl Default for AuthNResolverConfig {
    fn default() -> Self {
        Self {
            token: TokenConfig::default(),
            baseline_role: Role::User,
            first_login: FirstLoginConfig::default(),
        }
    }
}

/// Session token settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TokenConfig {
    /// HMAC signing key. At least 32 bytes.
    #[serde(deserialize_with = "deserialize_secret")]
    pub secret: SecretString,

    /// Value of the `iss` claim; tokens from any other issuer are rejected.
    pub issuer: String,

    /// Token lifetime in seconds, at most one year.
    pub ttl_secs: u64,

    /// Clock skew tolerated when checking `exp`.
    pub leeway_secs: u64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: SecretString::from(String::new()),
            issuer: "eventhost".to_owned(),
            ttl_secs: 30 * 24 * 60 * 60,
            leeway_secs: 30,
        }
    }
}

/// What to do when the first-login user record cannot be written.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FirstLoginConfig {
    /// Fail the sign-in when `true`; otherwise log and continue with the
    /// baseline role.
    pub fail_on_persist_error: bool,
}

impl Default for FirstLoginConfig {
    fn default() -> Self {
        Self {
            fail_on_persist_error: true,
        }
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}
