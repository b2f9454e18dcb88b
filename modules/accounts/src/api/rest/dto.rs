use std::fmt;

use authn_resolver_sdk::{FederatedAssertion, SessionGrant};
use chrono::{DateTime, Utc};
use eventhost_security::{Identity, SessionContext};
use serde::{Deserialize, Serialize};

/// REST DTO for the credentials sign-in callback
#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialsSignInRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for CredentialsSignInRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsSignInRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// REST DTO for the federated sign-in callback
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FederatedSignInRequest {
    pub provider: String,
    pub assertion: String,
}

impl From<FederatedSignInRequest> for FederatedAssertion {
    fn from(req: FederatedSignInRequest) -> Self {
        Self {
            provider: req.provider,
            assertion: req.assertion,
        }
    }
}

/// REST DTO for the signed-in user
#[derive(Debug, Clone, Serialize)]
pub struct IdentityDto {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub role: String,
}

impl From<&Identity> for IdentityDto {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id().to_owned(),
            email: identity.email().map(str::to_owned),
            name: identity.display_name().map(str::to_owned),
            role: identity.role().to_string(),
        }
    }
}

/// REST DTO returned by sign-in and renewal
#[derive(Debug, Clone, Serialize)]
pub struct SessionGrantDto {
    pub identity: IdentityDto,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl From<&SessionGrant> for SessionGrantDto {
    fn from(grant: &SessionGrant) -> Self {
        Self {
            identity: IdentityDto::from(&grant.identity),
            token: grant.token.token.clone(),
            expires_at: grant.token.expires_at,
        }
    }
}

/// REST DTO for the current session; `identity` is null when signed out
#[derive(Debug, Clone, Serialize)]
pub struct SessionDto {
    pub identity: Option<IdentityDto>,
}

impl From<&SessionContext> for SessionDto {
    fn from(ctx: &SessionContext) -> Self {
        Self {
            identity: ctx.identity().map(IdentityDto::from),
        }
    }
}

/// REST DTO for the role assignment endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SetRoleRequest {
    pub user_id: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageDto {
    pub message: String,
}

impl MessageDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
