//! Signed session tokens.
//!
//! Tokens are HS256 JWTs. The role claim is re-parsed into [`Role`] on every
//! decode so a token naming an unknown role never verifies.

use authn_resolver_sdk::SignedToken;
use chrono::{DateTime, Duration, Utc};
use eventhost_security::{Identity, Role};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use super::DomainError;
use crate::config::TokenConfig;

/// Minimum HMAC key length in bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// Longest accepted session lifetime (one year).
pub const MAX_TTL_SECS: u64 = 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    sub: String,
    role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    iss: String,
    iat: i64,
    exp: i64,
}

/// Encodes identities into session tokens and verifies them back.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    issuer: String,
    ttl: Duration,
}

impl TokenCodec {
    /// Build a codec from configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the secret is shorter than [`MIN_SECRET_LEN`],
    /// the issuer is empty or the lifetime is zero or above [`MAX_TTL_SECS`].
    pub fn new(cfg: &TokenConfig) -> Result<Self, DomainError> {
        let secret = cfg.secret.expose_secret().as_bytes();
        if secret.len() < MIN_SECRET_LEN {
            return Err(DomainError::InvalidConfig(format!(
                "token secret must be at least {MIN_SECRET_LEN} bytes"
            )));
        }
        if cfg.issuer.trim().is_empty() {
            return Err(DomainError::InvalidConfig(
                "token issuer must not be empty".to_owned(),
            ));
        }
        let ttl = Some(cfg.ttl_secs)
            .filter(|secs| (1..=MAX_TTL_SECS).contains(secs))
            .and_then(|secs| i64::try_from(secs).ok())
            .and_then(Duration::try_seconds)
            .ok_or_else(|| {
                DomainError::InvalidConfig(format!("invalid token ttl_secs {}", cfg.ttl_secs))
            })?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[cfg.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.leeway = cfg.leeway_secs;

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            issuer: cfg.issuer.clone(),
            ttl,
        })
    }

    /// Issue a token valid from now.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if signing fails.
    pub fn issue(&self, identity: &Identity) -> Result<SignedToken, DomainError> {
        self.issue_at(identity, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the expiry is not representable or signing fails.
    pub fn issue_at(
        &self,
        identity: &Identity,
        now: DateTime<Utc>,
    ) -> Result<SignedToken, DomainError> {
        let iat = now.timestamp();
        let exp = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| DomainError::Internal("session expiry out of range".to_owned()))?
            .timestamp();
        let claims = Claims {
            sub: identity.id().to_owned(),
            role: identity.role().as_str().to_owned(),
            email: identity.email().map(ToOwned::to_owned),
            name: identity.display_name().map(ToOwned::to_owned),
            iss: self.issuer.clone(),
            iat,
            exp,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| DomainError::Internal(format!("failed to sign session token: {e}")))?;
        let expires_at = DateTime::from_timestamp(exp, 0)
            .ok_or_else(|| DomainError::Internal(format!("token expiry {exp} out of range")))?;

        Ok(SignedToken { token, expires_at })
    }

    /// Verify a token and rebuild the identity it carries.
    ///
    /// # Errors
    ///
    /// - `TokenExpired` if `exp` is in the past (beyond the leeway)
    /// - `InvalidToken` for any other verification or claim failure
    pub fn verify(&self, token: &str) -> Result<Identity, DomainError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => DomainError::TokenExpired,
                _ => DomainError::InvalidToken(e.to_string()),
            }
        })?;
        let claims = data.claims;

        if claims.sub.is_empty() {
            return Err(DomainError::InvalidToken("empty subject".to_owned()));
        }
        let role = claims
            .role
            .parse::<Role>()
            .map_err(|e| DomainError::InvalidToken(e.to_string()))?;

        Ok(Identity::builder()
            .id(claims.sub)
            .email(claims.email)
            .display_name(claims.name)
            .role(role)
            .build())
    }
}
