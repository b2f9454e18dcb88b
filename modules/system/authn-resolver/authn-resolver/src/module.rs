//! `AuthN` resolver wiring.

use std::sync::Arc;

use authn_resolver_sdk::{AuthNResolverClient, IdentityProviderClient, UserStoreClient};
use tracing::info;

use crate::config::AuthNResolverConfig;
use crate::domain::{AuthNResolverLocalClient, Service};

/// Build the `AuthN` resolver client over the given identity provider and user
/// store.
///
/// # Errors
///
/// Fails if the token configuration is invalid (weak secret, empty issuer, zero
/// lifetime).
#[tracing::instrument(skip_all, fields(issuer = %cfg.token.issuer))]
pub fn build_client(
    cfg: &AuthNResolverConfig,
    provider: Arc<dyn IdentityProviderClient>,
    store: Arc<dyn UserStoreClient>,
) -> anyhow::Result<Arc<dyn AuthNResolverClient>> {
    let svc = Service::new(provider, store, cfg)
        .map_err(|e| anyhow::anyhow!("authn_resolver: {e}"))?;

    info!(
        baseline_role = %cfg.baseline_role,
        ttl_secs = cfg.token.ttl_secs,
        fail_on_persist_error = cfg.first_login.fail_on_persist_error,
        "Initialized authn_resolver"
    );

    Ok(Arc::new(AuthNResolverLocalClient::new(Arc::new(svc))))
}
