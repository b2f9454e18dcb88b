use std::sync::Arc;

use authn_resolver_sdk::{AuthNResolverClient, UserStoreClient};
use axum::Router;
use eventhost_api::SessionCookieConfig;
use tracing::info;

use crate::api::rest::routes::register_routes;
use crate::domain::AccountsService;

/// Accounts module: sign-in callbacks, session endpoints and role administration.
pub struct AccountsModule {
    service: Arc<AccountsService>,
    cookies: Arc<SessionCookieConfig>,
}

impl AccountsModule {
    pub fn new(
        authn: Arc<dyn AuthNResolverClient>,
        store: Arc<dyn UserStoreClient>,
        cookies: Arc<SessionCookieConfig>,
    ) -> Self {
        info!("Initializing accounts module");
        Self {
            service: Arc::new(AccountsService::new(authn, store)),
            cookies,
        }
    }

    #[must_use]
    pub fn service(&self) -> &Arc<AccountsService> {
        &self.service
    }

    /// Merge the accounts routes into `router`.
    #[must_use]
    pub fn register_rest(&self, router: Router) -> Router {
        register_routes(router, self.service.clone(), self.cookies.clone())
    }
}
