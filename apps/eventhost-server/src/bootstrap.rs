//! Builds the module graph: identity provider and user store, `AuthN`
//! resolver, gateway, then the REST modules behind it.

use std::sync::Arc;

use accounts::AccountsModule;
use api_gateway::ApiGateway;
use axum::Router;
use events::EventsModule;
use static_authn_plugin::StaticAuthNPlugin;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::AppConfig;

/// A fully wired application ready to serve.
pub struct App {
    gateway: ApiGateway,
    router: Router,
}

impl App {
    /// The gated router, for serving or for in-process requests.
    #[must_use]
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until `cancel` fires.
    ///
    /// # Errors
    /// Returns an error if the server cannot bind or stops abnormally.
    pub async fn serve(self, cancel: CancellationToken) -> anyhow::Result<()> {
        self.gateway.serve(self.router, cancel).await
    }
}

/// Validate configuration and wire every module.
///
/// # Errors
/// Returns an error naming the first module whose configuration is invalid.
pub fn build_app(cfg: &AppConfig) -> anyhow::Result<App> {
    let plugin = StaticAuthNPlugin::from_config(&cfg.static_authn)?;
    let store = plugin.user_store();
    let authn =
        authn_resolver::build_client(&cfg.authn, plugin.identity_provider(), store.clone())?;

    let gateway = ApiGateway::new(cfg.server.clone(), authn.clone())?;
    let cookies = Arc::new(gateway.session_cookie().clone());

    let accounts = AccountsModule::new(authn, store, cookies);
    let events = EventsModule::from_config(&cfg.events)?;

    let routes = events.register_rest(accounts.register_rest(Router::new()));
    let router = gateway.build_router(routes);

    info!(bind_addr = %cfg.server.bind_addr, "Application wired");
    Ok(App { gateway, router })
}
