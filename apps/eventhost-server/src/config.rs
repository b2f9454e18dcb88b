//! Layered application configuration: defaults, then an optional YAML file,
//! then `EVENTHOST__`-prefixed environment variables (`__` separates nesting,
//! e.g. `EVENTHOST__AUTHN__TOKEN__SECRET`).

use std::path::Path;

use anyhow::Context;
use api_gateway::ApiGatewayConfig;
use authn_resolver::AuthNResolverConfig;
use events::EventsConfig;
use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use serde::Deserialize;
use static_authn_plugin::config::StaticAuthNPluginConfig;

pub const ENV_PREFIX: &str = "EVENTHOST__";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// HTTP server and route gate.
    pub server: ApiGatewayConfig,
    pub logging: LoggingConfig,
    /// Session token signing and role resolution.
    pub authn: AuthNResolverConfig,
    /// Development identity provider and user store.
    pub static_authn: StaticAuthNPluginConfig,
    pub events: EventsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl AppConfig {
    /// Load configuration from `path` (if given) and the environment.
    ///
    /// # Errors
    /// Returns an error if the file does not exist or any layer fails to
    /// deserialize.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            anyhow::ensure!(
                path.is_file(),
                "config file not found: {}",
                path.display()
            );
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment
            .extract()
            .context("failed to load configuration")
    }
}
