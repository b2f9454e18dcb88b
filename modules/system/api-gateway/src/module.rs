//! API Gateway module definition
//!
//! Owns the HTTP server: compiles the access policy, wraps the application
//! routes in the gate and the ambient middleware, and serves until cancelled.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::Router;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::get;
use tokio_util::sync::CancellationToken;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::field::Empty;

use authn_resolver_sdk::AuthNResolverClient;
use eventhost_api::SessionCookieConfig;

use crate::auth::{self, AccessPolicy};
use crate::config::ApiGatewayConfig;
use crate::middleware;
use crate::web;

/// API Gateway: HTTP host plus the route authorization gate.
pub struct ApiGateway {
    config: ApiGatewayConfig,
    policy: Arc<AccessPolicy>,
    authn_client: Arc<dyn AuthNResolverClient>,
}

impl ApiGateway {
    /// Compile the access policy and create the gateway.
    ///
    /// # Errors
    /// Returns an error if the route tables do not compile.
    pub fn new(
        config: ApiGatewayConfig,
        authn_client: Arc<dyn AuthNResolverClient>,
    ) -> Result<Self> {
        let policy = AccessPolicy::from_config(&config.routes, &config.sign_in_path)
            .map_err(|e| anyhow::anyhow!("api_gateway: invalid route policy: {e}"))?;

        tracing::info!(
            bypass = config.routes.bypass.len(),
            public = config.routes.public.len(),
            sign_in_path = %config.sign_in_path,
            "Route policy compiled"
        );

        Ok(Self {
            config,
            policy: Arc::new(policy),
            authn_client,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ApiGatewayConfig {
        &self.config
    }

    #[must_use]
    pub fn policy(&self) -> Arc<AccessPolicy> {
        self.policy.clone()
    }

    #[must_use]
    pub fn session_cookie(&self) -> &SessionCookieConfig {
        &self.config.session
    }

    /// Apply all middleware layers to a router (request ID, tracing, timeout, gate).
    pub(crate) fn apply_middleware_stack(&self, mut router: Router) -> Router {
        // `Router::layer` wraps everything added so far: the last layer added runs
        // first on the request path.
        //
        // Request execution order (outermost -> innermost):
        // SetRequestId -> PropagateRequestId -> Trace -> push_req_id_to_extensions
        // -> Timeout -> Gate -> Router

        // 5) Gate
        let auth_state = auth::AuthState {
            authn_client: self.authn_client.clone(),
            policy: self.policy.clone(),
            session: Arc::new(self.config.session.clone()),
        };
        router = router.layer(from_fn_with_state(auth_state, auth::authz_middleware));

        // 4) Timeout
        router = router.layer(TimeoutLayer::with_status_code(
            http::StatusCode::GATEWAY_TIMEOUT,
            Duration::from_secs(self.config.request_timeout_secs),
        ));

        // 3) Record request_id into span + extensions (inner to Trace so the span exists)
        router = router.layer(from_fn(middleware::request_id::push_req_id_to_extensions));

        // 2) Trace
        router = router.layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &http::Request<axum::body::Body>| {
                    tracing::info_span!(
                        "http_request",
                        method = %req.method(),
                        uri = %req.uri().path(),
                        version = ?req.version(),
                        module = "api_gateway",
                        request_id = Empty,
                        status = Empty,
                        latency_ms = Empty,
                    )
                })
                .on_response(
                    |res: &http::Response<axum::body::Body>,
                     latency: Duration,
                     span: &tracing::Span| {
                        span.record("status", res.status().as_u16());
                        span.record("latency_ms", latency.as_millis());
                    },
                ),
        );

        // 1) Request ID handling
        let x_request_id = middleware::request_id::header();
        router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
        router = router.layer(SetRequestIdLayer::new(
            x_request_id,
            middleware::request_id::MakeReqId,
        ));

        router
    }

    /// Build the HTTP router: built-in routes, application routes, a problem
    /// response fallback, all behind the gate.
    pub fn build_router(&self, routes: Router) -> Router {
        let router = Router::new()
            .route("/health", get(web::health_check))
            .merge(routes)
            .fallback(web::not_found);

        self.apply_middleware_stack(router)
    }

    /// Parse bind address from configuration string.
    fn parse_bind_address(bind_addr: &str) -> Result<SocketAddr> {
        bind_addr
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind address '{bind_addr}': {e}"))
    }

    /// Bind and serve `router` until `cancel` fires.
    ///
    /// # Errors
    /// Returns an error if the address is invalid, binding fails or the server
    /// stops abnormally.
    pub async fn serve(&self, router: Router, cancel: CancellationToken) -> Result<()> {
        let addr = Self::parse_bind_address(&self.config.bind_addr)?;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("HTTP server bound on {}", addr);

        let shutdown = async move {
            cancel.cancelled().await;
            tracing::info!("HTTP server shutting down gracefully (cancellation)");
        };

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| anyhow::anyhow!(e))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn parse_bind_address() {
        assert!(ApiGateway::parse_bind_address("127.0.0.1:0").is_ok());
        assert!(ApiGateway::parse_bind_address("localhost").is_err());
    }
}
