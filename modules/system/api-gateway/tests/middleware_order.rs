#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Request id handling around the gate.

use std::sync::Arc;

use api_gateway::middleware::request_id::XRequestId;
use api_gateway::{ApiGateway, ApiGatewayConfig};
use async_trait::async_trait;
use authn_resolver_sdk::{
    AuthNResolverClient, AuthNResolverError, FederatedAssertion, SessionGrant, SignedToken,
};
use axum::body::Body;
use axum::extract::Extension;
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use eventhost_security::Identity;
use serde_json::json;
use tower::ServiceExt;

struct RejectAll;

#[async_trait]
impl AuthNResolverClient for RejectAll {
    async fn verify_credentials(&self, _: &str, _: &str) -> Result<Identity, AuthNResolverError> {
        Err(AuthNResolverError::InvalidCredentials)
    }

    async fn federated_sign_in(
        &self,
        _: &FederatedAssertion,
    ) -> Result<Identity, AuthNResolverError> {
        Err(AuthNResolverError::InvalidCredentials)
    }

    async fn issue_token(&self, _: &Identity) -> Result<SignedToken, AuthNResolverError> {
        Err(AuthNResolverError::Internal("unused".to_owned()))
    }

    async fn refresh_session(&self, _: &str) -> Result<Identity, AuthNResolverError> {
        Err(AuthNResolverError::InvalidToken("rejected".to_owned()))
    }

    async fn renew_session(&self, _: &str) -> Result<SessionGrant, AuthNResolverError> {
        Err(AuthNResolverError::InvalidToken("rejected".to_owned()))
    }
}

async fn handler(Extension(XRequestId(rid)): Extension<XRequestId>) -> impl IntoResponse {
    Json(json!({ "request_id": rid }))
}

fn app() -> Router {
    let gateway = ApiGateway::new(ApiGatewayConfig::default(), Arc::new(RejectAll)).unwrap();
    gateway.build_router(Router::new().route("/features", get(handler)))
}

#[tokio::test]
async fn request_id_is_generated_and_visible_to_handlers() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/features")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let header_rid = response.headers()["x-request-id"]
        .to_str()
        .unwrap()
        .to_owned();
    assert!(uuid::Uuid::parse_str(&header_rid).is_ok());

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["request_id"], header_rid);
}

#[tokio::test]
async fn client_request_id_is_propagated_on_rejections() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/reports")
                .header("x-request-id", "req-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()["x-request-id"], "req-123");
}
