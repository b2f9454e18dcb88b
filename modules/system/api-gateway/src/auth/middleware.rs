//! Route authorization gate.

use std::sync::Arc;

use authn_resolver_sdk::AuthNResolverClient;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use eventhost_api::{Problem, SessionCookieConfig};
use eventhost_security::{Identity, SessionContext};
use http::{HeaderMap, HeaderValue, StatusCode, header};

use super::policy::{AccessDecision, AccessPolicy};

/// Shared state for the gate middleware.
#[derive(Clone)]
pub struct AuthState {
    pub authn_client: Arc<dyn AuthNResolverClient>,
    pub policy: Arc<AccessPolicy>,
    pub session: Arc<SessionCookieConfig>,
}

/// Gate every request against the access policy.
///
/// For each request:
/// 1. Verifies the session token if one is present (a bad token counts as none)
/// 2. Evaluates the policy
/// 3. On `Allow`, inserts a `SessionContext` and runs the handler; otherwise
///    answers with a redirect or a problem response
pub async fn authz_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    let identity = resolve_identity(&state, req.headers()).await;
    let decision = state.policy.evaluate(req.uri(), identity.as_ref());

    tracing::debug!(
        path = %req.uri().path(),
        user_id = identity.as_ref().map_or("-", Identity::id),
        role = identity.as_ref().map_or("-", |i| i.role().as_str()),
        decision = decision.as_str(),
        "access decision"
    );

    match decision {
        AccessDecision::Allow => {
            let ctx =
                identity.map_or_else(SessionContext::anonymous, SessionContext::authenticated);
            req.extensions_mut().insert(ctx);
            next.run(req).await
        }
        AccessDecision::RedirectToSignIn { callback_url } => {
            redirect(&state.policy.sign_in_location(&callback_url))
        }
        AccessDecision::RedirectToDefault { path } => redirect(&path),
        AccessDecision::Unauthenticated => {
            let mut response = Problem::unauthorized("Authentication required")
                .with_instance(req.uri().path())
                .into_response();
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
            response
        }
        AccessDecision::Forbidden => Problem::forbidden("Insufficient role")
            .with_instance(req.uri().path())
            .into_response(),
    }
}

async fn resolve_identity(state: &AuthState, headers: &HeaderMap) -> Option<Identity> {
    let token = state.session.extract_token(headers)?;
    match state.authn_client.refresh_session(token).await {
        Ok(identity) => Some(identity),
        Err(err) => {
            tracing::debug!(error = %err, "session token rejected; treating request as anonymous");
            None
        }
    }
}

fn redirect(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (StatusCode::FOUND, [(header::LOCATION, value)]).into_response(),
        Err(e) => {
            tracing::error!(location, error = %e, "redirect target is not a valid header value");
            Problem::internal("Failed to build redirect").into_response()
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn redirect_sets_location() {
        let response = redirect("/dashboard");

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/dashboard");
    }
}
