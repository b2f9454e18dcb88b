use std::sync::Arc;

use axum::extract::Extension;
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use authn_resolver_sdk::SessionGrant;
use chrono::Utc;
use eventhost_api::{ApiResult, Problem, SessionCookieConfig};
use eventhost_security::SessionContext;
use tracing::{error, field::Empty, info};

use crate::api::rest::dto::{
    CredentialsSignInRequest, FederatedSignInRequest, MessageDto, SessionDto, SessionGrantDto,
    SetRoleRequest,
};
use crate::domain::{AccountsService, DomainError};

/// Sign in with email and password
#[tracing::instrument(skip(svc, cookies, req), fields(email = %req.email, request_id = Empty))]
pub async fn sign_in_credentials(
    Extension(svc): Extension<Arc<AccountsService>>,
    Extension(cookies): Extension<Arc<SessionCookieConfig>>,
    Json(req): Json<CredentialsSignInRequest>,
) -> ApiResult<Response> {
    let grant = svc.sign_in_with_credentials(&req.email, &req.password).await?;
    grant_response(&cookies, &grant)
}

/// Sign in with an assertion issued by a federated provider
#[tracing::instrument(
    skip(svc, cookies, req),
    fields(provider = %req.provider, request_id = Empty)
)]
pub async fn sign_in_federated(
    Extension(svc): Extension<Arc<AccountsService>>,
    Extension(cookies): Extension<Arc<SessionCookieConfig>>,
    Json(req): Json<FederatedSignInRequest>,
) -> ApiResult<Response> {
    let grant = svc.sign_in_federated(&req.into()).await?;
    grant_response(&cookies, &grant)
}

/// Current session as resolved by the gateway
pub async fn get_session(ctx: Option<Extension<SessionContext>>) -> Json<SessionDto> {
    let ctx = ctx.map(|Extension(ctx)| ctx).unwrap_or_default();
    Json(SessionDto::from(&ctx))
}

/// Reissue the session token, picking up any role change
#[tracing::instrument(skip_all, fields(request_id = Empty))]
pub async fn renew_session(
    Extension(svc): Extension<Arc<AccountsService>>,
    Extension(cookies): Extension<Arc<SessionCookieConfig>>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let token = cookies
        .extract_token(&headers)
        .ok_or(DomainError::InvalidSession)?;

    let grant = svc.renew(token).await?;
    info!(user_id = %grant.identity.id(), role = %grant.identity.role(), "session renewed");
    grant_response(&cookies, &grant)
}

/// Expire the session cookie
pub async fn sign_out(
    Extension(cookies): Extension<Arc<SessionCookieConfig>>,
) -> ApiResult<Response> {
    let cookie = cookies.clear_cookie().map_err(|e| cookie_error(&e))?;
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(MessageDto::new("Signed out")),
    )
        .into_response())
}

/// Assign a role to a user (admin only)
#[tracing::instrument(
    skip(svc, ctx, req),
    fields(user_id = %req.user_id, role = %req.role, request_id = Empty)
)]
pub async fn set_role(
    Extension(svc): Extension<Arc<AccountsService>>,
    ctx: Option<Extension<SessionContext>>,
    Json(req): Json<SetRoleRequest>,
) -> ApiResult<Json<MessageDto>> {
    let ctx = ctx.map(|Extension(ctx)| ctx).unwrap_or_default();
    let record = svc.set_role(&ctx, &req.user_id, &req.role).await?;

    let role = record.role.as_deref().unwrap_or(&req.role);
    Ok(Json(MessageDto::new(format!(
        "Set role to {role} for user {}",
        record.id
    ))))
}

fn grant_response(cookies: &SessionCookieConfig, grant: &SessionGrant) -> ApiResult<Response> {
    let cookie = cookies
        .set_cookie(&grant.token.token, grant.token.max_age_secs(Utc::now()))
        .map_err(|e| cookie_error(&e))?;
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(SessionGrantDto::from(grant)),
    )
        .into_response())
}

fn cookie_error(e: &header::InvalidHeaderValue) -> Problem {
    error!(error = %e, "failed to build session cookie");
    Problem::internal("Failed to build session cookie")
}
