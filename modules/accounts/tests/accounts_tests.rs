#![allow(clippy::unwrap_used, clippy::expect_used)]

//! REST behaviour of the accounts endpoints without the gateway in front.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use accounts::AccountsModule;
use async_trait::async_trait;
use authn_resolver_sdk::{
    AuthNResolverClient, AuthNResolverError, FederatedAssertion, SessionGrant, SignedToken,
    UserRecord, UserStoreClient, UserStoreError,
};
use axum::body::Body;
use axum::extract::Extension;
use axum::http::{Request, StatusCode, header};
use axum::Router;
use chrono::{Duration, Utc};
use eventhost_api::SessionCookieConfig;
use eventhost_security::{Identity, Role, SessionContext};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Accepts `jane@example.com` / `correct-horse`. Tokens are `token-<uid>`.
struct FakeAuthN {
    store: Arc<FakeStore>,
}

impl FakeAuthN {
    async fn identity_for(&self, uid: &str) -> Result<Identity, AuthNResolverError> {
        let record = self
            .store
            .get_user(uid)
            .await
            .map_err(|e| AuthNResolverError::ServiceUnavailable(e.to_string()))?
            .ok_or(AuthNResolverError::InvalidCredentials)?;
        let role = record
            .parsed_role()
            .transpose()
            .map_err(|_| AuthNResolverError::InvalidCredentials)?
            .unwrap_or(Role::Guest);
        Ok(Identity::builder()
            .id(record.id)
            .email(record.email)
            .role(role)
            .build())
    }
}

#[async_trait]
impl AuthNResolverClient for FakeAuthN {
    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, AuthNResolverError> {
        if email == "jane@example.com" && password == "correct-horse" {
            self.identity_for("uid-jane").await
        } else {
            Err(AuthNResolverError::InvalidCredentials)
        }
    }

    async fn federated_sign_in(
        &self,
        assertion: &FederatedAssertion,
    ) -> Result<Identity, AuthNResolverError> {
        if assertion.provider == "google" && assertion.assertion == "assert-jane" {
            self.identity_for("uid-jane").await
        } else {
            Err(AuthNResolverError::InvalidCredentials)
        }
    }

    async fn issue_token(&self, identity: &Identity) -> Result<SignedToken, AuthNResolverError> {
        Ok(SignedToken {
            token: format!("token-{}", identity.id()),
            expires_at: Utc::now() + Duration::hours(1),
        })
    }

    async fn refresh_session(&self, token: &str) -> Result<Identity, AuthNResolverError> {
        let uid = token
            .strip_prefix("token-")
            .ok_or_else(|| AuthNResolverError::InvalidToken("bad token".to_owned()))?;
        self.identity_for(uid).await
    }

    async fn renew_session(&self, token: &str) -> Result<SessionGrant, AuthNResolverError> {
        let identity = self.refresh_session(token).await?;
        let token = self.issue_token(&identity).await?;
        Ok(SessionGrant { identity, token })
    }
}

#[derive(Default)]
struct FakeStore {
    users: Mutex<HashMap<String, UserRecord>>,
    fail_writes: bool,
}

impl FakeStore {
    fn with_user(self, id: &str, role: Role) -> Self {
        self.users.lock().unwrap().insert(
            id.to_owned(),
            UserRecord {
                id: id.to_owned(),
                email: Some("jane@example.com".to_owned()),
                display_name: None,
                role: Some(role.to_string()),
                created_at: Utc::now(),
            },
        );
        self
    }
}

#[async_trait]
impl UserStoreClient for FakeStore {
    async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, UserStoreError> {
        Ok(self.users.lock().unwrap().get(user_id).cloned())
    }

    async fn merge_user(&self, record: UserRecord) -> Result<UserRecord, UserStoreError> {
        let mut users = self.users.lock().unwrap();
        Ok(users.entry(record.id.clone()).or_insert(record).clone())
    }

    async fn set_role(&self, user_id: &str, role: Role) -> Result<UserRecord, UserStoreError> {
        if self.fail_writes {
            return Err(UserStoreError::Unavailable("store offline".to_owned()));
        }
        let mut users = self.users.lock().unwrap();
        let record = users
            .entry(user_id.to_owned())
            .or_insert_with(|| UserRecord {
                id: user_id.to_owned(),
                email: None,
                display_name: None,
                role: None,
                created_at: Utc::now(),
            });
        record.role = Some(role.to_string());
        Ok(record.clone())
    }
}

fn app_with(store: FakeStore, ctx: SessionContext) -> (Router, Arc<FakeStore>) {
    let store = Arc::new(store);
    let authn = Arc::new(FakeAuthN {
        store: store.clone(),
    });
    let module = AccountsModule::new(
        authn,
        store.clone(),
        Arc::new(SessionCookieConfig::default()),
    );
    let router = module.register_rest(Router::new()).layer(Extension(ctx));
    (router, store)
}

fn app(ctx: SessionContext) -> Router {
    app_with(FakeStore::default().with_user("uid-jane", Role::Usher), ctx).0
}

fn admin() -> SessionContext {
    SessionContext::authenticated(Identity::builder().id("uid-admin").role(Role::Admin).build())
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn credentials_sign_in_sets_session_cookie() {
    let response = app(SessionContext::anonymous())
        .oneshot(post_json(
            "/api/auth/callback/credentials",
            &json!({"email": "jane@example.com", "password": "correct-horse"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("eventhost.session-token=token-uid-jane;"));
    assert!(cookie.contains("HttpOnly"));

    let json = body_json(response).await;
    assert_eq!(json["identity"]["id"], "uid-jane");
    assert_eq!(json["identity"]["role"], "usher");
    assert_eq!(json["token"], "token-uid-jane");
}

#[tokio::test]
async fn wrong_password_is_generic_401() {
    let response = app(SessionContext::anonymous())
        .oneshot(post_json(
            "/api/auth/callback/credentials",
            &json!({"email": "jane@example.com", "password": "nope"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    assert_eq!(body_json(response).await["detail"], "Invalid email or password");
}

#[tokio::test]
async fn empty_credentials_are_generic_401() {
    for body in [
        json!({"email": "", "password": "correct-horse"}),
        json!({"email": "jane@example.com", "password": ""}),
    ] {
        let response = app(SessionContext::anonymous())
            .oneshot(post_json("/api/auth/callback/credentials", &body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["detail"], "Invalid email or password");
    }
}

#[tokio::test]
async fn federated_sign_in_returns_grant() {
    let response = app(SessionContext::anonymous())
        .oneshot(post_json(
            "/api/auth/callback/federated",
            &json!({"provider": "google", "assertion": "assert-jane"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["identity"]["id"], "uid-jane");
}

#[tokio::test]
async fn session_reflects_request_context() {
    let response = app(SessionContext::anonymous())
        .oneshot(
            Request::builder()
                .uri("/api/auth/session")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"identity": null}));

    let response = app(admin())
        .oneshot(
            Request::builder()
                .uri("/api/auth/session")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(body_json(response).await["identity"]["role"], "admin");
}

#[tokio::test]
async fn renew_picks_up_new_role() {
    let (router, store) = app_with(
        FakeStore::default().with_user("uid-jane", Role::Guest),
        SessionContext::anonymous(),
    );
    store.set_role("uid-jane", Role::Organizer).await.unwrap();

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/session")
                .header(header::COOKIE, "eventhost.session-token=token-uid-jane")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(header::SET_COOKIE));
    assert_eq!(body_json(response).await["identity"]["role"], "organizer");
}

#[tokio::test]
async fn renew_without_token_is_401() {
    let response = app(SessionContext::anonymous())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/session")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn sign_out_expires_cookie() {
    let response = app(SessionContext::anonymous())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/signout")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn admin_sets_role() {
    let (router, store) = app_with(FakeStore::default(), admin());

    let response = router
        .oneshot(post_json(
            "/api/set-role",
            &json!({"userId": "uid-bob", "role": "usher"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["message"],
        "Set role to usher for user uid-bob"
    );
    let record = store.get_user("uid-bob").await.unwrap().unwrap();
    assert_eq!(record.role.as_deref(), Some("usher"));
}

#[tokio::test]
async fn non_admin_cannot_set_role() {
    let organizer = SessionContext::authenticated(
        Identity::builder().id("uid-org").role(Role::Organizer).build(),
    );

    for ctx in [organizer, SessionContext::anonymous()] {
        let response = app(ctx)
            .oneshot(post_json(
                "/api/set-role",
                &json!({"userId": "uid-jane", "role": "admin"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn set_role_validates_input() {
    let response = app(admin())
        .oneshot(post_json(
            "/api/set-role",
            &json!({"userId": "uid-jane", "role": "superuser"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app(admin())
        .oneshot(post_json("/api/set-role", &json!({"role": "usher"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn set_role_store_failure_is_500() {
    let store = FakeStore {
        fail_writes: true,
        ..FakeStore::default()
    };
    let (router, _) = app_with(store, admin());

    let response = router
        .oneshot(post_json(
            "/api/set-role",
            &json!({"userId": "uid-jane", "role": "usher"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["detail"], "Failed to set role");
}
