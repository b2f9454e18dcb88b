//! Compiled access policy and the per-request decision.

use std::collections::HashMap;

use eventhost_security::{Identity, Role};
use http::Uri;
use thiserror::Error;

use super::pattern::{PatternError, RoutePattern, any_match};
use crate::config::RoutesConfig;

/// Outcome of evaluating one request against the policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    /// UI request without a session. Carries the path and query to return to.
    RedirectToSignIn { callback_url: String },
    /// UI request the signed-in role may not see. Carries the role's landing page.
    RedirectToDefault { path: String },
    /// API request without a session.
    Unauthenticated,
    /// API request the signed-in role may not call.
    Forbidden,
}

impl AccessDecision {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::RedirectToSignIn { .. } => "redirect_to_sign_in",
            Self::RedirectToDefault { .. } => "redirect_to_default",
            Self::Unauthenticated => "unauthenticated",
            Self::Forbidden => "forbidden",
        }
    }

    #[must_use]
    pub fn is_allow(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// How a path is treated before any identity is considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Bypass,
    Public,
    Protected,
}

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("sign-in path '{0}' must be a public route")]
    SignInNotPublic(String),

    #[error("landing page '{landing}' of role '{role}' is not reachable by that role")]
    UnreachableLanding { role: Role, landing: String },
}

struct RoleTable {
    patterns: Vec<RoutePattern>,
    landing: String,
}

/// Immutable route tables, built once at startup and shared by every request.
pub struct AccessPolicy {
    bypass: Vec<RoutePattern>,
    public: Vec<RoutePattern>,
    roles: HashMap<Role, RoleTable>,
    sign_in_path: String,
}

impl AccessPolicy {
    /// Compile the route tables.
    ///
    /// # Errors
    ///
    /// Fails on malformed patterns, a sign-in page that is not public, and a
    /// landing page its own role cannot reach (which would loop redirects).
    pub fn from_config(routes: &RoutesConfig, sign_in_path: &str) -> Result<Self, PolicyError> {
        let bypass = compile(&routes.bypass)?;
        let public = compile(&routes.public)?;
        let roles = Role::ALL
            .into_iter()
            .map(|role| {
                let cfg = routes.roles.get(role);
                let table = RoleTable {
                    patterns: compile(&cfg.patterns)?,
                    landing: cfg.landing.clone(),
                };
                Ok((role, table))
            })
            .collect::<Result<HashMap<_, _>, PolicyError>>()?;

        let policy = Self {
            bypass,
            public,
            roles,
            sign_in_path: sign_in_path.to_owned(),
        };

        if policy.classify(sign_in_path) != RouteClass::Public {
            return Err(PolicyError::SignInNotPublic(sign_in_path.to_owned()));
        }
        for role in Role::ALL {
            let landing = policy.landing_page(role);
            let reachable = policy.classify(landing) != RouteClass::Protected
                || policy.is_allowed(role, landing);
            if !reachable {
                return Err(PolicyError::UnreachableLanding {
                    role,
                    landing: landing.to_owned(),
                });
            }
        }

        Ok(policy)
    }

    #[must_use]
    pub fn sign_in_path(&self) -> &str {
        &self.sign_in_path
    }

    /// Sign-in page URL carrying the page to return to.
    #[must_use]
    pub fn sign_in_location(&self, callback_url: &str) -> String {
        format!(
            "{}?callbackUrl={}",
            self.sign_in_path,
            urlencoding::encode(callback_url)
        )
    }

    #[must_use]
    pub fn classify(&self, path: &str) -> RouteClass {
        if any_match(&self.bypass, path) {
            RouteClass::Bypass
        } else if any_match(&self.public, path) {
            RouteClass::Public
        } else {
            RouteClass::Protected
        }
    }

    /// Whether `role`'s own table lists `path`. Public routes are not consulted.
    #[must_use]
    pub fn is_allowed(&self, role: Role, path: &str) -> bool {
        self.roles
            .get(&role)
            .is_some_and(|t| any_match(&t.patterns, path))
    }

    #[must_use]
    pub fn landing_page(&self, role: Role) -> &str {
        self.roles.get(&role).map_or("/", |t| t.landing.as_str())
    }

    /// Decide what happens to a request for `uri` made with `identity`.
    ///
    /// `identity` must come from a verified token; any verification failure is
    /// passed in as `None`.
    #[must_use]
    pub fn evaluate(&self, uri: &Uri, identity: Option<&Identity>) -> AccessDecision {
        let path = uri.path();
        if self.classify(path) != RouteClass::Protected {
            return AccessDecision::Allow;
        }

        let api = is_api_path(path);
        let Some(identity) = identity else {
            return if api {
                AccessDecision::Unauthenticated
            } else {
                AccessDecision::RedirectToSignIn {
                    callback_url: uri
                        .path_and_query()
                        .map_or(path, http::uri::PathAndQuery::as_str)
                        .to_owned(),
                }
            };
        };

        if self.is_allowed(identity.role(), path) {
            AccessDecision::Allow
        } else if api {
            AccessDecision::Forbidden
        } else {
            AccessDecision::RedirectToDefault {
                path: self.landing_page(identity.role()).to_owned(),
            }
        }
    }
}

/// API paths get status codes; everything else gets redirects.
#[must_use]
pub fn is_api_path(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}

fn compile(templates: &[String]) -> Result<Vec<RoutePattern>, PatternError> {
    templates.iter().map(|t| RoutePattern::parse(t)).collect()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::config::RoleRoutes;

    fn policy() -> AccessPolicy {
        AccessPolicy::from_config(&RoutesConfig::default(), "/auth/signin").unwrap()
    }

    fn who(role: Role) -> Identity {
        Identity::builder().id("u1").role(role).build()
    }

    fn eval(policy: &AccessPolicy, uri: &str, role: Option<Role>) -> AccessDecision {
        let identity = role.map(who);
        policy.evaluate(&uri.parse().unwrap(), identity.as_ref())
    }

    #[test]
    fn scenarios() {
        let policy = policy();

        assert_eq!(
            eval(&policy, "/dashboard", Some(Role::User)),
            AccessDecision::Allow
        );
        assert_eq!(
            eval(&policy, "/admin/anything", Some(Role::User)),
            AccessDecision::RedirectToDefault {
                path: "/dashboard".to_owned()
            }
        );
        assert_eq!(
            eval(&policy, "/api/reports", Some(Role::User)),
            AccessDecision::Forbidden
        );
        assert_eq!(
            eval(
                &policy,
                "/rsvp-management/events/123/check-in",
                Some(Role::Usher)
            ),
            AccessDecision::Allow
        );
        assert_eq!(eval(&policy, "/", None), AccessDecision::Allow);
        assert_eq!(
            eval(&policy, "/api/set-role", Some(Role::Organizer)),
            AccessDecision::Forbidden
        );
    }

    #[test]
    fn public_routes_allow_everyone() {
        let policy = policy();
        let mut roles: Vec<Option<Role>> = Role::ALL.into_iter().map(Some).collect();
        roles.push(None);

        for path in ["/", "/features", "/rsvp", "/rsvp/abc", "/api/rsvp/1", "/health"] {
            for role in &roles {
                assert_eq!(eval(&policy, path, *role), AccessDecision::Allow, "{path}");
            }
        }
    }

    #[test]
    fn bypass_routes_skip_the_gate() {
        let policy = policy();

        assert_eq!(policy.classify("/api/auth"), RouteClass::Bypass);
        assert_eq!(
            policy.classify("/api/auth/callback/credentials"),
            RouteClass::Bypass
        );
        assert_eq!(
            eval(&policy, "/api/auth/session", None),
            AccessDecision::Allow
        );
        assert_eq!(policy.classify("/api/authz"), RouteClass::Protected);
    }

    #[test]
    fn anonymous_never_reaches_protected_routes() {
        let policy = policy();

        assert_eq!(
            eval(&policy, "/dashboard?tab=events", None),
            AccessDecision::RedirectToSignIn {
                callback_url: "/dashboard?tab=events".to_owned()
            }
        );
        assert_eq!(eval(&policy, "/api", None), AccessDecision::Unauthenticated);
        assert_eq!(
            eval(&policy, "/api/checkin", None),
            AccessDecision::Unauthenticated
        );
        assert_eq!(
            eval(&policy, "/nowhere", None),
            AccessDecision::RedirectToSignIn {
                callback_url: "/nowhere".to_owned()
            }
        );
    }

    #[test]
    fn role_tables_are_exact() {
        let policy = policy();

        assert!(eval(&policy, "/admin", Some(Role::Admin)).is_allow());
        assert!(eval(&policy, "/admin/", Some(Role::Admin)).is_allow());
        assert!(eval(&policy, "/rsvp-management/reports", Some(Role::Admin)).is_allow());
        assert!(
            eval(
                &policy,
                "/rsvp-management/events/9/guest-list",
                Some(Role::Organizer)
            )
            .is_allow()
        );
        assert_eq!(
            eval(
                &policy,
                "/rsvp-management/events/9/guest-list",
                Some(Role::Usher)
            ),
            AccessDecision::RedirectToDefault {
                path: "/dashboard".to_owned()
            }
        );
        assert!(eval(&policy, "/api/events", Some(Role::Organizer)).is_allow());
        assert!(eval(&policy, "/api/events/e1", Some(Role::Organizer)).is_allow());
        assert_eq!(
            eval(&policy, "/api/events/e1", Some(Role::Usher)),
            AccessDecision::Forbidden
        );
        assert_eq!(
            eval(&policy, "/dashboard", Some(Role::Guest)),
            AccessDecision::RedirectToDefault {
                path: "/".to_owned()
            }
        );
    }

    #[test]
    fn sign_in_location_encodes_callback() {
        let policy = policy();

        assert_eq!(
            policy.sign_in_location("/dashboard?tab=a&b=c"),
            "/auth/signin?callbackUrl=%2Fdashboard%3Ftab%3Da%26b%3Dc"
        );
    }

    #[test]
    fn landing_pages_must_be_reachable() {
        let mut routes = RoutesConfig::default();
        routes.roles.usher = RoleRoutes {
            patterns: vec!["/api/checkin".to_owned()],
            landing: "/dashboard".to_owned(),
        };

        assert!(matches!(
            AccessPolicy::from_config(&routes, "/auth/signin"),
            Err(PolicyError::UnreachableLanding {
                role: Role::Usher,
                ..
            })
        ));
    }

    #[test]
    fn sign_in_page_must_be_public() {
        assert!(matches!(
            AccessPolicy::from_config(&RoutesConfig::default(), "/login"),
            Err(PolicyError::SignInNotPublic(_))
        ));
    }

    #[test]
    fn malformed_pattern_fails_the_build() {
        let mut routes = RoutesConfig::default();
        routes.public.push("/docs/*/index".to_owned());

        assert!(matches!(
            AccessPolicy::from_config(&routes, "/auth/signin"),
            Err(PolicyError::Pattern(_))
        ));
    }
}
