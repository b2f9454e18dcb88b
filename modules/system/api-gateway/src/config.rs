use eventhost_api::SessionCookieConfig;
use eventhost_security::Role;
use serde::{Deserialize, Serialize};

/// API gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiGatewayConfig {
    pub bind_addr: String,

    /// Requests running longer than this are answered with 504.
    pub request_timeout_secs: u64,

    /// UI page unauthenticated browsers are redirected to.
    pub sign_in_path: String,

    /// Session cookie carrying the signed token.
    pub session: SessionCookieConfig,

    /// Route tables compiled into the access policy at startup.
    pub routes: RoutesConfig,
}

impl Default for ApiGatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_owned(),
            request_timeout_secs: 30,
            sign_in_path: "/auth/signin".to_owned(),
            session: SessionCookieConfig::default(),
            routes: RoutesConfig::default(),
        }
    }
}

/// Route patterns by class.
///
/// Pattern syntax: literal segments, `{name}` or `:name` for exactly one
/// non-empty segment, and a trailing `*` (or `**`) matching one or more further
/// segments, the empty one included.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoutesConfig {
    /// Never gated. Authentication endpoints live here.
    pub bypass: Vec<String>,
    /// Reachable with or without a session.
    pub public: Vec<String>,
    /// Per-role allow lists and landing pages.
    pub roles: RolesConfig,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            bypass: strings(&["/api/auth", "/api/auth/*"]),
            public: strings(&[
                "/",
                "/features",
                "/auth/signin",
                "/auth/signup",
                "/auth/error",
                "/rsvp",
                "/rsvp/*",
                "/thank-you",
                "/api/rsvp",
                "/api/rsvp/*",
                "/health",
            ]),
            roles: RolesConfig::default(),
        }
    }
}

/// One entry per role. Unknown role names are rejected at load time.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RolesConfig {
    pub admin: RoleRoutes,
    pub organizer: RoleRoutes,
    pub usher: RoleRoutes,
    pub user: RoleRoutes,
    pub guest: RoleRoutes,
}

impl RolesConfig {
    #[must_use]
    pub fn get(&self, role: Role) -> &RoleRoutes {
        match role {
            Role::Admin => &self.admin,
            Role::Organizer => &self.organizer,
            Role::Usher => &self.usher,
            Role::User => &self.user,
            Role::Guest => &self.guest,
        }
    }
}

impl Default for RolesConfig {
    fn default() -> Self {
        Self {
            admin: RoleRoutes::new(
                "/admin",
                &[
                    "/admin",
                    "/admin/*",
                    "/dashboard",
                    "/rsvp-management/*",
                    "/api/checkin",
                    "/api/invitations",
                    "/api/reports",
                    "/api/guests",
                    "/api/guests/*",
                    "/api/set-role",
                    "/api/events",
                    "/api/events/*",
                ],
            ),
            organizer: RoleRoutes::new(
                "/dashboard",
                &[
                    "/dashboard",
                    "/rsvp-management/events/{event_id}/check-in",
                    "/rsvp-management/events/{event_id}/guest-list",
                    "/rsvp-management/events/{event_id}/invitations",
                    "/api/checkin",
                    "/api/invitations",
                    "/api/events",
                    "/api/events/*",
                ],
            ),
            usher: RoleRoutes::new(
                "/dashboard",
                &[
                    "/dashboard",
                    "/rsvp-management/events/{event_id}/check-in",
                    "/api/checkin",
                ],
            ),
            user: RoleRoutes::new("/dashboard", &["/dashboard"]),
            guest: RoleRoutes::new("/", &[]),
        }
    }
}

/// Allow list and landing page of one role.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoleRoutes {
    pub patterns: Vec<String>,
    /// Where a signed-in user lands when a UI page is off limits.
    pub landing: String,
}

impl RoleRoutes {
    fn new(landing: &str, patterns: &[&str]) -> Self {
        Self {
            patterns: strings(patterns),
            landing: landing.to_owned(),
        }
    }
}

impl Default for RoleRoutes {
    fn default() -> Self {
        Self {
            patterns: Vec::new(),
            landing: "/".to_owned(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn role_sections_override_independently() {
        let cfg: ApiGatewayConfig = serde_json::from_value(serde_json::json!({
            "bind_addr": "0.0.0.0:9000",
            "routes": {
                "roles": {
                    "user": { "patterns": ["/dashboard", "/profile"], "landing": "/profile" }
                }
            }
        }))
        .unwrap();

        assert_eq!(cfg.bind_addr, "0.0.0.0:9000");
        assert_eq!(cfg.routes.roles.get(Role::User).landing, "/profile");
        assert_eq!(cfg.routes.roles.get(Role::User).patterns.len(), 2);
        // untouched sections keep their defaults
        assert_eq!(cfg.routes.roles.get(Role::Admin).landing, "/admin");
        assert!(cfg.routes.public.contains(&"/health".to_owned()));
    }

    #[test]
    fn unknown_role_section_is_rejected() {
        let result = serde_json::from_value::<ApiGatewayConfig>(serde_json::json!({
            "routes": { "roles": { "superuser": { "patterns": ["/*"] } } }
        }));
        assert!(result.is_err());
    }
}
