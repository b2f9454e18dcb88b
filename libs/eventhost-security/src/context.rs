use crate::identity::Identity;

/// Per-request session state inserted into request extensions by the gateway.
///
/// Handlers behind the gateway can always extract it; `identity()` is `None` for
/// anonymous requests on public or bypassed routes.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    identity: Option<Identity>,
}

impl SessionContext {
    #[must_use]
    pub fn anonymous() -> Self {
        Self { identity: None }
    }

    #[must_use]
    pub fn authenticated(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}
