//! Identity provider trait the `AuthN` resolver delegates credential checks to.

use async_trait::async_trait;

use crate::error::IdentityProviderError;
use crate::models::{FederatedAssertion, ProviderUser};

/// Identity provider consumed by the `AuthN` resolver.
///
/// Implementations verify passwords and federated assertions and report the
/// provider-side user. Role resolution stays in the resolver.
#[async_trait]
pub trait IdentityProviderClient: Send + Sync {
    /// Verify an email/password pair.
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials` if the pair does not match a known user
    /// - `Unavailable` if the provider cannot be reached
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderUser, IdentityProviderError>;

    /// Verify an assertion issued by a federated provider.
    ///
    /// # Errors
    ///
    /// - `UnknownProvider` if the provider is not configured
    /// - `InvalidAssertion` if the assertion does not verify
    async fn verify_assertion(
        &self,
        assertion: &FederatedAssertion,
    ) -> Result<ProviderUser, IdentityProviderError>;
}
