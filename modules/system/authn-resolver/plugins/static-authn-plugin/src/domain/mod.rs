//! Domain layer for the static `AuthN` plugin.

pub mod password;
pub mod provider;
pub mod store;

pub use provider::StaticIdentityProvider;
pub use store::InMemoryUserStore;
