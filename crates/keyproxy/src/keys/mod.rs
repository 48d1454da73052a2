mod loader;
mod pem;
mod private_key;
pub mod preshared;

pub use loader::{RSA_PRIVATE_KEY_LABEL, load_private_key, parse_private_key};
pub use preshared::{Preshared, PresharedConfig};
pub use private_key::PrivateKey;

use crate::config::RegistrableComponentConfig;
use crate::error::{CreateError, KeyProviderError, RegistrationError};
use crate::registry::{Registry, RegistryBuilder};

/// Supplies the private key used to mint authentication tokens.
///
/// Implementations are sync. The key is resolved when the provider is
/// constructed; `private_key` only hands it out.
pub trait PrivateKeyProvider: Send + Sync + std::fmt::Debug {
    fn private_key(&self) -> Result<&PrivateKey, KeyProviderError>;
}

pub type KeyProviderBuilder =
    RegistryBuilder<Box<dyn PrivateKeyProvider>, RegistrableComponentConfig, KeyProviderError>;
pub type KeyProviderRegistry =
    Registry<Box<dyn PrivateKeyProvider>, RegistrableComponentConfig, KeyProviderError>;

pub const KEY_PROVIDER_KIND: &str = "privatekey";

pub fn key_provider_builder() -> KeyProviderBuilder {
    RegistryBuilder::new(KEY_PROVIDER_KIND)
}

pub fn register_key_provider<F>(
    builder: &mut KeyProviderBuilder,
    name: &str,
    constructor: F,
) -> Result<(), RegistrationError>
where
    F: Fn(&RegistrableComponentConfig) -> Result<Box<dyn PrivateKeyProvider>, KeyProviderError>
        + Send
        + Sync
        + 'static,
{
    builder.register(name, constructor).map(|_| ())
}

pub fn create_key_provider(
    registry: &KeyProviderRegistry,
    config: &RegistrableComponentConfig,
) -> Result<Box<dyn PrivateKeyProvider>, CreateError<KeyProviderError>> {
    registry.create(config)
}
