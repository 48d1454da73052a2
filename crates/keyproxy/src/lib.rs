pub mod config;
pub mod credential;
pub mod error;
pub mod keys;
pub mod registries;
pub mod registry;

pub use config::{CredentialSourceConfig, ProxyConfig, RegistrableComponentConfig, TypedConfig};
pub use credential::{Credential, CredentialStore, CredentialStoreRegistry};
pub use error::{
    ConfigError, CreateError, CredentialError, KeyLoadError, KeyProviderError, RegistrationError,
};
pub use keys::{KeyProviderRegistry, Preshared, PrivateKey, PrivateKeyProvider};
pub use registries::Registries;
pub use registry::{Registry, RegistryBuilder};
