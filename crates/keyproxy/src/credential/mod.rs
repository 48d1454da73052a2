use crate::config::CredentialSourceConfig;
use crate::error::{CreateError, CredentialError, RegistrationError};
use crate::registry::{Registry, RegistryBuilder};

/// A shared secret used to sign requests on behalf of `key_id`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub key_id: String,
    pub secret: String,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("key_id", &self.key_id)
            .finish_non_exhaustive()
    }
}

/// Resolves a key id within a service/region scope to a [`Credential`].
pub trait CredentialStore: Send + Sync + std::fmt::Debug {
    fn load_credential(
        &self,
        key_id: &str,
        service_name: &str,
        region_name: &str,
    ) -> Result<Credential, CredentialError>;
}

pub type CredentialStoreBuilder =
    RegistryBuilder<Box<dyn CredentialStore>, CredentialSourceConfig, CredentialError>;
pub type CredentialStoreRegistry =
    Registry<Box<dyn CredentialStore>, CredentialSourceConfig, CredentialError>;

pub const CREDENTIAL_STORE_KIND: &str = "credentials";

pub fn credential_store_builder() -> CredentialStoreBuilder {
    RegistryBuilder::new(CREDENTIAL_STORE_KIND)
}

pub fn register_credential_store_factory<F>(
    builder: &mut CredentialStoreBuilder,
    name: &str,
    constructor: F,
) -> Result<(), RegistrationError>
where
    F: Fn(&CredentialSourceConfig) -> Result<Box<dyn CredentialStore>, CredentialError>
        + Send
        + Sync
        + 'static,
{
    builder.register(name, constructor).map(|_| ())
}

pub fn create_credential_store(
    registry: &CredentialStoreRegistry,
    config: &CredentialSourceConfig,
) -> Result<Box<dyn CredentialStore>, CreateError<CredentialError>> {
    registry.create(config)
}
