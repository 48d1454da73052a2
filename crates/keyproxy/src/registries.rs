use crate::credential::{self, CredentialStoreRegistry};
use crate::error::RegistrationError;
use crate::keys::{self, KeyProviderRegistry, preshared};

/// Frozen registries for every pluggable family.
#[derive(Debug)]
pub struct Registries {
    pub key_providers: KeyProviderRegistry,
    pub credential_stores: CredentialStoreRegistry,
}

impl Registries {
    /// Registers every built-in implementation.
    ///
    /// Must run once at startup, before any configuration is resolved. An
    /// error here is a wiring defect and callers abort on it.
    pub fn builtin() -> Result<Self, RegistrationError> {
        let mut key_providers = keys::key_provider_builder();
        keys::register_key_provider(&mut key_providers, preshared::NAME, preshared::constructor)?;

        let credential_stores = credential::credential_store_builder();

        Ok(Self {
            key_providers: key_providers.build(),
            credential_stores: credential_stores.build(),
        })
    }
}
