use std::path::PathBuf;

use serde::Deserialize;

use super::PrivateKeyProvider;
use super::loader::load_private_key;
use super::private_key::PrivateKey;
use crate::config::RegistrableComponentConfig;
use crate::error::KeyProviderError;

/// Name the preshared provider is registered under.
pub const NAME: &str = "preshared";

/// Options block of a `type: preshared` private key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PresharedConfig {
    pub key_id: String,
    pub private_key_path: PathBuf,
}

/// Private key supplied out-of-band as a local PEM file.
///
/// The file is read once, when the provider is built.
#[derive(Debug)]
pub struct Preshared {
    private_key: PrivateKey,
}

impl Preshared {
    pub fn from_config(config: &PresharedConfig) -> Result<Self, KeyProviderError> {
        let key = load_private_key(&config.private_key_path)?;
        let private_key = PrivateKey::new(config.key_id.clone(), key);
        tracing::info!(
            key_id = %private_key.key_id(),
            bits = private_key.bits(),
            path = %config.private_key_path.display(),
            "loaded preshared private key"
        );
        Ok(Self { private_key })
    }

    pub fn from_component_config(
        config: &RegistrableComponentConfig,
    ) -> Result<Self, KeyProviderError> {
        let config: PresharedConfig = config
            .decode_options()
            .map_err(KeyProviderError::Options)?;
        Self::from_config(&config)
    }
}

impl PrivateKeyProvider for Preshared {
    fn private_key(&self) -> Result<&PrivateKey, KeyProviderError> {
        Ok(&self.private_key)
    }
}

/// Registry constructor for [`NAME`].
pub fn constructor(
    config: &RegistrableComponentConfig,
) -> Result<Box<dyn PrivateKeyProvider>, KeyProviderError> {
    Ok(Box::new(Preshared::from_component_config(config)?))
}
