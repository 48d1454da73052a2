use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::ConfigError;

/// A configuration value that names the registered type it should be
/// constructed as.
pub trait TypedConfig {
    fn type_name(&self) -> &str;
}

/// Generic `{ type, options }` block handed to a pluggable component.
///
/// The component decodes its own subset of `options` with
/// [`decode_options`](Self::decode_options).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RegistrableComponentConfig {
    #[serde(rename = "type")]
    pub component_type: String,
    #[serde(default)]
    pub options: serde_yaml::Value,
}

impl RegistrableComponentConfig {
    pub fn new(component_type: impl Into<String>, options: serde_yaml::Value) -> Self {
        Self {
            component_type: component_type.into(),
            options,
        }
    }

    pub fn decode_options<T: DeserializeOwned>(&self) -> Result<T, serde_yaml::Error> {
        serde_yaml::from_value(self.options.clone())
    }
}

impl TypedConfig for RegistrableComponentConfig {
    fn type_name(&self) -> &str {
        &self.component_type
    }
}

/// Credential source block: `type` plus store-specific keys at the same level.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CredentialSourceConfig {
    #[serde(rename = "type")]
    pub source_type: String,
    #[serde(flatten)]
    pub options: BTreeMap<String, serde_yaml::Value>,
}

impl CredentialSourceConfig {
    pub fn new(source_type: impl Into<String>) -> Self {
        Self {
            source_type: source_type.into(),
            options: BTreeMap::new(),
        }
    }

    pub fn with_option(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_yaml::Value>,
    ) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn decode_options<T: DeserializeOwned>(&self) -> Result<T, serde_yaml::Error> {
        let mapping = self
            .options
            .iter()
            .map(|(key, value)| (serde_yaml::Value::String(key.clone()), value.clone()))
            .collect::<serde_yaml::Mapping>();
        serde_yaml::from_value(serde_yaml::Value::Mapping(mapping))
    }
}

impl TypedConfig for CredentialSourceConfig {
    fn type_name(&self) -> &str {
        &self.source_type
    }
}

/// Top-level file consumed by the `keyproxy` binary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProxyConfig {
    pub private_key: RegistrableComponentConfig,
    #[serde(default)]
    pub credential_source: Option<CredentialSourceConfig>,
}

impl ProxyConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }
}
