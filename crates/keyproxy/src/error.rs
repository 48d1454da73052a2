use std::io;
use std::path::PathBuf;

/// A static wiring defect detected while populating a registry.
///
/// These never come from configuration. Startup code must treat them as
/// fatal and stop before any configuration is resolved.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("{kind}: could not register a constructor with an empty name")]
    EmptyName { kind: &'static str },
    #[error("{kind}: register called twice for {name}")]
    Duplicate { kind: &'static str, name: String },
}

/// Failure to construct a component from configuration.
#[derive(Debug, thiserror::Error)]
pub enum CreateError<E> {
    #[error("{kind}: unable to find constructor for {type_name}")]
    UnknownType {
        kind: &'static str,
        type_name: String,
    },
    #[error(transparent)]
    Constructor(E),
}

impl<E> CreateError<E> {
    /// The constructor's own error, if the type was registered.
    pub fn into_constructor_error(self) -> Option<E> {
        match self {
            CreateError::Constructor(error) => Some(error),
            CreateError::UnknownType { .. } => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KeyLoadError {
    #[error("reading private key {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("bad private key data")]
    BadKeyData,
    #[error("unknown key type: {0}")]
    UnknownKeyType(String),
    #[error("parsing PKCS#1 private key: {0}")]
    Parse(#[from] rsa::pkcs1::Error),
    #[error("invalid private key: {0}")]
    Invalid(#[from] rsa::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum KeyProviderError {
    #[error("invalid private key options: {0}")]
    Options(#[source] serde_yaml::Error),
    #[error(transparent)]
    Key(#[from] KeyLoadError),
    #[error("encoding public key: {0}")]
    PublicKey(#[from] rsa::pkcs8::spki::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("invalid credential source options: {0}")]
    Options(#[source] serde_yaml::Error),
    #[error("no credential for key {key_id} (service {service}, region {region})")]
    NotFound {
        key_id: String,
        service: String,
        region: String,
    },
    #[error("credential store failure: {0}")]
    Backend(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parsing config: {0}")]
    Parse(#[from] serde_yaml::Error),
}
