use std::fmt;

use rsa::pkcs8::EncodePublicKey;
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};

use crate::error::KeyProviderError;

/// An RSA signing key bound to the identifier published alongside its tokens.
///
/// Only constructed from a key that already passed validation, and never
/// serialized back out.
#[derive(Clone)]
pub struct PrivateKey {
    key_id: String,
    key: RsaPrivateKey,
}

impl PrivateKey {
    pub fn new(key_id: impl Into<String>, key: RsaPrivateKey) -> Self {
        Self {
            key_id: key_id.into(),
            key,
        }
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    pub fn key(&self) -> &RsaPrivateKey {
        &self.key
    }

    pub fn public_key(&self) -> RsaPublicKey {
        self.key.to_public_key()
    }

    /// SubjectPublicKeyInfo DER of the public half.
    pub fn public_key_der(&self) -> Result<Vec<u8>, KeyProviderError> {
        Ok(self.public_key().to_public_key_der()?.into_vec())
    }

    /// Lowercase hex SHA-256 of [`public_key_der`](Self::public_key_der).
    pub fn fingerprint(&self) -> Result<String, KeyProviderError> {
        let der = self.public_key_der()?;
        Ok(hex::encode(Sha256::digest(&der)))
    }

    pub fn bits(&self) -> usize {
        self.key.size() * 8
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("key_id", &self.key_id)
            .field("bits", &self.bits())
            .finish_non_exhaustive()
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.key_id == other.key_id && self.key == other.key
    }
}

impl Eq for PrivateKey {}
