use std::fs;
use std::path::Path;

use rsa::pkcs1::{self, Version};
use rsa::{BigUint, RsaPrivateKey};

use super::pem;
use crate::error::KeyLoadError;

/// PEM label a preshared signing key must carry.
pub const RSA_PRIVATE_KEY_LABEL: &str = "RSA PRIVATE KEY";

/// Reads the PEM file at `path` and returns a validated RSA key.
pub fn load_private_key(path: impl AsRef<Path>) -> Result<RsaPrivateKey, KeyLoadError> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| KeyLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "read private key file");
    parse_private_key(&data)
}

/// Decodes the first `RSA PRIVATE KEY` PEM block in `data`, precomputes its
/// CRT values and checks the key is mathematically consistent.
///
/// Each stage short-circuits; no key is returned unless all of them pass.
/// Structural PKCS#1 failures are [`KeyLoadError::Parse`], a key that
/// decodes but does not satisfy the RSA relations is [`KeyLoadError::Invalid`].
pub fn parse_private_key(data: &[u8]) -> Result<RsaPrivateKey, KeyLoadError> {
    let block = pem::decode_first(data).ok_or(KeyLoadError::BadKeyData)?;
    if block.label != RSA_PRIVATE_KEY_LABEL {
        return Err(KeyLoadError::UnknownKeyType(block.label));
    }

    let fields = pkcs1::RsaPrivateKey::try_from(block.contents.as_slice())?;
    if fields.version() != Version::TwoPrime {
        return Err(KeyLoadError::Parse(pkcs1::Error::Version));
    }

    let uint = |value: pkcs1::UintRef<'_>| BigUint::from_bytes_be(value.as_bytes());
    // `from_components` checks the key relations before precomputing.
    let mut key = RsaPrivateKey::from_components(
        uint(fields.modulus),
        uint(fields.public_exponent),
        uint(fields.private_exponent),
        vec![uint(fields.prime1), uint(fields.prime2)],
    )?;
    key.precompute()?;
    key.validate()?;

    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::OnceLock;

    use rand_chacha::ChaCha20Rng;
    use rand_chacha::rand_core::SeedableRng;
    use rsa::pkcs1::{EncodeRsaPrivateKey, LineEnding, UintRef, der::Encode};
    use rsa::traits::PrivateKeyParts;
    use sha2::{Digest, Sha256};
    use tempfile::NamedTempFile;

    fn test_key() -> &'static RsaPrivateKey {
        static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
        KEY.get_or_init(|| {
            let hash = Sha256::digest(b"loader-test-seed");
            let mut rng = ChaCha20Rng::from_seed(hash.into());
            RsaPrivateKey::new(&mut rng, 2048).unwrap()
        })
    }

    fn write_temp(contents: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    fn pem_block(label: &str, body: &[u8]) -> String {
        pem::encode(label, body, 64)
    }

    fn test_key_der() -> Vec<u8> {
        test_key().to_pkcs1_der().unwrap().as_bytes().to_vec()
    }

    #[test]
    fn loads_valid_pkcs1_key() {
        let pem = test_key().to_pkcs1_pem(LineEnding::LF).unwrap();
        let file = write_temp(pem.as_bytes());

        let key = load_private_key(file.path()).unwrap();
        assert_eq!(&key, test_key());
        assert!(key.validate().is_ok());
        assert!(key.dp().is_some());
        assert!(key.dq().is_some());
        assert!(key.qinv().is_some());
    }

    #[test]
    fn loads_key_followed_by_certificate() {
        let bundle = format!(
            "{}{}",
            test_key().to_pkcs1_pem(LineEnding::LF).unwrap().as_str(),
            pem_block("CERTIFICATE", b"certificate body"),
        );
        let file = write_temp(bundle.as_bytes());
        assert_eq!(&load_private_key(file.path()).unwrap(), test_key());
    }

    #[test]
    fn loads_key_with_trailing_comment() {
        let pem = format!(
            "{}# rotated 2026-01-01\n",
            test_key().to_pkcs1_pem(LineEnding::LF).unwrap().as_str()
        );
        let file = write_temp(pem.as_bytes());
        assert_eq!(&load_private_key(file.path()).unwrap(), test_key());
    }

    #[test]
    fn loads_key_wrapped_at_76_columns() {
        let pem = pem::encode(RSA_PRIVATE_KEY_LABEL, &test_key_der(), 76);
        assert!(pem.lines().nth(1).is_some_and(|line| line.len() == 76));
        assert_eq!(&parse_private_key(pem.as_bytes()).unwrap(), test_key());
    }

    #[test]
    fn loads_key_after_leading_text() {
        let pem = format!(
            "Bag Attributes\n    localKeyID: 01\n{}",
            pem::encode(RSA_PRIVATE_KEY_LABEL, &test_key_der(), 64)
        );
        assert_eq!(&parse_private_key(pem.as_bytes()).unwrap(), test_key());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.pem");

        match load_private_key(&path).unwrap_err() {
            KeyLoadError::Read { path: reported, source } => {
                assert_eq!(reported, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected Read, got {other:?}"),
        }
    }

    #[test]
    fn non_pem_bytes_are_bad_key_data() {
        let err = parse_private_key(b"definitely not a key").unwrap_err();
        assert!(matches!(err, KeyLoadError::BadKeyData));
    }

    #[test]
    fn empty_input_is_bad_key_data() {
        let err = parse_private_key(b"").unwrap_err();
        assert!(matches!(err, KeyLoadError::BadKeyData));
    }

    #[test]
    fn ec_key_block_is_unknown_key_type() {
        let pem = pem_block("EC PRIVATE KEY", &[0x30, 0x03, 0x02, 0x01, 0x01]);
        match parse_private_key(pem.as_bytes()).unwrap_err() {
            KeyLoadError::UnknownKeyType(label) => assert_eq!(label, "EC PRIVATE KEY"),
            other => panic!("expected UnknownKeyType, got {other:?}"),
        }
    }

    #[test]
    fn pkcs8_block_is_unknown_key_type() {
        let pem = pem_block("PRIVATE KEY", b"opaque");
        let err = parse_private_key(pem.as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "unknown key type: PRIVATE KEY");
    }

    #[test]
    fn corrupted_der_is_parse_error() {
        let pem = pem_block(RSA_PRIVATE_KEY_LABEL, b"\x30\x82garbage");
        let err = parse_private_key(pem.as_bytes()).unwrap_err();
        assert!(matches!(err, KeyLoadError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn inconsistent_key_is_invalid() {
        let der = test_key_der();
        let fields = pkcs1::RsaPrivateKey::try_from(der.as_slice()).unwrap();

        let mut prime = fields.prime1.as_bytes().to_vec();
        if let Some(last) = prime.last_mut() {
            *last ^= 0x02;
        }
        let tampered = pkcs1::RsaPrivateKey {
            prime1: UintRef::new(&prime).unwrap(),
            ..fields
        }
        .to_der()
        .unwrap();

        let pem = pem_block(RSA_PRIVATE_KEY_LABEL, &tampered);
        let err = parse_private_key(pem.as_bytes()).unwrap_err();
        assert!(matches!(err, KeyLoadError::Invalid(_)), "got {err:?}");
    }

    #[test]
    fn multi_prime_version_is_parse_error() {
        let der = test_key_der();
        let fields = pkcs1::RsaPrivateKey::try_from(der.as_slice()).unwrap();
        let other_primes: pkcs1::OtherPrimeInfos<'_> = vec![pkcs1::OtherPrimeInfo {
            prime: fields.prime1,
            exponent: fields.exponent1,
            coefficient: fields.coefficient,
        }];
        let multi = pkcs1::RsaPrivateKey {
            other_prime_infos: Some(other_primes),
            ..fields
        }
        .to_der()
        .unwrap();

        let pem = pem_block(RSA_PRIVATE_KEY_LABEL, &multi);
        let err = parse_private_key(pem.as_bytes()).unwrap_err();
        assert!(
            matches!(err, KeyLoadError::Parse(pkcs1::Error::Version)),
            "got {err:?}"
        );
    }
}
