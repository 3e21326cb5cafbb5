//! Credential transforms.
//!
//! Emails are stored only in transformed form and looked up by exact match,
//! so that transform must be deterministic: a keyed BLAKE3 hash. Passwords
//! are stored as salted Argon2id PHC strings, peppered with a subkey of the
//! same credential key.

use std::fmt;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand_core::OsRng;
use tracing::warn;

use crate::config::Config;
use crate::error::{Error, Result};

const EMAIL_CONTEXT: &str = "kanbanlogiq 2024-01-01 credential email";
const PASSWORD_CONTEXT: &str = "kanbanlogiq 2024-01-01 credential password";

/// Transforms credentials before they are compared or stored.
pub trait CredentialCipher {
    /// Deterministic transform of a login identifier.
    fn encrypt(&self, plaintext: &str) -> String;

    /// Salted digest of `password`, suitable for storage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PasswordHash`] if hashing fails.
    fn password_digest(&self, password: &str) -> Result<String>;

    /// Check `password` against a stored digest.
    fn verify_password(&self, password: &str, digest: &str) -> bool;
}

/// BLAKE3 email transform plus Argon2id password hashing.
///
/// Separate subkeys for emails and passwords are derived from one 32-byte
/// credential key.
#[derive(Clone)]
pub struct Blake3Cipher {
    email_key: [u8; 32],
    password_key: [u8; 32],
    params: Params,
}

impl Blake3Cipher {
    /// Build a cipher from the raw credential key with default Argon2 cost.
    #[must_use]
    pub fn new(key: [u8; 32]) -> Self {
        Self::with_params(key, Params::default())
    }

    /// Build a cipher with explicit Argon2 cost parameters.
    #[must_use]
    pub fn with_params(key: [u8; 32], params: Params) -> Self {
        Self {
            email_key: blake3::derive_key(EMAIL_CONTEXT, &key),
            password_key: blake3::derive_key(PASSWORD_CONTEXT, &key),
            params,
        }
    }

    /// Build a cipher from the configured credential key.
    ///
    /// # Errors
    ///
    /// Returns an error if no key is configured or it is malformed.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.credential_key()?))
    }

    /// Minimum-cost cipher so tests stay fast.
    #[cfg(test)]
    pub(crate) fn for_tests(key: [u8; 32]) -> Self {
        let params = Params::new(Params::MIN_M_COST, 1, 1, None).expect("minimum params are valid");
        Self::with_params(key, params)
    }

    fn argon2(&self) -> Result<Argon2<'_>> {
        Argon2::new_with_secret(
            &self.password_key,
            Algorithm::Argon2id,
            Version::V0x13,
            self.params.clone(),
        )
        .map_err(|e| Error::password_hash(e.to_string()))
    }
}

impl fmt::Debug for Blake3Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blake3Cipher")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl CredentialCipher for Blake3Cipher {
    fn encrypt(&self, plaintext: &str) -> String {
        blake3::keyed_hash(&self.email_key, plaintext.as_bytes())
            .to_hex()
            .to_string()
    }

    fn password_digest(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| Error::password_hash(e.to_string()))?;
        Ok(hash.to_string())
    }

    fn verify_password(&self, password: &str, digest: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(digest) else {
            warn!("stored password digest is not a PHC string");
            return false;
        };
        self.argon2()
            .is_ok_and(|argon2| argon2.verify_password(password.as_bytes(), &parsed).is_ok())
    }
}
