//! Password hashing and verification.
use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    #[error("invalid hashing parameters: {0}")]
    Params(String),
    #[error("hashing failed: {0}")]
    Hash(String),
    #[error("stored hash is malformed: {0}")]
    Malformed(String),
}

/// One-way credential hashing: salted hash plus constant-time verify.
pub trait CredentialHasher: Send + Sync {
    /// Hash `plaintext` with a fresh random salt; the salt and parameters are
    /// embedded in the returned bytes.
    fn hash(&self, plaintext: &str) -> Result<Vec<u8>, HashError>;

    /// `Ok(false)` on mismatch. `Err` only when `hash` cannot be parsed.
    fn verify(&self, hash: &[u8], plaintext: &str) -> Result<bool, HashError>;
}

/// Argon2id hasher producing PHC strings.
#[derive(Clone)]
pub struct Argon2Hasher {
    argon: Argon2<'static>,
}

impl Argon2Hasher {
    /// Build with explicit cost parameters (memory in KiB, passes, lanes).
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, HashError> {
        let params =
            Params::new(memory_kib, iterations, parallelism, None).map_err(|e| HashError::Params(e.to_string()))?;
        Ok(Self { argon: Argon2::new(Algorithm::Argon2id, Version::V0x13, params) })
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self { argon: Argon2::default() }
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> Result<Vec<u8>, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        let phc = self
            .argon
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| HashError::Hash(e.to_string()))?
            .to_string();
        Ok(phc.into_bytes())
    }

    fn verify(&self, hash: &[u8], plaintext: &str) -> Result<bool, HashError> {
        let phc = std::str::from_utf8(hash).map_err(|e| HashError::Malformed(e.to_string()))?;
        let parsed = PasswordHash::new(phc).map_err(|e| HashError::Malformed(e.to_string()))?;
        match self.argon.verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(HashError::Malformed(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> Argon2Hasher {
        Argon2Hasher::new(8, 1, 1).unwrap()
    }

    #[test]
    fn hash_then_verify() {
        let h = cheap();
        for pw in ["secret1", "", "pässwörd ✓", "a very long passphrase with spaces in it"] {
            let hash = h.hash(pw).unwrap();
            assert!(h.verify(&hash, pw).unwrap(), "round trip failed for {pw:?}");
            assert!(!h.verify(&hash, "something else").unwrap());
        }
    }

    #[test]
    fn salts_differ() {
        let h = cheap();
        let a = h.hash("same").unwrap();
        let b = h.hash("same").unwrap();
        assert_ne!(a, b);
        assert!(String::from_utf8(a).unwrap().starts_with("$argon2id$"));
    }

    #[test]
    fn verify_uses_params_from_hash() {
        let hash = cheap().hash("pw").unwrap();
        assert!(Argon2Hasher::default().verify(&hash, "pw").unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        let h = cheap();
        assert!(matches!(h.verify(b"not-a-phc-string", "pw"), Err(HashError::Malformed(_))));
        assert!(matches!(h.verify(&[0xff, 0xfe], "pw"), Err(HashError::Malformed(_))));
    }

    #[test]
    fn rejects_bad_params() {
        assert!(matches!(Argon2Hasher::new(1, 1, 1), Err(HashError::Params(_))));
        assert!(matches!(Argon2Hasher::new(8, 0, 1), Err(HashError::Params(_))));
    }
}
