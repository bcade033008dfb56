use std::fmt;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

use crate::error::{ModelError, ModelResult};

pub fn hash_password(plain: &str) -> ModelResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            ModelError::Hashing(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

pub fn verify_password(plain: &str, hash: &str) -> ModelResult<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        ModelError::Hashing(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// Salted Argon2 digest as stored in `users.password_hash`.
///
/// Has no `Display`, `Serialize` or accessor; it is only consulted through
/// [`PasswordDigest::matches`].
///
/// ```
/// use recipebox::users::password::PasswordDigest;
///
/// let digest = PasswordDigest::generate("hunter22").unwrap();
/// assert!(digest.matches("hunter22"));
/// ```
///
/// ```compile_fail
/// use recipebox::users::password::PasswordDigest;
///
/// let digest = PasswordDigest::generate("hunter22").unwrap();
/// let _raw: &String = &digest.0;
/// ```
///
/// ```compile_fail
/// use recipebox::users::password::PasswordDigest;
///
/// let digest = PasswordDigest::generate("hunter22").unwrap();
/// let _shown = digest.to_string();
/// ```
///
/// ```compile_fail
/// use recipebox::users::password::PasswordDigest;
///
/// let digest = PasswordDigest::generate("hunter22").unwrap();
/// let _json = serde_json::to_string(&digest);
/// ```
#[derive(Clone, PartialEq, Eq, sqlx::Type)]
#[sqlx(transparent)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    pub fn generate(plain: &str) -> ModelResult<Self> {
        hash_password(plain).map(Self)
    }

    /// Constant-time check of `candidate` against the digest. A corrupt
    /// digest never matches.
    pub fn matches(&self, candidate: &str) -> bool {
        verify_password(candidate, &self.0).unwrap_or(false)
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}
