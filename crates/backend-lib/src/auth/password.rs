// ============================
// authgate-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
use scrypt::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Params, Scrypt,
};

/// Slow, salted, one-way hashing of secrets
pub trait SecretHasher: Send + Sync {
    /// Hash `plain` into an opaque digest
    fn hash(&self, plain: &str) -> anyhow::Result<String>;

    /// Whether `plain` hashes to `digest`; a malformed digest never verifies
    fn verify(&self, digest: &str, plain: &str) -> bool {
        verify_password(digest, plain)
    }
}

/// scrypt hasher producing PHC strings (`$scrypt$ln=..,r=..,p=..$salt$hash`)
#[derive(Debug, Clone, Copy)]
pub struct ScryptHasher {
    params: Params,
}

impl Default for ScryptHasher {
    fn default() -> Self {
        Self { params: Params::recommended() }
    }
}

impl ScryptHasher {
    /// Hasher with cost `2^log_n`, keeping the recommended `r` and `p`
    pub fn with_log_n(log_n: u8) -> anyhow::Result<Self> {
        let params = Params::new(log_n, Params::RECOMMENDED_R, Params::RECOMMENDED_P, Params::RECOMMENDED_LEN)
            .map_err(|e| anyhow::anyhow!("invalid scrypt cost {log_n}: {e}"))?;
        Ok(Self { params })
    }
}

impl SecretHasher for ScryptHasher {
    fn hash(&self, plain: &str) -> anyhow::Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Scrypt
            .hash_password_customized(plain.as_bytes(), None, None, self.params, &salt)?
            .to_string();
        Ok(hash)
    }
}

/// Hash a password using scrypt with the recommended cost
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    ScryptHasher::default().hash(plain)
}

/// Verify a password against a hash
pub fn verify_password(hash: &str, plain: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Scrypt.verify_password(plain.as_bytes(), &parsed_hash).is_ok()
}
