use md5::Digest;
use md5::Md5;

/// Credential digest implementation.
///
/// Produces a deterministic, unsalted MD5 hex digest. Equal passwords
/// always map to equal digests, so stored values are compared by plain
/// string equality.
///
/// # Security Notes
/// MD5 is cryptographically broken and unsalted digests are vulnerable
/// to rainbow-table attacks. This format is kept for compatibility with
/// the digests the user store already holds; migrating to a salted
/// scheme invalidates every stored credential.
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Lowercase hex MD5 digest of the password's UTF-8 bytes
    pub fn hash(&self, password: &str) -> String {
        let mut hasher = Md5::new();
        hasher.update(password.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Verify a password against a stored digest.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `digest` - Stored lowercase hex digest
    ///
    /// # Returns
    /// True if the password hashes to the stored digest
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        self.hash(password) == digest
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
