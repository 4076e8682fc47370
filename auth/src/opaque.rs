use rand::Rng;

/// Number of random bytes in an opaque token (hex-encoded to 64 chars).
pub const TOKEN_BYTES: usize = 32;

/// Generate an opaque access token.
///
/// Draws [`TOKEN_BYTES`] bytes from the thread-local CSPRNG and
/// hex-encodes them. The value carries no claims; it only means
/// something to the store that persists it.
///
/// # Returns
/// A 64-character lowercase hex string
pub fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: Vec<u8> = (0..TOKEN_BYTES).map(|_| rng.gen()).collect();
    hex::encode(bytes)
}
