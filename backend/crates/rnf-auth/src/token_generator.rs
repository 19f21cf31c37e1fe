use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;
use subtle::ConstantTimeEq;

/// Random 32-byte token, URL-safe base64 without padding (43 characters).
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Constant-time comparison of a presented token with the stored one.
/// Empty tokens never match.
pub fn tokens_match(provided: &str, expected: &str) -> bool {
    if provided.is_empty() || expected.is_empty() {
        return false;
    }

    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}
