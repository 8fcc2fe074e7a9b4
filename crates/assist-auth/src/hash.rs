//! Password hashing utilities.

use assist_core::CLIENT_PASSWORD_SALT;
use sha2::{Digest, Sha256};

/// Compute SHA256 hash and return as lowercase hex string.
#[inline]
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}

/// Transform a plaintext password into the token clients send to the auth server.
///
/// The result does not depend on the client identifier.
///
/// # Example
/// ```
/// use assist_auth::hash_client_password;
///
/// let token = hash_client_password("password123");
/// assert_eq!(token.len(), 64);
/// ```
#[inline]
pub fn hash_client_password(password: &str) -> String {
    sha256_hex(&format!("{password}{CLIENT_PASSWORD_SALT}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex() {
        // Known test vector
        assert_eq!(
            sha256_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_client_hash_is_salted() {
        let token = hash_client_password("secret");
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(
            token,
            "8d5388cb77fbf02395f2dde1e6b7b6988ad019663de9090fa5df842b90af7623"
        );
        assert_eq!(token, sha256_hex(&format!("secret{CLIENT_PASSWORD_SALT}")));
        assert_ne!(token, sha256_hex("secret"));
    }

    #[test]
    fn test_consistency() {
        let password = "my_secret_password";
        assert_eq!(
            hash_client_password(password),
            hash_client_password(password)
        );
        assert_ne!(hash_client_password(password), hash_client_password("other"));
    }
}
