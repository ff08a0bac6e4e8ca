use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Deterministic SHA-256 hex digest of a password.
///
/// Registration (handled upstream) stores exactly this digest, so login must
/// compute the same function. An unsalted deterministic digest is a known
/// weakness of the scheme; it cannot be swapped for a salted adaptive hash
/// without re-registering every stored credential.
pub fn digest_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Constant-time equality over hex digests.
pub fn digests_match(presented: &str, stored: &str) -> bool {
    presented.as_bytes().ct_eq(stored.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_deterministic() {
        assert_eq!(digest_password("secret"), digest_password("secret"));
        assert_ne!(digest_password("secret"), digest_password("secret2"));
    }

    #[test]
    fn digest_is_hex_sha256() {
        let d = digest_password("abc");
        assert_eq!(d.len(), 64);
        // Well-known SHA-256 vector for "abc"
        assert_eq!(
            d,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn digests_match_compares_exactly() {
        let stored = digest_password("secret");
        assert!(digests_match(&digest_password("secret"), &stored));
        assert!(!digests_match(&digest_password("other"), &stored));
        assert!(!digests_match("", &stored));
    }
}
