//! Password digest for the local authentication gate.
//!
//! A single unsalted SHA-256 pass, compared by string equality. This is a
//! usability-tier gate for a personal stash, not a credential store: the
//! stored digest does not resist offline attack and is not meant to.

use sha2::{Digest, Sha256};

/// Minimum accepted password length, enforced before any hashing runs.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Returns the lowercase hex SHA-256 digest of `password`.
///
/// Fails closed on emptiness: the empty password yields the empty string,
/// never the digest of `""`, so an unset password can never masquerade as a
/// real one.
#[must_use]
pub fn hash_password(password: &str) -> String {
    if password.is_empty() {
        return String::new();
    }
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
