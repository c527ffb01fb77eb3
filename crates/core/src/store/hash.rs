//! Directory snapshot cache key generation.

use sha2::{Digest, Sha256};

/// Prefix shared by every directory snapshot key.
pub const CACHE_KEY_PREFIX: &str = "meteoprog_informers_cache_";

/// Compute the snapshot key for an API key.
///
/// The key is a fingerprint of the API key only, so rotating the key
/// switches to a fresh snapshot without touching the old one.
pub fn directory_cache_key(api_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    format!("{CACHE_KEY_PREFIX}{}", hex::encode(hasher.finalize()))
}
