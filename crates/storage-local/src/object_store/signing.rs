use hmac::{Hmac, Mac};
use sha2::Sha256;

use certifolio_core::storage::StorageError;

type HmacSha256 = Hmac<Sha256>;

/// Signs and verifies `(key, expiry)` pairs of time-bounded links.
#[derive(Clone)]
pub struct UrlSigner {
    secret: Vec<u8>,
}

impl UrlSigner {
    /// `None` for a blank secret.
    pub fn new(secret: &str) -> Option<Self> {
        let secret = secret.trim();
        if secret.is_empty() {
            return None;
        }
        Some(Self {
            secret: secret.as_bytes().to_vec(),
        })
    }

    fn mac(&self, key: &str, expires: i64) -> Result<HmacSha256, StorageError> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| StorageError::Signing(format!("Invalid HMAC secret length: {}", e)))?;
        mac.update(format!("{}\n{}", key, expires).as_bytes());
        Ok(mac)
    }

    /// Hex signature of `key` valid until `expires` (unix seconds).
    pub fn sign(&self, key: &str, expires: i64) -> Result<String, StorageError> {
        Ok(hex::encode(self.mac(key, expires)?.finalize().into_bytes()))
    }

    /// Constant-time check of a hex signature.
    pub fn verify(&self, key: &str, expires: i64, signature: &str) -> Result<bool, StorageError> {
        let Ok(expected) = hex::decode(signature) else {
            return Ok(false);
        };
        Ok(self.mac(key, expires)?.verify_slice(&expected).is_ok())
    }
}

impl std::fmt::Debug for UrlSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlSigner").finish_non_exhaustive()
    }
}
