use std::time::Duration;

use serde::Deserialize;

/// Settings of the certificate service.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CertificateConfig {
    /// Lifetime of issued signed links.
    pub signed_url_ttl_secs: u64,
    /// Logical asset name of the left stamp; `None` omits the slot.
    pub primary_stamp_asset: Option<String>,
    /// Logical asset name of the right stamp; `None` omits the slot.
    pub secondary_stamp_asset: Option<String>,
}

impl Default for CertificateConfig {
    fn default() -> Self {
        Self {
            signed_url_ttl_secs: 3600,
            primary_stamp_asset: Some("stamps/official-seal.png".to_string()),
            secondary_stamp_asset: Some("stamps/registry-stamp.png".to_string()),
        }
    }
}

impl CertificateConfig {
    pub fn signed_url_ttl(&self) -> Duration {
        Duration::from_secs(self.signed_url_ttl_secs)
    }
}
