use std::path::PathBuf;

use serde::Deserialize;

/// Settings of the filesystem object store.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocalObjectStoreConfig {
    /// Directory objects are written under.
    pub root: PathBuf,
    /// Prefix of public URLs; a static file server is expected to map it to `root`.
    pub public_base_url: String,
    /// HMAC key for signed links. Signing fails while it is blank.
    pub signing_key: String,
    /// Key prefix under which static assets such as stamps live.
    pub assets_prefix: String,
}

impl Default for LocalObjectStoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("data/objects"),
            public_base_url: "http://localhost:8080/files".to_string(),
            signing_key: String::new(),
            assets_prefix: "assets".to_string(),
        }
    }
}
