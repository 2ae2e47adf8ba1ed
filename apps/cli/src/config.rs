//! Environment-driven configuration of the CLI.

use std::path::PathBuf;

use anyhow::{Context, Result};
use certifolio_core::CertificateConfig;
use certifolio_render::{RenderConfig, TypesettingConfig};
use certifolio_storage_local::LocalObjectStoreConfig;

/// Everything the CLI needs to wire the certificate service.
#[derive(Debug, Clone)]
pub struct Config {
    pub dataset_path: PathBuf,
    pub object_store: LocalObjectStoreConfig,
    pub render: RenderConfig,
    pub certificates: CertificateConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from `lookup`, starting from the defaults.
    ///
    /// Blank values count as unset, except for the stamp asset names where a
    /// blank value removes the stamp.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string());
        let set = |name: &str| var(name).filter(|v| !v.is_empty());
        let number = |name: &str, default: u64| -> Result<u64> {
            match set(name) {
                Some(raw) => raw
                    .parse()
                    .with_context(|| format!("{} must be a whole number, got '{}'", name, raw)),
                None => Ok(default),
            }
        };

        let mut object_store = LocalObjectStoreConfig::default();
        if let Some(root) = set("CERTIFOLIO_STORAGE_ROOT") {
            object_store.root = PathBuf::from(root);
        }
        if let Some(base) = set("CERTIFOLIO_PUBLIC_BASE_URL") {
            object_store.public_base_url = base;
        }
        if let Some(key) = set("CERTIFOLIO_SIGNING_KEY") {
            object_store.signing_key = key;
        }
        if let Some(prefix) = set("CERTIFOLIO_ASSETS_PREFIX") {
            object_store.assets_prefix = prefix;
        }

        let mut render = RenderConfig {
            template_dir: set("CERTIFOLIO_TEMPLATE_DIR").map(PathBuf::from),
            ..Default::default()
        };
        if let Some(command) = set("CERTIFOLIO_LATEX_COMMAND") {
            let defaults = TypesettingConfig::default();
            render.typesetting = Some(TypesettingConfig {
                command,
                timeout_secs: number("CERTIFOLIO_LATEX_TIMEOUT_SECS", defaults.timeout_secs)?,
                ..defaults
            });
        }
        match set("CERTIFOLIO_BROWSER").as_deref() {
            Some("off") | Some("none") => render.browser.enabled = false,
            Some(command) => render.browser.command = command.to_string(),
            None => {}
        }
        render.browser.timeout_secs =
            number("CERTIFOLIO_BROWSER_TIMEOUT_SECS", render.browser.timeout_secs)?;
        render.stamps.timeout_secs =
            number("CERTIFOLIO_STAMP_TIMEOUT_SECS", render.stamps.timeout_secs)?;
        render.stamps.max_redirects =
            number("CERTIFOLIO_STAMP_MAX_REDIRECTS", render.stamps.max_redirects as u64)? as usize;

        let mut certificates = CertificateConfig {
            signed_url_ttl_secs: number(
                "CERTIFOLIO_SIGNED_URL_TTL_SECS",
                CertificateConfig::default().signed_url_ttl_secs,
            )?,
            ..Default::default()
        };
        if let Some(primary) = var("CERTIFOLIO_PRIMARY_STAMP") {
            certificates.primary_stamp_asset = Some(primary).filter(|v| !v.is_empty());
        }
        if let Some(secondary) = var("CERTIFOLIO_SECONDARY_STAMP") {
            certificates.secondary_stamp_asset = Some(secondary).filter(|v| !v.is_empty());
        }

        Ok(Self {
            dataset_path: set("CERTIFOLIO_DATASET")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/dataset.json")),
            object_store,
            render,
            certificates,
        })
    }
}
