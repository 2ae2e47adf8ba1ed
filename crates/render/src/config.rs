//! Rendering configuration.
//!
//! All paths and commands are explicit values injected at construction time;
//! nothing is discovered from the environment.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Top-level rendering configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    /// Directory holding template overrides. Built-in templates are used for
    /// any file missing here.
    pub template_dir: Option<PathBuf>,
    /// Typesetting backend; tried first when present.
    pub typesetting: Option<TypesettingConfig>,
    pub browser: BrowserConfig,
    pub stamps: StampFetchConfig,
}

/// External LaTeX compiler invocation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypesettingConfig {
    pub command: String,
    pub args: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for TypesettingConfig {
    fn default() -> Self {
        Self {
            command: "pdflatex".to_string(),
            args: vec![
                "-interaction=nonstopmode".to_string(),
                "-halt-on-error".to_string(),
            ],
            timeout_secs: 30,
        }
    }
}

impl TypesettingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Headless browser invocation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrowserConfig {
    pub enabled: bool,
    pub command: String,
    pub args: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: "chromium".to_string(),
            args: vec![
                "--headless=new".to_string(),
                "--disable-gpu".to_string(),
                "--no-sandbox".to_string(),
                "--no-pdf-header-footer".to_string(),
            ],
            timeout_secs: 60,
        }
    }
}

impl BrowserConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Remote stamp image fetching.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StampFetchConfig {
    pub timeout_secs: u64,
    /// Redirect hops followed before giving up. At least one is always allowed.
    pub max_redirects: usize,
}

impl Default for StampFetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            max_redirects: 5,
        }
    }
}
