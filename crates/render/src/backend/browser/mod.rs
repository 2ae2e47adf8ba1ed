//! HTML backend: markup printed to PDF by a headless browser.

use std::path::Path;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;
use tokio::process::Command;

use super::markup::{MarkupDialect, MarkupStamp, MarkupTemplates};
use super::process::{read_artifact, run_scoped};
use super::traits::RenderBackend;
use crate::config::BrowserConfig;
use crate::errors::RenderError;
use crate::models::{CertificateDocument, ResolvedStamps, StampImage};

const BACKEND_ID: &str = "browser";
const PAGE_NAME: &str = "certificate.html";
const OUTPUT_NAME: &str = "certificate.pdf";
const PROFILE_DIR: &str = "profile";

/// Prints generated HTML with a headless Chromium-compatible browser.
///
/// Stamps are inlined as data URIs so the page never touches the network.
/// The browser gets a throwaway profile inside the scratch directory.
pub struct BrowserRenderer {
    config: BrowserConfig,
    templates: MarkupTemplates,
}

impl BrowserRenderer {
    pub fn new(config: BrowserConfig, template_dir: Option<&Path>) -> Result<Self, RenderError> {
        let templates = MarkupTemplates::load(MarkupDialect::Html, template_dir)?;
        Ok(Self { config, templates })
    }

    fn command(&self, workdir: &Path) -> Command {
        let mut command = Command::new(&self.config.command);
        command
            .args(&self.config.args)
            .arg(format!(
                "--user-data-dir={}",
                workdir.join(PROFILE_DIR).display()
            ))
            .arg(format!("--print-to-pdf={}", workdir.join(OUTPUT_NAME).display()))
            .arg(format!("file://{}", workdir.join(PAGE_NAME).display()))
            .current_dir(workdir);
        command
    }
}

fn data_uri(image: &StampImage) -> String {
    format!("data:{};base64,{}", image.mime_type(), STANDARD.encode(&image.bytes))
}

#[async_trait]
impl RenderBackend for BrowserRenderer {
    fn id(&self) -> &'static str {
        BACKEND_ID
    }

    fn is_available(&self) -> bool {
        self.config.enabled && !self.config.command.trim().is_empty()
    }

    async fn render(
        &self,
        document: &CertificateDocument,
        stamps: &ResolvedStamps,
    ) -> Result<Vec<u8>, RenderError> {
        let workdir = tempfile::Builder::new()
            .prefix("certifolio-html-")
            .tempdir()?;
        tokio::fs::create_dir_all(workdir.path().join(PROFILE_DIR)).await?;

        let markup_stamps: Vec<MarkupStamp> = stamps
            .present()
            .into_iter()
            .map(|image| MarkupStamp {
                slot: image.slot,
                src: data_uri(image),
                include: String::new(),
            })
            .collect();

        let html = self.templates.render(document, &markup_stamps)?;
        tokio::fs::write(workdir.path().join(PAGE_NAME), html).await?;
        debug!(
            "[{}] printing {} from {}",
            BACKEND_ID,
            document.certificate_id(),
            workdir.path().display()
        );

        run_scoped(BACKEND_ID, self.command(workdir.path()), self.config.timeout()).await?;
        read_artifact(BACKEND_ID, &workdir.path().join(OUTPUT_NAME)).await
    }
}
