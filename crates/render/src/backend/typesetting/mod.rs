//! LaTeX backend: markup compiled by an external typesetter.

mod escape;

use std::path::Path;

use async_trait::async_trait;
use log::debug;
use tokio::process::Command;

use super::markup::{MarkupDialect, MarkupStamp, MarkupTemplates};
use super::process::{read_artifact, run_scoped};
use super::traits::RenderBackend;
use crate::config::TypesettingConfig;
use crate::errors::RenderError;
use crate::layout::STAMP_SIZE;
use crate::models::{CertificateDocument, ResolvedStamps};

pub use escape::escape_latex;

const BACKEND_ID: &str = "typesetting";
const SOURCE_NAME: &str = "certificate.tex";
const OUTPUT_NAME: &str = "certificate.pdf";

/// Compiles generated LaTeX with the configured command.
///
/// Each render runs in its own scratch directory, removed when the render
/// returns, whatever the outcome.
pub struct TypesettingRenderer {
    config: TypesettingConfig,
    templates: MarkupTemplates,
}

impl TypesettingRenderer {
    pub fn new(config: TypesettingConfig, template_dir: Option<&Path>) -> Result<Self, RenderError> {
        let templates = MarkupTemplates::load(MarkupDialect::Latex, template_dir)?;
        Ok(Self { config, templates })
    }

    fn command(&self, workdir: &Path) -> Command {
        let mut command = Command::new(&self.config.command);
        command
            .args(&self.config.args)
            .arg(format!("-output-directory={}", workdir.display()))
            .arg(SOURCE_NAME)
            .current_dir(workdir);
        command
    }
}

#[async_trait]
impl RenderBackend for TypesettingRenderer {
    fn id(&self) -> &'static str {
        BACKEND_ID
    }

    fn is_available(&self) -> bool {
        !self.config.command.trim().is_empty()
    }

    async fn render(
        &self,
        document: &CertificateDocument,
        stamps: &ResolvedStamps,
    ) -> Result<Vec<u8>, RenderError> {
        let workdir = tempfile::Builder::new()
            .prefix("certifolio-tex-")
            .tempdir()?;

        let mut markup_stamps = Vec::new();
        for image in stamps.present() {
            let file_name = format!("stamp-{}.{}", image.slot.as_str(), image.extension());
            tokio::fs::write(workdir.path().join(&file_name), &image.bytes).await?;
            markup_stamps.push(MarkupStamp {
                slot: image.slot,
                src: file_name.clone(),
                include: format!(
                    r"\includegraphics[width={size}pt,height={size}pt]{{{file}}}",
                    size = STAMP_SIZE,
                    file = file_name
                ),
            });
        }

        let source = self.templates.render(document, &markup_stamps)?;
        tokio::fs::write(workdir.path().join(SOURCE_NAME), source).await?;
        debug!(
            "[{}] compiling {} in {}",
            BACKEND_ID,
            document.certificate_id(),
            workdir.path().display()
        );

        run_scoped(BACKEND_ID, self.command(workdir.path()), self.config.timeout()).await?;
        read_artifact(BACKEND_ID, &workdir.path().join(OUTPUT_NAME)).await
    }
}
