//! Markup generation for the browser and typesetting backends.

use std::path::Path;

use handlebars::Handlebars;
use log::debug;
use serde::Serialize;
use serde_json::json;

use super::typesetting::escape_latex;
use crate::errors::RenderError;
use crate::layout::truncate_digest;
use crate::models::{CertificateDocument, StampSlot};

/// Markup language produced by a template set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupDialect {
    Html,
    Latex,
}

impl MarkupDialect {
    fn extension(&self) -> &'static str {
        match self {
            MarkupDialect::Html => "html.hbs",
            MarkupDialect::Latex => "tex.hbs",
        }
    }

    fn builtin(&self, name: &str) -> Option<&'static str> {
        match (self, name) {
            (MarkupDialect::Html, "transaction") => {
                Some(include_str!("../../templates/transaction.html.hbs"))
            }
            (MarkupDialect::Html, "portfolio") => {
                Some(include_str!("../../templates/portfolio.html.hbs"))
            }
            (MarkupDialect::Html, "styles") => Some(include_str!("../../templates/styles.html.hbs")),
            (MarkupDialect::Latex, "transaction") => {
                Some(include_str!("../../templates/transaction.tex.hbs"))
            }
            (MarkupDialect::Latex, "portfolio") => {
                Some(include_str!("../../templates/portfolio.tex.hbs"))
            }
            (MarkupDialect::Latex, "preamble") => {
                Some(include_str!("../../templates/preamble.tex.hbs"))
            }
            _ => None,
        }
    }

    fn template_names(&self) -> &'static [&'static str] {
        match self {
            MarkupDialect::Html => &["styles", "transaction", "portfolio"],
            MarkupDialect::Latex => &["preamble", "transaction", "portfolio"],
        }
    }
}

/// A stamp as referenced from markup.
///
/// `src` is a data URI for HTML; `include` is a ready-made `\includegraphics`
/// command for LaTeX. Both are emitted unescaped.
#[derive(Debug, Clone, Serialize)]
pub struct MarkupStamp {
    pub slot: StampSlot,
    pub src: String,
    pub include: String,
}

/// Compiled template set for one markup dialect.
pub struct MarkupTemplates {
    registry: Handlebars<'static>,
}

impl MarkupTemplates {
    /// Loads the templates for `dialect`.
    ///
    /// A file named `<template>.<dialect extension>` in `template_dir`
    /// replaces the built-in template of the same name.
    pub fn load(dialect: MarkupDialect, template_dir: Option<&Path>) -> Result<Self, RenderError> {
        let mut registry = Handlebars::new();
        if dialect == MarkupDialect::Latex {
            registry.register_escape_fn(escape_latex);
        }

        for name in dialect.template_names() {
            let override_path =
                template_dir.map(|dir| dir.join(format!("{}.{}", name, dialect.extension())));
            match override_path {
                Some(path) if path.is_file() => {
                    debug!("Loading template override {}", path.display());
                    registry.register_template_file(name, &path)?;
                }
                _ => {
                    let source = dialect.builtin(name).ok_or_else(|| {
                        RenderError::Template(format!("No built-in template named '{}'", name))
                    })?;
                    registry.register_template_string(name, source)?;
                }
            }
        }

        Ok(Self { registry })
    }

    /// Renders the markup for `document`.
    pub fn render(
        &self,
        document: &CertificateDocument,
        stamps: &[MarkupStamp],
    ) -> Result<String, RenderError> {
        let data = match document {
            CertificateDocument::Transaction(cert) => json!({
                "title": document.title(),
                "doc": cert,
                "digestShort": truncate_digest(&cert.integrity_hash),
                "statusCompleted": cert.is_completed(),
                "stamps": stamps,
            }),
            CertificateDocument::Portfolio(summary) => json!({
                "title": document.title(),
                "doc": summary,
                "hasTransactions": !summary.transactions.is_empty(),
                "stamps": stamps,
            }),
        };
        let template = document.kind().as_str();
        Ok(self.registry.render(template, &data)?)
    }
}
