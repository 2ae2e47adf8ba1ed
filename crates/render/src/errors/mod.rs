//! Error types for the rendering crate.
//!
//! - [`RenderError`]: failures of a single backend or of the whole fallback chain
//! - [`StampFetchError`]: failures while resolving a remote stamp image

use std::time::Duration;

use thiserror::Error;

/// Errors raised while producing a certificate document.
///
/// Backend-level variants are absorbed by the rendering strategy, which moves
/// on to the next backend. Only [`RenderError::AllBackendsFailed`] escapes the
/// strategy.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The backend is not configured or its toolchain is missing.
    #[error("Backend '{backend}' is unavailable: {reason}")]
    Unavailable {
        backend: &'static str,
        reason: String,
    },

    /// The external compiler or renderer process could not be started.
    #[error("Failed to launch '{command}' for backend '{backend}': {source}")]
    Launch {
        backend: &'static str,
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The external process exited unsuccessfully.
    #[error("Backend '{backend}' exited with {status}: {stderr}")]
    ProcessFailed {
        backend: &'static str,
        status: String,
        stderr: String,
    },

    /// The external process did not finish within its time budget.
    #[error("Backend '{backend}' timed out after {timeout:?}")]
    Timeout {
        backend: &'static str,
        timeout: Duration,
    },

    /// The process reported success but produced no document.
    #[error("Backend '{backend}' produced no output artifact")]
    MissingArtifact { backend: &'static str },

    /// Markup generation failed.
    #[error("Template error: {0}")]
    Template(String),

    /// Writing the PDF structure failed.
    #[error("PDF assembly failed: {0}")]
    Pdf(String),

    /// The HTTP client used for stamp retrieval could not be built.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),

    /// Scratch directory or file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Every configured backend failed.
    #[error("All rendering backends failed: {}", format_attempts(.attempts))]
    AllBackendsFailed { attempts: Vec<BackendAttempt> },
}

impl From<handlebars::RenderError> for RenderError {
    fn from(err: handlebars::RenderError) -> Self {
        RenderError::Template(err.to_string())
    }
}

impl From<handlebars::TemplateError> for RenderError {
    fn from(err: handlebars::TemplateError) -> Self {
        RenderError::Template(err.to_string())
    }
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}

/// One failed attempt recorded by the fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendAttempt {
    pub backend: &'static str,
    pub message: String,
}

fn format_attempts(attempts: &[BackendAttempt]) -> String {
    if attempts.is_empty() {
        return "no backends configured".to_string();
    }
    attempts
        .iter()
        .map(|a| format!("{}: {}", a.backend, a.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised while fetching a stamp image.
///
/// Never fatal: the strategy logs them and renders without the stamp.
#[derive(Error, Debug)]
pub enum StampFetchError {
    #[error("Request for {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("Stamp {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Stamp {url} returned an empty body")]
    Empty { url: String },
}
