//! Certificate generation results and lifecycle.

use std::fmt;

use log::{debug, error, warn};
use serde::Serialize;

use crate::errors::Error;

/// Links returned to the caller of a generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateLinks {
    /// Canonical public URL, as persisted on the record.
    pub stored_url: String,
    /// Time-bounded link for immediate access.
    pub signed_url: String,
    /// True when an existing document was reused without rendering.
    pub reused_existing: bool,
    /// Backend that produced the document; `None` when reused.
    pub backend: Option<String>,
    pub warnings: Vec<GenerationWarning>,
}

/// Non-fatal conditions met while generating a certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GenerationWarning {
    /// A stamp could not be fetched and was left out of the document.
    StampOmitted { slot: String },
    /// The explicitly requested investment does not exist.
    InvestmentNotFound { investment_id: String },
    /// No investment could be resolved to mirror the certificate path onto.
    InvestmentMirrorSkipped { transaction_id: String },
}

impl fmt::Display for GenerationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationWarning::StampOmitted { slot } => {
                write!(f, "{} stamp omitted from the document", slot)
            }
            GenerationWarning::InvestmentNotFound { investment_id } => {
                write!(f, "investment '{}' not found", investment_id)
            }
            GenerationWarning::InvestmentMirrorSkipped { transaction_id } => write!(
                f,
                "no investment resolved for transaction '{}'; path not mirrored",
                transaction_id
            ),
        }
    }
}

/// Lifecycle of a single generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    NotStarted,
    Loading,
    /// A stored document was found; no render happens.
    Existing,
    Rendering,
    Uploading,
    Persisting,
    LinkIssued,
    Failed,
}

impl GenerationState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GenerationState::LinkIssued | GenerationState::Failed)
    }
}

/// Tracks and logs the state of one generation request.
#[derive(Debug)]
pub struct GenerationProgress {
    target: String,
    state: GenerationState,
}

impl GenerationProgress {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            state: GenerationState::NotStarted,
        }
    }

    pub fn state(&self) -> GenerationState {
        self.state
    }

    pub fn advance(&mut self, next: GenerationState) {
        debug!("[{}] {:?} -> {:?}", self.target, self.state, next);
        self.state = next;
    }

    /// Moves to `Failed`, logging `err` according to its kind.
    pub fn fail(&mut self, err: &Error) {
        if err.is_not_found() {
            warn!("[{}] generation failed in {:?}: {}", self.target, self.state, err);
        } else {
            error!(
                "[{}] generation failed in {:?}: {} ({:?})",
                self.target, self.state, err, err
            );
        }
        self.advance(GenerationState::Failed);
    }
}
