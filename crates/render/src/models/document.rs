use serde::Serialize;

use super::portfolio::PortfolioSummary;
use super::stamp::{StampRefs, StampSlot};
use super::transaction::TransactionCertificate;

/// The two certificate kinds the pipeline knows how to draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CertificateDocument {
    Transaction(TransactionCertificate),
    Portfolio(PortfolioSummary),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateKind {
    Transaction,
    Portfolio,
}

impl CertificateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CertificateKind::Transaction => "transaction",
            CertificateKind::Portfolio => "portfolio",
        }
    }
}

impl CertificateDocument {
    pub fn kind(&self) -> CertificateKind {
        match self {
            CertificateDocument::Transaction(_) => CertificateKind::Transaction,
            CertificateDocument::Portfolio(_) => CertificateKind::Portfolio,
        }
    }

    pub fn certificate_id(&self) -> &str {
        match self {
            CertificateDocument::Transaction(t) => &t.certificate_id,
            CertificateDocument::Portfolio(p) => &p.certificate_id,
        }
    }

    pub fn stamps(&self) -> &StampRefs {
        match self {
            CertificateDocument::Transaction(t) => &t.stamps,
            CertificateDocument::Portfolio(p) => &p.stamps,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CertificateDocument::Transaction(_) => "Transaction Certificate",
            CertificateDocument::Portfolio(_) => "Portfolio Summary",
        }
    }
}

/// A complete, self-contained PDF produced by one backend.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    /// Id of the backend that produced the bytes.
    pub backend: &'static str,
    /// Stamp slots that had a reference but were left out.
    pub omitted_stamps: Vec<StampSlot>,
}

impl RenderedDocument {
    pub fn new(bytes: Vec<u8>, backend: &'static str) -> Self {
        Self {
            bytes,
            backend,
            omitted_stamps: Vec::new(),
        }
    }
}
