//! Certificate rendering: presentation models, coordinate layout primitives,
//! the three document backends and the fallback chain that selects among them.

pub mod backend;
pub mod config;
pub mod errors;
pub mod layout;
pub mod models;
pub mod stamps;
pub mod strategy;

pub use backend::{
    escape_latex, BrowserRenderer, MarkupDialect, MarkupTemplates, RenderBackend,
    TypesettingRenderer, VectorRenderer,
};
pub use config::{BrowserConfig, RenderConfig, StampFetchConfig, TypesettingConfig};
pub use errors::{BackendAttempt, RenderError, StampFetchError};
pub use models::{
    CertificateDocument, CertificateKind, PortfolioSummary, PortfolioTransactionRow,
    RenderedDocument, ResolvedStamps, StampImage, StampRefs, StampSlot, TransactionCertificate,
};
pub use stamps::{HttpStampFetcher, StampFetcher};
pub use strategy::{DocumentRenderer, RenderChain};
