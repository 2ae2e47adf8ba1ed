//! Presentation models handed to the rendering backends.
//!
//! Every monetary or quantity field is an already formatted decimal string.
//! Backends never do arithmetic on them.

mod document;
mod portfolio;
mod stamp;
mod transaction;

pub use document::{CertificateDocument, CertificateKind, RenderedDocument};
pub use portfolio::{PortfolioSummary, PortfolioTransactionRow};
pub use stamp::{ResolvedStamps, StampImage, StampRefs, StampSlot};
pub use transaction::TransactionCertificate;
