use async_trait::async_trait;

use crate::errors::RenderError;
use crate::models::{CertificateDocument, ResolvedStamps};

/// A single document-producing engine.
///
/// Implementations turn a presentation model plus already fetched stamp
/// images into the bytes of a complete PDF.
#[async_trait]
pub trait RenderBackend: Send + Sync {
    /// Stable identifier used in logs and fallback reports.
    fn id(&self) -> &'static str;

    /// Whether the backend can be attempted at all.
    fn is_available(&self) -> bool {
        true
    }

    async fn render(
        &self,
        document: &CertificateDocument,
        stamps: &ResolvedStamps,
    ) -> Result<Vec<u8>, RenderError>;
}
