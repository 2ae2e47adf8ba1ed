//! Ordered fallback across rendering backends.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::backend::{BrowserRenderer, RenderBackend, TypesettingRenderer, VectorRenderer};
use crate::config::RenderConfig;
use crate::errors::{BackendAttempt, RenderError, StampFetchError};
use crate::models::{
    CertificateDocument, RenderedDocument, ResolvedStamps, StampImage, StampRefs, StampSlot,
};
use crate::stamps::{HttpStampFetcher, StampFetcher};

/// Turns a presentation model into a finished document.
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    async fn render(&self, document: &CertificateDocument) -> Result<RenderedDocument, RenderError>;
}

/// Tries each backend in order until one produces a non-empty document.
///
/// Stamps are fetched once, before the first attempt, and shared by every
/// backend. A stamp that cannot be fetched is left out with a warning.
pub struct RenderChain {
    backends: Vec<Arc<dyn RenderBackend>>,
    stamp_fetcher: Arc<dyn StampFetcher>,
}

impl RenderChain {
    pub fn new(backends: Vec<Arc<dyn RenderBackend>>, stamp_fetcher: Arc<dyn StampFetcher>) -> Self {
        Self {
            backends,
            stamp_fetcher,
        }
    }

    /// Builds the standard chain: typesetting (when configured), then browser,
    /// then vector.
    pub fn from_config(config: &RenderConfig) -> Result<Self, RenderError> {
        let template_dir = config.template_dir.as_deref();
        let mut backends: Vec<Arc<dyn RenderBackend>> = Vec::new();
        if let Some(typesetting) = &config.typesetting {
            backends.push(Arc::new(TypesettingRenderer::new(
                typesetting.clone(),
                template_dir,
            )?));
        }
        backends.push(Arc::new(BrowserRenderer::new(
            config.browser.clone(),
            template_dir,
        )?));
        backends.push(Arc::new(VectorRenderer::new()));

        let fetcher = Arc::new(HttpStampFetcher::new(&config.stamps)?);
        Ok(Self::new(backends, fetcher))
    }

    /// Backend ids in attempt order.
    pub fn backend_ids(&self) -> Vec<&'static str> {
        self.backends.iter().map(|b| b.id()).collect()
    }

    async fn fetch_slot(
        &self,
        slot: StampSlot,
        url: Option<&str>,
    ) -> Option<Result<StampImage, StampFetchError>> {
        match url {
            Some(url) => Some(self.stamp_fetcher.fetch(slot, url).await),
            None => None,
        }
    }

    /// Fetches both stamp slots concurrently.
    pub async fn resolve_stamps(&self, refs: &StampRefs) -> ResolvedStamps {
        let (primary, secondary) = tokio::join!(
            self.fetch_slot(StampSlot::Primary, refs.primary.as_deref()),
            self.fetch_slot(StampSlot::Secondary, refs.secondary.as_deref()),
        );

        let mut resolved = ResolvedStamps::none();
        for (slot, outcome) in [(StampSlot::Primary, primary), (StampSlot::Secondary, secondary)] {
            match outcome {
                Some(Ok(image)) => resolved.set(image),
                Some(Err(e)) => {
                    warn!("Omitting {} stamp: {}", slot.as_str(), e);
                    resolved.omitted.push(slot);
                }
                None => {}
            }
        }
        resolved
    }
}

#[async_trait]
impl DocumentRenderer for RenderChain {
    async fn render(&self, document: &CertificateDocument) -> Result<RenderedDocument, RenderError> {
        let stamps = self.resolve_stamps(document.stamps()).await;
        let mut attempts: Vec<BackendAttempt> = Vec::new();

        for backend in &self.backends {
            let id = backend.id();
            if !backend.is_available() {
                let skipped = RenderError::Unavailable {
                    backend: id,
                    reason: "disabled or not configured".to_string(),
                };
                debug!("Skipping: {}", skipped);
                attempts.push(BackendAttempt {
                    backend: id,
                    message: skipped.to_string(),
                });
                continue;
            }

            match backend.render(document, &stamps).await {
                Ok(bytes) if !bytes.is_empty() => {
                    info!(
                        "Rendered {} {} with '{}' ({} bytes)",
                        document.kind().as_str(),
                        document.certificate_id(),
                        id,
                        bytes.len()
                    );
                    let mut rendered = RenderedDocument::new(bytes, id);
                    rendered.omitted_stamps = stamps.omitted.clone();
                    return Ok(rendered);
                }
                Ok(_) => {
                    warn!("Backend '{}' returned an empty document, falling back", id);
                    attempts.push(BackendAttempt {
                        backend: id,
                        message: "empty document".to_string(),
                    });
                }
                Err(e) => {
                    warn!("Backend '{}' failed, falling back: {}", id, e);
                    attempts.push(BackendAttempt {
                        backend: id,
                        message: e.to_string(),
                    });
                }
            }
        }

        Err(RenderError::AllBackendsFailed { attempts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BrowserConfig, TypesettingConfig};
    use crate::test_fixtures::{sample_png, sample_portfolio, sample_transaction};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockBackend {
        id: &'static str,
        available: bool,
        output: Option<Vec<u8>>,
        calls: AtomicUsize,
    }

    impl MockBackend {
        fn new(id: &'static str, output: Option<Vec<u8>>) -> Self {
            Self {
                id,
                available: true,
                output,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl RenderBackend for MockBackend {
        fn id(&self) -> &'static str {
            self.id
        }

        fn is_available(&self) -> bool {
            self.available
        }

        async fn render(
            &self,
            _document: &CertificateDocument,
            _stamps: &ResolvedStamps,
        ) -> Result<Vec<u8>, RenderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.output
                .clone()
                .ok_or(RenderError::MissingArtifact { backend: self.id })
        }
    }

    /// Serves a PNG for urls ending in `.png` and a 404 otherwise.
    struct MockFetcher {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl StampFetcher for MockFetcher {
        async fn fetch(&self, slot: StampSlot, url: &str) -> Result<StampImage, StampFetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if url.ends_with(".png") {
                Ok(StampImage {
                    slot,
                    bytes: sample_png(),
                    content_type: Some("image/png".to_string()),
                })
            } else {
                Err(StampFetchError::Status {
                    url: url.to_string(),
                    status: 404,
                })
            }
        }
    }

    fn fetcher() -> Arc<MockFetcher> {
        Arc::new(MockFetcher {
            calls: AtomicUsize::new(0),
        })
    }

    #[tokio::test]
    async fn test_first_successful_backend_wins() {
        let first = Arc::new(MockBackend::new("first", None));
        let second = Arc::new(MockBackend::new("second", Some(b"%PDF-second".to_vec())));
        let third = Arc::new(MockBackend::new("third", Some(b"%PDF-third".to_vec())));
        let backends: Vec<Arc<dyn RenderBackend>> = vec![first.clone(), second, third.clone()];
        let chain = RenderChain::new(backends, fetcher());

        let rendered = chain
            .render(&CertificateDocument::Transaction(sample_transaction()))
            .await
            .unwrap();
        assert_eq!(rendered.backend, "second");
        assert_eq!(rendered.bytes, b"%PDF-second");
        assert_eq!(first.calls.load(Ordering::SeqCst), 1);
        assert_eq!(third.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_output_and_unavailable_backends_are_skipped() {
        let mut unavailable = MockBackend::new("off", Some(b"never".to_vec()));
        unavailable.available = false;
        let unavailable = Arc::new(unavailable);
        let empty = Arc::new(MockBackend::new("empty", Some(Vec::new())));
        let good = Arc::new(MockBackend::new("good", Some(b"%PDF".to_vec())));
        let backends: Vec<Arc<dyn RenderBackend>> = vec![unavailable.clone(), empty, good];
        let chain = RenderChain::new(backends, fetcher());

        let rendered = chain
            .render(&CertificateDocument::Portfolio(sample_portfolio()))
            .await
            .unwrap();
        assert_eq!(rendered.backend, "good");
        assert_eq!(unavailable.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_all_failures_reported_per_backend() {
        let backends: Vec<Arc<dyn RenderBackend>> = vec![
            Arc::new(MockBackend::new("a", None)),
            Arc::new(MockBackend::new("b", None)),
        ];
        let chain = RenderChain::new(backends, fetcher());
        let err = chain
            .render(&CertificateDocument::Transaction(sample_transaction()))
            .await
            .unwrap_err();
        match err {
            RenderError::AllBackendsFailed { attempts } => {
                let ids: Vec<_> = attempts.iter().map(|a| a.backend).collect();
                assert_eq!(ids, vec!["a", "b"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_stamp_is_omitted_not_fatal() {
        let mut cert = sample_transaction();
        cert.stamps = StampRefs {
            primary: Some("https://assets.example/stamp.png".to_string()),
            secondary: Some("https://assets.example/missing".to_string()),
        };
        let fetcher = fetcher();
        let backends: Vec<Arc<dyn RenderBackend>> =
            vec![Arc::new(MockBackend::new("ok", Some(b"%PDF".to_vec())))];
        let chain = RenderChain::new(backends, fetcher.clone());
        let rendered = chain
            .render(&CertificateDocument::Transaction(cert))
            .await
            .unwrap();
        assert_eq!(rendered.omitted_stamps, vec![StampSlot::Secondary]);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_missing_stamp_refs_are_not_fetched() {
        let fetcher = fetcher();
        let backends: Vec<Arc<dyn RenderBackend>> = vec![Arc::new(VectorRenderer::new())];
        let chain = RenderChain::new(backends, fetcher.clone());
        let resolved = chain.resolve_stamps(&StampRefs::default()).await;
        assert!(resolved.present().is_empty());
        assert!(resolved.omitted.is_empty());
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_from_config_orders_backends() {
        let config = RenderConfig {
            typesetting: Some(TypesettingConfig::default()),
            ..RenderConfig::default()
        };
        let chain = RenderChain::from_config(&config).unwrap();
        assert_eq!(chain.backend_ids(), vec!["typesetting", "browser", "vector"]);

        let chain = RenderChain::from_config(&RenderConfig::default()).unwrap();
        assert_eq!(chain.backend_ids(), vec!["browser", "vector"]);
    }

    #[tokio::test]
    async fn test_missing_toolchains_fall_back_to_vector() {
        let config = RenderConfig {
            typesetting: Some(TypesettingConfig {
                command: "certifolio-missing-pdflatex".to_string(),
                ..TypesettingConfig::default()
            }),
            browser: BrowserConfig {
                command: "certifolio-missing-chromium".to_string(),
                ..BrowserConfig::default()
            },
            ..RenderConfig::default()
        };
        let chain = RenderChain::from_config(&config).unwrap();
        let rendered = chain
            .render(&CertificateDocument::Portfolio(sample_portfolio()))
            .await
            .unwrap();
        assert_eq!(rendered.backend, "vector");
        assert!(rendered.bytes.starts_with(b"%PDF"));
    }
}
