use std::sync::Arc;

use certifolio_core::{CertificateService, CertificateServiceTrait};
use certifolio_render::{DocumentRenderer, RenderChain};
use certifolio_storage_local::{
    DatasetStore, InvestmentRepository, LocalObjectStore, PropertyRepository,
    TransactionRepository, UserRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub certificate_service: Arc<dyn CertificateServiceTrait>,
    pub object_store: Arc<LocalObjectStore>,
    /// Rendering backends in attempt order.
    pub backends: Vec<&'static str>,
}

pub fn init_tracing() {
    let log_format =
        std::env::var("CERTIFOLIO_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // logs go to stderr so stdout only carries command output
    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let dataset = Arc::new(DatasetStore::open(&config.dataset_path)?);
    tracing::info!("Dataset in use: {}", config.dataset_path.display());

    let object_store = Arc::new(LocalObjectStore::new(config.object_store.clone()));
    tracing::info!("Object store root: {}", object_store.root().display());

    let chain = RenderChain::from_config(&config.render)?;
    let backends = chain.backend_ids();
    tracing::info!("Rendering backends: {}", backends.join(" -> "));
    let renderer: Arc<dyn DocumentRenderer> = Arc::new(chain);

    let certificate_service = Arc::new(CertificateService::new(
        Arc::new(TransactionRepository::new(dataset.clone())),
        Arc::new(InvestmentRepository::new(dataset.clone())),
        Arc::new(PropertyRepository::new(dataset.clone())),
        Arc::new(UserRepository::new(dataset)),
        object_store.clone(),
        renderer,
        config.certificates.clone(),
    ));

    Ok(AppState {
        certificate_service,
        object_store,
        backends,
    })
}
