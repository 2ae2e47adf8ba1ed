use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};

use certifolio_render::{CertificateDocument, DocumentRenderer, RenderedDocument, StampRefs};

use super::assembler::{assemble_portfolio_summary, assemble_transaction_certificate};
use super::certificates_config::CertificateConfig;
use super::certificates_model::{
    CertificateLinks, GenerationProgress, GenerationState, GenerationWarning,
};
use super::certificates_traits::CertificateServiceTrait;
use super::generation_lock::{portfolio_key, transaction_key, GenerationLocks};
use crate::constants::{PDF_CONTENT_TYPE, PDF_EXTENSION, PORTFOLIO_ROOT, TRANSACTIONS_ROOT};
use crate::errors::{Error, NotFoundError, Result};
use crate::investments::{most_recent, Investment, InvestmentRepositoryTrait};
use crate::properties::{Property, PropertyRepositoryTrait};
use crate::storage::{normalize_stored_path, ObjectStoreTrait};
use crate::transactions::{Transaction, TransactionRepositoryTrait};
use crate::users::{User, UserRepositoryTrait};

/// Generates, stores and links certificates.
///
/// Generation for one target is serialized by a per-target lock, and the
/// stored path is re-read once the lock is held, so concurrent requests for
/// the same transaction render at most once per process.
pub struct CertificateService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    investment_repository: Arc<dyn InvestmentRepositoryTrait>,
    property_repository: Arc<dyn PropertyRepositoryTrait>,
    user_repository: Arc<dyn UserRepositoryTrait>,
    object_store: Arc<dyn ObjectStoreTrait>,
    renderer: Arc<dyn DocumentRenderer>,
    config: CertificateConfig,
    locks: GenerationLocks,
}

impl CertificateService {
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        investment_repository: Arc<dyn InvestmentRepositoryTrait>,
        property_repository: Arc<dyn PropertyRepositoryTrait>,
        user_repository: Arc<dyn UserRepositoryTrait>,
        object_store: Arc<dyn ObjectStoreTrait>,
        renderer: Arc<dyn DocumentRenderer>,
        config: CertificateConfig,
    ) -> Self {
        Self {
            transaction_repository,
            investment_repository,
            property_repository,
            user_repository,
            object_store,
            renderer,
            config,
            locks: GenerationLocks::new(),
        }
    }

    fn load_transaction(&self, transaction_id: &str) -> Result<Transaction> {
        self.transaction_repository
            .get_by_id(transaction_id)?
            .ok_or_else(|| NotFoundError::Transaction(transaction_id.to_string()).into())
    }

    /// Looks a transaction up by id, then by display code.
    fn resolve_transaction(&self, reference: &str) -> Result<Transaction> {
        let reference = reference.trim();
        if let Some(tx) = self.transaction_repository.get_by_id(reference)? {
            return Ok(tx);
        }
        self.transaction_repository
            .get_by_display_code(reference)?
            .ok_or_else(|| NotFoundError::Transaction(reference.to_string()).into())
    }

    fn load_user(&self, user_id: &str) -> Result<User> {
        self.user_repository
            .get_by_id(user_id)?
            .ok_or_else(|| NotFoundError::User(user_id.to_string()).into())
    }

    /// Looks a property up by id, then by display code.
    fn resolve_property(&self, reference: &str) -> Result<Property> {
        let reference = reference.trim();
        if let Some(property) = self.property_repository.get_by_id(reference)? {
            return Ok(property);
        }
        self.property_repository
            .get_by_display_code(reference)?
            .ok_or_else(|| NotFoundError::Property(reference.to_string()).into())
    }

    /// Investment that mirrors a transaction's certificate path.
    ///
    /// Order of preference: the explicitly requested investment, the
    /// investment paid for by the transaction, the latest investment with the
    /// same owner and property.
    fn resolve_investment(
        &self,
        transaction: &Transaction,
        investment_id: Option<&str>,
        warnings: &mut Vec<GenerationWarning>,
    ) -> Result<Option<Investment>> {
        if let Some(id) = investment_id.map(str::trim).filter(|id| !id.is_empty()) {
            match self.investment_repository.get_by_id(id)? {
                Some(investment) => return Ok(Some(investment)),
                None => {
                    warn!(
                        "Investment {} requested for transaction {} does not exist",
                        id, transaction.id
                    );
                    warnings.push(GenerationWarning::InvestmentNotFound {
                        investment_id: id.to_string(),
                    });
                }
            }
        }

        let candidates = self
            .investment_repository
            .list_by_user_and_property(&transaction.user_id, &transaction.property_id)?;
        let linked = candidates
            .iter()
            .find(|i| i.transaction_id.as_deref() == Some(transaction.id.as_str()));
        Ok(linked.or_else(|| most_recent(&candidates)).cloned())
    }

    fn stamp_refs(&self) -> StampRefs {
        StampRefs {
            primary: self.asset_url(self.config.primary_stamp_asset.as_deref()),
            secondary: self.asset_url(self.config.secondary_stamp_asset.as_deref()),
        }
    }

    fn asset_url(&self, name: Option<&str>) -> Option<String> {
        let name = name.map(str::trim).filter(|n| !n.is_empty())?;
        match self.object_store.asset_url(name) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("Stamp asset '{}' has no URL, omitting it: {}", name, e);
                None
            }
        }
    }

    async fn render(
        &self,
        document: CertificateDocument,
        warnings: &mut Vec<GenerationWarning>,
    ) -> Result<RenderedDocument> {
        let rendered = self.renderer.render(&document).await?;
        for slot in &rendered.omitted_stamps {
            warnings.push(GenerationWarning::StampOmitted {
                slot: slot.as_str().to_string(),
            });
        }
        Ok(rendered)
    }

    /// Uploads a document and returns its stored path and public URL.
    async fn upload(&self, path: String, bytes: Vec<u8>) -> Result<(String, String)> {
        let stored_path = self
            .object_store
            .upload(&path, bytes, PDF_CONTENT_TYPE)
            .await
            .map_err(|source| Error::Upload {
                path: path.clone(),
                source,
            })?;
        let public_url = self.object_store.public_url(&stored_path)?;
        debug!("Uploaded {} as {}", stored_path, public_url);
        Ok((stored_path, public_url))
    }

    /// Signed link for a persisted location in any of its historical forms.
    async fn issue_link(&self, stored: &str) -> Result<String> {
        let path = normalize_stored_path(stored, self.object_store.public_base_url())?;
        self.sign(&path).await
    }

    async fn sign(&self, path: &str) -> Result<String> {
        Ok(self
            .object_store
            .signed_url(path, self.config.signed_url_ttl())
            .await?)
    }

    /// Sets the investment mirror of an already generated certificate when it
    /// is still empty.
    async fn backfill_mirror(
        &self,
        transaction: &Transaction,
        investment_id: Option<&str>,
        stored_url: &str,
        warnings: &mut Vec<GenerationWarning>,
    ) -> Result<()> {
        match self.resolve_investment(transaction, investment_id, warnings)? {
            Some(investment) if !investment.has_certificate() => {
                info!(
                    "Mirroring existing certificate of transaction {} onto investment {}",
                    transaction.id, investment.id
                );
                self.investment_repository
                    .set_certificate_path(&investment.id, stored_url)
                    .await
            }
            _ => Ok(()),
        }
    }

    async fn generate_transaction(
        &self,
        progress: &mut GenerationProgress,
        transaction_id: &str,
        investment_id: Option<&str>,
    ) -> Result<CertificateLinks> {
        progress.advance(GenerationState::Loading);
        let key = transaction_key(transaction_id);
        let _guard = self.locks.acquire(&key).await;

        let transaction = self.load_transaction(transaction_id)?;
        let mut warnings = Vec::new();

        if let Some(stored) = transaction.stored_certificate() {
            progress.advance(GenerationState::Existing);
            let stored_url = stored.to_string();
            self.backfill_mirror(&transaction, investment_id, &stored_url, &mut warnings)
                .await?;
            let signed_url = self.issue_link(&stored_url).await?;
            progress.advance(GenerationState::LinkIssued);
            info!("Reused certificate of transaction {}", transaction.id);
            return Ok(CertificateLinks {
                stored_url,
                signed_url,
                reused_existing: true,
                backend: None,
                warnings,
            });
        }

        let user = self.load_user(&transaction.user_id)?;
        let property = self.resolve_property(&transaction.property_id)?;
        let investment = self.resolve_investment(&transaction, investment_id, &mut warnings)?;

        progress.advance(GenerationState::Rendering);
        let certificate = assemble_transaction_certificate(
            &transaction,
            &user,
            &property,
            investment.as_ref(),
            self.stamp_refs(),
            Utc::now(),
        )?;
        let rendered = self
            .render(CertificateDocument::Transaction(certificate), &mut warnings)
            .await?;
        let backend = rendered.backend.to_string();

        progress.advance(GenerationState::Uploading);
        let path = format!(
            "{}/{}/{}.{}",
            TRANSACTIONS_ROOT, transaction.user_id, transaction.id, PDF_EXTENSION
        );
        let (stored_path, stored_url) = self.upload(path, rendered.bytes).await?;

        progress.advance(GenerationState::Persisting);
        self.transaction_repository
            .set_certificate_path(&transaction.id, &stored_url)
            .await?;
        match &investment {
            Some(investment) => {
                self.investment_repository
                    .set_certificate_path(&investment.id, &stored_url)
                    .await?
            }
            None => {
                warn!(
                    "No investment found for transaction {}; certificate path not mirrored",
                    transaction.id
                );
                warnings.push(GenerationWarning::InvestmentMirrorSkipped {
                    transaction_id: transaction.id.clone(),
                });
            }
        }

        let signed_url = self.sign(&stored_path).await?;
        progress.advance(GenerationState::LinkIssued);
        info!(
            "Generated certificate of transaction {} with {} backend",
            transaction.id, backend
        );
        Ok(CertificateLinks {
            stored_url,
            signed_url,
            reused_existing: false,
            backend: Some(backend),
            warnings,
        })
    }

    async fn generate_portfolio(
        &self,
        progress: &mut GenerationProgress,
        user_id: &str,
        property_ref: &str,
    ) -> Result<CertificateLinks> {
        progress.advance(GenerationState::Loading);
        let user = self.load_user(user_id)?;
        let property = self.resolve_property(property_ref)?;

        let key = portfolio_key(&user.id, &property.id);
        let _guard = self.locks.acquire(&key).await;

        let investments = self
            .investment_repository
            .list_by_user_and_property(&user.id, &property.id)?;
        if !investments.iter().any(Investment::is_confirmed) {
            return Err(NotFoundError::NoConfirmedInvestments {
                user_id: user.id.clone(),
                property_id: property.id.clone(),
            }
            .into());
        }
        let transactions = self
            .transaction_repository
            .list_by_user_and_property(&user.id, &property.id)?;

        progress.advance(GenerationState::Rendering);
        let mut warnings = Vec::new();
        let summary = assemble_portfolio_summary(
            &user,
            &property,
            &investments,
            &transactions,
            self.stamp_refs(),
            Utc::now(),
        )?;
        let rendered = self
            .render(CertificateDocument::Portfolio(summary), &mut warnings)
            .await?;
        let backend = rendered.backend.to_string();

        progress.advance(GenerationState::Uploading);
        let path = format!(
            "{}/{}/{}.{}",
            PORTFOLIO_ROOT, user.id, property.id, PDF_EXTENSION
        );
        let (stored_path, stored_url) = self.upload(path, rendered.bytes).await?;

        let signed_url = self.sign(&stored_path).await?;
        progress.advance(GenerationState::LinkIssued);
        info!(
            "Generated portfolio summary of user {} in property {} with {} backend",
            user.id, property.id, backend
        );
        Ok(CertificateLinks {
            stored_url,
            signed_url,
            reused_existing: false,
            backend: Some(backend),
            warnings,
        })
    }
}

#[async_trait]
impl CertificateServiceTrait for CertificateService {
    async fn generate_transaction_certificate(
        &self,
        transaction_id: &str,
        investment_id: Option<&str>,
    ) -> Result<CertificateLinks> {
        let mut progress = GenerationProgress::new(transaction_key(transaction_id));
        let result = self
            .generate_transaction(&mut progress, transaction_id, investment_id)
            .await;
        if let Err(e) = &result {
            progress.fail(e);
        }
        result
    }

    async fn generate_portfolio_summary(
        &self,
        user_id: &str,
        property_ref: &str,
    ) -> Result<CertificateLinks> {
        let mut progress = GenerationProgress::new(portfolio_key(user_id, property_ref));
        let result = self
            .generate_portfolio(&mut progress, user_id, property_ref)
            .await;
        if let Err(e) = &result {
            progress.fail(e);
        }
        result
    }

    async fn get_transaction_certificate(&self, transaction_ref: &str) -> Result<String> {
        let transaction = self.resolve_transaction(transaction_ref)?;
        let links = self
            .generate_transaction_certificate(&transaction.id, None)
            .await?;
        Ok(links.signed_url)
    }

    async fn get_property_legal_document(&self, property_ref: &str) -> Result<Option<String>> {
        let property = self.resolve_property(property_ref)?;
        match property
            .legal_document_path
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
        {
            Some(stored) => Ok(Some(self.issue_link(stored).await?)),
            None => {
                debug!("Property {} has no legal document", property.id);
                Ok(None)
            }
        }
    }
}
