#[cfg(test)]
mod tests {
    use crate::certificates::{
        CertificateConfig, CertificateService, CertificateServiceTrait, GenerationWarning,
    };
    use crate::errors::{Error, NotFoundError, Result};
    use crate::investments::{Investment, InvestmentRepositoryTrait};
    use crate::properties::{Property, PropertyRepositoryTrait};
    use crate::storage::{ObjectStoreTrait, StorageError};
    use crate::transactions::{Transaction, TransactionRepositoryTrait};
    use crate::users::{User, UserRepositoryTrait};
    use async_trait::async_trait;
    use certifolio_render::{
        CertificateDocument, DocumentRenderer, RenderError, RenderedDocument, StampSlot,
    };
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex, RwLock};
    use std::time::Duration;

    const PUBLIC_BASE: &str = "https://store.test/public";

    // --- Mock records, one store serving all four repositories ---
    #[derive(Default)]
    struct MockRecords {
        transactions: RwLock<Vec<Transaction>>,
        investments: RwLock<Vec<Investment>>,
        properties: RwLock<Vec<Property>>,
        users: RwLock<Vec<User>>,
    }

    impl MockRecords {
        fn transaction(&self, id: &str) -> Transaction {
            self.transactions
                .read()
                .unwrap()
                .iter()
                .find(|t| t.id == id)
                .cloned()
                .unwrap()
        }

        fn investment(&self, id: &str) -> Investment {
            self.investments
                .read()
                .unwrap()
                .iter()
                .find(|i| i.id == id)
                .cloned()
                .unwrap()
        }
    }

    #[async_trait]
    impl TransactionRepositoryTrait for MockRecords {
        fn get_by_id(&self, transaction_id: &str) -> Result<Option<Transaction>> {
            Ok(self
                .transactions
                .read()
                .unwrap()
                .iter()
                .find(|t| t.id == transaction_id)
                .cloned())
        }

        fn get_by_display_code(&self, display_code: &str) -> Result<Option<Transaction>> {
            Ok(self
                .transactions
                .read()
                .unwrap()
                .iter()
                .find(|t| t.display_code.as_deref() == Some(display_code))
                .cloned())
        }

        fn list_by_user_and_property(
            &self,
            user_id: &str,
            property_id: &str,
        ) -> Result<Vec<Transaction>> {
            Ok(self
                .transactions
                .read()
                .unwrap()
                .iter()
                .filter(|t| t.user_id == user_id && t.property_id == property_id)
                .cloned()
                .collect())
        }

        async fn set_certificate_path(&self, transaction_id: &str, path: &str) -> Result<()> {
            let mut transactions = self.transactions.write().unwrap();
            if let Some(tx) = transactions.iter_mut().find(|t| t.id == transaction_id) {
                tx.certificate_path = Some(path.to_string());
            }
            Ok(())
        }
    }

    #[async_trait]
    impl InvestmentRepositoryTrait for MockRecords {
        fn get_by_id(&self, investment_id: &str) -> Result<Option<Investment>> {
            Ok(self
                .investments
                .read()
                .unwrap()
                .iter()
                .find(|i| i.id == investment_id)
                .cloned())
        }

        fn list_by_user_and_property(
            &self,
            user_id: &str,
            property_id: &str,
        ) -> Result<Vec<Investment>> {
            Ok(self
                .investments
                .read()
                .unwrap()
                .iter()
                .filter(|i| i.user_id == user_id && i.property_id == property_id)
                .cloned()
                .collect())
        }

        async fn set_certificate_path(&self, investment_id: &str, path: &str) -> Result<()> {
            let mut investments = self.investments.write().unwrap();
            if let Some(investment) = investments.iter_mut().find(|i| i.id == investment_id) {
                investment.certificate_path = Some(path.to_string());
            }
            Ok(())
        }
    }

    impl PropertyRepositoryTrait for MockRecords {
        fn get_by_id(&self, property_id: &str) -> Result<Option<Property>> {
            Ok(self
                .properties
                .read()
                .unwrap()
                .iter()
                .find(|p| p.id == property_id)
                .cloned())
        }

        fn get_by_display_code(&self, display_code: &str) -> Result<Option<Property>> {
            Ok(self
                .properties
                .read()
                .unwrap()
                .iter()
                .find(|p| p.display_code.as_deref() == Some(display_code))
                .cloned())
        }
    }

    impl UserRepositoryTrait for MockRecords {
        fn get_by_id(&self, user_id: &str) -> Result<Option<User>> {
            Ok(self
                .users
                .read()
                .unwrap()
                .iter()
                .find(|u| u.id == user_id)
                .cloned())
        }
    }

    // --- Mock object store ---
    #[derive(Default)]
    struct MockObjectStore {
        uploads: Mutex<Vec<String>>,
        fail_uploads: bool,
    }

    #[async_trait]
    impl ObjectStoreTrait for MockObjectStore {
        async fn upload(
            &self,
            path: &str,
            _bytes: Vec<u8>,
            _content_type: &str,
        ) -> std::result::Result<String, StorageError> {
            if self.fail_uploads {
                return Err(StorageError::Backend("bucket is read-only".to_string()));
            }
            self.uploads.lock().unwrap().push(path.to_string());
            Ok(path.to_string())
        }

        fn public_url(&self, path: &str) -> std::result::Result<String, StorageError> {
            Ok(format!("{}/{}", PUBLIC_BASE, path))
        }

        async fn signed_url(
            &self,
            path: &str,
            ttl: Duration,
        ) -> std::result::Result<String, StorageError> {
            Ok(format!(
                "https://store.test/signed/{}?ttl={}",
                path,
                ttl.as_secs()
            ))
        }

        fn asset_url(&self, name: &str) -> std::result::Result<String, StorageError> {
            Ok(format!("{}/assets/{}", PUBLIC_BASE, name))
        }

        fn public_base_url(&self) -> &str {
            PUBLIC_BASE
        }
    }

    impl MockObjectStore {
        fn upload_count(&self) -> usize {
            self.uploads.lock().unwrap().len()
        }
    }

    // --- Mock renderer ---
    #[derive(Default)]
    struct MockRenderer {
        renders: AtomicUsize,
        delay: Option<Duration>,
        omitted: Vec<StampSlot>,
        documents: Mutex<Vec<CertificateDocument>>,
    }

    #[async_trait]
    impl DocumentRenderer for MockRenderer {
        async fn render(
            &self,
            document: &CertificateDocument,
        ) -> std::result::Result<RenderedDocument, RenderError> {
            self.renders.fetch_add(1, Ordering::SeqCst);
            self.documents.lock().unwrap().push(document.clone());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            let mut rendered = RenderedDocument::new(b"%PDF-1.5 mock".to_vec(), "vector");
            rendered.omitted_stamps = self.omitted.clone();
            Ok(rendered)
        }
    }

    impl MockRenderer {
        fn render_count(&self) -> usize {
            self.renders.load(Ordering::SeqCst)
        }
    }

    // --- Fixtures ---
    fn user() -> User {
        User {
            id: "u1".to_string(),
            display_code: Some("INV-001".to_string()),
            full_name: "Jane Investor".to_string(),
            email: None,
        }
    }

    fn property(total_tokens: Decimal) -> Property {
        Property {
            id: "p1".to_string(),
            display_code: Some("PROP-01".to_string()),
            name: "Harbour View".to_string(),
            location: "Lisbon".to_string(),
            total_tokens,
            token_price: dec!(100),
            expected_roi: dec!(8.5),
            legal_document_path: None,
            created_at: Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap(),
        }
    }

    fn transaction(id: &str, amount: Decimal, day: u32) -> Transaction {
        Transaction {
            id: id.to_string(),
            display_code: Some(format!("TX-{}", id.to_uppercase())),
            user_id: "u1".to_string(),
            property_id: "p1".to_string(),
            amount,
            status: "completed".to_string(),
            transaction_type: "investment".to_string(),
            blockchain_hash: None,
            blockchain_network: None,
            certificate_path: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap(),
        }
    }

    fn investment(id: &str, transaction_id: Option<&str>, tokens: Decimal, day: u32) -> Investment {
        Investment {
            id: id.to_string(),
            user_id: "u1".to_string(),
            property_id: "p1".to_string(),
            transaction_id: transaction_id.map(str::to_string),
            tokens_purchased: tokens,
            price_per_token: dec!(100),
            amount_invested: tokens * dec!(100),
            status: "confirmed".to_string(),
            certificate_path: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, day, 9, 5, 0).unwrap(),
        }
    }

    struct Harness {
        records: Arc<MockRecords>,
        store: Arc<MockObjectStore>,
        renderer: Arc<MockRenderer>,
        service: Arc<CertificateService>,
    }

    fn harness_with(records: MockRecords, store: MockObjectStore, renderer: MockRenderer) -> Harness {
        let records = Arc::new(records);
        let store = Arc::new(store);
        let renderer = Arc::new(renderer);
        let service = Arc::new(CertificateService::new(
            records.clone(),
            records.clone(),
            records.clone(),
            records.clone(),
            store.clone(),
            renderer.clone(),
            CertificateConfig::default(),
        ));
        Harness {
            records,
            store,
            renderer,
            service,
        }
    }

    fn records() -> MockRecords {
        let records = MockRecords::default();
        records.users.write().unwrap().push(user());
        records.properties.write().unwrap().push(property(dec!(10000)));
        records
    }

    fn harness(records: MockRecords) -> Harness {
        harness_with(records, MockObjectStore::default(), MockRenderer::default())
    }

    #[tokio::test]
    async fn test_generate_without_investment_skips_mirror() {
        let records = records();
        records
            .transactions
            .write()
            .unwrap()
            .push(transaction("t1", dec!(1000.00), 10));
        let h = harness(records);

        let links = h
            .service
            .generate_transaction_certificate("t1", None)
            .await
            .unwrap();

        assert!(!links.reused_existing);
        assert_eq!(links.backend.as_deref(), Some("vector"));
        assert_eq!(
            links.stored_url,
            "https://store.test/public/transactions/u1/t1.pdf"
        );
        assert_eq!(
            links.signed_url,
            "https://store.test/signed/transactions/u1/t1.pdf?ttl=3600"
        );
        assert_eq!(
            links.warnings,
            vec![GenerationWarning::InvestmentMirrorSkipped {
                transaction_id: "t1".to_string()
            }]
        );
        assert_eq!(
            h.records.transaction("t1").certificate_path.as_deref(),
            Some(links.stored_url.as_str())
        );

        let documents = h.renderer.documents.lock().unwrap();
        match &documents[0] {
            CertificateDocument::Transaction(cert) => {
                assert_eq!(cert.total_amount, "1000.00");
                assert_eq!(cert.tokens_purchased, "N/A");
                assert_eq!(cert.status, "COMPLETED");
                assert!(cert.stamps.primary.is_some());
            }
            other => panic!("unexpected document: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_second_generation_reuses_stored_document() {
        let records = records();
        records
            .transactions
            .write()
            .unwrap()
            .push(transaction("t1", dec!(1000.00), 10));
        let h = harness(records);

        let first = h
            .service
            .generate_transaction_certificate("t1", None)
            .await
            .unwrap();
        let second = h
            .service
            .generate_transaction_certificate("t1", None)
            .await
            .unwrap();

        assert!(second.reused_existing);
        assert_eq!(second.backend, None);
        assert_eq!(second.stored_url, first.stored_url);
        assert_eq!(h.renderer.render_count(), 1);
        assert_eq!(h.store.upload_count(), 1);
    }

    #[tokio::test]
    async fn test_explicit_investment_is_preferred() {
        let records = records();
        records
            .transactions
            .write()
            .unwrap()
            .push(transaction("t1", dec!(5000), 10));
        {
            let mut investments = records.investments.write().unwrap();
            investments.push(investment("i-old", None, dec!(50), 2));
            investments.push(investment("i-new", None, dec!(70), 20));
        }
        let h = harness(records);

        let links = h
            .service
            .generate_transaction_certificate("t1", Some("i-old"))
            .await
            .unwrap();

        assert!(links.warnings.is_empty());
        assert_eq!(
            h.records.investment("i-old").certificate_path.as_deref(),
            Some(links.stored_url.as_str())
        );
        assert_eq!(h.records.investment("i-new").certificate_path, None);
    }

    #[tokio::test]
    async fn test_missing_explicit_investment_falls_back_to_latest() {
        let records = records();
        records
            .transactions
            .write()
            .unwrap()
            .push(transaction("t1", dec!(5000), 10));
        {
            let mut investments = records.investments.write().unwrap();
            investments.push(investment("i-old", None, dec!(50), 2));
            investments.push(investment("i-new", None, dec!(70), 20));
        }
        let h = harness(records);

        let links = h
            .service
            .generate_transaction_certificate("t1", Some("i-gone"))
            .await
            .unwrap();

        assert_eq!(
            links.warnings,
            vec![GenerationWarning::InvestmentNotFound {
                investment_id: "i-gone".to_string()
            }]
        );
        assert!(h.records.investment("i-new").certificate_path.is_some());
        assert!(h.records.investment("i-old").certificate_path.is_none());
    }

    #[tokio::test]
    async fn test_linked_investment_wins_over_latest() {
        let records = records();
        records
            .transactions
            .write()
            .unwrap()
            .push(transaction("t1", dec!(5000), 10));
        {
            let mut investments = records.investments.write().unwrap();
            investments.push(investment("i-linked", Some("t1"), dec!(50), 10));
            investments.push(investment("i-later", None, dec!(70), 20));
        }
        let h = harness(records);

        h.service
            .generate_transaction_certificate("t1", None)
            .await
            .unwrap();

        assert!(h.records.investment("i-linked").certificate_path.is_some());
        assert!(h.records.investment("i-later").certificate_path.is_none());
    }

    #[tokio::test]
    async fn test_reuse_backfills_empty_investment_mirror() {
        let records = records();
        let mut tx = transaction("t1", dec!(5000), 10);
        tx.certificate_path = Some(format!("{}/transactions/u1/t1.pdf", PUBLIC_BASE));
        records.transactions.write().unwrap().push(tx);
        records
            .investments
            .write()
            .unwrap()
            .push(investment("i1", Some("t1"), dec!(50), 10));
        let h = harness(records);

        let links = h
            .service
            .generate_transaction_certificate("t1", None)
            .await
            .unwrap();

        assert!(links.reused_existing);
        assert_eq!(h.renderer.render_count(), 0);
        assert_eq!(
            h.records.investment("i1").certificate_path.as_deref(),
            Some("https://store.test/public/transactions/u1/t1.pdf")
        );
    }

    #[tokio::test]
    async fn test_reuse_accepts_legacy_relative_path() {
        let records = records();
        let mut tx = transaction("t1", dec!(5000), 10);
        tx.certificate_path = Some("certificates/transactions/u1/t1.pdf".to_string());
        records.transactions.write().unwrap().push(tx);
        let h = harness(records);

        let links = h
            .service
            .generate_transaction_certificate("t1", None)
            .await
            .unwrap();

        assert!(links.reused_existing);
        assert_eq!(links.stored_url, "certificates/transactions/u1/t1.pdf");
        assert_eq!(
            links.signed_url,
            "https://store.test/signed/transactions/u1/t1.pdf?ttl=3600"
        );
        assert_eq!(h.store.upload_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_transaction_is_not_found() {
        let h = harness(records());
        let err = h
            .service
            .generate_transaction_certificate("missing", None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::NotFound(NotFoundError::Transaction(ref id)) if id == "missing"
        ));
        assert_eq!(h.renderer.render_count(), 0);
    }

    #[tokio::test]
    async fn test_upload_failure_keeps_storage_message() {
        let records = records();
        records
            .transactions
            .write()
            .unwrap()
            .push(transaction("t1", dec!(1000), 10));
        let store = MockObjectStore {
            fail_uploads: true,
            ..Default::default()
        };
        let h = harness_with(records, store, MockRenderer::default());

        let err = h
            .service
            .generate_transaction_certificate("t1", None)
            .await
            .unwrap_err();

        match &err {
            Error::Upload { path, source } => {
                assert_eq!(path, "transactions/u1/t1.pdf");
                assert!(source.to_string().contains("bucket is read-only"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("bucket is read-only"));
        assert_eq!(h.records.transaction("t1").certificate_path, None);
    }

    #[tokio::test]
    async fn test_omitted_stamps_become_warnings() {
        let records = records();
        records
            .transactions
            .write()
            .unwrap()
            .push(transaction("t1", dec!(1000), 10));
        records
            .investments
            .write()
            .unwrap()
            .push(investment("i1", Some("t1"), dec!(10), 10));
        let renderer = MockRenderer {
            omitted: vec![StampSlot::Secondary],
            ..Default::default()
        };
        let h = harness_with(records, MockObjectStore::default(), renderer);

        let links = h
            .service
            .generate_transaction_certificate("t1", None)
            .await
            .unwrap();

        assert_eq!(
            links.warnings,
            vec![GenerationWarning::StampOmitted {
                slot: "secondary".to_string()
            }]
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_requests_render_once() {
        let records = records();
        records
            .transactions
            .write()
            .unwrap()
            .push(transaction("t1", dec!(1000), 10));
        let renderer = MockRenderer {
            delay: Some(Duration::from_millis(50)),
            ..Default::default()
        };
        let h = harness_with(records, MockObjectStore::default(), renderer);

        let a = {
            let service = h.service.clone();
            tokio::spawn(async move { service.generate_transaction_certificate("t1", None).await })
        };
        let b = {
            let service = h.service.clone();
            tokio::spawn(async move { service.generate_transaction_certificate("t1", None).await })
        };
        let a = a.await.unwrap().unwrap();
        let b = b.await.unwrap().unwrap();

        assert_eq!(h.renderer.render_count(), 1);
        assert_eq!(h.store.upload_count(), 1);
        assert_eq!(a.stored_url, b.stored_url);
        assert!(a.reused_existing != b.reused_existing);
    }

    #[tokio::test]
    async fn test_get_certificate_by_display_code() {
        let records = records();
        records
            .transactions
            .write()
            .unwrap()
            .push(transaction("t1", dec!(1000), 10));
        let h = harness(records);

        let signed = h
            .service
            .get_transaction_certificate("TX-T1")
            .await
            .unwrap();

        assert_eq!(
            signed,
            "https://store.test/signed/transactions/u1/t1.pdf?ttl=3600"
        );
        assert!(h.records.transaction("t1").certificate_path.is_some());
    }

    #[tokio::test]
    async fn test_portfolio_requires_confirmed_investment() {
        let records = records();
        let mut pending = investment("i1", None, dec!(10), 5);
        pending.status = "pending".to_string();
        records.investments.write().unwrap().push(pending);
        let h = harness(records);

        let err = h
            .service
            .generate_portfolio_summary("u1", "p1")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::NotFound(NotFoundError::NoConfirmedInvestments { .. })
        ));
        assert_eq!(h.renderer.render_count(), 0);
    }

    #[tokio::test]
    async fn test_portfolio_by_property_code_always_regenerates() {
        let records = records();
        records
            .transactions
            .write()
            .unwrap()
            .push(transaction("t1", dec!(5000), 10));
        records
            .investments
            .write()
            .unwrap()
            .push(investment("i1", Some("t1"), dec!(50), 10));
        let h = harness(records);

        let first = h
            .service
            .generate_portfolio_summary("u1", "PROP-01")
            .await
            .unwrap();
        let second = h
            .service
            .generate_portfolio_summary("u1", "PROP-01")
            .await
            .unwrap();

        assert_eq!(
            first.stored_url,
            "https://store.test/public/portfolio/u1/p1.pdf"
        );
        assert!(!second.reused_existing);
        assert_eq!(h.renderer.render_count(), 2);

        let documents = h.renderer.documents.lock().unwrap();
        match &documents[0] {
            CertificateDocument::Portfolio(summary) => {
                assert_eq!(summary.total_tokens, "50");
                assert_eq!(summary.ownership_percentage, "0.50");
                assert_eq!(summary.transactions.len(), 1);
            }
            other => panic!("unexpected document: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_portfolio_with_zero_supply_property() {
        let records = MockRecords::default();
        records.users.write().unwrap().push(user());
        records.properties.write().unwrap().push(property(Decimal::ZERO));
        records
            .investments
            .write()
            .unwrap()
            .push(investment("i1", None, dec!(50), 10));
        let h = harness(records);

        h.service
            .generate_portfolio_summary("u1", "p1")
            .await
            .unwrap();

        let documents = h.renderer.documents.lock().unwrap();
        match &documents[0] {
            CertificateDocument::Portfolio(summary) => {
                assert_eq!(summary.ownership_percentage, "0.00");
                assert!(summary.transactions.is_empty());
            }
            other => panic!("unexpected document: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_legal_document_absent_and_present() {
        let records = records();
        let mut with_document = property(dec!(100));
        with_document.id = "p2".to_string();
        with_document.display_code = Some("PROP-02".to_string());
        with_document.legal_document_path = Some(format!("{}/legal/p2/deed.pdf", PUBLIC_BASE));
        records.properties.write().unwrap().push(with_document);
        let h = harness(records);

        assert_eq!(
            h.service.get_property_legal_document("p1").await.unwrap(),
            None
        );
        assert_eq!(
            h.service
                .get_property_legal_document("PROP-02")
                .await
                .unwrap()
                .as_deref(),
            Some("https://store.test/signed/legal/p2/deed.pdf?ttl=3600")
        );
        assert!(h
            .service
            .get_property_legal_document("nope")
            .await
            .unwrap_err()
            .is_not_found());
    }
}
