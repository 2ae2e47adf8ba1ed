use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use url::Url;

use certifolio_core::storage::{normalize_stored_path, ObjectStoreTrait, StorageError};

use super::config::LocalObjectStoreConfig;
use super::signing::UrlSigner;

/// Object store writing to a local directory tree.
///
/// Public URLs are `<public base>/<key>` with each key segment percent-encoded.
/// Signed URLs add `expires` (unix seconds) and an HMAC-SHA256 `signature`.
#[derive(Debug)]
pub struct LocalObjectStore {
    root: PathBuf,
    public_base_url: String,
    signer: Option<UrlSigner>,
    assets_prefix: String,
}

impl LocalObjectStore {
    pub fn new(config: LocalObjectStoreConfig) -> Self {
        Self {
            root: config.root,
            public_base_url: config.public_base_url.trim().trim_end_matches('/').to_string(),
            signer: UrlSigner::new(&config.signing_key),
            assets_prefix: config.assets_prefix.trim().trim_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validates a storage key and maps it to a file under the root.
    fn locate(&self, path: &str) -> Result<(String, PathBuf), StorageError> {
        let key = path.trim().trim_start_matches('/');
        if key.is_empty() {
            return Err(StorageError::InvalidPath("empty path".to_string()));
        }
        let mut file = self.root.clone();
        for segment in key.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." || segment.contains('\\') {
                return Err(StorageError::InvalidPath(format!(
                    "'{}' is not a valid storage key",
                    path
                )));
            }
            file.push(segment);
        }
        Ok((key.to_string(), file))
    }

    fn signer(&self) -> Result<&UrlSigner, StorageError> {
        self.signer
            .as_ref()
            .ok_or_else(|| StorageError::Signing("no signing key configured".to_string()))
    }

    /// Checks a signed URL issued by this store at time `now`.
    ///
    /// Returns the storage key the link grants access to.
    pub fn verify_signed_url(&self, signed: &str, now: DateTime<Utc>) -> Result<String, StorageError> {
        let url = Url::parse(signed)
            .map_err(|e| StorageError::InvalidPath(format!("'{}': {}", signed, e)))?;
        let mut expires = None;
        let mut signature = None;
        for (name, value) in url.query_pairs() {
            match name.as_ref() {
                "expires" => expires = value.parse::<i64>().ok(),
                "signature" => signature = Some(value.into_owned()),
                _ => {}
            }
        }
        let (Some(expires), Some(signature)) = (expires, signature) else {
            return Err(StorageError::Signing("link is not signed".to_string()));
        };

        let key = normalize_stored_path(signed, &self.public_base_url)?;
        if !self.signer()?.verify(&key, expires, &signature)? {
            return Err(StorageError::Signing("signature mismatch".to_string()));
        }
        if expires < now.timestamp() {
            return Err(StorageError::Signing("link expired".to_string()));
        }
        Ok(key)
    }
}

#[async_trait]
impl ObjectStoreTrait for LocalObjectStore {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let (key, file) = self.locate(path)?;
        let parent = file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone());
        tokio::fs::create_dir_all(&parent).await?;

        // Staging names are unique per writer; concurrent overwrites of a key
        // each rename their own file.
        let size = bytes.len();
        tokio::task::spawn_blocking(move || -> Result<(), StorageError> {
            let mut staging = tempfile::Builder::new()
                .prefix(".upload-")
                .suffix(".part")
                .tempfile_in(&parent)?;
            staging.write_all(&bytes)?;
            staging.as_file().sync_all()?;
            staging.persist(&file).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .map_err(|e| StorageError::Backend(format!("upload task failed: {}", e)))??;

        debug!("Stored {} ({} bytes, {})", key, size, content_type);
        Ok(key)
    }

    fn public_url(&self, path: &str) -> Result<String, StorageError> {
        let (key, _) = self.locate(path)?;
        let encoded: Vec<String> = key
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        Ok(format!("{}/{}", self.public_base_url, encoded.join("/")))
    }

    async fn signed_url(&self, path: &str, ttl: Duration) -> Result<String, StorageError> {
        let (key, file) = self.locate(path)?;
        if !tokio::fs::try_exists(&file).await? {
            return Err(StorageError::NotFound(key));
        }
        let ttl = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let expires = Utc::now().timestamp().saturating_add(ttl);
        let signature = self.signer()?.sign(&key, expires)?;
        Ok(format!(
            "{}?expires={}&signature={}",
            self.public_url(&key)?,
            expires,
            signature
        ))
    }

    fn asset_url(&self, name: &str) -> Result<String, StorageError> {
        let name = name.trim().trim_start_matches('/');
        if self.assets_prefix.is_empty() {
            return self.public_url(name);
        }
        self.public_url(&format!("{}/{}", self.assets_prefix, name))
    }

    fn public_base_url(&self) -> &str {
        &self.public_base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    fn store(root: &Path) -> LocalObjectStore {
        LocalObjectStore::new(LocalObjectStoreConfig {
            root: root.to_path_buf(),
            public_base_url: "https://files.test/public/".to_string(),
            signing_key: "s3cret".to_string(),
            assets_prefix: "assets".to_string(),
        })
    }

    #[tokio::test]
    async fn test_upload_overwrites_existing_object() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let first = store
            .upload("transactions/u1/t1.pdf", b"one".to_vec(), "application/pdf")
            .await
            .unwrap();
        let second = store
            .upload("/transactions/u1/t1.pdf", b"two".to_vec(), "application/pdf")
            .await
            .unwrap();

        assert_eq!(first, "transactions/u1/t1.pdf");
        assert_eq!(first, second);
        let stored = std::fs::read(dir.path().join("transactions/u1/t1.pdf")).unwrap();
        assert_eq!(stored, b"two");
        let leftovers: Vec<_> = std::fs::read_dir(dir.path().join("transactions/u1"))
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from("t1.pdf")]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_uploads_to_same_key_all_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let store = std::sync::Arc::new(store(dir.path()));
        let payload = vec![7u8; 1 << 20];

        for _ in 0..10 {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let store = store.clone();
                    let bytes = payload.clone();
                    tokio::spawn(async move {
                        store
                            .upload("transactions/u1/t1.pdf", bytes, "application/pdf")
                            .await
                    })
                })
                .collect();
            for handle in handles {
                assert_eq!(handle.await.unwrap().unwrap(), "transactions/u1/t1.pdf");
            }
        }

        let stored = std::fs::read(dir.path().join("transactions/u1/t1.pdf")).unwrap();
        assert_eq!(stored, payload);
    }

    #[tokio::test]
    async fn test_rejects_escaping_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        for bad in ["", "../etc/passwd", "transactions//t1.pdf", "a/./b"] {
            let err = store
                .upload(bad, b"x".to_vec(), "application/pdf")
                .await
                .unwrap_err();
            assert!(matches!(err, StorageError::InvalidPath(_)), "{bad}");
        }
    }

    #[test]
    fn test_public_url_encodes_segments() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        assert_eq!(
            store.public_url("legal/p1/title deed.pdf").unwrap(),
            "https://files.test/public/legal/p1/title%20deed.pdf"
        );
        assert_eq!(
            store.asset_url("stamps/official-seal.png").unwrap(),
            "https://files.test/public/assets/stamps/official-seal.png"
        );
        assert_eq!(store.public_base_url(), "https://files.test/public");
    }

    #[tokio::test]
    async fn test_signed_url_verifies_until_expiry() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        store
            .upload("legal/p1/title deed.pdf", b"%PDF".to_vec(), "application/pdf")
            .await
            .unwrap();

        let signed = store
            .signed_url("legal/p1/title deed.pdf", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(signed.starts_with("https://files.test/public/legal/p1/title%20deed.pdf?expires="));

        let now = Utc::now();
        assert_eq!(
            store.verify_signed_url(&signed, now).unwrap(),
            "legal/p1/title deed.pdf"
        );
        let later = now + ChronoDuration::seconds(120);
        assert!(matches!(
            store.verify_signed_url(&signed, later),
            Err(StorageError::Signing(_))
        ));

        let tampered = signed.replace("legal/p1", "legal/p2");
        assert!(store.verify_signed_url(&tampered, now).is_err());
    }

    #[tokio::test]
    async fn test_signed_url_requires_object_and_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        let err = store
            .signed_url("transactions/u1/missing.pdf", Duration::from_secs(60))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));

        let unsigned = LocalObjectStore::new(LocalObjectStoreConfig {
            root: dir.path().to_path_buf(),
            ..Default::default()
        });
        unsigned
            .upload("portfolio/u1/p1.pdf", b"%PDF".to_vec(), "application/pdf")
            .await
            .unwrap();
        let err = unsigned
            .signed_url("portfolio/u1/p1.pdf", Duration::from_secs(60))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Signing(_)));
    }
}
