//! Mapping of persisted certificate locations back to storage keys.
//!
//! Records hold one of three forms:
//! - an absolute public URL issued by the current store
//! - an absolute URL issued by another host, containing a known root segment
//! - a legacy relative key, optionally prefixed by a bucket name

use url::Url;

use super::storage_errors::StorageError;
use crate::constants::{LEGAL_DOCUMENTS_ROOT, PORTFOLIO_ROOT, TRANSACTIONS_ROOT};

/// Top-level storage prefixes the pipeline writes under.
pub const KNOWN_ROOTS: [&str; 3] = [TRANSACTIONS_ROOT, PORTFOLIO_ROOT, LEGAL_DOCUMENTS_ROOT];

/// Turns a persisted location into the storage key a signed link is issued for.
pub fn normalize_stored_path(stored: &str, public_base: &str) -> Result<String, StorageError> {
    let stored = stored.trim();
    if stored.is_empty() {
        return Err(StorageError::InvalidPath("empty path".to_string()));
    }

    let base = public_base.trim().trim_end_matches('/');
    if !base.is_empty() {
        if let Some(rest) = stored.strip_prefix(base).and_then(|r| r.strip_prefix('/')) {
            let rest = strip_query(rest);
            let segments = decode_segments(rest.split('/'))?;
            return join_segments(segments, stored);
        }
    }

    match Url::parse(stored) {
        Ok(url) => {
            let segments = match url.path_segments() {
                Some(segments) => decode_segments(segments)?,
                None => Vec::new(),
            };
            match find_known_root(&segments) {
                Some(start) => join_segments(segments[start..].to_vec(), stored),
                None => Err(StorageError::InvalidPath(format!(
                    "URL does not point into a known storage root: {}",
                    stored
                ))),
            }
        }
        Err(_) => {
            let segments = decode_segments(strip_query(stored).split('/'))?;
            let start = find_known_root(&segments).unwrap_or(0);
            join_segments(segments[start..].to_vec(), stored)
        }
    }
}

fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

fn decode_segments<'a>(segments: impl Iterator<Item = &'a str>) -> Result<Vec<String>, StorageError> {
    segments
        .filter(|s| !s.is_empty() && *s != ".")
        .map(|s| {
            urlencoding::decode(s)
                .map(|d| d.into_owned())
                .map_err(|e| StorageError::InvalidPath(format!("bad escape in '{}': {}", s, e)))
        })
        .collect()
}

fn find_known_root(segments: &[String]) -> Option<usize> {
    segments
        .iter()
        .position(|s| KNOWN_ROOTS.contains(&s.as_str()))
}

fn join_segments(segments: Vec<String>, original: &str) -> Result<String, StorageError> {
    if segments.is_empty() {
        return Err(StorageError::InvalidPath(format!("no object key in '{}'", original)));
    }
    if segments.iter().any(|s| s == "..") {
        return Err(StorageError::InvalidPath(format!(
            "parent segments are not allowed: {}",
            original
        )));
    }
    Ok(segments.join("/"))
}
