//! Content-addressed cache for structured learning text
//!
//! Structured text produced by the generation collaborator is expensive to
//! recompute, so it is cached under a fingerprint of its inputs:
//! (topic tag, unit index, raw source text). Identical inputs always yield
//! the identical fingerprint, so entries never go stale and carry no TTL.
//!
//! Entries are stored one file per fingerprint under the cache directory.
//! Absence is a normal outcome, writes are idempotent, and same-key races
//! are tolerated (content addressing makes last-write-wins harmless).
//!
//! # Example
//!
//! ```rust,ignore
//! use baeum::cache::{BlobCache, Fingerprint};
//!
//! let cache = BlobCache::new("data/content_cache").await?;
//! let key = Fingerprint::compute("rust-text", 3, raw_text);
//! if cache.get(&key).await?.is_none() {
//!     cache.put(&key, &structured).await?;
//! }
//! ```

use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from the blob cache backend
#[derive(Error, Debug)]
pub enum CacheError {
    /// Cache directory could not be created
    #[error("Failed to create cache directory {path}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Entry could not be read
    #[error("Failed to read cache entry {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Entry could not be written
    #[error("Failed to write cache entry {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// Deterministic fingerprint over the cache key inputs
///
/// SHA-256 over a length-prefixed encoding of (topic tag, unit index,
/// raw text), so distinguishable input triples can never collide at a
/// field boundary. Feedback action is deliberately not part of the key:
/// a unit cached under one style directive is served unchanged under
/// another. Folding feedback in would defeat reuse across the common
/// great/harder/great oscillation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute the fingerprint for a (topic tag, unit index, raw text) triple
    pub fn compute(topic: &str, unit_index: u32, raw_text: &str) -> Self {
        let mut hasher = Sha256::new();
        for field in [topic.as_bytes(), &unit_index.to_be_bytes()[..], raw_text.as_bytes()] {
            hasher.update((field.len() as u64).to_be_bytes());
            hasher.update(field);
        }
        Self(format!("{:x}", hasher.finalize()))
    }

    /// Hex string form of the fingerprint
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Filesystem-backed content-addressed blob store
///
/// One UTF-8 file per fingerprint; point lookup only, no enumeration,
/// no eviction.
pub struct BlobCache {
    /// Directory holding one file per fingerprint
    dir: PathBuf,
}

impl BlobCache {
    /// Open (creating if necessary) a cache at the given directory
    pub async fn new(dir: impl AsRef<Path>) -> Result<Self, CacheError> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| CacheError::DirectoryCreation {
                path: dir.clone(),
                source,
            })?;
        Ok(Self { dir })
    }

    /// File path for a fingerprint
    fn entry_path(&self, key: &Fingerprint) -> PathBuf {
        self.dir.join(format!("{key}.txt"))
    }

    /// Fetch the cached content for a fingerprint
    ///
    /// `Ok(None)` is the normal miss outcome, not an error.
    pub async fn get(&self, key: &Fingerprint) -> Result<Option<String>, CacheError> {
        match tokio::fs::read_to_string(self.entry_path(key)).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(CacheError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    /// Store content under a fingerprint
    ///
    /// Idempotent; a concurrent writer of the same key produces equivalent
    /// content, so last-write-wins is acceptable.
    pub async fn put(&self, key: &Fingerprint, content: &str) -> Result<(), CacheError> {
        tokio::fs::write(self.entry_path(key), content)
            .await
            .map_err(|source| CacheError::Write {
                key: key.to_string(),
                source,
            })
    }
}

/// Cache wrapper that degrades gracefully when the backend is unavailable
///
/// An absent or failing backend behaves as a permanent miss; `put` failures
/// are swallowed with a warning. Caching is best-effort and must never
/// block content delivery.
pub struct OptionalCache {
    inner: Option<BlobCache>,
}

impl OptionalCache {
    /// Wrap an optional backend
    pub fn new(cache: Option<BlobCache>) -> Self {
        Self { inner: cache }
    }

    /// Open a cache directory, continuing without a cache if it fails
    pub async fn open(dir: impl AsRef<Path>) -> Self {
        match BlobCache::new(dir.as_ref()).await {
            Ok(cache) => Self { inner: Some(cache) },
            Err(e) => {
                tracing::warn!(error = %e, "Content cache unavailable, continuing without cache");
                Self { inner: None }
            }
        }
    }

    /// Check if a backend is present
    pub fn is_available(&self) -> bool {
        self.inner.is_some()
    }

    /// Fetch cached content; backend errors read as misses
    pub async fn get(&self, key: &Fingerprint) -> Option<String> {
        let cache = self.inner.as_ref()?;
        match cache.get(key).await {
            Ok(hit) => {
                if hit.is_some() {
                    tracing::debug!(key = %key, "Content cache hit");
                    crate::metrics::inc_cache_hit();
                } else {
                    tracing::debug!(key = %key, "Content cache miss");
                    crate::metrics::inc_cache_miss();
                }
                hit
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cache read failed, treating as miss");
                crate::metrics::inc_cache_miss();
                None
            }
        }
    }

    /// Store content, swallowing backend failures
    pub async fn put(&self, key: &Fingerprint, content: &str) {
        if let Some(cache) = &self.inner {
            if let Err(e) = cache.put(key, content).await {
                tracing::warn!(key = %key, error = %e, "Failed to write cache entry");
            }
        }
    }
}
