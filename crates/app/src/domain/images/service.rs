//! Image URL service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::images::errors::ImageHostError;

/// Image host serving every image from a public base URL.
#[derive(Debug, Clone)]
pub struct PublicImageHost {
    base_url: String,
}

impl PublicImageHost {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ImageHost for PublicImageHost {
    async fn download_url(&self, path: &str) -> Result<String, ImageHostError> {
        let path = path.trim_start_matches('/');

        if path.is_empty() {
            return Err(ImageHostError::NotFound);
        }

        Ok(format!("{}/{path}", self.base_url.trim_end_matches('/')))
    }
}

#[derive(Debug, Clone)]
struct CachedUrl {
    url: String,
    expires_at: Timestamp,
}

/// Resolved download URLs, reused until they expire.
pub struct CachedImageUrls {
    host: Arc<dyn ImageHost>,
    ttl: SignedDuration,
    entries: RwLock<FxHashMap<String, CachedUrl>>,
}

impl CachedImageUrls {
    #[must_use]
    pub fn new(host: Arc<dyn ImageHost>, ttl: SignedDuration) -> Self {
        Self {
            host,
            ttl,
            entries: RwLock::new(FxHashMap::default()),
        }
    }

    /// Download URL for an image path.
    ///
    /// # Errors
    ///
    /// Returns the host's error when the path has to be resolved and resolution fails. Failures
    /// are not cached.
    pub async fn resolve(&self, path: &str) -> Result<String, ImageHostError> {
        self.resolve_at(path, Timestamp::now()).await
    }

    /// Download URL for an image path as of `now`.
    ///
    /// Storing a newly resolved URL also drops every entry expired by `now`.
    ///
    /// # Errors
    ///
    /// See [`CachedImageUrls::resolve`].
    pub async fn resolve_at(&self, path: &str, now: Timestamp) -> Result<String, ImageHostError> {
        if let Some(cached) = self.entries.read().await.get(path)
            && cached.expires_at > now
        {
            return Ok(cached.url.clone());
        }

        let url = self.host.download_url(path).await?;

        match now.checked_add(self.ttl) {
            Ok(expires_at) => {
                let mut entries = self.entries.write().await;

                entries.retain(|_, cached| cached.expires_at > now);
                entries.insert(
                    path.to_string(),
                    CachedUrl {
                        url: url.clone(),
                        expires_at,
                    },
                );
            }
            Err(error) => debug!(path, %error, "not caching image URL"),
        }

        Ok(url)
    }

}

#[automock]
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Resolve a storage path to a download URL.
    async fn download_url(&self, path: &str) -> Result<String, ImageHostError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn host_returning(times: usize) -> MockImageHost {
        let mut host = MockImageHost::new();
        host.expect_download_url()
            .times(times)
            .returning(|path| Ok(format!("https://cdn.example.com/{path}?token=abc")));
        host
    }

    #[tokio::test]
    async fn fresh_entries_are_reused() -> TestResult {
        let urls = CachedImageUrls::new(Arc::new(host_returning(1)), SignedDuration::from_mins(5));
        let now = Timestamp::now();

        let first = urls.resolve_at("products/abaya.jpg", now).await?;
        let second = urls
            .resolve_at("products/abaya.jpg", now + SignedDuration::from_mins(4))
            .await?;

        assert_eq!(first, second);

        Ok(())
    }

    #[tokio::test]
    async fn expired_entries_are_resolved_again() -> TestResult {
        let urls = CachedImageUrls::new(Arc::new(host_returning(2)), SignedDuration::from_mins(5));
        let now = Timestamp::now();

        urls.resolve_at("products/abaya.jpg", now).await?;
        urls.resolve_at("products/abaya.jpg", now + SignedDuration::from_mins(5))
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn failures_are_not_cached() -> TestResult {
        let mut host = MockImageHost::new();
        let mut calls = 0;
        host.expect_download_url().times(2).returning(move |path| {
            calls += 1;

            if calls == 1 {
                Err(ImageHostError::Unavailable("timeout".to_string()))
            } else {
                Ok(format!("https://cdn.example.com/{path}"))
            }
        });

        let urls = CachedImageUrls::new(Arc::new(host), SignedDuration::from_mins(5));

        assert_eq!(
            urls.resolve("products/hijab.jpg").await,
            Err(ImageHostError::Unavailable("timeout".to_string()))
        );
        assert_eq!(
            urls.resolve("products/hijab.jpg").await?,
            "https://cdn.example.com/products/hijab.jpg"
        );

        Ok(())
    }

    #[tokio::test]
    async fn resolving_drops_expired_entries() -> TestResult {
        let urls = CachedImageUrls::new(Arc::new(host_returning(3)), SignedDuration::from_mins(5));
        let now = Timestamp::now();

        urls.resolve_at("products/abaya.jpg", now).await?;
        urls.resolve_at("products/hijab.jpg", now).await?;
        assert_eq!(urls.entries.read().await.len(), 2);

        urls.resolve_at("products/kaftan.jpg", now + SignedDuration::from_mins(10))
            .await?;

        let entries = urls.entries.read().await;
        assert_eq!(entries.len(), 1);
        assert!(entries.contains_key("products/kaftan.jpg"));

        Ok(())
    }

    #[tokio::test]
    async fn public_host_joins_base_and_path() -> TestResult {
        let host = PublicImageHost::new("https://cdn.example.com/");

        assert_eq!(
            host.download_url("/products/abaya.jpg").await?,
            "https://cdn.example.com/products/abaya.jpg"
        );
        assert_eq!(host.download_url("").await, Err(ImageHostError::NotFound));

        Ok(())
    }
}
