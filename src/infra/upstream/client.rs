use std::{
    future::Future,
    sync::Arc,
    time::{Duration, Instant},
};

use bytes::Bytes;
use folio_api_types::{Category, Envelope, HealthStatus, Post, Tag};
use futures::future::try_join_all;
use metrics::histogram;
use reqwest::{Client, header::ACCEPT};
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use url::Url;

use crate::{
    cache::{CacheConfig, ResponseCache},
    config::ApiSettings,
    infra::error::InfraError,
};

use super::{error::ApiError, retry::RetryPolicy};

const SOURCE: &str = "folio::upstream";
const USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));

/// Client for the headless content API.
///
/// Every content read except search goes through the shared [`ResponseCache`]; misses
/// are fetched with a per-attempt timeout inside the configured [`RetryPolicy`].
#[derive(Clone)]
pub struct BlogApi {
    http: Client,
    base: Url,
    cache: Arc<ResponseCache<Bytes>>,
    retry: RetryPolicy,
    timeout: Duration,
}

impl BlogApi {
    pub fn new(settings: &ApiSettings) -> Result<Self, InfraError> {
        let cache = Arc::new(ResponseCache::new(&CacheConfig::from(settings)));
        Self::with_cache(settings, cache)
    }

    /// Build a client around an existing cache, e.g. one driven by a manual clock.
    pub fn with_cache(
        settings: &ApiSettings,
        cache: Arc<ResponseCache<Bytes>>,
    ) -> Result<Self, InfraError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| InfraError::http_client("upstream", err))?;

        let mut base = settings.base_url.clone();
        base.set_query(None);
        base.set_fragment(None);

        Ok(Self {
            http,
            base,
            cache,
            retry: RetryPolicy::from(settings),
            timeout: settings.timeout,
        })
    }

    pub fn cache(&self) -> &Arc<ResponseCache<Bytes>> {
        &self.cache
    }

    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let url = self.endpoint(&["health"], &[])?;
        let body = self.fetch(&url).await?;
        serde_json::from_slice(&body).map_err(|source| decode_error(&url, source))
    }

    pub async fn posts(&self) -> Result<Envelope<Vec<Post>>, ApiError> {
        self.get_cached(&["v1", "posts"], &[]).await
    }

    pub async fn post(&self, id: i64) -> Result<Envelope<Post>, ApiError> {
        self.get_cached(&["v1", "posts", &id.to_string()], &[]).await
    }

    pub async fn post_by_slug(&self, slug: &str) -> Result<Envelope<Post>, ApiError> {
        self.get_cached(&["v1", "posts", "slug", slug], &[]).await
    }

    pub async fn related_posts(
        &self,
        slug: &str,
        limit: usize,
    ) -> Result<Envelope<Vec<Post>>, ApiError> {
        self.get_cached(
            &["v1", "posts", slug, "related"],
            &[("limit", limit.to_string())],
        )
        .await
    }

    pub async fn categories(&self) -> Result<Envelope<Vec<Category>>, ApiError> {
        self.get_cached(&["v1", "categories"], &[]).await
    }

    pub async fn category(&self, id: i64) -> Result<Envelope<Category>, ApiError> {
        self.get_cached(&["v1", "categories", &id.to_string()], &[])
            .await
    }

    pub async fn category_by_slug(&self, slug: &str) -> Result<Envelope<Category>, ApiError> {
        self.get_cached(&["v1", "categories", "slug", slug], &[])
            .await
    }

    pub async fn category_posts(&self, slug: &str) -> Result<Envelope<Vec<Post>>, ApiError> {
        self.get_cached(&["v1", "categories", slug, "posts"], &[])
            .await
    }

    pub async fn posts_by_category(&self, id: i64) -> Result<Envelope<Vec<Post>>, ApiError> {
        self.get_cached(&["v1", "posts"], &[("category", id.to_string())])
            .await
    }

    pub async fn tags(&self) -> Result<Envelope<Vec<Tag>>, ApiError> {
        self.get_cached(&["v1", "tags"], &[]).await
    }

    pub async fn tag(&self, id: i64) -> Result<Envelope<Tag>, ApiError> {
        self.get_cached(&["v1", "tags", &id.to_string()], &[]).await
    }

    pub async fn tag_by_slug(&self, slug: &str) -> Result<Envelope<Tag>, ApiError> {
        self.get_cached(&["v1", "tags", "slug", slug], &[]).await
    }

    pub async fn tag_posts(&self, slug: &str) -> Result<Envelope<Vec<Post>>, ApiError> {
        self.get_cached(&["v1", "tags", slug, "posts"], &[]).await
    }

    pub async fn posts_by_tag(&self, id: i64) -> Result<Envelope<Vec<Post>>, ApiError> {
        self.get_cached(&["v1", "posts"], &[("tag", id.to_string())])
            .await
    }

    /// Full-text search. Never cached.
    pub async fn search_posts(&self, query: &str) -> Result<Envelope<Vec<Post>>, ApiError> {
        let url = self.endpoint(&["v1", "posts"], &[("search", query.to_string())])?;
        let body = self.fetch(&url).await?;
        decode_envelope(&url, &body)
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Run independent requests concurrently; the first failure fails the batch.
    pub async fn batch<T, I, Fut>(&self, requests: I) -> Result<Vec<T>, ApiError>
    where
        I: IntoIterator<Item = Fut>,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        try_join_all(requests).await
    }

    fn endpoint(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Url(format!("`{}` cannot be a base URL", self.base)))?
            .pop_if_empty()
            .extend(segments);

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    async fn get_cached<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<Envelope<T>, ApiError> {
        let url = self.endpoint(segments, query)?;
        let key = format!("GET {url}");

        if let Some(body) = self.cache.get(&key) {
            debug!(target = SOURCE, url = %url, "serving cached response");
            return decode_envelope(&url, &body);
        }

        let body = self.fetch(&url).await?;
        let envelope = decode_envelope(&url, &body)?;
        self.cache.set(key, body);
        Ok(envelope)
    }

    /// GET `url` under the retry policy. Errors that survive are logged once here.
    async fn fetch(&self, url: &Url) -> Result<Bytes, ApiError> {
        self.retry
            .run(url.as_str(), || self.fetch_once(url))
            .await
            .inspect_err(|err| {
                error!(
                    target = SOURCE,
                    url = %url,
                    error = %err,
                    "upstream request failed"
                );
            })
    }

    async fn fetch_once(&self, url: &Url) -> Result<Bytes, ApiError> {
        let started = Instant::now();
        let request = async {
            let response = self
                .http
                .get(url.clone())
                .header(ACCEPT, "application/json")
                .send()
                .await
                .map_err(|source| transport_error(url, source))?;

            let status = response.status();
            if !status.is_success() {
                return Err(ApiError::Status {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }

            response
                .bytes()
                .await
                .map_err(|source| transport_error(url, source))
        };

        let outcome = tokio::time::timeout(self.timeout, request).await;
        histogram!("folio_api_request_ms").record(started.elapsed().as_secs_f64() * 1_000.0);

        outcome.map_err(|_| ApiError::Timeout {
            url: url.to_string(),
            after: self.timeout,
        })?
    }
}

fn decode_envelope<T: DeserializeOwned>(url: &Url, body: &[u8]) -> Result<Envelope<T>, ApiError> {
    Envelope::from_slice(body).map_err(|source| {
        let err = decode_error(url, source);
        error!(target = SOURCE, url = %url, error = %err, "undecodable upstream response");
        err
    })
}

fn decode_error(url: &Url, source: serde_json::Error) -> ApiError {
    ApiError::Decode {
        url: url.to_string(),
        source,
    }
}

fn transport_error(url: &Url, source: reqwest::Error) -> ApiError {
    ApiError::Transport {
        url: url.to_string(),
        source,
    }
}
