//! Headless content API access: caching, retry and timeout around `reqwest`.

mod client;
mod error;
pub mod retry;

use async_trait::async_trait;
use folio_api_types::{Category, Envelope, HealthStatus, Post, Tag};

use crate::application::source::BlogSource;

pub use client::BlogApi;
pub use error::ApiError;
pub use retry::{RetryPolicy, Retryable};

#[async_trait]
impl BlogSource for BlogApi {
    async fn health(&self) -> Result<HealthStatus, ApiError> {
        BlogApi::health(self).await
    }

    async fn posts(&self) -> Result<Envelope<Vec<Post>>, ApiError> {
        BlogApi::posts(self).await
    }

    async fn categories(&self) -> Result<Envelope<Vec<Category>>, ApiError> {
        BlogApi::categories(self).await
    }

    async fn tags(&self) -> Result<Envelope<Vec<Tag>>, ApiError> {
        BlogApi::tags(self).await
    }

    async fn post_by_slug(&self, slug: &str) -> Result<Envelope<Post>, ApiError> {
        BlogApi::post_by_slug(self, slug).await
    }

    async fn related_posts(
        &self,
        slug: &str,
        limit: usize,
    ) -> Result<Envelope<Vec<Post>>, ApiError> {
        BlogApi::related_posts(self, slug, limit).await
    }

    async fn category_by_slug(&self, slug: &str) -> Result<Envelope<Category>, ApiError> {
        BlogApi::category_by_slug(self, slug).await
    }

    async fn category_posts(&self, slug: &str) -> Result<Envelope<Vec<Post>>, ApiError> {
        BlogApi::category_posts(self, slug).await
    }

    async fn tag_by_slug(&self, slug: &str) -> Result<Envelope<Tag>, ApiError> {
        BlogApi::tag_by_slug(self, slug).await
    }

    async fn tag_posts(&self, slug: &str) -> Result<Envelope<Vec<Post>>, ApiError> {
        BlogApi::tag_posts(self, slug).await
    }
}
