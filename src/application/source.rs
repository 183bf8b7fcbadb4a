//! Content backend seen by the page loaders.

use async_trait::async_trait;
use folio_api_types::{Category, Envelope, HealthStatus, Post, Tag};

pub use crate::infra::upstream::ApiError;

/// Read-only view of the content API used to assemble pages.
#[async_trait]
pub trait BlogSource: Send + Sync {
    async fn health(&self) -> Result<HealthStatus, ApiError>;

    async fn posts(&self) -> Result<Envelope<Vec<Post>>, ApiError>;

    async fn categories(&self) -> Result<Envelope<Vec<Category>>, ApiError>;

    async fn tags(&self) -> Result<Envelope<Vec<Tag>>, ApiError>;

    async fn post_by_slug(&self, slug: &str) -> Result<Envelope<Post>, ApiError>;

    async fn related_posts(&self, slug: &str, limit: usize)
    -> Result<Envelope<Vec<Post>>, ApiError>;

    async fn category_by_slug(&self, slug: &str) -> Result<Envelope<Category>, ApiError>;

    async fn category_posts(&self, slug: &str) -> Result<Envelope<Vec<Post>>, ApiError>;

    async fn tag_by_slug(&self, slug: &str) -> Result<Envelope<Tag>, ApiError>;

    async fn tag_posts(&self, slug: &str) -> Result<Envelope<Vec<Post>>, ApiError>;
}
