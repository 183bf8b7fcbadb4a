#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use folio::application::source::{ApiError, BlogSource};
use folio_api_types::{Author, Category, Envelope, HealthStatus, PageMeta, Post, Tag};
use time::{Duration, macros::datetime};

pub fn category(id: i64, slug: &str, name: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
        slug: slug.to_string(),
        description: Some(format!("All about {name}")),
        created_at: None,
        updated_at: None,
    }
}

pub fn tag(id: i64, slug: &str) -> Tag {
    Tag {
        id,
        name: slug.to_string(),
        slug: slug.to_string(),
        created_at: None,
        updated_at: None,
    }
}

pub fn post(id: i64, slug: &str, title: &str, category: Option<Category>, tags: Vec<Tag>) -> Post {
    let published = datetime!(2024-03-01 08:00 UTC) + Duration::days(id);
    Post {
        id,
        title: title.to_string(),
        slug: slug.to_string(),
        content: format!("<p>{title} body text</p>"),
        excerpt: None,
        featured_image: None,
        published_at: Some(published),
        created_at: published,
        updated_at: published,
        category,
        tags,
        author: Some(Author {
            name: "Putu".to_string(),
            email: "putu@example.test".to_string(),
        }),
    }
}

/// Two categories, two tags and five posts.
pub fn library() -> StubSource {
    let web = category(1, "web", "Web Development");
    let systems = category(2, "systems", "Systems");
    let rust = tag(1, "rust");
    let css = tag(2, "css");

    StubSource {
        posts: vec![
            post(1, "rust-basics", "Rust Basics", Some(systems.clone()), vec![rust.clone()]),
            post(2, "css-grid", "CSS Grid Guide", Some(web.clone()), vec![css.clone()]),
            post(3, "async-rust", "Async Rust", Some(systems.clone()), vec![rust.clone()]),
            post(4, "flexbox", "Flexbox Tricks", Some(web.clone()), vec![css.clone()]),
            post(5, "ownership", "Ownership Explained", Some(systems.clone()), vec![rust.clone()]),
        ],
        categories: vec![web, systems],
        tags: vec![rust, css],
        ..StubSource::default()
    }
}

#[derive(Clone, Default)]
pub struct StubSource {
    pub posts: Vec<Post>,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    pub offline: bool,
    pub related_offline: bool,
    pub calls: Arc<AtomicUsize>,
}

impl StubSource {
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self, path: &str) -> Result<(), ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline {
            return Err(unavailable(path));
        }
        Ok(())
    }

    fn listing(posts: Vec<Post>) -> Envelope<Vec<Post>> {
        let meta = PageMeta {
            total: posts.len() as u64,
            per_page: 10,
            current_page: 1,
            last_page: 1,
        };
        Envelope::ok(posts).with_meta(meta)
    }
}

fn unavailable(path: &str) -> ApiError {
    ApiError::Status {
        status: 503,
        url: format!("http://upstream.test/api{path}"),
    }
}

fn not_found(path: &str) -> ApiError {
    ApiError::Status {
        status: 404,
        url: format!("http://upstream.test/api{path}"),
    }
}

#[async_trait]
impl BlogSource for StubSource {
    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.check("/health")?;
        Ok(HealthStatus {
            status: "ok".to_string(),
            timestamp: "2024-03-01T08:00:00Z".to_string(),
            service: "blog-api".to_string(),
            version: "1.0.0".to_string(),
        })
    }

    async fn posts(&self) -> Result<Envelope<Vec<Post>>, ApiError> {
        self.check("/v1/posts")?;
        Ok(Self::listing(self.posts.clone()))
    }

    async fn categories(&self) -> Result<Envelope<Vec<Category>>, ApiError> {
        self.check("/v1/categories")?;
        Ok(Envelope::ok(self.categories.clone()))
    }

    async fn tags(&self) -> Result<Envelope<Vec<Tag>>, ApiError> {
        self.check("/v1/tags")?;
        Ok(Envelope::ok(self.tags.clone()))
    }

    async fn post_by_slug(&self, slug: &str) -> Result<Envelope<Post>, ApiError> {
        let path = format!("/v1/posts/slug/{slug}");
        self.check(&path)?;
        self.posts
            .iter()
            .find(|post| post.slug == slug)
            .cloned()
            .map(Envelope::ok)
            .ok_or_else(|| not_found(&path))
    }

    // Ignores `limit` so callers have to cap the list themselves.
    async fn related_posts(
        &self,
        slug: &str,
        _limit: usize,
    ) -> Result<Envelope<Vec<Post>>, ApiError> {
        let path = format!("/v1/posts/{slug}/related");
        self.check(&path)?;
        if self.related_offline {
            return Err(unavailable(&path));
        }
        Ok(Envelope::ok(
            self.posts
                .iter()
                .filter(|post| post.slug != slug)
                .cloned()
                .collect(),
        ))
    }

    async fn category_by_slug(&self, slug: &str) -> Result<Envelope<Category>, ApiError> {
        let path = format!("/v1/categories/slug/{slug}");
        self.check(&path)?;
        self.categories
            .iter()
            .find(|category| category.slug == slug)
            .cloned()
            .map(Envelope::ok)
            .ok_or_else(|| not_found(&path))
    }

    async fn category_posts(&self, slug: &str) -> Result<Envelope<Vec<Post>>, ApiError> {
        self.check(&format!("/v1/categories/{slug}/posts"))?;
        Ok(Self::listing(
            self.posts
                .iter()
                .filter(|post| post.category_slug() == Some(slug))
                .cloned()
                .collect(),
        ))
    }

    async fn tag_by_slug(&self, slug: &str) -> Result<Envelope<Tag>, ApiError> {
        let path = format!("/v1/tags/slug/{slug}");
        self.check(&path)?;
        self.tags
            .iter()
            .find(|tag| tag.slug == slug)
            .cloned()
            .map(Envelope::ok)
            .ok_or_else(|| not_found(&path))
    }

    async fn tag_posts(&self, slug: &str) -> Result<Envelope<Vec<Post>>, ApiError> {
        self.check(&format!("/v1/tags/{slug}/posts"))?;
        Ok(Self::listing(
            self.posts
                .iter()
                .filter(|post| post.tags.iter().any(|tag| tag.slug == slug))
                .cloned()
                .collect(),
        ))
    }
}
