//! Page-level loaders for the blog routes.

use std::sync::Arc;

use chrono_tz::Tz;
use folio_api_types::{Category, HealthStatus, PageMeta, Post, Tag};
use time::OffsetDateTime;
use tracing::{debug, error, warn};

use crate::{
    application::source::{ApiError, BlogSource},
    config::SiteSettings,
    domain::posts::{DateLocale, format_long_date, reading_minutes},
    util::timezone::localized_date,
};

const SOURCE: &str = "application::blog::BlogService";

/// Maximum number of related posts shown under an article.
pub const RELATED_LIMIT: usize = 3;

/// Timezone and language used for calendar dates on rendered pages.
#[derive(Debug, Clone, Copy)]
pub struct DateStyle {
    pub timezone: Tz,
    pub locale: DateLocale,
}

impl Default for DateStyle {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::UTC,
            locale: DateLocale::default(),
        }
    }
}

impl From<&SiteSettings> for DateStyle {
    fn from(site: &SiteSettings) -> Self {
        Self {
            timezone: site.timezone,
            locale: site.date_locale,
        }
    }
}

impl DateStyle {
    pub fn long_date(&self, at: OffsetDateTime) -> String {
        format_long_date(localized_date(at, self.timezone), self.locale)
    }
}

#[derive(Debug, Clone)]
pub struct BlogIndex {
    pub health: HealthStatus,
    pub posts: Vec<Post>,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: Post,
    pub related: Vec<Post>,
    pub reading_minutes: u32,
    pub published_on: String,
}

#[derive(Debug, Clone)]
pub struct CategoryListing {
    pub category: Category,
    pub posts: Vec<Post>,
    pub meta: Option<PageMeta>,
}

#[derive(Debug, Clone)]
pub struct TagListing {
    pub tag: Tag,
    pub posts: Vec<Post>,
    pub meta: Option<PageMeta>,
}

#[derive(Clone)]
pub struct BlogService {
    source: Arc<dyn BlogSource>,
    dates: DateStyle,
}

impl BlogService {
    pub fn new(source: Arc<dyn BlogSource>, dates: DateStyle) -> Self {
        Self { source, dates }
    }

    pub fn dates(&self) -> &DateStyle {
        &self.dates
    }

    pub fn source(&self) -> &Arc<dyn BlogSource> {
        &self.source
    }

    /// Everything the blog index needs. The upstream must report healthy first; the
    /// three listings are then fetched together and the first failure wins.
    pub async fn index(&self) -> Result<BlogIndex, ApiError> {
        let health = self.source.health().await?;

        let (posts, categories, tags) = tokio::try_join!(
            self.source.posts(),
            self.source.categories(),
            self.source.tags(),
        )?;

        Ok(BlogIndex {
            health,
            posts: posts.into_data().unwrap_or_default(),
            categories: categories.into_data().unwrap_or_default(),
            tags: tags.into_data().unwrap_or_default(),
        })
    }

    /// Article page data, or `None` when the post cannot be shown.
    pub async fn post_detail(&self, slug: &str) -> Option<PostDetail> {
        let envelope = match self.source.post_by_slug(slug).await {
            Ok(envelope) => envelope,
            Err(err) => {
                log_lookup_failure("post", slug, &err);
                return None;
            }
        };

        let Some(post) = envelope.into_data() else {
            debug!(target = SOURCE, slug, "post lookup returned no data");
            return None;
        };

        let related = match self.source.related_posts(slug, RELATED_LIMIT).await {
            Ok(envelope) => {
                let mut related = envelope.into_data().unwrap_or_default();
                related.truncate(RELATED_LIMIT);
                related
            }
            Err(err) => {
                warn!(
                    target = SOURCE,
                    slug,
                    error = %err,
                    "related posts unavailable"
                );
                Vec::new()
            }
        };

        Some(PostDetail {
            reading_minutes: reading_minutes(&post.content),
            published_on: self.dates.long_date(post.timestamp()),
            post,
            related,
        })
    }

    pub async fn category(&self, slug: &str) -> Option<CategoryListing> {
        let (category, posts) = tokio::join!(
            self.source.category_by_slug(slug),
            self.source.category_posts(slug),
        );

        let category = match category {
            Ok(envelope) => envelope,
            Err(err) => {
                log_lookup_failure("category", slug, &err);
                return None;
            }
        };
        let posts = match posts {
            Ok(envelope) => envelope,
            Err(err) => {
                log_lookup_failure("category posts", slug, &err);
                return None;
            }
        };

        let Some(category) = category.into_data() else {
            debug!(target = SOURCE, slug, "category lookup returned no data");
            return None;
        };
        let meta = posts.meta;

        Some(CategoryListing {
            category,
            posts: posts.into_data().unwrap_or_default(),
            meta,
        })
    }

    pub async fn tag(&self, slug: &str) -> Option<TagListing> {
        let (tag, posts) = tokio::join!(
            self.source.tag_by_slug(slug),
            self.source.tag_posts(slug),
        );

        let tag = match tag {
            Ok(envelope) => envelope,
            Err(err) => {
                log_lookup_failure("tag", slug, &err);
                return None;
            }
        };
        let posts = match posts {
            Ok(envelope) => envelope,
            Err(err) => {
                log_lookup_failure("tag posts", slug, &err);
                return None;
            }
        };

        let Some(tag) = tag.into_data() else {
            debug!(target = SOURCE, slug, "tag lookup returned no data");
            return None;
        };
        let meta = posts.meta;

        Some(TagListing {
            tag,
            posts: posts.into_data().unwrap_or_default(),
            meta,
        })
    }
}

fn log_lookup_failure(resource: &'static str, slug: &str, err: &ApiError) {
    if err.is_not_found() {
        debug!(target = SOURCE, resource, slug, "not found upstream");
    } else {
        error!(
            target = SOURCE,
            resource,
            slug,
            error = %err,
            "lookup failed; rendering not found"
        );
    }
}
