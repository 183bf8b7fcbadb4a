//! Client-side search, filter and sort over an in-memory post list.
//!
//! The pipeline is pure: `query` → `category` → `tags` (any-of) → stable sort.

use std::{collections::BTreeSet, fmt, str::FromStr};

use folio_api_types::Post;
use serde::{Deserialize, Serialize};

use crate::domain::posts::{reading_minutes, strip_tags};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    #[default]
    Newest,
    Oldest,
    ReadingTime,
}

impl SortMode {
    pub const ALL: [SortMode; 3] = [Self::Newest, Self::Oldest, Self::ReadingTime];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::ReadingTime => "reading-time",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest first",
            Self::Oldest => "Oldest first",
            Self::ReadingTime => "Reading time",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "reading-time" => Ok(Self::ReadingTime),
            other => Err(format!("unknown sort mode `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Slug(String),
}

impl CategoryFilter {
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some("all") => Self::All,
            Some(slug) => Self::Slug(slug.to_string()),
        }
    }

    pub fn as_param(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Slug(slug) => slug,
        }
    }
}

/// Raw `/blog` query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListingParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub tags: Option<String>,
    pub sort: Option<String>,
}

/// Filter state of the blog index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub query: String,
    pub category: CategoryFilter,
    pub tags: BTreeSet<String>,
    pub sort: SortMode,
}

impl ListingFilter {
    /// Unknown sort modes fall back to the default; empty tag entries are ignored.
    pub fn from_params(params: &ListingParams) -> Self {
        let tags = params
            .tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            query: params.q.clone().unwrap_or_default(),
            category: CategoryFilter::from_param(params.category.as_deref()),
            tags,
            sort: params
                .sort
                .as_deref()
                .and_then(|value| value.parse().ok())
                .unwrap_or_default(),
        }
    }

    pub fn apply(&self, posts: &[Post]) -> Vec<Post> {
        let needle = self.query.trim().to_lowercase();

        let mut selected: Vec<Post> = posts
            .iter()
            .filter(|post| needle.is_empty() || matches_query(post, &needle))
            .filter(|post| match &self.category {
                CategoryFilter::All => true,
                CategoryFilter::Slug(slug) => post.category_slug() == Some(slug.as_str()),
            })
            .filter(|post| {
                self.tags.is_empty()
                    || post.tags.iter().any(|tag| self.tags.contains(&tag.slug))
            })
            .cloned()
            .collect();

        match self.sort {
            SortMode::Newest => selected.sort_by(|a, b| b.timestamp().cmp(&a.timestamp())),
            SortMode::Oldest => selected.sort_by_key(Post::timestamp),
            SortMode::ReadingTime => selected.sort_by_cached_key(|post| reading_minutes(&post.content)),
        }

        selected
    }

    /// Add `slug` to the selected tags, or remove it when already selected.
    pub fn toggle_tag(&mut self, slug: &str) {
        if !self.tags.remove(slug) {
            self.tags.insert(slug.to_string());
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn has_active_filters(&self) -> bool {
        !self.query.trim().is_empty()
            || self.category != CategoryFilter::All
            || !self.tags.is_empty()
            || self.sort != SortMode::Newest
    }

    /// Query string reproducing this state, without the leading `?`.
    pub fn to_query(&self) -> String {
        let mut pairs = url::form_urlencoded::Serializer::new(String::new());
        if !self.query.trim().is_empty() {
            pairs.append_pair("q", self.query.trim());
        }
        if let CategoryFilter::Slug(slug) = &self.category {
            pairs.append_pair("category", slug);
        }
        if !self.tags.is_empty() {
            let joined = self.tags.iter().cloned().collect::<Vec<_>>().join(",");
            pairs.append_pair("tags", &joined);
        }
        if self.sort != SortMode::Newest {
            pairs.append_pair("sort", self.sort.as_str());
        }
        pairs.finish()
    }
}

fn matches_query(post: &Post, needle: &str) -> bool {
    let tag_names = post
        .tags
        .iter()
        .map(|tag| tag.name.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let content = strip_tags(&post.content);

    let haystacks: [&str; 5] = [
        post.title.as_str(),
        &content,
        post.excerpt.as_deref().unwrap_or_default(),
        post.category
            .as_ref()
            .map(|category| category.name.as_str())
            .unwrap_or_default(),
        &tag_names,
    ];

    haystacks
        .iter()
        .any(|haystack| haystack.to_lowercase().contains(needle))
}
