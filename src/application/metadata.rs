//! Per-page `<title>`, description and OpenGraph values.

use folio_api_types::{Category, PageMeta, Post, Tag};

use crate::domain::posts::{DESCRIPTION_CHAR_LIMIT, strip_tags, truncate_chars};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub og_type: &'static str,
    pub og_image: Option<String>,
}

impl PageMetadata {
    fn website(title: String, description: String) -> Self {
        Self {
            title,
            description,
            og_type: "website",
            og_image: None,
        }
    }
}

/// Builds metadata around the configured site identity.
#[derive(Debug, Clone)]
pub struct MetadataBuilder {
    site_title: String,
    site_description: String,
}

impl MetadataBuilder {
    pub fn new(site_title: impl Into<String>, site_description: impl Into<String>) -> Self {
        Self {
            site_title: site_title.into(),
            site_description: site_description.into(),
        }
    }

    pub fn site_title(&self) -> &str {
        &self.site_title
    }

    pub fn home(&self) -> PageMetadata {
        PageMetadata::website(self.site_title.clone(), self.site_description.clone())
    }

    pub fn blog_index(&self) -> PageMetadata {
        PageMetadata::website(
            format!("Blog | {}", self.site_title),
            "Articles on web development, programming and technology.".to_string(),
        )
    }

    pub fn post(&self, post: &Post) -> PageMetadata {
        let description = match post.excerpt() {
            Some(excerpt) => excerpt.to_string(),
            None => truncate_chars(&strip_tags(&post.content), DESCRIPTION_CHAR_LIMIT),
        };

        PageMetadata {
            title: format!("{} - {}", post.title, self.site_title),
            description,
            og_type: "article",
            og_image: post.featured_image.clone(),
        }
    }

    pub fn category(&self, category: &Category, meta: Option<&PageMeta>) -> PageMetadata {
        let description = match category.description.as_deref().filter(|d| !d.is_empty()) {
            Some(description) => description.to_string(),
            None => format!(
                "Explore {} {} in the {} category",
                article_count(meta),
                articles_word(article_count(meta)),
                category.name
            ),
        };

        PageMetadata::website(format!("{} | {}", category.name, self.site_title), description)
    }

    pub fn tag(&self, tag: &Tag, meta: Option<&PageMeta>) -> PageMetadata {
        let count = article_count(meta);
        PageMetadata::website(
            format!("#{} | {}", tag.name, self.site_title),
            format!(
                "Discover {count} {} tagged with {}",
                articles_word(count),
                tag.name
            ),
        )
    }

    pub fn post_not_found(&self) -> PageMetadata {
        not_found("Post", "post")
    }

    pub fn category_not_found(&self) -> PageMetadata {
        not_found("Category", "category")
    }

    pub fn tag_not_found(&self) -> PageMetadata {
        not_found("Tag", "tag")
    }

    pub fn page_not_found(&self) -> PageMetadata {
        not_found("Page", "page")
    }
}

fn not_found(label: &str, noun: &str) -> PageMetadata {
    PageMetadata::website(
        format!("{label} Not Found"),
        format!("The requested {noun} could not be found."),
    )
}

fn article_count(meta: Option<&PageMeta>) -> u64 {
    meta.map(|meta| meta.total).unwrap_or(0)
}

pub fn articles_word(count: u64) -> &'static str {
    if count == 1 { "article" } else { "articles" }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn builder() -> MetadataBuilder {
        MetadataBuilder::new("Folio", "Full Stack Developer Portfolio")
    }

    fn post(excerpt: Option<&str>, content: &str) -> Post {
        Post {
            id: 1,
            title: "Rust Basics".to_string(),
            slug: "rust-basics".to_string(),
            content: content.to_string(),
            excerpt: excerpt.map(str::to_string),
            featured_image: Some("https://cdn.test/rust.png".to_string()),
            published_at: None,
            created_at: datetime!(2026-01-01 00:00 UTC),
            updated_at: datetime!(2026-01-01 00:00 UTC),
            category: None,
            tags: Vec::new(),
            author: None,
        }
    }

    #[test]
    fn post_metadata_prefers_excerpt() {
        let meta = builder().post(&post(Some("Short intro"), "<p>Body</p>"));
        assert_eq!(meta.title, "Rust Basics - Folio");
        assert_eq!(meta.description, "Short intro");
        assert_eq!(meta.og_type, "article");
        assert_eq!(meta.og_image.as_deref(), Some("https://cdn.test/rust.png"));
    }

    #[test]
    fn post_metadata_falls_back_to_stripped_content() {
        let long = format!("<p>{}</p>", "x".repeat(400));
        let meta = builder().post(&post(Some(""), &long));
        assert_eq!(meta.description.chars().count(), DESCRIPTION_CHAR_LIMIT);
        assert!(!meta.description.contains('<'));
    }

    #[test]
    fn category_and_tag_descriptions_count_articles() {
        let category = Category {
            id: 1,
            name: "Programming".to_string(),
            slug: "programming".to_string(),
            description: None,
            created_at: None,
            updated_at: None,
        };
        let one = PageMeta {
            total: 1,
            per_page: 10,
            current_page: 1,
            last_page: 1,
        };

        let meta = builder().category(&category, Some(&one));
        assert_eq!(meta.title, "Programming | Folio");
        assert_eq!(
            meta.description,
            "Explore 1 article in the Programming category"
        );

        let tag = Tag {
            id: 2,
            name: "rust".to_string(),
            slug: "rust".to_string(),
            created_at: None,
            updated_at: None,
        };
        let meta = builder().tag(&tag, None);
        assert_eq!(meta.title, "#rust | Folio");
        assert_eq!(meta.description, "Discover 0 articles tagged with rust");
    }

    #[test]
    fn not_found_titles() {
        assert_eq!(builder().post_not_found().title, "Post Not Found");
        assert_eq!(
            builder().tag_not_found().description,
            "The requested tag could not be found."
        );
    }
}
