//! View builders for the blog index and the category/tag listings.

use folio_api_types::{Category, PageMeta, Post, Tag};
use time::format_description::well_known::Rfc3339;

use crate::application::{
    blog::{BlogIndex, CategoryListing, DateStyle, TagListing},
    listing::{CategoryFilter, ListingFilter, SortMode},
    metadata::articles_word,
};
use crate::domain::posts::{reading_minutes, strip_tags, truncate_chars};
use crate::presentation::views::{
    BlogIndexView, CategoryBadge, FilterOption, ListingView, PaginationView, PostCard, TagChip,
    build_tag_badges,
};

const CARD_EXCERPT_CHARS: usize = 150;
const CARD_TAG_LIMIT: usize = 3;

pub const CONNECTION_FAILED: &str = "Connection Failed";

/// Excerpt, or the leading plain text of the content with an ellipsis when cut.
pub fn summary_text(post: &Post, limit: usize) -> String {
    if let Some(excerpt) = post.excerpt() {
        return excerpt.to_string();
    }

    let text = strip_tags(&post.content);
    let text = text.trim();
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        format!("{}...", truncate_chars(text, limit))
    }
}

pub fn post_card(post: &Post, dates: &DateStyle) -> PostCard {
    let timestamp = post.timestamp();
    let author_name = post.author.as_ref().map(|author| author.name.clone());
    let author_initial: String = author_name
        .as_deref()
        .and_then(|name| name.chars().next())
        .map(|initial| initial.to_uppercase().collect())
        .unwrap_or_default();

    PostCard {
        href: format!("/blog/{}", post.slug),
        title: post.title.clone(),
        excerpt: summary_text(post, CARD_EXCERPT_CHARS),
        featured_image: post.featured_image.clone(),
        iso_date: timestamp.format(&Rfc3339).unwrap_or_default(),
        published: dates.long_date(timestamp),
        reading_minutes: reading_minutes(&post.content),
        category: post.category.as_ref().map(category_badge),
        badges: build_tag_badges(
            post.tags
                .iter()
                .take(CARD_TAG_LIMIT)
                .map(|tag| (tag.slug.as_str(), tag.name.as_str())),
        ),
        extra_tags: post.tags.len().saturating_sub(CARD_TAG_LIMIT),
        author_name,
        author_initial,
    }
}

pub fn category_badge(category: &Category) -> CategoryBadge {
    CategoryBadge {
        href: format!("/blog/category/{}", category.slug),
        name: category.name.clone(),
    }
}

/// Blog index with the filter pipeline applied.
pub fn blog_index_view(index: &BlogIndex, filter: &ListingFilter, dates: &DateStyle) -> BlogIndexView {
    let posts: Vec<PostCard> = filter
        .apply(&index.posts)
        .iter()
        .map(|post| post_card(post, dates))
        .collect();

    BlogIndexView {
        post_count: posts.len(),
        total_count: index.posts.len(),
        has_results: !posts.is_empty(),
        posts,
        query: filter.query.clone(),
        categories: category_options(&index.categories, &filter.category),
        sort_options: sort_options(filter.sort),
        tags: tag_chips(&index.tags, filter),
        selected_tags: selected_tags(filter),
        has_active_filters: filter.has_active_filters(),
        error: None,
    }
}

/// Blog index when the content service could not be reached.
pub fn blog_index_error_view(filter: &ListingFilter, message: impl Into<String>) -> BlogIndexView {
    BlogIndexView {
        posts: Vec::new(),
        post_count: 0,
        total_count: 0,
        has_results: false,
        query: filter.query.clone(),
        categories: category_options(&[], &filter.category),
        sort_options: sort_options(filter.sort),
        tags: Vec::new(),
        selected_tags: selected_tags(filter),
        has_active_filters: filter.has_active_filters(),
        error: Some(message.into()),
    }
}

pub fn category_listing_view(listing: &CategoryListing, dates: &DateStyle) -> ListingView {
    let total = listing_total(listing.meta.as_ref());
    ListingView {
        kind: "Category".to_string(),
        heading: listing.category.name.clone(),
        description: listing
            .category
            .description
            .clone()
            .filter(|description| !description.is_empty()),
        total,
        articles_word: articles_word(total).to_string(),
        posts: listing.posts.iter().map(|post| post_card(post, dates)).collect(),
        pagination: pagination(listing.meta.as_ref(), listing.posts.len()),
    }
}

pub fn tag_listing_view(listing: &TagListing, dates: &DateStyle) -> ListingView {
    let total = listing_total(listing.meta.as_ref());
    ListingView {
        kind: "Tag".to_string(),
        heading: format!("#{}", listing.tag.name),
        description: None,
        total,
        articles_word: articles_word(total).to_string(),
        posts: listing.posts.iter().map(|post| post_card(post, dates)).collect(),
        pagination: pagination(listing.meta.as_ref(), listing.posts.len()),
    }
}

fn listing_total(meta: Option<&PageMeta>) -> u64 {
    meta.map(|meta| meta.total).unwrap_or(0)
}

fn pagination(meta: Option<&PageMeta>, showing: usize) -> Option<PaginationView> {
    meta.filter(|meta| meta.is_paginated())
        .map(|meta| PaginationView {
            showing,
            total: meta.total,
            current_page: meta.current_page,
            last_page: meta.last_page,
        })
}

fn category_options(categories: &[Category], selected: &CategoryFilter) -> Vec<FilterOption> {
    let mut options = vec![FilterOption {
        value: "all".to_string(),
        label: "All categories".to_string(),
        selected: *selected == CategoryFilter::All,
    }];
    options.extend(categories.iter().map(|category| FilterOption {
        value: category.slug.clone(),
        label: category.name.clone(),
        selected: selected.as_param() == category.slug,
    }));
    options
}

fn sort_options(current: SortMode) -> Vec<FilterOption> {
    SortMode::ALL
        .iter()
        .map(|mode| FilterOption {
            value: mode.as_str().to_string(),
            label: mode.label().to_string(),
            selected: *mode == current,
        })
        .collect()
}

fn tag_chips(tags: &[Tag], filter: &ListingFilter) -> Vec<TagChip> {
    tags.iter()
        .map(|tag| {
            let mut toggled = filter.clone();
            toggled.toggle_tag(&tag.slug);
            TagChip {
                label: tag.name.clone(),
                href: blog_href(&toggled),
                selected: filter.tags.contains(&tag.slug),
            }
        })
        .collect()
}

fn selected_tags(filter: &ListingFilter) -> String {
    filter.tags.iter().cloned().collect::<Vec<_>>().join(",")
}

pub fn blog_href(filter: &ListingFilter) -> String {
    let query = filter.to_query();
    if query.is_empty() {
        "/blog".to_string()
    } else {
        format!("/blog?{query}")
    }
}
