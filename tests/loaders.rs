mod support;

use std::sync::Arc;

use folio::application::blog::{BlogService, DateStyle, RELATED_LIMIT};
use folio::application::listing::{ListingFilter, ListingParams};
use support::{StubSource, library};

fn service(source: StubSource) -> BlogService {
    BlogService::new(Arc::new(source), DateStyle::default())
}

#[tokio::test]
async fn index_collects_posts_categories_and_tags() {
    let index = service(library()).index().await.expect("index");

    assert_eq!(index.health.status, "ok");
    assert_eq!(index.posts.len(), 5);
    assert_eq!(index.categories.len(), 2);
    assert_eq!(index.tags.len(), 2);
}

#[tokio::test]
async fn index_fails_when_upstream_is_down() {
    let source = StubSource::offline();
    let err = service(source.clone()).index().await.expect_err("offline");

    assert_eq!(err.status(), Some(503));
    // The health probe short-circuits the listing requests.
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn index_feeds_the_listing_filter() {
    let index = service(library()).index().await.expect("index");
    let filter = ListingFilter::from_params(&ListingParams {
        q: Some("rust".to_string()),
        category: Some("systems".to_string()),
        tags: None,
        sort: Some("oldest".to_string()),
    });

    let slugs: Vec<_> = filter
        .apply(&index.posts)
        .iter()
        .map(|post| post.slug.clone())
        .collect();

    assert_eq!(slugs, vec!["rust-basics", "async-rust", "ownership"]);
}

#[tokio::test]
async fn unknown_slug_has_no_detail() {
    assert!(service(library()).post_detail("missing").await.is_none());
}

#[tokio::test]
async fn detail_assembles_related_posts_capped_at_limit() {
    let detail = service(library())
        .post_detail("rust-basics")
        .await
        .expect("detail");

    assert_eq!(detail.post.title, "Rust Basics");
    assert_eq!(detail.related.len(), RELATED_LIMIT);
    assert!(detail.related.iter().all(|post| post.slug != "rust-basics"));
    assert_eq!(detail.reading_minutes, 1);
    assert_eq!(detail.published_on, "2 Maret 2024");
}

#[tokio::test]
async fn related_failure_still_yields_detail() {
    let source = StubSource {
        related_offline: true,
        ..library()
    };

    let detail = service(source)
        .post_detail("css-grid")
        .await
        .expect("detail despite related failure");

    assert_eq!(detail.post.slug, "css-grid");
    assert!(detail.related.is_empty());
}

#[tokio::test]
async fn offline_upstream_hides_detail() {
    assert!(
        service(StubSource::offline())
            .post_detail("rust-basics")
            .await
            .is_none()
    );
}

#[tokio::test]
async fn category_listing_carries_posts_and_meta() {
    let listing = service(library())
        .category("web")
        .await
        .expect("category listing");

    assert_eq!(listing.category.name, "Web Development");
    assert_eq!(listing.posts.len(), 2);
    assert_eq!(listing.meta.map(|meta| meta.total), Some(2));
}

#[tokio::test]
async fn unknown_category_or_tag_is_absent() {
    let service = service(library());

    assert!(service.category("cooking").await.is_none());
    assert!(service.tag("haskell").await.is_none());
}

#[tokio::test]
async fn tag_listing_filters_by_tag() {
    let listing = service(library()).tag("rust").await.expect("tag listing");

    assert_eq!(listing.tag.slug, "rust");
    assert_eq!(listing.posts.len(), 3);
}
