mod support;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use folio::application::blog::{BlogService, DateStyle};
use folio::application::chrome::ChromeService;
use folio::config::SiteSettings;
use folio::domain::posts::DateLocale;
use folio::infra::contact::{ContactMessage, ContactOutcome, ContactRelay};
use folio::infra::http::{HttpState, build_router};
use http_body_util::BodyExt;
use support::{StubSource, library};
use tower::ServiceExt;

#[derive(Default)]
struct RecordingRelay {
    received: Mutex<Vec<ContactMessage>>,
}

#[async_trait]
impl ContactRelay for RecordingRelay {
    async fn submit(&self, message: &ContactMessage) -> ContactOutcome {
        if !message.is_complete() {
            return ContactOutcome::Incomplete;
        }
        if let Ok(mut received) = self.received.lock() {
            received.push(message.clone());
        }
        ContactOutcome::Sent
    }
}

fn site() -> SiteSettings {
    SiteSettings {
        title: "Putu's Blog".to_string(),
        description: "Full Stack Developer Portfolio".to_string(),
        timezone: chrono_tz::Asia::Makassar,
        date_locale: DateLocale::English,
    }
}

fn router_with(source: StubSource, relay: Arc<RecordingRelay>) -> Router {
    let site = site();
    build_router(HttpState {
        blog: Arc::new(BlogService::new(Arc::new(source), DateStyle::from(&site))),
        chrome: Arc::new(ChromeService::new(&site)),
        contact: relay,
        contact_enabled: true,
    })
}

fn router(source: StubSource) -> Router {
    router_with(source, Arc::new(RecordingRelay::default()))
}

async fn get(router: Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    (status, String::from_utf8_lossy(&body).into_owned())
}

#[tokio::test]
async fn home_page_renders_portfolio_sections() {
    let (status, body) = get(router(library()), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("E-Commerce Website"));
    assert!(body.contains(r#"href="/blog""#));
    assert!(body.contains("Putu&#39;s Blog") || body.contains("Putu&#x27;s Blog"));
}

#[tokio::test]
async fn blog_index_lists_posts_and_applies_filters() {
    let (status, body) = get(router(library()), "/blog").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Rust Basics"));
    assert!(body.contains("CSS Grid Guide"));

    let (status, body) = get(router(library()), "/blog?category=web&sort=oldest").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("CSS Grid Guide"));
    assert!(!body.contains("Rust Basics"));
}

#[tokio::test]
async fn blog_index_reports_connection_failure() {
    let (status, body) = get(router(StubSource::offline()), "/blog").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.contains("Connection Failed"));
}

#[tokio::test]
async fn post_page_renders_content_and_related() {
    let (status, body) = get(router(library()), "/blog/rust-basics").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<p>Rust Basics body text</p>"));
    assert!(body.contains("Related Articles"));
    assert!(body.contains("1 min read"));
    assert!(body.contains(r#"href="/blog/tag/rust""#));
}

#[tokio::test]
async fn post_page_survives_related_failure() {
    let source = StubSource {
        related_offline: true,
        ..library()
    };
    let (status, body) = get(router(source), "/blog/rust-basics").await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("Related Articles"));
}

#[tokio::test]
async fn missing_resources_render_not_found_pages() {
    let (status, body) = get(router(library()), "/blog/no-such-post").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Post Not Found"));

    let (status, body) = get(router(library()), "/blog/category/cooking").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Category Not Found"));

    let (status, body) = get(router(library()), "/blog/tag/haskell").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Tag Not Found"));

    let (status, body) = get(router(library()), "/nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Page Not Found"));
}

#[tokio::test]
async fn category_and_tag_listings_render() {
    let (status, body) = get(router(library()), "/blog/category/systems").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Systems"));
    assert!(body.contains("Async Rust"));
    assert!(!body.contains("Flexbox Tricks"));

    let (status, body) = get(router(library()), "/blog/tag/css").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("#css"));
    assert!(body.contains("Flexbox Tricks"));
}

#[tokio::test]
async fn upstream_health_passes_status_through() {
    let response = router(library())
        .oneshot(
            Request::get("/_health/upstream")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("application/json")
    );

    let (status, _) = get(router(StubSource::offline()), "/_health/upstream").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn contact_form_relays_message_and_shows_notice() {
    let relay = Arc::new(RecordingRelay::default());
    let app = router_with(library(), relay.clone());

    let response = app
        .oneshot(
            Request::post("/contact")
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("name=Ada&email=ada%40example.test&message=Hello+there"))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let body = String::from_utf8_lossy(&body);

    assert!(body.contains("Message sent successfully!"));
    let received = relay.received.lock().expect("relay lock");
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].email, "ada@example.test");
}
