use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::{
    application::{
        blog::BlogService,
        chrome::ChromeService,
        error::{ErrorReport, HttpError},
        feed::{
            CONNECTION_FAILED, blog_index_error_view, blog_index_view, category_listing_view,
            tag_listing_view,
        },
        listing::{ListingFilter, ListingParams},
        metadata::PageMetadata,
        page::{home_view, post_detail_view},
    },
    infra::contact::{ContactMessage, ContactOutcome, ContactRelay},
    presentation::views::{
        BlogIndexTemplate, ErrorPageView, HomeTemplate, LayoutContext,
        ListingTemplate, PostTemplate, render_not_found_response, render_template_response,
    },
};

use super::middleware::{log_responses, set_request_context};

#[derive(Clone)]
pub struct HttpState {
    pub blog: Arc<BlogService>,
    pub chrome: Arc<ChromeService>,
    pub contact: Arc<dyn ContactRelay>,
    pub contact_enabled: bool,
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/contact", post(contact))
        .route("/blog", get(blog_index))
        .route("/blog/{slug}", get(post_detail))
        .route("/blog/category/{slug}", get(category_listing))
        .route("/blog/tag/{slug}", get(tag_listing))
        .route("/_health/upstream", get(upstream_health))
        .fallback(fallback)
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

async fn home(State(state): State<HttpState>) -> Response {
    render_home(&state, None)
}

async fn contact(State(state): State<HttpState>, Form(message): Form<ContactMessage>) -> Response {
    let outcome = state.contact.submit(&message).await;
    render_home(&state, Some(&outcome))
}

fn render_home(state: &HttpState, outcome: Option<&ContactOutcome>) -> Response {
    let chrome = state.chrome.chrome(state.chrome.metadata().home(), "/");
    let content = home_view(state.contact_enabled, outcome);
    let view = LayoutContext::new(chrome, content);
    render_template_response(HomeTemplate { view }, StatusCode::OK)
}

async fn blog_index(
    State(state): State<HttpState>,
    Query(params): Query<ListingParams>,
) -> Response {
    let filter = ListingFilter::from_params(&params);
    let chrome = state
        .chrome
        .chrome(state.chrome.metadata().blog_index(), "/blog");

    match state.blog.index().await {
        Ok(index) => {
            let content = blog_index_view(&index, &filter, state.blog.dates());
            let view = LayoutContext::new(chrome, content);
            render_template_response(BlogIndexTemplate { view }, StatusCode::OK)
        }
        Err(err) => {
            let content = blog_index_error_view(&filter, CONNECTION_FAILED);
            let view = LayoutContext::new(chrome, content);
            let mut response = render_template_response(
                BlogIndexTemplate { view },
                StatusCode::SERVICE_UNAVAILABLE,
            );
            ErrorReport::from_error(
                "infra::http::public::blog_index",
                StatusCode::SERVICE_UNAVAILABLE,
                &err,
            )
            .attach(&mut response);
            response
        }
    }
}

async fn post_detail(State(state): State<HttpState>, Path(slug): Path<String>) -> Response {
    let metadata = state.chrome.metadata();
    match state.blog.post_detail(&slug).await {
        Some(detail) => {
            let chrome = state
                .chrome
                .chrome(metadata.post(&detail.post), &format!("/blog/{slug}"));
            let view = LayoutContext::new(chrome, post_detail_view(&detail));
            render_template_response(PostTemplate { view }, StatusCode::OK)
        }
        None => not_found(
            &state,
            metadata.post_not_found(),
            ErrorPageView::missing("Post", "post"),
        ),
    }
}

async fn category_listing(State(state): State<HttpState>, Path(slug): Path<String>) -> Response {
    let metadata = state.chrome.metadata();
    match state.blog.category(&slug).await {
        Some(listing) => {
            let chrome = state.chrome.chrome(
                metadata.category(&listing.category, listing.meta.as_ref()),
                &format!("/blog/category/{slug}"),
            );
            let content = category_listing_view(&listing, state.blog.dates());
            let view = LayoutContext::new(chrome, content);
            render_template_response(ListingTemplate { view }, StatusCode::OK)
        }
        None => not_found(
            &state,
            metadata.category_not_found(),
            ErrorPageView::missing("Category", "category"),
        ),
    }
}

async fn tag_listing(State(state): State<HttpState>, Path(slug): Path<String>) -> Response {
    let metadata = state.chrome.metadata();
    match state.blog.tag(&slug).await {
        Some(listing) => {
            let chrome = state.chrome.chrome(
                metadata.tag(&listing.tag, listing.meta.as_ref()),
                &format!("/blog/tag/{slug}"),
            );
            let content = tag_listing_view(&listing, state.blog.dates());
            let view = LayoutContext::new(chrome, content);
            render_template_response(ListingTemplate { view }, StatusCode::OK)
        }
        None => not_found(
            &state,
            metadata.tag_not_found(),
            ErrorPageView::missing("Tag", "tag"),
        ),
    }
}

async fn upstream_health(State(state): State<HttpState>) -> Response {
    match state.blog.source().health().await {
        Ok(status) => Json(status).into_response(),
        Err(err) => HttpError::from_error(
            "infra::http::public::upstream_health",
            StatusCode::SERVICE_UNAVAILABLE,
            "Content service unavailable",
            &err,
        )
        .into_response(),
    }
}

async fn fallback(State(state): State<HttpState>) -> Response {
    not_found(
        &state,
        state.chrome.metadata().page_not_found(),
        ErrorPageView::not_found(),
    )
}

fn not_found(state: &HttpState, meta: PageMetadata, content: ErrorPageView) -> Response {
    let chrome = state.chrome.chrome(meta, "");
    render_not_found_response(chrome, content)
}
