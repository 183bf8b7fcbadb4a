use crate::application::error::{ErrorReport, HttpError};
use crate::application::metadata::PageMetadata;
use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

/// 404 page. `content` decides which resource the message talks about.
pub fn render_not_found_response(chrome: LayoutChrome, content: ErrorPageView) -> Response {
    let view = LayoutContext::new(chrome, content);
    let mut response = render_template_response(ErrorTemplate { view }, StatusCode::NOT_FOUND);
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Resource not found",
    )
    .attach(&mut response);
    response
}

#[derive(Clone)]
pub struct NavigationView {
    pub entries: Vec<NavigationLinkView>,
}

#[derive(Clone)]
pub struct FooterView {
    pub copy: String,
}

#[derive(Clone)]
pub struct BrandView {
    pub title: String,
    pub href: String,
}

#[derive(Clone)]
pub struct NavigationLinkView {
    pub label: String,
    pub href: String,
}

#[derive(Clone)]
pub struct LayoutChrome {
    pub brand: BrandView,
    pub navigation: NavigationView,
    pub footer: FooterView,
    pub meta: PageMetaView,
}

impl LayoutChrome {
    pub fn with_canonical(self, canonical: String) -> Self {
        Self {
            meta: self.meta.with_canonical(canonical),
            ..self
        }
    }
}

#[derive(Clone)]
pub struct LayoutContext<T> {
    pub brand: BrandView,
    pub navigation: NavigationView,
    pub footer: FooterView,
    pub meta: PageMetaView,
    pub content: T,
}

impl<T> LayoutContext<T> {
    pub fn new(chrome: LayoutChrome, content: T) -> Self {
        Self {
            brand: chrome.brand,
            navigation: chrome.navigation,
            footer: chrome.footer,
            meta: chrome.meta,
            content,
        }
    }
}

#[derive(Clone)]
pub struct PageMetaView {
    pub title: String,
    pub description: String,
    pub og_title: String,
    pub og_description: String,
    pub og_type: String,
    pub og_image: Option<String>,
    pub canonical: String,
}

impl PageMetaView {
    pub fn with_canonical(self, canonical: String) -> Self {
        Self { canonical, ..self }
    }
}

impl From<PageMetadata> for PageMetaView {
    fn from(meta: PageMetadata) -> Self {
        Self {
            og_title: meta.title.clone(),
            og_description: meta.description.clone(),
            title: meta.title,
            description: meta.description,
            og_type: meta.og_type.to_string(),
            og_image: meta.og_image,
            canonical: String::new(),
        }
    }
}

#[derive(Clone)]
pub struct NoticeView {
    pub kind: &'static str,
    pub text: String,
}

#[derive(Clone)]
pub struct TagBadge {
    pub href: String,
    pub label: String,
}

#[derive(Clone)]
pub struct CategoryBadge {
    pub href: String,
    pub name: String,
}

#[derive(Clone)]
pub struct PostCard {
    pub href: String,
    pub title: String,
    pub excerpt: String,
    pub featured_image: Option<String>,
    pub iso_date: String,
    pub published: String,
    pub reading_minutes: u32,
    pub category: Option<CategoryBadge>,
    pub badges: Vec<TagBadge>,
    pub extra_tags: usize,
    pub author_name: Option<String>,
    pub author_initial: String,
}

#[derive(Clone)]
pub struct SkillGroupView {
    pub title: String,
    pub skills: Vec<String>,
}

#[derive(Clone)]
pub struct ProjectView {
    pub title: String,
    pub description: String,
    pub image: String,
    pub technologies: Vec<String>,
    pub live_url: String,
    pub repository_url: String,
}

#[derive(Clone)]
pub struct SocialLinkView {
    pub label: String,
    pub url: String,
}

pub struct HomeView {
    pub headline: String,
    pub tagline: String,
    pub cv_path: String,
    pub about: Vec<String>,
    pub skills: Vec<SkillGroupView>,
    pub learning: Vec<String>,
    pub projects: Vec<ProjectView>,
    pub social_links: Vec<SocialLinkView>,
    pub contact_enabled: bool,
    pub notice: Option<NoticeView>,
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub view: LayoutContext<HomeView>,
}

#[derive(Clone)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Clone)]
pub struct TagChip {
    pub label: String,
    pub href: String,
    pub selected: bool,
}

pub struct BlogIndexView {
    pub posts: Vec<PostCard>,
    pub post_count: usize,
    pub total_count: usize,
    pub has_results: bool,
    pub query: String,
    pub categories: Vec<FilterOption>,
    pub sort_options: Vec<FilterOption>,
    pub tags: Vec<TagChip>,
    pub selected_tags: String,
    pub has_active_filters: bool,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "blog_index.html")]
pub struct BlogIndexTemplate {
    pub view: LayoutContext<BlogIndexView>,
}

#[derive(Clone)]
pub struct RelatedPostView {
    pub href: String,
    pub title: String,
    pub excerpt: String,
    pub featured_image: Option<String>,
}

pub struct PostDetailView {
    pub title: String,
    pub content_html: String,
    pub featured_image: Option<String>,
    pub published: String,
    pub iso_date: String,
    pub reading_minutes: u32,
    pub category: Option<CategoryBadge>,
    pub badges: Vec<TagBadge>,
    pub author_name: Option<String>,
    pub related: Vec<RelatedPostView>,
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate {
    pub view: LayoutContext<PostDetailView>,
}

#[derive(Clone)]
pub struct PaginationView {
    pub showing: usize,
    pub total: u64,
    pub current_page: u64,
    pub last_page: u64,
}

pub struct ListingView {
    pub kind: String,
    pub heading: String,
    pub description: Option<String>,
    pub total: u64,
    pub articles_word: String,
    pub posts: Vec<PostCard>,
    pub pagination: Option<PaginationView>,
}

#[derive(Template)]
#[template(path = "listing.html")]
pub struct ListingTemplate {
    pub view: LayoutContext<ListingView>,
}

pub struct ErrorPageView {
    pub title: String,
    pub message: String,
    pub primary_action: Option<ErrorAction>,
}

impl ErrorPageView {
    pub fn not_found() -> Self {
        Self {
            primary_action: Some(ErrorAction::home()),
            ..Self::missing("Page", "page")
        }
    }

    pub fn missing(label: &str, noun: &str) -> Self {
        Self {
            title: format!("{label} Not Found"),
            message: format!("The requested {noun} could not be found."),
            primary_action: Some(ErrorAction::blog()),
        }
    }
}

pub struct ErrorAction {
    pub href: String,
    pub label: String,
}

impl ErrorAction {
    pub fn home() -> Self {
        Self {
            href: "/".to_string(),
            label: "Back to home".to_string(),
        }
    }

    pub fn blog() -> Self {
        Self {
            href: "/blog".to_string(),
            label: "Back to blog".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: LayoutContext<ErrorPageView>,
}

pub fn build_tag_badges<'a, T>(tags: T) -> Vec<TagBadge>
where
    T: IntoIterator<Item = (&'a str, &'a str)>,
{
    tags.into_iter()
        .map(|(slug, name)| TagBadge {
            href: format!("/blog/tag/{slug}"),
            label: format!("#{name}"),
        })
        .collect()
}
