//! View builders for the home page and article pages.

use time::format_description::well_known::Rfc3339;

use crate::application::{
    blog::PostDetail,
    feed::{category_badge, summary_text},
};
use crate::domain::portfolio;
use crate::infra::contact::ContactOutcome;
use crate::presentation::views::{
    HomeView, NoticeView, PostDetailView, ProjectView, RelatedPostView, SkillGroupView,
    SocialLinkView, build_tag_badges,
};

const RELATED_EXCERPT_CHARS: usize = 100;

pub fn home_view(contact_enabled: bool, outcome: Option<&ContactOutcome>) -> HomeView {
    HomeView {
        headline: portfolio::HEADLINE.to_string(),
        tagline: portfolio::TAGLINE.to_string(),
        cv_path: portfolio::CV_PATH.to_string(),
        about: portfolio::ABOUT.iter().map(|p| (*p).to_string()).collect(),
        skills: portfolio::skills()
            .iter()
            .map(|group| SkillGroupView {
                title: group.title.to_string(),
                skills: group.skills.iter().map(|s| (*s).to_string()).collect(),
            })
            .collect(),
        learning: portfolio::LEARNING.iter().map(|s| (*s).to_string()).collect(),
        projects: portfolio::projects()
            .iter()
            .map(|project| ProjectView {
                title: project.title.to_string(),
                description: project.description.to_string(),
                image: project.image.to_string(),
                technologies: project
                    .technologies
                    .iter()
                    .map(|t| (*t).to_string())
                    .collect(),
                live_url: project.live_url.to_string(),
                repository_url: project.repository_url.to_string(),
            })
            .collect(),
        social_links: portfolio::SOCIAL_LINKS
            .iter()
            .map(|link| SocialLinkView {
                label: link.label.to_string(),
                url: link.url.to_string(),
            })
            .collect(),
        contact_enabled,
        notice: outcome.map(notice_for),
    }
}

fn notice_for(outcome: &ContactOutcome) -> NoticeView {
    let kind = match outcome {
        ContactOutcome::Sent => "success",
        ContactOutcome::Disabled => "info",
        _ => "error",
    };
    NoticeView {
        kind,
        text: outcome.notice().to_string(),
    }
}

pub fn post_detail_view(detail: &PostDetail) -> PostDetailView {
    let post = &detail.post;

    PostDetailView {
        title: post.title.clone(),
        content_html: post.content.clone(),
        featured_image: post.featured_image.clone(),
        published: detail.published_on.clone(),
        iso_date: post.timestamp().format(&Rfc3339).unwrap_or_default(),
        reading_minutes: detail.reading_minutes,
        category: post.category.as_ref().map(category_badge),
        badges: build_tag_badges(
            post.tags
                .iter()
                .map(|tag| (tag.slug.as_str(), tag.name.as_str())),
        ),
        author_name: post.author.as_ref().map(|author| author.name.clone()),
        related: detail
            .related
            .iter()
            .map(|related| RelatedPostView {
                href: format!("/blog/{}", related.slug),
                title: related.title.clone(),
                excerpt: summary_text(related, RELATED_EXCERPT_CHARS),
                featured_image: related.featured_image.clone(),
            })
            .collect(),
    }
}
