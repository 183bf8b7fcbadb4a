//! Wire types of the headless content API consumed by the Folio site.
//!
//! Every content endpoint wraps its payload in an [`Envelope`]; the health probe is the
//! only unwrapped response ([`HealthStatus`]).

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

/// A published article. `content` is sanitized HTML owned by the upstream service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub published_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub author: Option<Author>,
}

impl Post {
    /// Date of record: publication time when present, creation time otherwise.
    pub fn timestamp(&self) -> OffsetDateTime {
        self.published_at.unwrap_or(self.created_at)
    }

    /// Excerpt, treating an empty string as absent.
    pub fn excerpt(&self) -> Option<&str> {
        self.excerpt.as_deref().filter(|value| !value.is_empty())
    }

    pub fn category_slug(&self) -> Option<&str> {
        self.category.as_ref().map(|category| category.slug.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMeta {
    pub total: u64,
    pub per_page: u64,
    pub current_page: u64,
    pub last_page: u64,
}

impl PageMeta {
    /// Whether the listing holds more items than one page shows.
    pub fn is_paginated(&self) -> bool {
        self.total > 0 && self.per_page > 0 && self.total > self.per_page
    }
}

/// Response wrapper shared by all content endpoints.
///
/// `data` is only meaningful when `success` is set; an unset flag means "no data", not
/// an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub meta: Option<PageMeta>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            meta: None,
        }
    }

    pub fn with_meta(self, meta: PageMeta) -> Self {
        Self {
            meta: Some(meta),
            ..self
        }
    }

    /// Payload when the upstream flagged the response as successful.
    pub fn into_data(self) -> Option<T> {
        if self.success { self.data } else { None }
    }
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Decode a response body.
    ///
    /// The payload is only interpreted as `T` when `success` is set, so an error body
    /// carrying an unexpected `data` shape still decodes as an empty envelope.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let raw: Envelope<serde_json::Value> = serde_json::from_slice(body)?;
        if !raw.success {
            return Ok(Self {
                success: false,
                data: None,
                meta: raw.meta,
            });
        }

        let data = match raw.data {
            Some(value) => Some(serde_json::from_value(value)?),
            None => None,
        };

        Ok(Self {
            success: true,
            data,
            meta: raw.meta,
        })
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub service: String,
    pub version: String,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST_JSON: &str = r#"{
        "id": 7,
        "title": "Rust Basics",
        "slug": "rust-basics",
        "content": "<p>Hello</p>",
        "excerpt": "",
        "featured_image": null,
        "published_at": "2024-03-01T08:00:00.000000Z",
        "created_at": "2024-02-28T10:30:00.000000Z",
        "updated_at": "2024-03-02T10:30:00.000000Z",
        "category": {"id": 1, "name": "Programming", "slug": "programming", "description": null},
        "tags": null,
        "author": {"name": "Adit", "email": "adit@example.com"}
    }"#;

    #[test]
    fn post_decodes_upstream_shape() {
        let post: Post = serde_json::from_str(POST_JSON).expect("post decodes");
        assert_eq!(post.slug, "rust-basics");
        assert!(post.tags.is_empty());
        assert_eq!(post.excerpt(), None);
        assert_eq!(post.category_slug(), Some("programming"));
        assert_eq!(post.timestamp(), post.published_at.expect("published"));
    }

    #[test]
    fn timestamp_falls_back_to_creation_time() {
        let mut post: Post = serde_json::from_str(POST_JSON).expect("post decodes");
        post.published_at = None;
        assert_eq!(post.timestamp(), post.created_at);
    }

    #[test]
    fn envelope_keeps_meta_and_data_on_success() {
        let body = format!(
            r#"{{"success": true, "data": [{POST_JSON}], "meta": {{"total": 12, "per_page": 10, "current_page": 1, "last_page": 2}}}}"#
        );
        let envelope = Envelope::<Vec<Post>>::from_slice(body.as_bytes()).expect("decodes");
        let meta = envelope.meta.expect("meta present");
        assert!(meta.is_paginated());
        assert_eq!(envelope.into_data().map(|posts| posts.len()), Some(1));
    }

    #[test]
    fn unsuccessful_envelope_ignores_payload_shape() {
        let body = br#"{"success": false, "data": {"message": "Post not found"}}"#;
        let envelope = Envelope::<Vec<Post>>::from_slice(body).expect("decodes");
        assert!(!envelope.success);
        assert_eq!(envelope.into_data(), None);
    }

    #[test]
    fn missing_success_flag_means_no_data() {
        let body = br#"{"data": []}"#;
        let envelope = Envelope::<Vec<Post>>::from_slice(body).expect("decodes");
        assert_eq!(envelope.into_data(), None);
    }

    #[test]
    fn health_status_tolerates_missing_fields() {
        let status: HealthStatus =
            serde_json::from_str(r#"{"status": "ok"}"#).expect("health decodes");
        assert_eq!(status.status, "ok");
        assert!(status.version.is_empty());
    }
}
