//! Post, Author and Category models as returned by the content store

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Object type tag used by the content store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    #[serde(rename = "posts")]
    Post,
    #[serde(rename = "authors")]
    Author,
    #[serde(rename = "categories")]
    Category,
}

impl Kind {
    /// The type slug the store knows this kind by
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Post => "posts",
            Kind::Author => "authors",
            Kind::Category => "categories",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields shared by every object in the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentObject<M> {
    /// Opaque unique identifier
    pub id: String,

    /// URL-safe name, unique within its kind
    pub slug: String,

    /// Display title
    pub title: String,

    /// Absent when the query projected it away
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<Kind>,

    /// Kind-specific metadata
    #[serde(
        default,
        deserialize_with = "nullable",
        bound(deserialize = "M: Deserialize<'de> + Default")
    )]
    pub metadata: M,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

pub type Post = ContentObject<PostMetadata>;
pub type Author = ContentObject<AuthorMetadata>;
pub type Category = ContentObject<CategoryMetadata>;

/// An uploaded image: the raw URL and a resizable one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAsset {
    pub url: String,
    pub imgix_url: String,
}

impl ImageAsset {
    /// URL of a cropped, compressed rendition
    pub fn sized(&self, width: u32, height: u32) -> String {
        format!(
            "{}?w={}&h={}&fit=crop&auto=format,compress",
            self.imgix_url, width, height
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostMetadata {
    /// Markdown body
    #[serde(default, deserialize_with = "nullable")]
    pub content: String,

    /// Unset image fields come back as `""`; anything but an image is `None`
    #[serde(default, deserialize_with = "lenient")]
    pub featured_image: Option<ImageAsset>,

    #[serde(default)]
    pub excerpt: Option<String>,

    /// Expanded author object; a bare id does not deserialize
    #[serde(default)]
    pub author: Option<Author>,

    /// Expanded categories; ids left over from deleted categories are dropped
    #[serde(default, deserialize_with = "resolved_only")]
    pub categories: Vec<Category>,

    #[serde(default)]
    pub publication_date: Option<String>,

    #[serde(default)]
    pub featured: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorMetadata {
    #[serde(default)]
    pub bio: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub profile_picture: Option<ImageAsset>,

    #[serde(default)]
    pub website: Option<String>,

    /// Handle, with or without a leading `@`
    #[serde(default)]
    pub twitter: Option<String>,

    #[serde(default)]
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryMetadata {
    #[serde(default)]
    pub description: Option<String>,

    /// Hex colour such as `#3b82f6`
    #[serde(default)]
    pub color: Option<String>,
}

impl Post {
    /// Publication timestamp, if present and parseable
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.metadata
            .publication_date
            .as_deref()
            .and_then(parse_timestamp)
    }

    pub fn is_featured(&self) -> bool {
        self.metadata.featured.unwrap_or(false)
    }

    pub fn author(&self) -> Option<&Author> {
        self.metadata.author.as_ref()
    }

    /// Excerpt text, ignoring blank values
    pub fn excerpt(&self) -> Option<&str> {
        non_blank(self.metadata.excerpt.as_deref())
    }

    pub fn has_category(&self, category_id: &str) -> bool {
        self.metadata.categories.iter().any(|c| c.id == category_id)
    }

    pub fn is_by(&self, author_id: &str) -> bool {
        self.author().is_some_and(|a| a.id == author_id)
    }
}

impl Author {
    pub fn bio(&self) -> Option<&str> {
        non_blank(self.metadata.bio.as_deref())
    }

    pub fn website(&self) -> Option<&str> {
        non_blank(self.metadata.website.as_deref())
    }

    pub fn linkedin(&self) -> Option<&str> {
        non_blank(self.metadata.linkedin.as_deref())
    }

    /// Profile URL built from the twitter handle
    pub fn twitter_url(&self) -> Option<String> {
        non_blank(self.metadata.twitter.as_deref())
            .map(|handle| format!("https://twitter.com/{}", handle.trim_start_matches('@')))
    }
}

impl Category {
    pub fn description(&self) -> Option<&str> {
        non_blank(self.metadata.description.as_deref())
    }

    pub fn color(&self) -> Option<&str> {
        non_blank(self.metadata.color.as_deref())
    }
}

/// Parse a store timestamp: RFC 3339, a naive date-time, or a plain date
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// `None` for any value that does not decode as `T`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Keep the list entries that decode as `T`, skipping bare reference ids
fn resolved_only<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

/// Treat an explicit `null` like a missing field
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
