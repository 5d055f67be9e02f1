//! Small HTML and URL helpers shared by the page builders

use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;
use crate::content::Category;

/// Characters escaped in a path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Default chip colour when a category has none
const NEUTRAL_TEXT: &str = "#374151";
const NEUTRAL_BACKGROUND: &str = "#f3f4f6";

/// Simple HTML escaping
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/posts/hello/") // -> "/blog/posts/hello/"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Absolute URL under the configured site origin
pub fn absolute_url(config: &SiteConfig, path: &str) -> String {
    format!("{}{}", config.url.trim_end_matches('/'), url_for(config, path))
}

/// Root-relative path of an entity page with the slug encoded
pub fn entity_path(section: &str, slug: &str) -> String {
    format!("{}/{}", section, utf8_percent_encode(slug, SEGMENT))
}

/// URL of an entity page, e.g. `/posts/<slug>`
pub fn entity_url(config: &SiteConfig, section: &str, slug: &str) -> String {
    url_for(config, &entity_path(section, slug))
}

/// Format a publication date for display
pub fn format_date(date: &DateTime<Utc>, format: &str) -> String {
    date.format(format).to_string()
}

/// Inline style for a category chip: tinted background, solid text
pub fn chip_style(category: &Category) -> String {
    match category.color() {
        Some(color) => format!(
            "background-color: {}20; color: {}",
            escape(color),
            escape(color)
        ),
        None => format!(
            "background-color: {}; color: {}",
            NEUTRAL_BACKGROUND, NEUTRAL_TEXT
        ),
    }
}

/// Anchor opening in a new tab
pub fn external_link(href: &str, text: &str) -> String {
    format!(
        r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
        escape(href),
        escape(text)
    )
}
