#![allow(dead_code)]

use serde_json::{json, Value};
use std::sync::Arc;

use headless_blog::config::SiteConfig;
use headless_blog::store::MemoryStore;
use headless_blog::Blog;

pub fn author(id: &str, slug: &str, title: &str) -> Value {
    json!({
        "id": id, "slug": slug, "title": title, "type": "authors",
        "metadata": { "bio": format!("{} writes here", title), "twitter": slug }
    })
}

pub fn category(id: &str, slug: &str, title: &str, color: &str) -> Value {
    json!({
        "id": id, "slug": slug, "title": title, "type": "categories",
        "metadata": { "description": format!("All about {}", title), "color": color }
    })
}

pub fn post(
    id: &str,
    date: Option<&str>,
    author: &str,
    categories: &[&str],
    featured: Option<bool>,
) -> Value {
    let mut metadata = json!({
        "content": format!("# {}\n\nBody of {}.", id, id),
        "excerpt": format!("About {}", id),
        "author": author,
        "categories": categories,
    });
    if let Some(date) = date {
        metadata["publication_date"] = json!(date);
    }
    if let Some(featured) = featured {
        metadata["featured"] = json!(featured);
    }
    json!({
        "id": id, "slug": id, "title": format!("Post {}", id), "type": "posts",
        "created_at": "2024-01-01T00:00:00.000Z",
        "modified_at": "2024-01-02T00:00:00.000Z",
        "metadata": metadata
    })
}

/// Two authors, three categories, five posts in scrambled date order
pub fn site_objects() -> Vec<Value> {
    vec![
        author("a-jane", "jane", "Jane Doe"),
        author("a-sam", "sam", "Sam Roe"),
        author("a-idle", "idle", "Idle Writer"),
        category("c-tech", "tech", "Tech", "#3b82f6"),
        category("c-life", "life", "Life", "#10b981"),
        category("c-empty", "empty", "Empty", "#000000"),
        post("jan", Some("2024-01-01"), "a-jane", &["c-tech"], Some(true)),
        post("mar", Some("2024-03-01"), "a-sam", &["c-tech", "c-life"], None),
        post("feb", Some("2024-02-01"), "a-jane", &["c-life"], Some(false)),
        post("undated", None, "a-sam", &[], None),
        post("apr", Some("2024-04-15T08:00:00Z"), "a-jane", &["c-tech"], Some(true)),
    ]
}

pub fn blog_over(store: MemoryStore) -> Blog {
    Blog::new(SiteConfig::default(), Arc::new(store))
}

pub fn site_blog() -> Blog {
    blog_over(MemoryStore::new(site_objects()))
}
