//! HTML pages for the landing page, posts, categories and authors

use super::html::{
    absolute_url, chip_style, entity_path, entity_url, escape, external_link, format_date, url_for,
};
use super::markdown::MarkdownRenderer;
use crate::config::SiteConfig;
use crate::content::{Author, Category, Post};

/// Number of featured posts shown on the landing page
const FEATURED_LIMIT: usize = 3;

/// Categories shown on a post card
const CARD_CATEGORY_LIMIT: usize = 2;

const STYLESHEET: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; background: #f9fafb; color: #111827; }
header.site, footer.site { background: #fff; padding: 1rem 2rem; border-bottom: 1px solid #e5e7eb; }
footer.site { border-top: 1px solid #e5e7eb; border-bottom: none; color: #6b7280; }
main { max-width: 72rem; margin: 0 auto; padding: 2rem; }
a { color: #2563eb; text-decoration: none; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(18rem, 1fr)); gap: 2rem; }
.card { background: #fff; border-radius: .5rem; overflow: hidden; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
.card img { width: 100%; display: block; }
.card .body { padding: 1.5rem; }
.chip { display: inline-block; padding: .25rem .75rem; margin: 0 .25rem .25rem 0; border-radius: 9999px; font-size: .75rem; }
.byline { color: #6b7280; font-size: .875rem; }
.avatar { border-radius: 9999px; vertical-align: middle; }
.bio { background: #f3f4f6; border-radius: .5rem; padding: 2rem; margin-top: 3rem; }
"#;

/// Head metadata for one page
struct Meta<'a> {
    title: &'a str,
    description: String,
    /// Site-relative path, emitted as an absolute og:url
    path: Option<String>,
    image: Option<&'a str>,
}

impl<'a> Meta<'a> {
    fn new(title: &'a str, description: impl Into<String>) -> Self {
        Self {
            title,
            description: description.into(),
            path: None,
            image: None,
        }
    }

    fn path(mut self, path: String) -> Self {
        self.path = Some(path);
        self
    }

    fn image(mut self, image: Option<&'a str>) -> Self {
        self.image = image;
        self
    }
}

/// Builds complete HTML documents from content entities
pub struct PageRenderer {
    config: SiteConfig,
    markdown: MarkdownRenderer,
}

impl PageRenderer {
    pub fn new(config: SiteConfig) -> Self {
        Self {
            config,
            markdown: MarkdownRenderer::new(),
        }
    }

    /// Landing page: featured posts, the category strip, then everything else
    pub fn home(&self, posts: &[Post], featured: &[Post], categories: &[Category]) -> String {
        let mut body = String::new();

        if !featured.is_empty() {
            body.push_str(r#"<section class="featured"><h2>Featured Articles</h2><div class="grid">"#);
            for post in featured.iter().take(FEATURED_LIMIT) {
                body.push_str(&self.post_card(post, 800, 450));
            }
            body.push_str("</div></section>");
        }

        if !categories.is_empty() {
            body.push_str(r#"<nav class="categories">"#);
            for category in categories {
                body.push_str(&self.category_chip(category));
            }
            body.push_str("</nav>");
        }

        body.push_str(r#"<section class="latest"><h2>Latest Articles</h2>"#);
        let regular: Vec<&Post> = posts.iter().filter(|p| !p.is_featured()).collect();
        if regular.is_empty() {
            body.push_str(r#"<p class="empty">No articles found.</p>"#);
        } else {
            body.push_str(r#"<div class="grid">"#);
            for post in regular {
                body.push_str(&self.post_card(post, 800, 450));
            }
            body.push_str("</div>");
        }
        body.push_str("</section>");

        let meta = Meta::new(&self.config.title, self.config.description.as_str()).path("/".into());
        self.layout(meta, &body)
    }

    /// Full article page
    pub fn post(&self, post: &Post) -> String {
        let mut body = String::from(r#"<article class="post"><header>"#);
        body.push_str(&format!(
            r#"<p><a href="{}">&larr; Back to Articles</a></p><h1>{}</h1>"#,
            url_for(&self.config, "/"),
            escape(&post.title)
        ));

        if let Some(excerpt) = post.excerpt() {
            body.push_str(&format!(r#"<p class="excerpt">{}</p>"#, escape(excerpt)));
        }

        if let Some(image) = &post.metadata.featured_image {
            body.push_str(&format!(
                r#"<img class="hero" src="{}" alt="{}" width="1200" height="600">"#,
                escape(&image.sized(1200, 600)),
                escape(&post.title)
            ));
        }

        body.push_str(r#"<div class="byline">"#);
        if let Some(author) = post.author() {
            if let Some(picture) = &author.metadata.profile_picture {
                body.push_str(&format!(
                    r#"<img class="avatar" src="{}" alt="{}" width="40" height="40"> "#,
                    escape(&picture.sized(80, 80)),
                    escape(&author.title)
                ));
            }
            body.push_str(&format!(
                r#"<a href="{}">{}</a> "#,
                entity_url(&self.config, "authors", &author.slug),
                escape(&author.title)
            ));
        }
        if let Some(published) = post.published_at() {
            body.push_str(&format!(
                r#"<time datetime="{}">{}</time>"#,
                escape(post.metadata.publication_date.as_deref().unwrap_or_default()),
                format_date(&published, &self.config.date_format)
            ));
        }
        body.push_str("</div></header>");

        body.push_str(r#"<div class="content">"#);
        body.push_str(&self.markdown.render(&post.metadata.content));
        body.push_str("</div>");

        if !post.metadata.categories.is_empty() {
            body.push_str(r#"<section class="post-categories"><h3>Categories</h3>"#);
            for category in &post.metadata.categories {
                body.push_str(&self.category_chip(category));
            }
            body.push_str("</section>");
        }

        if let Some(author) = post.author() {
            if let Some(bio) = author.bio() {
                body.push_str(&format!(
                    r#"<aside class="bio"><h4>About {}</h4><p>{}</p>{}</aside>"#,
                    escape(&author.title),
                    escape(bio),
                    social_links(author)
                ));
            }
        }

        body.push_str("</article>");

        let description = match post.excerpt() {
            Some(excerpt) => excerpt.to_string(),
            None => format!("Read this article on {}", self.config.title),
        };
        let meta = Meta::new(&post.title, description)
            .path(entity_path("posts", &post.slug))
            .image(post.metadata.featured_image.as_ref().map(|i| i.imgix_url.as_str()));
        self.layout(meta, &body)
    }

    /// Category page with its posts
    pub fn category(&self, category: &Category, posts: &[Post]) -> String {
        let mut body = format!(
            r#"<header class="category"><h1><span class="chip" style="{}">{}</span></h1>"#,
            chip_style(category),
            escape(&category.title)
        );
        if let Some(description) = category.description() {
            body.push_str(&format!("<p>{}</p>", escape(description)));
        }
        body.push_str("</header>");
        body.push_str(&self.post_grid(posts, "No articles in this category yet."));

        let description = match category.description() {
            Some(description) => description.to_string(),
            None => format!("Articles about {}", category.title),
        };
        let meta = Meta::new(&category.title, description)
            .path(entity_path("categories", &category.slug));
        self.layout(meta, &body)
    }

    /// Author profile page with their posts
    pub fn author(&self, author: &Author, posts: &[Post]) -> String {
        let mut body = String::from(r#"<header class="author">"#);
        if let Some(picture) = &author.metadata.profile_picture {
            body.push_str(&format!(
                r#"<img class="avatar" src="{}" alt="{}" width="120" height="120">"#,
                escape(&picture.sized(240, 240)),
                escape(&author.title)
            ));
        }
        body.push_str(&format!("<h1>{}</h1>", escape(&author.title)));
        if let Some(bio) = author.bio() {
            body.push_str(&format!("<p>{}</p>", escape(bio)));
        }
        body.push_str(&social_links(author));
        body.push_str("</header>");

        body.push_str(&format!("<h2>Articles by {}</h2>", escape(&author.title)));
        body.push_str(&self.post_grid(posts, "No articles by this author yet."));

        let description = match author.bio() {
            Some(bio) => bio.to_string(),
            None => format!("Articles by {}", author.title),
        };
        let meta = Meta::new(&author.title, description)
            .path(entity_path("authors", &author.slug))
            .image(author.metadata.profile_picture.as_ref().map(|i| i.imgix_url.as_str()));
        self.layout(meta, &body)
    }

    /// Shown for unknown paths and missing slugs
    pub fn not_found(&self) -> String {
        let body = format!(
            r#"<h1>Page Not Found</h1><p>The page you are looking for does not exist.</p><p><a href="{}">Back to Articles</a></p>"#,
            url_for(&self.config, "/")
        );
        self.layout(Meta::new("Page Not Found", self.config.description.as_str()), &body)
    }

    /// Generic failure page; store details never reach the visitor
    pub fn error(&self) -> String {
        let body = "<h1>Something went wrong</h1><p>We could not load this page. Please try again later.</p>";
        self.layout(Meta::new("Error", self.config.description.as_str()), body)
    }

    fn post_grid(&self, posts: &[Post], empty: &str) -> String {
        if posts.is_empty() {
            return format!(r#"<p class="empty">{}</p>"#, escape(empty));
        }
        let cards: String = posts.iter().map(|p| self.post_card(p, 800, 450)).collect();
        format!(r#"<div class="grid">{}</div>"#, cards)
    }

    fn post_card(&self, post: &Post, width: u32, height: u32) -> String {
        let url = entity_url(&self.config, "posts", &post.slug);
        let mut card = String::from(r#"<article class="card">"#);

        if let Some(image) = &post.metadata.featured_image {
            card.push_str(&format!(
                r#"<a href="{}"><img src="{}" alt="{}"></a>"#,
                url,
                escape(&image.sized(width, height)),
                escape(&post.title)
            ));
        }

        card.push_str(r#"<div class="body">"#);
        for category in post.metadata.categories.iter().take(CARD_CATEGORY_LIMIT) {
            card.push_str(&self.category_chip(category));
        }
        card.push_str(&format!(
            r#"<h3><a href="{}">{}</a></h3>"#,
            url,
            escape(&post.title)
        ));
        if let Some(excerpt) = post.excerpt() {
            card.push_str(&format!("<p>{}</p>", escape(excerpt)));
        }

        let mut byline = Vec::new();
        if let Some(author) = post.author() {
            byline.push(escape(&author.title));
        }
        if let Some(published) = post.published_at() {
            byline.push(format_date(&published, "%b %d, %Y"));
        }
        if !byline.is_empty() {
            card.push_str(&format!(r#"<p class="byline">{}</p>"#, byline.join(" &middot; ")));
        }

        card.push_str("</div></article>");
        card
    }

    fn category_chip(&self, category: &Category) -> String {
        format!(
            r#"<a class="chip" href="{}" style="{}">{}</a>"#,
            entity_url(&self.config, "categories", &category.slug),
            chip_style(category),
            escape(&category.title)
        )
    }

    fn layout(&self, meta: Meta<'_>, body: &str) -> String {
        let full_title = if meta.title == self.config.title {
            escape(meta.title)
        } else {
            format!("{} | {}", escape(meta.title), escape(&self.config.title))
        };

        let mut social = String::new();
        if let Some(path) = &meta.path {
            social.push_str(&format!(
                "\n<meta property=\"og:url\" content=\"{}\">",
                escape(&absolute_url(&self.config, path))
            ));
        }
        if let Some(image) = meta.image {
            social.push_str(&format!(
                "\n<meta property=\"og:image\" content=\"{}\">",
                escape(image)
            ));
        }

        format!(
            r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<meta name="description" content="{description}">
<meta property="og:title" content="{title}">
<meta property="og:description" content="{description}">{social}
<style>{style}</style>
</head>
<body>
<header class="site"><a href="{home}">{site}</a></header>
<main>
{body}
</main>
<footer class="site">&copy; {site}</footer>
</body>
</html>
"#,
            lang = escape(&self.config.language),
            title = full_title,
            description = escape(&meta.description),
            social = social,
            style = STYLESHEET,
            home = url_for(&self.config, "/"),
            site = escape(&self.config.title),
            body = body,
        )
    }
}

fn social_links(author: &Author) -> String {
    let mut links = Vec::new();
    if let Some(website) = author.website() {
        links.push(external_link(website, "Website"));
    }
    if let Some(twitter) = author.twitter_url() {
        links.push(external_link(&twitter, "Twitter"));
    }
    if let Some(linkedin) = author.linkedin() {
        links.push(external_link(linkedin, "LinkedIn"));
    }

    if links.is_empty() {
        String::new()
    } else {
        format!(r#"<p class="social">{}</p>"#, links.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post(value: serde_json::Value) -> Post {
        serde_json::from_value(value).unwrap()
    }

    fn full_post() -> Post {
        post(json!({
            "id": "p1", "slug": "hello", "title": "Hello <World>",
            "metadata": {
                "content": "Some **bold** text",
                "excerpt": "An intro",
                "featured_image": { "url": "u", "imgix_url": "https://img.test/a.jpg" },
                "author": {
                    "id": "a1", "slug": "jane", "title": "Jane",
                    "metadata": { "bio": "Writes things", "twitter": "jane", "website": "https://jane.dev" }
                },
                "categories": [{ "id": "c1", "slug": "tech", "title": "Tech", "metadata": { "color": "#ff0000" } }],
                "publication_date": "2024-03-01"
            }
        }))
    }

    #[test]
    fn test_post_page() {
        let renderer = PageRenderer::new(SiteConfig::default());
        let html = renderer.post(&full_post());

        assert!(html.contains("<h1>Hello &lt;World&gt;</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains(
            "https://img.test/a.jpg?w=1200&amp;h=600&amp;fit=crop&amp;auto=format,compress"
        ));
        assert!(html.contains(r#"<a href="/authors/jane">Jane</a>"#));
        assert!(html.contains("March 01, 2024"));
        assert!(html.contains(r#"href="/categories/tech""#));
        assert!(html.contains("About Jane"));
        assert!(html.contains("https://twitter.com/jane"));
        assert!(html.contains(r#"<meta name="description" content="An intro">"#));
        assert!(html.contains(r#"<meta property="og:image" content="https://img.test/a.jpg">"#));
        assert!(html.contains(
            r#"<meta property="og:url" content="http://localhost:3000/posts/hello">"#
        ));
    }

    #[test]
    fn test_post_page_without_optional_fields() {
        let renderer = PageRenderer::new(SiteConfig::default());
        let html = renderer.post(&post(json!({
            "id": "p2", "slug": "plain", "title": "Plain", "metadata": { "content": "Body" }
        })));

        assert!(html.contains("<p>Body</p>"));
        assert!(!html.contains("class=\"bio\""));
        assert!(!html.contains("<time"));
        assert!(html.contains(
            r#"<meta property="og:description" content="Read this article on Modern Blog Platform">"#
        ));
        assert!(!html.contains("og:image"));
    }

    #[test]
    fn test_home_uses_site_description() {
        let renderer = PageRenderer::new(SiteConfig::default());
        let html = renderer.home(&[], &[], &[]);
        assert!(html.contains(
            r#"<meta name="description" content="A beautifully designed blog platform"#
        ));
        assert!(html.contains(r#"<meta property="og:url" content="http://localhost:3000/">"#));
    }

    #[test]
    fn test_home_separates_featured() {
        let renderer = PageRenderer::new(SiteConfig::default());
        let featured = post(json!({
            "id": "f", "slug": "star", "title": "Star", "metadata": { "featured": true }
        }));
        let regular = post(json!({ "id": "r", "slug": "plain", "title": "Plain" }));

        let html = renderer.home(&[featured.clone(), regular], &[featured], &[]);
        assert!(html.contains("Featured Articles"));
        assert_eq!(html.matches(r#"href="/posts/star""#).count(), 1);
        assert!(html.contains(r#"href="/posts/plain""#));
    }

    #[test]
    fn test_home_empty() {
        let renderer = PageRenderer::new(SiteConfig::default());
        let html = renderer.home(&[], &[], &[]);
        assert!(html.contains("No articles found."));
        assert!(!html.contains("Featured Articles"));
    }

    #[test]
    fn test_category_and_author_pages() {
        let renderer = PageRenderer::new(SiteConfig::default());
        let post = full_post();
        let category = post.metadata.categories[0].clone();
        let author = post.author().cloned().unwrap();

        let html = renderer.category(&category, &[post.clone()]);
        assert!(html.contains("<title>Tech | Modern Blog Platform</title>"));
        assert!(html.contains(r#"href="/posts/hello""#));

        let html = renderer.author(&author, &[]);
        assert!(html.contains("Articles by Jane"));
        assert!(html.contains("No articles by this author yet."));
        assert!(html.contains(r#"<meta name="description" content="Writes things">"#));
    }

    #[test]
    fn test_category_description_fallback() {
        let renderer = PageRenderer::new(SiteConfig::default());
        let category: Category = serde_json::from_value(json!({
            "id": "c2", "slug": "history", "title": "History"
        }))
        .unwrap();

        let html = renderer.category(&category, &[]);
        assert!(html.contains(r#"<meta name="description" content="Articles about History">"#));
        assert!(html.contains(
            r#"<meta property="og:url" content="http://localhost:3000/categories/history">"#
        ));
        assert!(!html.contains("og:image"));
    }

    #[test]
    fn test_author_description_fallback_and_image() {
        let mut config = SiteConfig::default();
        config.url = "https://blog.example.com".to_string();
        let renderer = PageRenderer::new(config);
        let author: Author = serde_json::from_value(json!({
            "id": "a2", "slug": "ada", "title": "Ada",
            "metadata": {
                "profile_picture": { "url": "u", "imgix_url": "https://img.test/ada.png" }
            }
        }))
        .unwrap();

        let html = renderer.author(&author, &[]);
        assert!(html.contains(r#"<meta name="description" content="Articles by Ada">"#));
        assert!(html.contains(r#"<meta property="og:image" content="https://img.test/ada.png">"#));
        assert!(html.contains(
            r#"<meta property="og:url" content="https://blog.example.com/authors/ada">"#
        ));
    }
}
