//! List site content

use anyhow::{bail, Result};
use std::io::{self, Write};

use crate::content::Post;
use crate::Blog;

/// List site content by type on stdout
pub async fn run(blog: &Blog, content_type: &str) -> Result<()> {
    let stdout = io::stdout();
    run_to(blog, content_type, &mut stdout.lock()).await
}

/// List site content by type into a writer
pub async fn run_to<W: Write>(blog: &Blog, content_type: &str, out: &mut W) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let posts = blog.content.posts().await?;
            write_posts(out, "Posts", &posts)?;
        }
        "featured" => {
            let posts = blog.content.featured_posts().await?;
            write_posts(out, "Featured posts", &posts)?;
        }
        "author" | "authors" => {
            let authors = blog.content.authors().await?;
            writeln!(out, "Authors ({}):", authors.len())?;
            for author in authors {
                writeln!(out, "  {} [{}]", author.title, author.slug)?;
            }
        }
        "category" | "categories" => {
            let categories = blog.content.categories().await?;
            writeln!(out, "Categories ({}):", categories.len())?;
            for category in categories {
                match category.color() {
                    Some(color) => {
                        writeln!(out, "  {} [{}] {}", category.title, category.slug, color)?
                    }
                    None => writeln!(out, "  {} [{}]", category.title, category.slug)?,
                }
            }
        }
        _ => {
            bail!(
                "Unknown type: {}. Available: posts, featured, authors, categories",
                content_type
            );
        }
    }

    Ok(())
}

fn write_posts<W: Write>(out: &mut W, heading: &str, posts: &[Post]) -> io::Result<()> {
    writeln!(out, "{} ({}):", heading, posts.len())?;
    for post in posts {
        let date = post
            .published_at()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "----------".to_string());
        let author = post.author().map(|a| a.title.as_str()).unwrap_or("unknown");
        writeln!(out, "  {} - {} by {} [{}]", date, post.title, author, post.slug)?;
    }
    Ok(())
}
