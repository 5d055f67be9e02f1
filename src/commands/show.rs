//! Show a single post or author

use anyhow::{bail, Result};
use std::io::{self, Write};

use crate::Blog;

/// Print one entity on stdout
pub async fn run(blog: &Blog, kind: &str, slug: &str) -> Result<()> {
    let stdout = io::stdout();
    run_to(blog, kind, slug, &mut stdout.lock()).await
}

/// Print one entity into a writer; "not found" is not an error
pub async fn run_to<W: Write>(blog: &Blog, kind: &str, slug: &str, out: &mut W) -> Result<()> {
    match kind {
        "post" => match blog.content.post(slug).await? {
            Some(post) => {
                writeln!(out, "{}", post.title)?;
                if let Some(author) = post.author() {
                    writeln!(out, "Author: {}", author.title)?;
                }
                if let Some(date) = post.published_at() {
                    writeln!(out, "Published: {}", date.format(&blog.config.date_format))?;
                }
                if !post.metadata.categories.is_empty() {
                    let names: Vec<&str> = post
                        .metadata
                        .categories
                        .iter()
                        .map(|c| c.title.as_str())
                        .collect();
                    writeln!(out, "Categories: {}", names.join(", "))?;
                }
                if post.is_featured() {
                    writeln!(out, "Featured")?;
                }
                writeln!(out)?;
                writeln!(out, "{}", post.metadata.content)?;
            }
            None => writeln!(out, "Post not found: {}", slug)?,
        },
        "author" => match blog.content.author(slug).await? {
            Some(author) => {
                writeln!(out, "{}", author.title)?;
                if let Some(bio) = author.bio() {
                    writeln!(out, "{}", bio)?;
                }
                if let Some(website) = author.website() {
                    writeln!(out, "Website: {}", website)?;
                }
                if let Some(twitter) = author.twitter_url() {
                    writeln!(out, "Twitter: {}", twitter)?;
                }
                if let Some(linkedin) = author.linkedin() {
                    writeln!(out, "LinkedIn: {}", linkedin)?;
                }
            }
            None => writeln!(out, "Author not found: {}", slug)?,
        },
        _ => bail!("Unknown type: {}. Available: post, author", kind),
    }

    Ok(())
}
