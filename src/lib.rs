//! headless-blog: a server-rendered blog backed by a headless CMS
//!
//! Posts, authors and categories live in a remote content store. This crate
//! reads them through a small typed access layer ([`content::ContentAccess`]),
//! renders them as HTML pages and serves them over HTTP.

pub mod commands;
pub mod config;
pub mod content;
pub mod render;
pub mod server;
pub mod store;

use std::sync::Arc;

use content::ContentAccess;
use store::ContentStore;

/// The blog application: configuration plus the shared content access handle
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Read access to the content store
    pub content: ContentAccess,
}

impl Blog {
    /// Create a blog over an already constructed store client
    pub fn new(config: config::SiteConfig, store: Arc<dyn ContentStore>) -> Self {
        Self {
            config,
            content: ContentAccess::new(store),
        }
    }
}
