//! Start the HTTP server

use anyhow::Result;

use crate::server;
use crate::Blog;

/// Serve the blog until interrupted
pub async fn run(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    tracing::info!("Starting server at http://{}:{}", ip, port);
    server::start(blog, ip, port).await
}
