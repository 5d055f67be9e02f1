//! HTTP front end serving the rendered pages

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::content::{ContentAccess, FetchError};
use crate::render::PageRenderer;
use crate::Blog;

/// Server state
struct ServerState {
    content: ContentAccess,
    pages: PageRenderer,
}

/// Outcome of a page handler
enum Page {
    Found(String),
    Missing,
}

impl ServerState {
    fn respond(&self, result: Result<Page, FetchError>) -> Response {
        match result {
            Ok(Page::Found(html)) => Html(html).into_response(),
            Ok(Page::Missing) => self.not_found(),
            Err(e) => {
                tracing::error!("Page failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, Html(self.pages.error())).into_response()
            }
        }
    }

    fn not_found(&self) -> Response {
        (StatusCode::NOT_FOUND, Html(self.pages.not_found())).into_response()
    }
}

/// Build the application router
pub fn router(blog: &Blog) -> Router {
    let state = Arc::new(ServerState {
        content: blog.content.clone(),
        pages: PageRenderer::new(blog.config.clone()),
    });

    Router::new()
        .route("/", get(home_handler))
        .route("/posts/:slug", get(post_handler))
        .route("/categories/:slug", get(category_handler))
        .route("/authors/:slug", get(author_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(blog)).await?;

    Ok(())
}

/// Landing page: posts, featured posts and categories are fetched together
async fn home_handler(State(state): State<Arc<ServerState>>) -> Response {
    let result = tokio::try_join!(
        state.content.posts(),
        state.content.featured_posts(),
        state.content.categories()
    )
    .map(|(posts, featured, categories)| {
        Page::Found(state.pages.home(&posts, &featured, &categories))
    });

    state.respond(result)
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    let result = state.content.post(&slug).await.map(|post| match post {
        Some(post) => Page::Found(state.pages.post(&post)),
        None => Page::Missing,
    });

    state.respond(result)
}

async fn category_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    let result = category_page(&state, &slug).await;
    state.respond(result)
}

/// Categories are looked up by slug among the full list
async fn category_page(state: &ServerState, slug: &str) -> Result<Page, FetchError> {
    let categories = state.content.categories().await?;
    let Some(category) = categories.into_iter().find(|c| c.slug == slug) else {
        return Ok(Page::Missing);
    };
    let posts = state.content.posts_by_category(&category.id).await?;
    Ok(Page::Found(state.pages.category(&category, &posts)))
}

async fn author_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    let result = author_page(&state, &slug).await;
    state.respond(result)
}

async fn author_page(state: &ServerState, slug: &str) -> Result<Page, FetchError> {
    let Some(author) = state.content.author(slug).await? else {
        return Ok(Page::Missing);
    };
    let posts = state.content.posts_by_author(&author.id).await?;
    Ok(Page::Found(state.pages.author(&author, &posts)))
}

async fn fallback_handler(State(state): State<Arc<ServerState>>) -> Response {
    state.not_found()
}
