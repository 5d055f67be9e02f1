//! Read operations over the content store.
//!
//! Every operation performs exactly one store round trip. A 404 from the store
//! becomes an empty list or `None`; anything else becomes a [`FetchError`]
//! naming the operation. Post collections come back newest first. A list
//! entry that does not decode (for example a post whose author was deleted)
//! is logged and left out rather than failing the whole list.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use super::model::{Author, Category, Kind, Post};
use super::sort;
use crate::store::{ContentStore, Query, StoreError};

/// Fields requested for list queries
const LIST_PROPS: &[&str] = &["id", "title", "slug", "metadata"];

/// Reference expansion used whenever posts are read
const POST_DEPTH: u8 = 1;

/// The read operations exposed to page rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Posts,
    FeaturedPosts,
    Post,
    Authors,
    Author,
    Categories,
    PostsByCategory,
    PostsByAuthor,
}

impl Operation {
    /// Fixed failure label reported to callers
    pub fn label(self) -> &'static str {
        match self {
            Operation::Posts => "Failed to fetch posts",
            Operation::FeaturedPosts => "Failed to fetch featured posts",
            Operation::Post => "Failed to fetch post",
            Operation::Authors => "Failed to fetch authors",
            Operation::Author => "Failed to fetch author",
            Operation::Categories => "Failed to fetch categories",
            Operation::PostsByCategory => "Failed to fetch posts by category",
            Operation::PostsByAuthor => "Failed to fetch posts by author",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Posts => "posts",
            Operation::FeaturedPosts => "featured_posts",
            Operation::Post => "post",
            Operation::Authors => "authors",
            Operation::Author => "author",
            Operation::Categories => "categories",
            Operation::PostsByCategory => "posts_by_category",
            Operation::PostsByAuthor => "posts_by_author",
        };
        f.write_str(name)
    }
}

/// A read that failed for any reason other than "not found"
#[derive(Debug, Error)]
#[error("{}", .operation.label())]
pub struct FetchError {
    operation: Operation,
    #[source]
    source: StoreError,
}

impl FetchError {
    /// The operation that failed
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Same as the `Display` text
    pub fn label(&self) -> &'static str {
        self.operation.label()
    }
}

/// Shared, stateless read access to posts, authors and categories
#[derive(Clone)]
pub struct ContentAccess {
    store: Arc<dyn ContentStore>,
}

impl ContentAccess {
    /// Wrap a store client shared by every operation
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// All posts, newest first
    pub async fn posts(&self) -> Result<Vec<Post>, FetchError> {
        self.list_posts(Operation::Posts, post_list_query()).await
    }

    /// Posts flagged as featured, newest first
    pub async fn featured_posts(&self) -> Result<Vec<Post>, FetchError> {
        let query = post_list_query().filter("metadata.featured", true);
        let mut posts = self.list_posts(Operation::FeaturedPosts, query).await?;
        posts.retain(Post::is_featured);
        Ok(posts)
    }

    /// A single post by slug, with author and categories expanded
    pub async fn post(&self, slug: &str) -> Result<Option<Post>, FetchError> {
        let query = Query::new(Kind::Post).filter("slug", slug).depth(POST_DEPTH);
        self.fetch_one(Operation::Post, query).await
    }

    /// All authors in store order
    pub async fn authors(&self) -> Result<Vec<Author>, FetchError> {
        let query = Query::new(Kind::Author).props(LIST_PROPS);
        self.fetch_list(Operation::Authors, query).await
    }

    /// A single author by slug
    pub async fn author(&self, slug: &str) -> Result<Option<Author>, FetchError> {
        let query = Query::new(Kind::Author).filter("slug", slug);
        self.fetch_one(Operation::Author, query).await
    }

    /// All categories in store order
    pub async fn categories(&self) -> Result<Vec<Category>, FetchError> {
        let query = Query::new(Kind::Category).props(LIST_PROPS);
        self.fetch_list(Operation::Categories, query).await
    }

    /// Posts listing the category id among their categories, newest first
    pub async fn posts_by_category(&self, category_id: &str) -> Result<Vec<Post>, FetchError> {
        let query = post_list_query().filter("metadata.categories", category_id);
        self.list_posts(Operation::PostsByCategory, query).await
    }

    /// Posts whose author is the given author id, newest first
    pub async fn posts_by_author(&self, author_id: &str) -> Result<Vec<Post>, FetchError> {
        let query = post_list_query().filter("metadata.author", author_id);
        self.list_posts(Operation::PostsByAuthor, query).await
    }

    async fn list_posts(
        &self,
        operation: Operation,
        query: Query,
    ) -> Result<Vec<Post>, FetchError> {
        let mut posts: Vec<Post> = self.fetch_list(operation, query).await?;
        sort::newest_first(&mut posts);
        Ok(posts)
    }

    async fn fetch_list<T>(&self, operation: Operation, query: Query) -> Result<Vec<T>, FetchError>
    where
        T: DeserializeOwned,
    {
        tracing::debug!(
            %operation,
            query = %query.to_json(),
            depth = query.expansion_depth(),
            "Querying content store"
        );

        match self.store.find(&query).await {
            Ok(objects) => Ok(objects
                .into_iter()
                .filter_map(|object| decode_or_skip(operation, object))
                .collect()),
            Err(e) if e.is_not_found() => {
                tracing::debug!(%operation, "No objects found");
                Ok(Vec::new())
            }
            Err(e) => Err(failed(operation, e)),
        }
    }

    async fn fetch_one<T>(
        &self,
        operation: Operation,
        query: Query,
    ) -> Result<Option<T>, FetchError>
    where
        T: DeserializeOwned,
    {
        tracing::debug!(
            %operation,
            query = %query.to_json(),
            depth = query.expansion_depth(),
            "Querying content store"
        );

        match self.store.find_one(&query).await {
            Ok(object) => decode(object).map(Some).map_err(|e| failed(operation, e)),
            Err(e) if e.is_not_found() => {
                tracing::debug!(%operation, "Object not found");
                Ok(None)
            }
            Err(e) => Err(failed(operation, e)),
        }
    }
}

fn post_list_query() -> Query {
    Query::new(Kind::Post).props(LIST_PROPS).depth(POST_DEPTH)
}

fn decode<T: DeserializeOwned>(object: Value) -> Result<T, StoreError> {
    Ok(serde_json::from_value(object)?)
}

/// Decode one list entry; an entry that does not decode is logged and dropped
fn decode_or_skip<T: DeserializeOwned>(operation: Operation, object: Value) -> Option<T> {
    let id = object
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or("<no id>")
        .to_string();

    match serde_json::from_value(object) {
        Ok(item) => Some(item),
        Err(e) => {
            tracing::warn!(%operation, id = %id, error = %e, "Skipping undecodable object");
            None
        }
    }
}

fn failed(operation: Operation, source: StoreError) -> FetchError {
    tracing::error!(%operation, error = %source, "{}", operation.label());
    FetchError { operation, source }
}
