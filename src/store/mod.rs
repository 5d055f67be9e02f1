//! Content store client: the query model, the error type and the
//! [`ContentStore`] trait implemented over HTTP and in memory

mod http;
mod memory;

pub use http::HttpStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::content::Kind;

/// Errors reported by a content store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("content store returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("content store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed content store response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl StoreError {
    /// Status code reported by the store, when there was a response at all
    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::Status { status, .. } => Some(*status),
            StoreError::Transport(e) => e.status().map(|s| s.as_u16()),
            StoreError::Decode(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub(crate) fn not_found() -> Self {
        StoreError::Status {
            status: 404,
            message: "No objects found".to_string(),
        }
    }
}

/// A read query against one kind of object
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    kind: Kind,
    filters: Map<String, Value>,
    props: Option<Vec<String>>,
    depth: Option<u8>,
}

impl Query {
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            filters: Map::new(),
            props: None,
            depth: None,
        }
    }

    /// Add an equality (or list membership) predicate, e.g. `metadata.featured`
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Restrict the returned top-level fields
    pub fn props(mut self, props: &[&str]) -> Self {
        self.props = Some(props.iter().map(|p| p.to_string()).collect());
        self
    }

    /// Reference expansion depth (0 returns bare ids)
    pub fn depth(mut self, depth: u8) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Object type being queried
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Field filters, keyed by dotted path such as `metadata.author`
    pub fn filters(&self) -> &Map<String, Value> {
        &self.filters
    }

    pub fn projection(&self) -> Option<&[String]> {
        self.props.as_deref()
    }

    /// How many levels of object references the store should resolve
    pub fn expansion_depth(&self) -> u8 {
        self.depth.unwrap_or(0)
    }

    /// The query document sent to the store: `{"type": ..., ...filters}`
    pub fn to_json(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("type".to_string(), Value::from(self.kind.as_str()));
        for (key, value) in &self.filters {
            doc.insert(key.clone(), value.clone());
        }
        Value::Object(doc)
    }
}

/// Read-only access to a remote content store
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// All objects matching the query; an empty match is reported as 404
    async fn find(&self, query: &Query) -> Result<Vec<Value>, StoreError>;

    /// The first object matching the query, or a 404
    async fn find_one(&self, query: &Query) -> Result<Value, StoreError>;
}
