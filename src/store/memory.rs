//! In-process content store with the same query semantics as the remote one.
//!
//! Objects are kept as raw JSON with references stored as ids. Queries match on
//! `type`, `slug` and dotted `metadata.*` paths; a stored list matches when it
//! contains the filter value. Depth 1 swaps reference ids for the objects they
//! name, and an empty result is reported as a 404 just like the remote API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::{ContentStore, Query, StoreError};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    objects: Vec<Value>,
    failure: Option<u16>,
}

impl MemoryStore {
    /// Store over already-parsed objects, as they would appear in the API
    pub fn new(objects: Vec<Value>) -> Self {
        Self {
            objects,
            failure: None,
        }
    }

    /// Load objects from a JSON file holding an array of objects
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixtures {:?}", path))?;
        let objects: Vec<Value> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse fixtures {:?}", path))?;
        tracing::info!("Loaded {} objects from {:?}", objects.len(), path);
        Ok(Self::new(objects))
    }

    /// Make every request fail with the given status
    pub fn failing_with(mut self, status: u16) -> Self {
        self.failure = Some(status);
        self
    }

    fn evaluate(&self, query: &Query) -> Result<Vec<Value>, StoreError> {
        if let Some(status) = self.failure {
            return Err(StoreError::Status {
                status,
                message: "Injected failure".to_string(),
            });
        }

        let by_id: HashMap<&str, &Value> = self
            .objects
            .iter()
            .filter_map(|o| Some((o.get("id")?.as_str()?, o)))
            .collect();

        let results: Vec<Value> = self
            .objects
            .iter()
            .filter(|o| is_match(o, query))
            .map(|o| {
                let mut object = o.clone();
                if query.expansion_depth() > 0 {
                    expand_references(&mut object, &by_id);
                }
                match query.projection() {
                    Some(props) => project(object, props),
                    None => object,
                }
            })
            .collect();

        if results.is_empty() {
            return Err(StoreError::not_found());
        }
        Ok(results)
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn find(&self, query: &Query) -> Result<Vec<Value>, StoreError> {
        self.evaluate(query)
    }

    async fn find_one(&self, query: &Query) -> Result<Value, StoreError> {
        self.evaluate(query)?
            .into_iter()
            .next()
            .ok_or_else(StoreError::not_found)
    }
}

fn is_match(object: &Value, query: &Query) -> bool {
    if object.get("type").and_then(Value::as_str) != Some(query.kind().as_str()) {
        return false;
    }

    query
        .filters()
        .iter()
        .all(|(path, expected)| match lookup(object, path) {
            Some(Value::Array(items)) => items.iter().any(|item| same(item, expected)),
            Some(stored) => same(stored, expected),
            None => false,
        })
}

/// Resolve a dotted path such as `metadata.author`
fn lookup<'a>(object: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(object, |value, key| value.get(key))
}

/// Equal values, or a reference (id or expanded object) naming the same id
fn same(stored: &Value, expected: &Value) -> bool {
    if stored == expected {
        return true;
    }
    matches!((reference_id(stored), expected.as_str()), (Some(a), Some(b)) if a == b)
}

fn reference_id(value: &Value) -> Option<&str> {
    match value {
        Value::String(id) => Some(id),
        Value::Object(map) => map.get("id").and_then(Value::as_str),
        _ => None,
    }
}

/// Replace metadata ids that name stored objects with those objects
fn expand_references(object: &mut Value, by_id: &HashMap<&str, &Value>) {
    let Some(metadata) = object.get_mut("metadata").and_then(Value::as_object_mut) else {
        return;
    };

    for value in metadata.values_mut() {
        let resolved = match value {
            Value::String(id) => by_id.get(id.as_str()).map(|target| (*target).clone()),
            Value::Array(items) => {
                for item in items.iter_mut() {
                    let target = item
                        .as_str()
                        .and_then(|id| by_id.get(id))
                        .map(|target| (*target).clone());
                    if let Some(target) = target {
                        *item = target;
                    }
                }
                None
            }
            _ => None,
        };
        if let Some(target) = resolved {
            *value = target;
        }
    }
}

fn project(object: Value, props: &[String]) -> Value {
    match object {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(key, _)| props.iter().any(|p| p == key))
                .collect::<Map<String, Value>>(),
        ),
        other => other,
    }
}
