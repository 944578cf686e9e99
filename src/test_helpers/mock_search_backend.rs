//! # Mock Search Backend
//!
//! In-memory [`DocumentSearchBackend`] that records every call and can be scripted to
//! fail, for exercising the resilience layer without a running search cluster.

use crate::search::{BackendError, BulkAction, DocumentSearchBackend};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};

#[derive(Debug, Default)]
struct MockState {
    documents: HashMap<(String, String), Value>,
    search_results: HashMap<String, Vec<Value>>,
    search_bodies: Vec<(String, Value)>,
    scripted_failures: VecDeque<BackendError>,
    calls: Vec<String>,
    closed: bool,
}

#[derive(Debug, Default)]
pub struct MockSearchBackend {
    state: Mutex<MockState>,
}

impl MockSearchBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_document(&self, collection: &str, id: &str, document: Value) {
        self.state
            .lock()
            .documents
            .insert((collection.to_string(), id.to_string()), document);
    }

    /// Hits returned by every `search` against `collection`, in order
    pub fn set_search_results(&self, collection: &str, hits: Vec<Value>) {
        self.state
            .lock()
            .search_results
            .insert(collection.to_string(), hits);
    }

    /// Make the next `count` calls of any kind fail with `error`
    pub fn fail_next(&self, count: usize, error: BackendError) {
        let mut state = self.state.lock();
        for _ in 0..count {
            state.scripted_failures.push_back(error.clone());
        }
    }

    pub fn clear_failures(&self) {
        self.state.lock().scripted_failures.clear();
    }

    /// Number of calls made to `operation` (`index`, `get`, `search`, `delete`, `bulk`)
    pub fn call_count(&self, operation: &str) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|call| call.as_str() == operation)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.state.lock().calls.len()
    }

    pub fn last_search_body(&self, collection: &str) -> Option<Value> {
        self.state
            .lock()
            .search_bodies
            .iter()
            .rev()
            .find(|(name, _)| name == collection)
            .map(|(_, body)| body.clone())
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    fn begin(
        &self,
        operation: &str,
    ) -> Result<parking_lot::MutexGuard<'_, MockState>, BackendError> {
        let mut state = self.state.lock();
        state.calls.push(operation.to_string());
        match state.scripted_failures.pop_front() {
            Some(err) => Err(err),
            None => Ok(state),
        }
    }
}

#[async_trait]
impl DocumentSearchBackend for MockSearchBackend {
    async fn index(
        &self,
        collection: &str,
        id: Option<&str>,
        document: Value,
    ) -> Result<Value, BackendError> {
        let mut state = self.begin("index")?;
        let id = id.map_or_else(|| uuid::Uuid::new_v4().to_string(), str::to_string);
        state
            .documents
            .insert((collection.to_string(), id.clone()), document);
        Ok(json!({"_index": collection, "_id": id, "result": "created"}))
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Value, BackendError> {
        let state = self.begin("get")?;
        state
            .documents
            .get(&(collection.to_string(), id.to_string()))
            .cloned()
            .ok_or_else(|| BackendError::not_found(collection, id))
    }

    async fn search(&self, collection: &str, body: &Value) -> Result<Vec<Value>, BackendError> {
        let mut state = self.begin("search")?;
        state
            .search_bodies
            .push((collection.to_string(), body.clone()));
        Ok(state
            .search_results
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<Value, BackendError> {
        let mut state = self.begin("delete")?;
        state
            .documents
            .remove(&(collection.to_string(), id.to_string()))
            .map(|_| json!({"_index": collection, "_id": id, "result": "deleted"}))
            .ok_or_else(|| BackendError::not_found(collection, id))
    }

    async fn bulk(&self, actions: Vec<BulkAction>) -> Result<Value, BackendError> {
        let mut state = self.begin("bulk")?;
        let count = actions.len();
        for action in actions {
            let id = action
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            state.documents.insert((action.index, id), action.document);
        }
        Ok(json!({"errors": false, "items": count}))
    }

    async fn close(&self) -> Result<(), BackendError> {
        self.state.lock().closed = true;
        Ok(())
    }
}
