//! The single active location query and its change notifications.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info};

use crate::error::QueryError;

pub const DEFAULT_QUERY: &str = "Lagos";

/// An accepted query value tagged with the generation it was written at.
///
/// Generations only grow, so two writes of the same city at different times
/// are still distinguishable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    value: String,
    generation: u64,
}

impl Query {
    pub fn initial(value: impl Into<String>) -> Self {
        Self { value: value.into(), generation: 0 }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn next(&self, value: String) -> Self {
        Self { value, generation: self.generation + 1 }
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.value, self.generation)
    }
}

/// Receives every accepted query change, synchronously, on the writer's thread.
pub trait QueryListener: Send + Sync {
    fn query_changed(self: Arc<Self>, query: &Query);
}

pub struct QueryStore {
    current: Mutex<Query>,
    listeners: RwLock<Vec<Arc<dyn QueryListener>>>,
}

impl QueryStore {
    pub fn new(initial: impl Into<String>) -> Result<Self, QueryError> {
        let value = normalize(&initial.into())?;
        Ok(Self {
            current: Mutex::new(Query::initial(value)),
            listeners: RwLock::new(Vec::new()),
        })
    }

    pub fn current(&self) -> Query {
        self.current.lock().clone()
    }

    /// Register a listener. It is called once right away with the current
    /// query, then after every accepted write. Subscribing the same listener
    /// again does nothing.
    pub fn subscribe(&self, listener: Arc<dyn QueryListener>) {
        let query = self.current();
        {
            let mut listeners = self.listeners.write();
            if listeners.iter().any(|l| Arc::ptr_eq(l, &listener)) {
                debug!("listener already subscribed");
                return;
            }
            listeners.push(Arc::clone(&listener));
        }
        listener.query_changed(&query);
    }

    /// Replace the active query.
    ///
    /// Returns `Ok(false)` when the trimmed value equals the current one; no
    /// listener is notified in that case.
    pub fn set_query(&self, value: &str) -> Result<bool, QueryError> {
        let value = normalize(value)?;

        let query = {
            let mut current = self.current.lock();
            if current.value == value {
                debug!(query = %current, "query unchanged, skipping refetch");
                return Ok(false);
            }
            *current = current.next(value);
            current.clone()
        };

        info!(query = %query, "query changed");
        let listeners = self.listeners.read().clone();
        for listener in listeners {
            listener.query_changed(&query);
        }

        Ok(true)
    }
}

impl Default for QueryStore {
    fn default() -> Self {
        Self {
            current: Mutex::new(Query::initial(DEFAULT_QUERY)),
            listeners: RwLock::new(Vec::new()),
        }
    }
}

impl std::fmt::Debug for QueryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryStore")
            .field("current", &*self.current.lock())
            .field("listeners", &self.listeners.read().len())
            .finish()
    }
}

fn normalize(value: &str) -> Result<String, QueryError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(QueryError::Empty);
    }
    Ok(trimmed.to_string())
}
