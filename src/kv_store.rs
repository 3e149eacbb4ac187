use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared in-memory store the demo server keeps rendered pages in.
/// Clones share the same map.
#[derive(Clone, Default)]
pub struct KVStore {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl KVStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set(&self, key: &str, value: String) {
        let mut store = self.inner.lock().await;
        store.insert(key.to_string(), value);
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        let store = self.inner.lock().await;
        store.get(key).cloned()
    }

    pub async fn remove(&self, key: &str) -> Option<String> {
        let mut store = self.inner.lock().await;
        store.remove(key)
    }

    pub async fn len(&self) -> usize {
        let store = self.inner.lock().await;
        store.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
