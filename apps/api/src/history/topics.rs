//! Topic history: most-recent-first list of generated topics.
//!
//! Appending a topic that is already listed leaves the list untouched: it is neither
//! duplicated nor moved to the front.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::history::store::{KeyValueStore, StoreError};

/// Storage key for the serialized topic list.
pub const HISTORY_KEY: &str = "report-history";

/// Clones share the store and the write lock.
#[derive(Clone)]
pub struct TopicHistory {
    store: Arc<dyn KeyValueStore>,
    /// Held across read-modify-write so concurrent appends cannot drop each other's topics.
    write_lock: Arc<Mutex<()>>,
}

impl TopicHistory {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn list(&self) -> Result<Vec<String>, StoreError> {
        match self.store.get(HISTORY_KEY).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Prepends `topic` unless an identical entry already exists.
    /// Returns the list after the call.
    pub async fn append(&self, topic: &str) -> Result<Vec<String>, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut topics = self.list().await?;
        if topics.iter().any(|t| t == topic) {
            return Ok(topics);
        }
        topics.insert(0, topic.to_string());
        self.store
            .set(HISTORY_KEY, &serde_json::to_string(&topics)?)
            .await?;
        info!("History now holds {} topic(s)", topics.len());
        Ok(topics)
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.store.clear(HISTORY_KEY).await?;
        info!("History cleared");
        Ok(())
    }
}
