use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::error::Result;
use crate::models::ConversationTurn;

/// Capability interface over a TTL key-value store holding session
/// conversation logs.
///
/// Every `save` stores the full turn sequence with a fresh TTL; expiry is
/// sliding, not fixed. An expired key behaves exactly like an absent one.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Vec<ConversationTurn>>;
    async fn save(&self, key: &str, turns: Vec<ConversationTurn>, ttl: Duration) -> Result<()>;
    async fn clear(&self, key: &str) -> Result<()>;
}

struct Entry {
    turns: Vec<ConversationTurn>,
    expires_at: Instant,
}

/// In-process session store. Expired entries are invisible to readers
/// immediately and physically removed by the periodic sweep.
#[derive(Default)]
pub struct InMemorySessionStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every expired entry. Returns how many were removed.
    pub async fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, key: &str) -> Result<Vec<ConversationTurn>> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Ok(entry.turns.clone()),
            _ => Ok(Vec::new()),
        }
    }

    async fn save(&self, key: &str, turns: Vec<ConversationTurn>, ttl: Duration) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            Entry {
                turns,
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }
}
