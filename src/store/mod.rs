pub mod memory;
pub mod redis;

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::StampdError;

/// The key-value store boundary.
///
/// The store is the only durable state holder in the system and the only
/// cross-request coordination point: `incr` must be atomic across all
/// concurrent callers (no two calls may observe the same value).
///
/// `get` hands back raw bytes; decoding to text happens at the call site
/// with an explicit failure mode rather than being assumed to succeed.
#[async_trait]
pub trait Store: Send + Sync {
    /// Atomically increment the integer under `key` and return the new
    /// value. A missing key counts as 0.
    async fn incr(&self, key: &str) -> Result<i64, StampdError>;

    /// Set `key` to `value`, overwriting any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StampdError>;

    /// Fetch the raw bytes under `key`, or `None` if the key is absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StampdError>;
}

/// Shared handle constructed once at startup and injected into every
/// request handler.
pub type SharedStore = Arc<dyn Store>;

/// Open a store from its URL. `memory://` selects the in-process store;
/// anything else is handed to the redis client.
pub async fn connect(url: &str) -> Result<SharedStore, StampdError> {
    if url.starts_with("memory:") {
        tracing::warn!("using in-process memory store; state will not survive a restart");
        Ok(Arc::new(memory::MemoryStore::new()))
    } else {
        Ok(Arc::new(redis::RedisStore::connect(url).await?))
    }
}
