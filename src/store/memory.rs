use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::Store;
use crate::errors::StampdError;

/// In-process store used by the test suite and selectable with
/// `store_url = "memory://"` for local runs without a redis.
///
/// Values are raw bytes to match what a real store hands back on the wire.
/// Atomicity of `incr` comes from holding the write lock for the whole
/// read-modify-write; the lock is never held across an await point.
pub struct MemoryStore {
    map: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            map: RwLock::new(HashMap::new()),
        }
    }

    /// Plant arbitrary bytes under a key, bypassing `set`.
    #[cfg(test)]
    pub fn insert_raw(&self, key: &str, value: Vec<u8>) {
        self.map.write().unwrap().insert(key.to_string(), value);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn incr(&self, key: &str) -> Result<i64, StampdError> {
        let mut map = self.map.write().unwrap();

        // A missing key counts as 0; a non-integer value is an error,
        // matching what redis INCR does.
        let current = match map.get(key) {
            Some(bytes) => String::from_utf8(bytes.clone())?.parse::<i64>()?,
            None => 0,
        };

        let next = current + 1;
        map.insert(key.to_string(), next.to_string().into_bytes());
        Ok(next)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StampdError> {
        let mut map = self.map.write().unwrap();
        map.insert(key.to_string(), value.as_bytes().to_vec());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StampdError> {
        let map = self.map.read().unwrap();
        Ok(map.get(key).cloned())
    }
}
