use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use super::Store;
use crate::errors::StampdError;

/// Redis-backed store.
///
/// `ConnectionManager` multiplexes one connection and reconnects on its own
/// when it drops, so there is no retry logic of ours anywhere. Dropping the
/// handle at shutdown releases the connection.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    pub async fn connect(url: &str) -> Result<Self, StampdError> {
        let client = redis::Client::open(url)?;
        let conn = client.get_connection_manager().await?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl Store for RedisStore {
    async fn incr(&self, key: &str) -> Result<i64, StampdError> {
        let mut conn = self.conn.clone();
        Ok(conn.incr(key, 1i64).await?)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StampdError> {
        let mut conn = self.conn.clone();
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StampdError> {
        let mut conn = self.conn.clone();
        Ok(conn.get(key).await?)
    }
}
