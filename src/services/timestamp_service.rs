use chrono::Local;

use crate::errors::StampdError;
use crate::store::Store;

/// Counter key: one shared integer, incremented once per create.
pub const COUNTER_KEY: &str = "TIMESTAMP_ID";

/// Record keys are the counter key space plus the decimal id.
pub fn record_key(id: &str) -> String {
    format!("TIMESTAMP_{id}")
}

/// Current local time in a fixed, sortable format with microsecond
/// precision and no timezone offset, e.g. `2024-01-01T00:00:00.000000`.
fn now_string() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// Create a record: stamp the clock, claim the next id from the store's
/// atomic counter, persist the timestamp under that id.
///
/// The increment and the write are two separate store operations. A failure
/// between them leaves the id issued with no record behind it, which later
/// reads observe as a plain miss. Accepted; there is no compensation.
pub async fn create(store: &dyn Store) -> Result<(i64, String), StampdError> {
    let timestamp = now_string();
    let id = store.incr(COUNTER_KEY).await?;
    store.set(&record_key(&id.to_string()), &timestamp).await?;
    Ok((id, timestamp))
}

/// Look up the timestamp stored under `id`.
///
/// An unknown id is `None`, never an error — the store does not let us tell
/// "never created" apart from "evicted", so neither do we.
pub async fn fetch(store: &dyn Store, id: &str) -> Result<Option<String>, StampdError> {
    match store.get(&record_key(id)).await? {
        Some(bytes) => Ok(Some(String::from_utf8(bytes)?)),
        None => Ok(None),
    }
}

/// Current counter value, i.e. the number of creates so far. A counter that
/// was never incremented reads as 0.
pub async fn counter(store: &dyn Store) -> Result<i64, StampdError> {
    match store.get(COUNTER_KEY).await? {
        Some(bytes) => Ok(String::from_utf8(bytes)?.parse()?),
        None => Ok(0),
    }
}
