//! Typed mirror of one value into a [`KeyValueStore`].
//!
//! Reads fall back to the initial value and writes keep the in-memory value
//! when the store fails; both failures are logged, never surfaced. The strict
//! `try_*` variants expose the underlying `Result`s.

use super::KeyValueStore;
use crate::core::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct PersistedState<T> {
    store: Arc<dyn KeyValueStore>,
    key: String,
    value: T,
}

impl<T> PersistedState<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Load the value stored under `key`, or `initial` if it is absent or unreadable.
    pub fn open(store: Arc<dyn KeyValueStore>, key: &str, initial: T) -> Self {
        let value = match Self::try_load(store.as_ref(), key) {
            Ok(Some(value)) => value,
            Ok(None) => initial,
            Err(err) => {
                warn!(key, error = %err, "failed to read persisted state, using initial value");
                initial
            }
        };

        Self {
            store,
            key: key.to_string(),
            value,
        }
    }

    /// Read and decode the value under `key` without any fallback.
    pub fn try_load(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
        match store.get_item(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value and write it through. A failed write is logged and
    /// the new in-memory value is kept.
    pub fn set(&mut self, value: T) {
        if let Err(err) = self.try_set(value) {
            warn!(key = %self.key, error = %err, "failed to write persisted state");
        }
    }

    /// Like [`PersistedState::set`], but reports the write failure. The new
    /// value is kept in memory either way.
    pub fn try_set(&mut self, value: T) -> Result<()> {
        self.value = value;
        self.try_commit()
    }

    /// Replace the value with one derived from the current value.
    pub fn update<F>(&mut self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let next = f(&self.value);
        self.set(next);
    }

    /// Write the current value to the store.
    ///
    /// An empty sequence is not written: the key is removed instead.
    pub fn try_commit(&self) -> Result<()> {
        let encoded = serde_json::to_value(&self.value)?;
        if is_empty_sequence(&encoded) {
            debug!(key = %self.key, "empty sequence, removing key");
            return self.store.remove_item(&self.key);
        }
        self.store
            .set_item(&self.key, &serde_json::to_string(&encoded)?)
    }
}

fn is_empty_sequence(value: &JsonValue) -> bool {
    matches!(value, JsonValue::Array(items) if items.is_empty())
}
