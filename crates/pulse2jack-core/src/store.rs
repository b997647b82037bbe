//! Settings storage abstraction.

use std::collections::HashMap;

use crate::error::Result;

/// Settings key holding the encoded bridge list.
pub const SETTINGS_KEY: &str = "Pulse2JACK/PABridges";

/// A persistent key/value store whose values are string lists.
pub trait SettingsStore {
    /// Check whether a value exists for `key`.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be read.
    fn contains(&self, key: &str) -> Result<bool>;

    /// Read the value stored under `key`.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be read.
    fn value(&self, key: &str) -> Result<Option<Vec<String>>>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be written.
    fn set_value(&mut self, key: &str, value: &[String]) -> Result<()>;
}

/// In-memory settings store, used as a test double and for dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, Vec<String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with a single value already present.
    #[must_use]
    pub fn with_value(key: &str, value: Vec<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(key.to_string(), value);
        Self { values }
    }
}

impl SettingsStore for MemoryStore {
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.values.contains_key(key))
    }

    fn value(&self, key: &str) -> Result<Option<Vec<String>>> {
        Ok(self.values.get(key).cloned())
    }

    fn set_value(&mut self, key: &str, value: &[String]) -> Result<()> {
        self.values.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
