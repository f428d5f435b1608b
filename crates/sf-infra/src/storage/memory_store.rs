use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use sf_core::ports::KeyValueStorePort;

/// Process-local key/value store. Nothing survives a restart.
#[derive(Default)]
pub struct InMemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorePort for InMemoryKeyValueStore {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_read_delete() {
        let store = InMemoryKeyValueStore::new();
        assert_eq!(store.read("k").unwrap(), None);

        store.write("k", "v1").unwrap();
        store.write("k", "v2").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("v2"));

        store.delete("k").unwrap();
        store.delete("k").unwrap();
        assert_eq!(store.read("k").unwrap(), None);
    }
}
