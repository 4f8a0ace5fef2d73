use platform_host::{KeyValueStore, KeyValueStoreFuture, MemoryKeyValueStore};

use crate::LocalStorageKeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Compile-time selected host strategy for `platform_host_web` adapters.
pub enum HostStrategy {
    /// Browser `localStorage` substrate.
    Browser,
    /// Process-local in-memory substrate, for native hosts and demos.
    Memory,
}

/// Returns the compile-time selected host strategy for the active build.
///
/// Browser storage is only chosen for `wasm32` builds without the `memory-host` feature.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(any(feature = "memory-host", not(target_arch = "wasm32")))]
    {
        HostStrategy::Memory
    }

    #[cfg(all(not(feature = "memory-host"), target_arch = "wasm32"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    match selected_host_strategy() {
        HostStrategy::Browser => "browser",
        HostStrategy::Memory => "memory",
    }
}

/// Adapter enum that erases the concrete substrate behind [`KeyValueStore`].
#[derive(Debug, Clone)]
pub enum KeyValueStoreAdapter {
    /// Browser-backed `localStorage` persistence.
    Browser(LocalStorageKeyValueStore),
    /// In-memory persistence that lives as long as the process.
    Memory(MemoryKeyValueStore),
}

impl KeyValueStore for KeyValueStoreAdapter {
    fn get<'a>(&'a self, key: &'a str) -> KeyValueStoreFuture<'a, Result<Option<String>, String>> {
        match self {
            Self::Browser(store) => store.get(key),
            Self::Memory(store) => store.get(key),
        }
    }

    fn set<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> KeyValueStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.set(key, value),
            Self::Memory(store) => store.set(key, value),
        }
    }

    fn remove<'a>(&'a self, key: &'a str) -> KeyValueStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.remove(key),
            Self::Memory(store) => store.remove(key),
        }
    }

    fn keys<'a>(&'a self) -> KeyValueStoreFuture<'a, Result<Vec<String>, String>> {
        match self {
            Self::Browser(store) => store.keys(),
            Self::Memory(store) => store.keys(),
        }
    }
}

/// Builds the substrate for the selected host strategy.
pub fn key_value_store() -> KeyValueStoreAdapter {
    log::debug!("building key-value substrate for {} host", host_strategy_name());
    match selected_host_strategy() {
        HostStrategy::Browser => KeyValueStoreAdapter::Browser(LocalStorageKeyValueStore),
        HostStrategy::Memory => KeyValueStoreAdapter::Memory(MemoryKeyValueStore::new()),
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn strategy_name_matches_selected_strategy() {
        let expected = match selected_host_strategy() {
            HostStrategy::Browser => "browser",
            HostStrategy::Memory => "memory",
        };
        assert_eq!(host_strategy_name(), expected);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_builds_get_a_retaining_store() {
        assert_eq!(selected_host_strategy(), HostStrategy::Memory);

        let store = key_value_store();
        block_on(store.set("fs:/a.txt", "A")).expect("set");
        assert_eq!(
            block_on(store.get("fs:/a.txt")).expect("get"),
            Some("A".to_string())
        );
    }

    #[test]
    fn memory_adapter_delegates_to_inner_store() {
        let inner = MemoryKeyValueStore::new();
        let adapter = KeyValueStoreAdapter::Memory(inner.clone());

        block_on(adapter.set("k", "v")).expect("set");
        assert_eq!(block_on(inner.get("k")).expect("get"), Some("v".to_string()));
        assert_eq!(block_on(adapter.keys()).expect("keys"), vec!["k".to_string()]);
    }
}
