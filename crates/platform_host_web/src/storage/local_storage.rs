//! `localStorage`-backed key-value substrate.
//!
//! The browser API is synchronous; the [`KeyValueStore`] futures resolve immediately. Outside
//! `wasm32` there is no `localStorage` and every call fails with [`LOCAL_STORAGE_UNAVAILABLE`].

use platform_host::{KeyValueStore, KeyValueStoreFuture};

#[derive(Debug, Clone, Copy, Default)]
/// Browser substrate backed by `window.localStorage`.
pub struct LocalStorageKeyValueStore;

/// Error text returned when no browser `localStorage` is reachable.
pub const LOCAL_STORAGE_UNAVAILABLE: &str = "localStorage unavailable";

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, String> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| LOCAL_STORAGE_UNAVAILABLE.to_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn local_storage() -> Result<web_sys::Storage, String> {
    Err(LOCAL_STORAGE_UNAVAILABLE.to_string())
}

impl LocalStorageKeyValueStore {
    /// Reads a raw value.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the read fails.
    pub fn get_raw(self, key: &str) -> Result<Option<String>, String> {
        local_storage()?
            .get_item(key)
            .map_err(|e| format!("localStorage get_item failed: {e:?}"))
    }

    /// Writes a raw value.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the write fails (for example when the
    /// origin quota is exhausted).
    pub fn set_raw(self, key: &str, value: &str) -> Result<(), String> {
        local_storage()?
            .set_item(key, value)
            .map_err(|e| format!("localStorage set_item failed: {e:?}"))
    }

    /// Removes a key.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the delete fails.
    pub fn remove_raw(self, key: &str) -> Result<(), String> {
        local_storage()?
            .remove_item(key)
            .map_err(|e| format!("localStorage remove_item failed: {e:?}"))
    }

    /// Enumerates every key in index order.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or enumeration fails.
    pub fn keys_raw(self) -> Result<Vec<String>, String> {
        let storage = local_storage()?;
        let len = storage
            .length()
            .map_err(|e| format!("localStorage length failed: {e:?}"))?;
        let mut keys = Vec::with_capacity(len as usize);
        for index in 0..len {
            match storage.key(index) {
                Ok(Some(key)) => keys.push(key),
                Ok(None) => {}
                Err(e) => return Err(format!("localStorage key({index}) failed: {e:?}")),
            }
        }
        Ok(keys)
    }
}

impl KeyValueStore for LocalStorageKeyValueStore {
    fn get<'a>(&'a self, key: &'a str) -> KeyValueStoreFuture<'a, Result<Option<String>, String>> {
        let store = *self;
        Box::pin(async move { store.get_raw(key) })
    }

    fn set<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> KeyValueStoreFuture<'a, Result<(), String>> {
        let store = *self;
        Box::pin(async move { store.set_raw(key, value) })
    }

    fn remove<'a>(&'a self, key: &'a str) -> KeyValueStoreFuture<'a, Result<(), String>> {
        let store = *self;
        Box::pin(async move { store.remove_raw(key) })
    }

    fn keys<'a>(&'a self) -> KeyValueStoreFuture<'a, Result<Vec<String>, String>> {
        let store = *self;
        Box::pin(async move { store.keys_raw() })
    }
}
