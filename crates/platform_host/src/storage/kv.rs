//! Raw key-value substrate contracts and adapters.
//!
//! The substrate is the host persistence mechanism (browser `localStorage`, an in-memory map in
//! tests). It stores opaque text values under string keys and makes no durability or capacity
//! promises of its own.

use std::{cell::RefCell, collections::BTreeMap, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`KeyValueStore`] async methods.
pub type KeyValueStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for raw text values addressed by string keys.
///
/// Implementations complete each call as one atomic single-key operation; no partially written
/// value is ever observable.
pub trait KeyValueStore {
    /// Loads the value stored under `key`.
    fn get<'a>(&'a self, key: &'a str) -> KeyValueStoreFuture<'a, Result<Option<String>, String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> KeyValueStoreFuture<'a, Result<(), String>>;

    /// Removes `key` if present.
    fn remove<'a>(&'a self, key: &'a str) -> KeyValueStoreFuture<'a, Result<(), String>>;

    /// Enumerates every key currently present, in substrate-native order.
    fn keys<'a>(&'a self) -> KeyValueStoreFuture<'a, Result<Vec<String>, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op substrate for unsupported targets and baseline tests.
pub struct NoopKeyValueStore;

impl KeyValueStore for NoopKeyValueStore {
    fn get<'a>(
        &'a self,
        _key: &'a str,
    ) -> KeyValueStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn set<'a>(
        &'a self,
        _key: &'a str,
        _value: &'a str,
    ) -> KeyValueStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn remove<'a>(&'a self, _key: &'a str) -> KeyValueStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn keys<'a>(&'a self) -> KeyValueStoreFuture<'a, Result<Vec<String>, String>> {
        Box::pin(async { Ok(Vec::new()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory substrate. Clones share the same map.
pub struct MemoryKeyValueStore {
    inner: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryKeyValueStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of keys currently stored.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns `true` when no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get<'a>(&'a self, key: &'a str) -> KeyValueStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.inner.borrow().get(key).cloned()) })
    }

    fn set<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> KeyValueStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        })
    }

    fn remove<'a>(&'a self, key: &'a str) -> KeyValueStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().remove(key);
            Ok(())
        })
    }

    fn keys<'a>(&'a self) -> KeyValueStoreFuture<'a, Result<Vec<String>, String>> {
        Box::pin(async move { Ok(self.inner.borrow().keys().cloned().collect()) })
    }
}

/// Loads and deserializes a JSON value stored under `key`.
///
/// # Errors
///
/// Returns an error when the substrate read fails or the stored JSON does not match `T`.
pub async fn load_json_with<S, T>(store: &S, key: &str) -> Result<Option<T>, String>
where
    S: KeyValueStore + ?Sized,
    T: serde::de::DeserializeOwned,
{
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| e.to_string())
}

/// Serializes `value` as JSON and stores it under `key`.
///
/// # Errors
///
/// Returns an error when serialization or the substrate write fails.
pub async fn save_json_with<S, T>(store: &S, key: &str, value: &T) -> Result<(), String>
where
    S: KeyValueStore + ?Sized,
    T: serde::Serialize,
{
    let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;
    store.set(key, &raw).await
}
