//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate is the concrete host wiring layer for the key-value substrate. Native builds and the
//! `memory-host` feature use a process-local map instead of `localStorage`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod storage;

pub use adapters::{
    host_strategy_name, key_value_store, selected_host_strategy, HostStrategy,
    KeyValueStoreAdapter,
};
pub use storage::local_storage::{LocalStorageKeyValueStore, LOCAL_STORAGE_UNAVAILABLE};
