//! Typed host-domain contracts and shared models used across the runtime and host adapters.
//!
//! This crate is the API-first boundary for persistence. It exposes the raw key-value substrate
//! contract with in-memory/no-op adapters, virtual path helpers, and the [`VirtualFileStore`]
//! built on top of the substrate. Browser adapters live in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod fs;
pub mod storage;

pub use fs::path::{
    directory_prefix, join_virtual_path, normalize_virtual_path, parent_virtual_path,
};
pub use fs::store::{FsError, VirtualFileStore};
pub use fs::types::{
    FileEntry, FileEntryKind, ListingMode, SeedFile, DEFAULT_SEED_FILES, FS_INITIALIZED_KEY,
    FS_KEY_PREFIX,
};
pub use storage::kv::{
    load_json_with, save_json_with, KeyValueStore, KeyValueStoreFuture, MemoryKeyValueStore,
    NoopKeyValueStore,
};
