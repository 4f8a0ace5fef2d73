//! Virtual filesystem: path helpers, entry types, and the key-value backed file store.

pub mod path;
pub mod store;
pub mod types;
