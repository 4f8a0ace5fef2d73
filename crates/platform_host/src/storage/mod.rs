//! Host persistence contracts.

pub mod kv;
