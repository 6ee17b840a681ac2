//! Filesystem-backed implementations of the domains ports: a flat-file
//! JSON message store and a local-directory image store.

mod json_store;
mod media_local;

pub use json_store::JsonMessageStore;
pub use media_local::LocalMediaStore;
