#![forbid(unsafe_code)]

pub mod local_store;
pub mod repository;
pub mod sqlite;

pub use local_store::{LocalStore, RECORD_VERSION, StoreKey};
pub use repository::{InMemoryRepository, KvStore, Storage, StorageError};
