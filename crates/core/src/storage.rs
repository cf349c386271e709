//! Per-browser key/value storage for the cart.
//!
//! The cart is persisted as a JSON string under [`CART_STORAGE_KEY`]. Any
//! string key/value store can back it; the storefront uses the visitor's
//! session, tests use [`MemoryStorage`].

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use thiserror::Error;

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "directone-cart";

/// Errors reading or writing cart storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The cart could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backing store failed.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// A string key/value store scoped to a single visitor.
pub trait CartStorage {
    /// Read the value stored under `key`, if any.
    fn get_item(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(
        &self,
        key: &str,
        value: String,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// In-process storage backed by a shared map.
///
/// Clones share the same map, so a clone handed to a [`crate::CartManager`]
/// can be inspected afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.items
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))
    }
}

impl CartStorage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.lock()?.insert(key.to_owned(), value);
        Ok(())
    }
}
