//! Session middleware configuration and session-backed cart storage.
//!
//! Each browser gets a cookie session (in-memory store). The session plays
//! the part of the browser's local storage: the cart is kept in it as a JSON
//! string under [`CART_STORAGE_KEY`](directone_core::CART_STORAGE_KEY).

use axum::{extract::FromRequestParts, http::request::Parts};
use directone_core::{CartManager, CartStorage, StorageError};
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::config::StorefrontConfig;
use crate::error::AppError;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "directone_session";

/// Session expiry time in seconds (30 days).
const SESSION_EXPIRY_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// [`CartStorage`] over the visitor's session.
#[derive(Debug, Clone)]
pub struct SessionStorage(Session);

impl SessionStorage {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self(session)
    }
}

impl CartStorage for SessionStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.0
            .get::<String>(key)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.0
            .insert(key, value)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))
    }
}

/// Extractor for the visitor's cart, restored from their session.
///
/// # Example
///
/// ```rust,ignore
/// async fn badge(SessionCart(cart): SessionCart) -> String {
///     cart.total_items().to_string()
/// }
/// ```
pub struct SessionCart(pub CartManager<SessionStorage>);

impl<S> FromRequestParts<S> for SessionCart
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer not installed".to_string()))?;

        let cart = CartManager::restore(SessionStorage::new(session)).await;
        Ok(Self(cart))
    }
}
