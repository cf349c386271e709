//! Per-session request serialization.
//!
//! Cart handlers read the whole cart from the session, change it, and write
//! it back; the session layer then saves the record to the store after the
//! handler returns. Two tabs posting at once could otherwise both read the
//! old cart and the later save would drop the earlier change. This layer sits
//! outside the session layer and lets one request per session cookie through
//! at a time, from first read to final save.
//!
//! Requests without a session cookie are not serialized: they start a new
//! session each.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::COOKIE},
    middleware::Next,
    response::Response,
};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use super::session::SESSION_COOKIE_NAME;

/// Registry of per-session locks, keyed by session cookie value.
///
/// Entries are weak; a lock nobody holds or waits on is pruned on the next
/// acquire.
#[derive(Clone, Default)]
pub struct SessionLocks {
    inner: Arc<Mutex<HashMap<String, Weak<AsyncMutex<()>>>>>,
}

impl SessionLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to the session identified by `key`.
    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            locks.retain(|_, lock| lock.strong_count() > 0);

            if let Some(lock) = locks.get(key).and_then(Weak::upgrade) {
                lock
            } else {
                let lock = Arc::new(AsyncMutex::new(()));
                locks.insert(key.to_owned(), Arc::downgrade(&lock));
                lock
            }
        };

        lock.lock_owned().await
    }

    /// Number of sessions with a live lock.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|lock| lock.strong_count() > 0)
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Session cookie value from the request's `Cookie` headers.
fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE_NAME && !value.is_empty())
        .map(|(_, value)| value)
}

/// Run the rest of the stack while holding the request's session lock.
pub async fn session_lock_middleware(
    State(locks): State<SessionLocks>,
    request: Request,
    next: Next,
) -> Response {
    let Some(key) = session_cookie(request.headers()).map(str::to_owned) else {
        return next.run(request).await;
    };

    let _guard = locks.acquire(&key).await;
    next.run(request).await
}
