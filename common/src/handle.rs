//! Single-owner handle for a remote service client.
//!
//! Adapters share one client across every call they hand out. The handle
//! gives each call its own [`Arc`] so a call already in flight keeps working
//! while the adapter is torn down, and makes release idempotent: only the
//! first [`ClientHandle::take`] observes the client.

use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

pub struct ClientHandle<C: ?Sized> {
    name: &'static str,
    inner: Mutex<Option<Arc<C>>>,
}

impl<C: ?Sized> ClientHandle<C> {
    /// Wrap `client`. `name` is only used for logging.
    pub fn new(name: &'static str, client: Arc<C>) -> Self {
        Self {
            name,
            inner: Mutex::new(Some(client)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Arc<C>>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Borrow the client for one call, or `None` once released.
    pub fn get(&self) -> Option<Arc<C>> {
        self.lock().clone()
    }

    /// Release the client. Returns it on the first call and `None` after.
    pub fn take(&self) -> Option<Arc<C>> {
        let client = self.lock().take();
        if client.is_some() {
            debug!(name = self.name, "releasing client");
        }
        client
    }

    pub fn is_closed(&self) -> bool {
        self.lock().is_none()
    }
}
