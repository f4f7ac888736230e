//! Pieces shared by the remote service adapters.

use std::sync::atomic::{AtomicU64, Ordering};

pub mod handle;

pub use handle::ClientHandle;

static NEXT_CLIENT: AtomicU64 = AtomicU64::new(1);

/// Identity announced to a remote service, unique per adapter instance.
pub fn client_id() -> String {
    format!("voice-agent-{}", NEXT_CLIENT.fetch_add(1, Ordering::Relaxed))
}
