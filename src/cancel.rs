//! Cooperative cancellation shared by the runners.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Returns `true` once the optional cancellation flag has been raised.
pub(crate) fn is_cancelled(cancel: &Option<Arc<AtomicBool>>) -> bool {
    cancel
        .as_ref()
        .is_some_and(|flag| flag.load(Ordering::Relaxed))
}
