//! Cooperative cancellation for long decompositions.
//!
//! The tokenizer checks the flag at every sentence, clause and word
//! boundary. Entries inserted before the check stay in the store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{DictError, DictResult};

/// Shared cancel switch. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// `Err(Cancelled)` once cancellation was requested.
    pub fn check(&self) -> DictResult<()> {
        if self.is_cancelled() {
            Err(DictError::Cancelled)
        } else {
            Ok(())
        }
    }
}
