/*!
 * Cooperative cancellation for batch runs.
 *
 * Batches issue one provider call at a time; a run checks its flag before
 * every item and stops issuing calls once the flag is raised. A call that is
 * already in flight is allowed to finish and is counted.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag that asks a running batch to stop
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every holder of this flag to stop
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Lower the flag so the next batch can run
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::SeqCst);
    }
}
