use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

use crate::error::{PatternError, Result};

/// Cancellation handle threaded through a scan.
///
/// Clones share the same flag, so the caller keeps one clone to cancel
/// while the scan checks another at each container and fetch boundary.
#[derive(Debug, Clone, Default)]
pub struct ScanContext {
    cancelled: Arc<AtomicBool>,
}

impl ScanContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Work already in flight finishes; nothing new starts.
    pub fn cancel(&self) {
        info!("Scan cancellation requested");
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Return `Err(Cancelled)` once cancellation has been requested.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(PatternError::Cancelled)
        } else {
            Ok(())
        }
    }
}
