use std::fmt;
use std::sync::Arc;

/// Global pointer capture held while a drag is in progress.
///
/// A UI host implements this to route pointer moves and releases to the session even when the
/// pointer leaves the crop element (document-level listeners, `setPointerCapture`, a grab on a
/// windowing system, ...). Calls are always paired: every `acquire` is followed by exactly one
/// `release`.
pub trait PointerCapture: Send + Sync {
    /// Start routing global pointer events to the session.
    fn acquire(&self);
    /// Stop routing global pointer events.
    fn release(&self);
}

/// Capture for hosts that already deliver every pointer event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn acquire(&self) {}
    fn release(&self) {}
}

/// Scoped pointer capture: acquired on construction, released on drop.
pub struct CaptureGuard {
    capture: Arc<dyn PointerCapture>,
}

impl CaptureGuard {
    pub(crate) fn acquire(capture: Arc<dyn PointerCapture>) -> Self {
        capture.acquire();
        Self { capture }
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        self.capture.release();
    }
}

impl fmt::Debug for CaptureGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CaptureGuard")
    }
}
