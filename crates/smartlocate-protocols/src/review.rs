//! Human-review launcher protocol.

/// Opens a review page so a human can annotate an element.
///
/// Fire-and-forget: implementations must not block on the reviewer and
/// failures are only logged.
pub trait ReviewLauncher: Send + Sync {
    fn open(&self, url: &str);
}
