use crate::error::Result;

/// Opaque token returned when a frame callback is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Per-display-refresh callback registration.
///
/// The scheduler only arms and disarms the host callback; the callback
/// itself reports back through [`crate::SceneLoop::on_frame`] with the
/// handle it was armed for.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle>;

    /// Idempotent. A cancelled handle must never be delivered.
    fn cancel_frame(&mut self, handle: FrameHandle);
}
