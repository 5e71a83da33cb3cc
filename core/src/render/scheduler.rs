use serde::Serialize;

/// Identifies one outstanding redraw request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FrameHandle(pub u64);

/// Host refresh-callback abstraction.
///
/// The host delivers a requested frame by calling the engine's `tick`; the
/// engine then acknowledges the handle it was holding.
pub trait FrameScheduler: Send + Sync {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
    fn acknowledge(&mut self, handle: FrameHandle);
    /// Requests neither delivered nor cancelled.
    fn pending(&self) -> usize;
}

/// Scheduler for hosts that pump frames themselves (tests, headless runs,
/// frame-subscription GUIs).
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    outstanding: Vec<FrameHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_outstanding(&self, handle: FrameHandle) -> bool {
        self.outstanding.contains(&handle)
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.outstanding.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.outstanding.retain(|pending| *pending != handle);
    }

    fn acknowledge(&mut self, handle: FrameHandle) {
        self.cancel_frame(handle);
    }

    fn pending(&self) -> usize {
        self.outstanding.len()
    }
}
