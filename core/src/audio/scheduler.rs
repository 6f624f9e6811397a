//! One-shot animation frame requests.
//!
//! Works like `requestAnimationFrame`: a request fires on the next frame only,
//! so a recurring callback must re-request itself each time it runs.

use std::collections::BTreeSet;

/// Identifies a pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(u64);

/// Queue of frame requests driven by the host's display refresh.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    pending: BTreeSet<FrameHandle>,
    frames_run: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a callback on the next frame.
    pub fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.insert(handle);
        handle
    }

    /// Cancel a pending request. Returns `false` if it already fired or was cancelled.
    pub fn cancel_frame(&mut self, handle: FrameHandle) -> bool {
        self.pending.remove(&handle)
    }

    /// Run one display frame, returning every request due on it in request order.
    ///
    /// Requests made while handling the returned handles land on the following frame.
    pub fn run_frame(&mut self) -> Vec<FrameHandle> {
        self.frames_run += 1;
        std::mem::take(&mut self.pending).into_iter().collect()
    }

    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.contains(&handle)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Total frames run so far.
    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }
}
