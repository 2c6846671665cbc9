//! Coalescing animation-frame scheduler.
//!
//! Any number of sync requests made before the next frame share one frame
//! request; their callbacks queue up and are flushed in request order.

use crate::host::{FrameHandle, Host};

/// Scheduler state. `Pending` owns the only outstanding frame request.
#[derive(Debug)]
pub enum FrameScheduler<C> {
    Idle,
    Pending {
        handle: FrameHandle,
        queue: Vec<C>,
    },
}

impl<C> Default for FrameScheduler<C> {
    fn default() -> Self {
        FrameScheduler::Idle
    }
}

impl<C> FrameScheduler<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, FrameScheduler::Pending { .. })
    }

    /// Handle of the outstanding frame request, if any.
    pub fn pending_handle(&self) -> Option<FrameHandle> {
        match self {
            FrameScheduler::Pending { handle, .. } => Some(*handle),
            FrameScheduler::Idle => None,
        }
    }

    /// Queue `callback` for the next frame, requesting one from `host` only
    /// when none is outstanding. Returns true when a new frame was requested.
    ///
    /// When the host has no frame to give, the scheduler stays `Idle` and
    /// `callback` is dropped; the next request asks again.
    pub fn request<H: Host>(&mut self, host: &mut H, callback: Option<C>) -> bool {
        match self {
            FrameScheduler::Pending { queue, .. } => {
                queue.extend(callback);
                false
            }
            FrameScheduler::Idle => match host.request_frame() {
                Some(handle) => {
                    *self = FrameScheduler::Pending {
                        handle,
                        queue: callback.into_iter().collect(),
                    };
                    true
                }
                None => {
                    log::warn!("No frame available, sync skipped");
                    false
                }
            },
        }
    }

    /// Accept the frame identified by `handle`, returning the queued
    /// callbacks in FIFO order and going back to `Idle`.
    ///
    /// Returns `None` for a stale or unknown handle.
    pub fn take_frame(&mut self, handle: FrameHandle) -> Option<Vec<C>> {
        if self.pending_handle() != Some(handle) {
            return None;
        }
        match std::mem::take(self) {
            FrameScheduler::Pending { queue, .. } => Some(queue),
            FrameScheduler::Idle => None,
        }
    }

    /// Cancel the outstanding request and drop its queue. No-op when idle.
    pub fn cancel<H: Host>(&mut self, host: &mut H) {
        if let FrameScheduler::Pending { handle, .. } = std::mem::take(self) {
            host.cancel_frame(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessHost;

    #[test]
    fn test_coalesces_requests() {
        let mut host = HeadlessHost::new();
        let mut scheduler = FrameScheduler::new();
        assert!(scheduler.request(&mut host, Some(1)));
        assert!(!scheduler.request(&mut host, None));
        assert!(!scheduler.request(&mut host, Some(2)));
        assert!(!scheduler.request(&mut host, Some(3)));
        assert_eq!(host.pending_frames().len(), 1);

        let handle = scheduler.pending_handle().unwrap();
        assert_eq!(scheduler.take_frame(handle), Some(vec![1, 2, 3]));
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn test_stale_handle_is_ignored() {
        let mut host = HeadlessHost::new();
        let mut scheduler = FrameScheduler::new();
        scheduler.request(&mut host, Some("a"));
        assert_eq!(scheduler.take_frame(FrameHandle(9999)), None);
        assert!(scheduler.is_pending());
    }

    #[test]
    fn test_refused_frame_leaves_scheduler_idle() {
        let mut host = HeadlessHost::new();
        let mut scheduler = FrameScheduler::new();
        host.set_frames_available(false);
        assert!(!scheduler.request(&mut host, Some(1)));
        assert!(!scheduler.is_pending());

        host.set_frames_available(true);
        assert!(scheduler.request(&mut host, Some(2)));
        let handle = scheduler.pending_handle().unwrap();
        assert_eq!(scheduler.take_frame(handle), Some(vec![2]));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut host = HeadlessHost::new();
        let mut scheduler: FrameScheduler<u8> = FrameScheduler::new();
        scheduler.cancel(&mut host);
        scheduler.request(&mut host, None);
        scheduler.cancel(&mut host);
        scheduler.cancel(&mut host);
        assert!(!scheduler.is_pending());
        assert!(host.pending_frames().is_empty());
    }
}
