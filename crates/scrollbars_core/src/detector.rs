//! Scrolling-state detection.
//!
//! Native scroll events carry no "scroll ended" signal, so the detector polls:
//! while scrolling, a repeating timer compares the offsets recorded by the
//! latest frame with the ones seen at the previous tick and goes idle once
//! they stop changing. Hosts with a native scroll-end event can swap in
//! [`NativeScrollEnd`].

use std::fmt;

use crate::constants::SCROLL_POLL_INTERVAL_MS;
use crate::host::{Host, TimerHandle};
use crate::layout::Point;

/// How the end of a scroll gesture is detected.
pub trait ScrollEndStrategy {
    /// Poll period, or `None` when the host reports scroll end itself.
    fn poll_interval_ms(&self) -> Option<u32>;

    /// Whether scrolling settled, given the offsets seen at the previous tick
    /// and the latest recorded ones.
    fn has_settled(&self, previous: Option<Point>, latest: Option<Point>) -> bool {
        previous == latest
    }
}

/// Fixed-interval polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalPoll {
    pub interval_ms: u32,
}

impl Default for IntervalPoll {
    fn default() -> Self {
        Self {
            interval_ms: SCROLL_POLL_INTERVAL_MS,
        }
    }
}

impl ScrollEndStrategy for IntervalPoll {
    fn poll_interval_ms(&self) -> Option<u32> {
        Some(self.interval_ms)
    }
}

/// Relies on [`HostEvent::ScrollEnd`](crate::event::HostEvent::ScrollEnd).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NativeScrollEnd;

impl ScrollEndStrategy for NativeScrollEnd {
    fn poll_interval_ms(&self) -> Option<u32> {
        None
    }
}

/// Detector phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ScrollPhase {
    #[default]
    Idle,
    Scrolling {
        poll: Option<TimerHandle>,
    },
}

/// Idle/scrolling state machine.
pub struct ScrollingDetector {
    strategy: Box<dyn ScrollEndStrategy>,
    phase: ScrollPhase,
    /// Offsets recorded by the latest scroll frame.
    recorded: Option<Point>,
    /// Offsets seen at the previous poll tick.
    last_known: Option<Point>,
}

impl Default for ScrollingDetector {
    fn default() -> Self {
        Self::new(Box::new(IntervalPoll::default()))
    }
}

impl fmt::Debug for ScrollingDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollingDetector")
            .field("phase", &self.phase)
            .field("recorded", &self.recorded)
            .field("last_known", &self.last_known)
            .finish_non_exhaustive()
    }
}

impl ScrollingDetector {
    pub fn new(strategy: Box<dyn ScrollEndStrategy>) -> Self {
        Self {
            strategy,
            phase: ScrollPhase::Idle,
            recorded: None,
            last_known: None,
        }
    }

    pub fn is_scrolling(&self) -> bool {
        matches!(self.phase, ScrollPhase::Scrolling { .. })
    }

    /// Whether `handle` is this detector's poll timer.
    pub fn owns_timer(&self, handle: TimerHandle) -> bool {
        matches!(self.phase, ScrollPhase::Scrolling { poll: Some(poll) } if poll == handle)
    }

    /// Remember the offsets a scroll frame observed.
    pub fn record(&mut self, offsets: Point) {
        self.recorded = Some(offsets);
    }

    /// Enter `Scrolling` unless already there. `current` seeds both offset
    /// slots so an unchanged position settles at the first tick.
    ///
    /// Returns true on the `Idle -> Scrolling` transition.
    pub fn begin<H: Host>(&mut self, host: &mut H, current: Point) -> bool {
        if self.is_scrolling() {
            return false;
        }
        self.recorded = Some(current);
        self.last_known = Some(current);
        let poll = self
            .strategy
            .poll_interval_ms()
            .map(|period| host.set_interval(period));
        self.phase = ScrollPhase::Scrolling { poll };
        true
    }

    /// Poll tick. Returns true on the `Scrolling -> Idle` transition.
    pub fn tick<H: Host>(&mut self, host: &mut H) -> bool {
        if !self.is_scrolling() {
            return false;
        }
        if self.strategy.has_settled(self.last_known, self.recorded) {
            self.stop(host);
            return true;
        }
        self.last_known = self.recorded;
        false
    }

    /// Native scroll-end signal. Returns true on the `Scrolling -> Idle`
    /// transition.
    pub fn native_end<H: Host>(&mut self, host: &mut H) -> bool {
        if !self.is_scrolling() {
            return false;
        }
        self.stop(host);
        true
    }

    /// Drop back to `Idle` without reporting a transition.
    pub fn cancel<H: Host>(&mut self, host: &mut H) {
        self.stop(host);
    }

    fn stop<H: Host>(&mut self, host: &mut H) {
        if let ScrollPhase::Scrolling { poll: Some(poll) } = self.phase {
            host.clear_timer(poll);
        }
        self.phase = ScrollPhase::Idle;
    }
}
