//! Events delivered by the host and the result of handling them.

use crate::host::{FrameHandle, TimerHandle};
use crate::layout::{Axis, Point};

/// A native event or a host callback routed into the widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// The view scrolled.
    Scroll,
    /// Pointer entered a track.
    TrackMouseEnter(Axis),
    /// Pointer left a track.
    TrackMouseLeave(Axis),
    /// Mouse button pressed on a track, outside its thumb.
    TrackMouseDown { axis: Axis, client: Point },
    /// Mouse button pressed on a thumb.
    ThumbMouseDown { axis: Axis, client: Point },
    /// Wheel turned over a track.
    TrackWheel { axis: Axis, delta: Point },
    /// Document-level mouse move during a drag session.
    DragMove { client: Point },
    /// Document-level mouse release during a drag session.
    DragEnd,
    WindowResize,
    /// Attribute, child-list or subtree change inside the view.
    Mutation,
    /// A requested animation frame arrived.
    Frame(FrameHandle),
    /// An armed timer fired.
    Timer(TimerHandle),
    /// The host's native scroll-end signal.
    ScrollEnd,
}

/// What the host should do after a dispatch.
#[derive(Debug)]
pub struct Outcome<M> {
    /// Observer messages, in the order they were produced.
    pub messages: Vec<M>,
    /// Suppress the event's default action.
    pub prevent_default: bool,
    /// Keep other listeners of the same native event from running.
    pub stop_immediate_propagation: bool,
    /// Render output changed; the embedding tree should call
    /// [`Scrollbars::render`](crate::Scrollbars::render) again.
    pub needs_render: bool,
}

impl<M> Default for Outcome<M> {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            prevent_default: false,
            stop_immediate_propagation: false,
            needs_render: false,
        }
    }
}

impl<M> Outcome<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message produced by an observer, if any.
    pub fn push(&mut self, message: Option<M>) {
        self.messages.extend(message);
    }
}
