//! Platform seams: the element handle (`Node`) and the services the widget
//! needs from its host (`Host`).
//!
//! The browser backend implements both on top of `web-sys`; the
//! [`HeadlessHost`](crate::headless::HeadlessHost) implements them in memory
//! with a virtual clock.

use crate::layout::{Axis, Bounds, Size};

/// An element the widget reads geometry from and writes styles to.
///
/// Element handles behave like DOM references: cloning yields another handle
/// to the same element and writes go through `&self`.
pub trait Node {
    /// Current horizontal scroll offset.
    fn scroll_left(&self) -> f64;
    /// Current vertical scroll offset.
    fn scroll_top(&self) -> f64;
    /// Set the horizontal scroll offset. The host may clamp it.
    fn set_scroll_left(&self, value: f64);
    /// Set the vertical scroll offset. The host may clamp it.
    fn set_scroll_top(&self, value: f64);
    /// Full scrollable content size (`scrollWidth`/`scrollHeight`).
    fn scroll_size(&self) -> Size;
    /// Visible viewport size (`clientWidth`/`clientHeight`).
    fn client_size(&self) -> Size;
    /// Client size minus horizontal/vertical padding.
    fn inner_size(&self) -> Size;
    /// Rendered border-box size (`offsetWidth`/`offsetHeight`).
    fn offset_size(&self) -> Size;
    /// Client-space bounding rectangle.
    fn bounding_rect(&self) -> Bounds;
    /// Inline style value for `property`, empty when unset.
    fn style(&self, property: &str) -> String;
    /// Write an inline style value. An empty value removes the property.
    fn set_style(&self, property: &str, value: &str);
}

/// Pending animation-frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Armed timeout or interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// Attached event listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(pub u64);

/// Connected subtree mutation observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverHandle(pub u64);

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenTarget {
    View,
    Track(Axis),
    Thumb(Axis),
    Window,
    Document,
}

/// Native event kinds the widget subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Scroll,
    MouseEnter,
    MouseLeave,
    MouseDown,
    MouseMove,
    MouseUp,
    Wheel,
    Resize,
}

impl EventKind {
    /// DOM event type name.
    pub fn name(self) -> &'static str {
        match self {
            EventKind::Scroll => "scroll",
            EventKind::MouseEnter => "mouseenter",
            EventKind::MouseLeave => "mouseleave",
            EventKind::MouseDown => "mousedown",
            EventKind::MouseMove => "mousemove",
            EventKind::MouseUp => "mouseup",
            EventKind::Wheel => "wheel",
            EventKind::Resize => "resize",
        }
    }
}

/// Services supplied by the embedding platform.
///
/// Every method is called from inside a widget dispatch; a host delivers the
/// resulting callbacks later as [`HostEvent`](crate::event::HostEvent)s.
/// Cancelling or clearing a handle that already fired must be a no-op.
pub trait Host {
    /// Ask for one animation-frame callback. `None` when the platform
    /// cannot schedule one.
    fn request_frame(&mut self) -> Option<FrameHandle>;
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Arm a one-shot timer firing after `delay_ms`.
    fn set_timeout(&mut self, delay_ms: u32) -> TimerHandle;
    /// Arm a repeating timer firing every `period_ms`.
    fn set_interval(&mut self, period_ms: u32) -> TimerHandle;
    fn clear_timer(&mut self, handle: TimerHandle);

    fn listen(&mut self, target: ListenTarget, kind: EventKind) -> ListenerHandle;
    fn unlisten(&mut self, handle: ListenerHandle);

    /// Observe attribute, child-list and subtree changes inside the view.
    fn observe_mutations(&mut self) -> ObserverHandle;
    fn disconnect(&mut self, handle: ObserverHandle);

    /// Toggle the document-wide text selection block used while dragging.
    fn set_selection_disabled(&mut self, disabled: bool);
}
