//! scrollbars_core - custom scrollbars over a natively scrolling view
//!
//! The widget hides the platform scrollbars of a content view and drives its
//! own track and thumb elements from the view's scroll position. It supports
//! thumb and track dragging, wheel scrolling over the tracks, auto-sizing and
//! fading the tracks out when idle.
//!
//! Everything platform specific sits behind the [`Host`] and [`Node`] traits;
//! [`headless`] provides an in-memory implementation.

mod callback;
mod config;
mod constants;
mod controller;
mod detector;
mod event;
mod geometry;
pub mod headless;
mod host;
mod layout;
mod probe;
mod render;
mod scheduler;
mod state;
mod styles;

#[cfg(test)]
mod tests;

pub use callback::{Callback, Callback0, Observers, SyncCallback};
pub use config::{format_px, Dimension, ScrollbarsConfig};
pub use constants::*;
pub use controller::Scrollbars;
pub use detector::{IntervalPoll, NativeScrollEnd, ScrollEndStrategy, ScrollingDetector};
pub use event::{HostEvent, Outcome};
pub use geometry::{finite_ratio, AxisGeometry, ScrollValues, ThumbSizing};
pub use host::{
    EventKind, FrameHandle, Host, ListenTarget, ListenerHandle, Node, ObserverHandle, TimerHandle,
};
pub use layout::{Axis, Bounds, Point, Size};
pub use probe::{FixedWidth, PixelRatioCache, ScrollbarWidthProbe};
pub use render::{Customizer, PartProps, RenderCustomizers, RenderInputs, RenderOutput};
pub use scheduler::FrameScheduler;
pub use state::{DragSession, Parts, Subscriptions, TrackHover};
pub use styles::{Style, Styles};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::controller::Scrollbars;
    pub use crate::event::{HostEvent, Outcome};
    pub use crate::geometry::ScrollValues;
    pub use crate::host::{Host, Node};
    pub use crate::layout::{Axis, Bounds, Point, Size};
    pub use crate::state::Parts;
    pub use crate::config::{Dimension, ScrollbarsConfig};
}
