//! Behaviour tests driving the widget through the headless host.

mod auto_hide_tests;
mod lifecycle_tests;
mod sync_tests;

use crate::config::ScrollbarsConfig;
use crate::controller::Scrollbars;
use crate::geometry::ScrollValues;
use crate::headless::{self, HeadlessHost, HeadlessNode};
use crate::layout::{Bounds, Size};
use crate::probe::FixedWidth;
use crate::state::Parts;

/// Messages produced by the test observers.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Msg {
    Scroll(ScrollValues),
    Frame(ScrollValues),
    Start,
    Stop,
    Update(ScrollValues),
    Custom(u32, ScrollValues),
}

pub(crate) type Widget = Scrollbars<HeadlessNode, Msg>;

/// A 500x400 view over 1000x800 content, with a 200px horizontal track at
/// the bottom and a 200px vertical track on the right.
pub(crate) fn standard_parts() -> Parts<HeadlessNode> {
    let view = HeadlessNode::view(Size::new(1000.0, 800.0), Size::new(500.0, 400.0));
    headless::parts(
        view,
        Bounds::new(0.0, 400.0, 200.0, 6.0),
        Bounds::new(500.0, 0.0, 6.0, 200.0),
    )
}

pub(crate) fn widget(config: ScrollbarsConfig, scrollbar_width: f64) -> Widget {
    Scrollbars::new(config, FixedWidth(scrollbar_width))
        .on_scroll(Msg::Scroll)
        .on_scroll_frame(Msg::Frame)
        .on_scroll_start(|| Msg::Start)
        .on_scroll_stop(|| Msg::Stop)
        .on_update(Msg::Update)
}

/// Mounted widget with its initial frame already flushed.
pub(crate) fn mounted(config: ScrollbarsConfig) -> (HeadlessHost, Widget, Parts<HeadlessNode>) {
    let mut host = HeadlessHost::new();
    let mut widget = widget(config, 17.0);
    let parts = standard_parts();
    widget.mount(&mut host, parts.clone());
    host.flush_frames(&mut widget);
    (host, widget, parts)
}

/// Drop `Update` messages, which every frame produces.
pub(crate) fn without_updates(messages: Vec<Msg>) -> Vec<Msg> {
    messages
        .into_iter()
        .filter(|message| !matches!(message, Msg::Update(_)))
        .collect()
}
