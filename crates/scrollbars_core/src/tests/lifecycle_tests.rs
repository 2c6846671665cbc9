//! Mount, remount and unmount, width changes and programmatic access.

use std::cell::Cell;
use std::rc::Rc;

use super::{mounted, standard_parts, widget, Msg, Widget};
use crate::config::ScrollbarsConfig;
use crate::controller::Scrollbars;
use crate::detector::NativeScrollEnd;
use crate::event::HostEvent;
use crate::headless::HeadlessHost;
use crate::host::{EventKind, FrameHandle, ListenTarget, Node};
use crate::layout::Axis;
use crate::styles::Style;

#[test]
fn test_mount_attaches_listeners_and_observer() {
    let mut host = HeadlessHost::new();
    let mut widget = widget(ScrollbarsConfig::default(), 17.0);
    let outcome = widget.mount(&mut host, standard_parts());

    assert!(widget.is_mounted());
    assert!(!outcome.needs_render);
    assert_eq!(host.listeners().len(), 12);
    assert!(host.is_observing());
    assert!(host.has_listener(ListenTarget::View, EventKind::Scroll));
    assert!(host.has_listener(ListenTarget::Thumb(Axis::Vertical), EventKind::MouseDown));
    assert!(host.has_listener(ListenTarget::Track(Axis::Horizontal), EventKind::Wheel));
    assert!(host.has_listener(ListenTarget::Window, EventKind::Resize));
    assert_eq!(host.pending_frames().len(), 1);
}

#[test]
fn test_unmount_releases_everything() {
    let (mut host, mut widget, parts) = mounted(ScrollbarsConfig::new().auto_hide(1000, 200));
    parts.view.set_scroll_top(10.0);
    widget.dispatch(&mut host, HostEvent::Scroll);
    widget.dispatch(&mut host, HostEvent::TrackMouseEnter(Axis::Vertical));
    widget.dispatch(&mut host, HostEvent::TrackMouseLeave(Axis::Vertical));
    assert!(!host.pending_frames().is_empty());

    widget.unmount(&mut host);
    assert!(!widget.is_mounted());
    assert!(!widget.is_scrolling());
    assert!(host.listeners().is_empty());
    assert!(!host.is_observing());
    assert!(host.pending_frames().is_empty());
    assert!(host.active_timers().is_empty());
    assert!(host.advance(&mut widget, 5000).is_empty());
}

#[test]
fn test_unmount_is_idempotent() {
    let mut host = HeadlessHost::new();
    let mut widget = widget(ScrollbarsConfig::default(), 17.0);
    widget.unmount(&mut host);

    widget.mount(&mut host, standard_parts());
    widget.unmount(&mut host);
    widget.unmount(&mut host);
    assert!(host.listeners().is_empty());
    assert!(host.pending_frames().is_empty());
}

#[test]
fn test_reads_before_mount_are_zero() {
    let widget: Widget = widget(ScrollbarsConfig::default(), 17.0);
    assert_eq!(widget.scroll_left(), 0.0);
    assert_eq!(widget.scroll_height(), 0.0);
    assert_eq!(widget.client_width(), 0.0);
    assert_eq!(widget.thumb_vertical_height(), 0.0);
    assert_eq!(widget.scroll_top_for_offset(40.0), 0.0);
    assert_eq!(widget.values(), Default::default());
    // Writes without a view are dropped.
    widget.set_scroll_top(100.0);
    widget.scroll_to_bottom();
}

#[test]
fn test_remount_replaces_nodes() {
    let (mut host, mut widget, old_parts) = mounted(ScrollbarsConfig::default());
    widget.request_sync(&mut host);

    let new_parts = standard_parts();
    new_parts.view.set_scroll_top(200.0);
    widget.replace_nodes(&mut host, new_parts.clone());
    assert_eq!(host.listeners().len(), 12);
    assert_eq!(host.pending_frames().len(), 1);

    host.flush_frames(&mut widget);
    assert_eq!(widget.scroll_top(), 200.0);
    assert_eq!(new_parts.thumb_vertical.style("transform"), "translateY(50px)");
    assert_eq!(old_parts.thumb_vertical.style("transform"), "translateY(0px)");
}

#[test]
fn test_stale_frame_is_ignored() {
    let (mut host, mut widget, _parts) = mounted(ScrollbarsConfig::default());
    let outcome = widget.dispatch(&mut host, HostEvent::Frame(FrameHandle(9999)));
    assert!(outcome.messages.is_empty());
}

#[test]
fn test_universal_renders_placeholders_until_mount() {
    let config = ScrollbarsConfig::new().universal(true);
    let mut host = HeadlessHost::new();
    let mut widget = widget(config, 17.0);

    let initial = widget.render();
    assert_eq!(initial.view.style.get("overflow"), Some("hidden"));
    assert_eq!(initial.track_vertical.style.get("display"), Some("none"));

    let outcome = widget.mount(&mut host, standard_parts());
    assert!(outcome.needs_render);
    let mounted = widget.render();
    assert_eq!(mounted.view.style.get("overflow"), Some("scroll"));
    assert_eq!(mounted.view.style.get("margin-right"), Some("-17px"));
    assert_eq!(mounted.track_vertical.style.get("display"), None);

    widget.unmount(&mut host);
    let outcome = widget.mount(&mut host, standard_parts());
    assert!(!outcome.needs_render);
}

#[test]
fn test_overlay_scrollbars_skip_interaction() {
    let mut host = HeadlessHost::new();
    let mut widget = widget(ScrollbarsConfig::default(), 0.0);
    let parts = standard_parts();
    widget.mount(&mut host, parts.clone());
    host.flush_frames(&mut widget);

    assert_eq!(host.listeners(), vec![(ListenTarget::View, EventKind::Scroll)]);
    assert!(host.is_observing());
    assert_eq!(parts.thumb_vertical.style_writes(), 0);
    assert_eq!(parts.thumb_horizontal.style_writes(), 0);
    let output = widget.render();
    assert_eq!(output.track_horizontal.style.get("display"), Some("none"));
    assert_eq!(output.view.style.get("margin-bottom"), Some("0px"));
}

#[test]
fn test_scrollbar_width_change_rewires() {
    let width = Rc::new(Cell::new(17.0));
    let probe_width = Rc::clone(&width);
    let mut host = HeadlessHost::new();
    let mut widget: Widget = Scrollbars::new(ScrollbarsConfig::default(), move || probe_width.get());
    widget.mount(&mut host, standard_parts());
    host.flush_frames(&mut widget);
    assert_eq!(host.listeners().len(), 12);

    width.set(0.0);
    widget.request_sync(&mut host);
    let outcome = host.fire_frame(&mut widget).unwrap();
    assert!(outcome.needs_render);
    assert_eq!(widget.scrollbar_width(), 0.0);
    assert_eq!(host.listeners().len(), 1);
    assert!(host.is_observing());

    width.set(15.0);
    widget.request_sync(&mut host);
    let outcome = host.fire_frame(&mut widget).unwrap();
    assert!(outcome.needs_render);
    assert!(host.pending_frames().is_empty());
    assert_eq!(host.listeners().len(), 12);
    assert_eq!(widget.render().view.style.get("margin-right"), Some("-15px"));
}

#[test]
fn test_programmatic_scrolling() {
    let (_host, widget, parts) = mounted(ScrollbarsConfig::default());

    widget.scroll_to_bottom();
    widget.scroll_to_right();
    assert_eq!(parts.view.scroll_top(), 800.0);
    assert_eq!(parts.view.scroll_left(), 1000.0);
    widget.scroll_to_top();
    widget.scroll_to_left();
    assert_eq!(widget.scroll_top(), 0.0);
    assert_eq!(widget.scroll_left(), 0.0);

    widget.set_scroll_top(120.0);
    assert_eq!(widget.values().scroll_top, 120.0);
    assert!((widget.values().top - 0.3).abs() < 0.001);
    assert_eq!(widget.scroll_width(), 1000.0);
    assert_eq!(widget.client_height(), 400.0);
    assert_eq!(widget.scroll_left_for_offset(50.0), 250.0);
    assert_eq!(widget.thumb_vertical_height(), 100.0);

    widget.scroll_to_y(240.0);
    assert_eq!(parts.view.scroll_top(), 240.0);
    assert_eq!(widget.scroll_left(), 0.0);
}

#[test]
fn test_native_scroll_end_strategy() {
    let mut host = HeadlessHost::new();
    let mut widget = widget(ScrollbarsConfig::default(), 17.0).scroll_end_strategy(NativeScrollEnd);
    widget.mount(&mut host, standard_parts());
    host.flush_frames(&mut widget);

    let outcome = widget.dispatch(&mut host, HostEvent::Scroll);
    assert!(outcome.messages.contains(&Msg::Start));
    assert!(host.active_timers().is_empty());
    host.flush_frames(&mut widget);
    assert!(widget.is_scrolling());

    let outcome = widget.dispatch(&mut host, HostEvent::ScrollEnd);
    assert_eq!(outcome.messages, vec![Msg::Stop]);
    let outcome = widget.dispatch(&mut host, HostEvent::ScrollEnd);
    assert!(outcome.messages.is_empty());
}

#[test]
fn test_render_carries_id_and_classes() {
    let widget = widget(ScrollbarsConfig::default(), 17.0).id("list");
    let output = widget.render();
    assert_eq!(output.id.as_deref(), Some("list"));
    assert_eq!(output.container.class_name, "scrollbars-container");
    assert_eq!(output.view.class_name, "scrollbars-view");
    assert_eq!(output.thumb(Axis::Vertical).class_name, "scrollbars-thumb scrollbars-thumb-v");
}

#[test]
fn test_render_customizers_rewrite_their_part() {
    let widget = widget(ScrollbarsConfig::default(), 17.0)
        .style(Style::new().with("border", "1px solid"))
        .render_view(|mut props| {
            props.style.set("padding", "4px");
            props
        })
        .render_track(Axis::Vertical, |mut props| {
            props.class_name.push_str(" list-track");
            props
        })
        .render_thumb(Axis::Horizontal, |mut props| {
            props.style.set("background-color", "red");
            props
        });
    let output = widget.render();

    assert_eq!(output.container.style.get("border"), Some("1px solid"));
    assert_eq!(output.view.style.get("padding"), Some("4px"));
    assert_eq!(
        output.track(Axis::Vertical).class_name,
        "scrollbars-track scrollbars-track-v list-track"
    );
    assert_eq!(
        output.track(Axis::Horizontal).class_name,
        "scrollbars-track scrollbars-track-h"
    );
    assert_eq!(
        output.thumb(Axis::Horizontal).style.get("background-color"),
        Some("red")
    );
    assert_eq!(
        output.thumb(Axis::Vertical).style.get("background-color"),
        Some("rgba(0,0,0,.2)")
    );
}
