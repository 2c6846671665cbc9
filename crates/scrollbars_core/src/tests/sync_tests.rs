//! Frame sync: thumb geometry writes, coalescing and scrolling detection.

use super::{mounted, standard_parts, widget, without_updates, Msg};
use crate::config::ScrollbarsConfig;
use crate::event::HostEvent;
use crate::headless::HeadlessHost;
use crate::host::Node;
use crate::layout::Size;

#[test]
fn test_thumb_geometry_written_on_frame() {
    let mut host = HeadlessHost::new();
    let mut widget = widget(ScrollbarsConfig::default(), 17.0);
    let parts = standard_parts();
    parts.view.set_scroll_left(250.0);

    widget.mount(&mut host, parts.clone());
    assert_eq!(parts.thumb_horizontal.style("width"), "");
    host.flush_frames(&mut widget);

    assert_eq!(widget.thumb_horizontal_width(), 100.0);
    assert_eq!(parts.thumb_horizontal.style("width"), "100px");
    assert_eq!(parts.thumb_horizontal.style("transform"), "translateX(50px)");
    assert_eq!(parts.thumb_vertical.style("height"), "100px");
    assert_eq!(parts.thumb_vertical.style("transform"), "translateY(0px)");
}

#[test]
fn test_fitting_content_gets_no_thumb() {
    let (mut host, mut widget, parts) = mounted(ScrollbarsConfig::default());
    parts.view.set_scroll_size(Size::new(500.0, 400.0));
    widget.request_sync(&mut host);
    host.flush_frames(&mut widget);

    assert_eq!(parts.thumb_horizontal.style("width"), "0px");
    assert_eq!(parts.thumb_horizontal.style("transform"), "translateX(0px)");
    assert_eq!(parts.thumb_vertical.style("height"), "0px");
    assert_eq!(parts.thumb_vertical.style("transform"), "translateY(0px)");
    assert_eq!(widget.values().left, 0.0);
}

#[test]
fn test_requests_coalesce_into_one_frame() {
    let mut host = HeadlessHost::new();
    let mut widget = widget(ScrollbarsConfig::default(), 17.0);
    let parts = standard_parts();
    widget.mount(&mut host, parts.clone());

    for index in 1..=3 {
        widget.request_sync_with(&mut host, move |values| Some(Msg::Custom(index, *values)));
        widget.request_sync(&mut host);
    }
    assert_eq!(host.pending_frames().len(), 1);

    // The queue must see metrics as of the flush, not as of the request.
    parts.view.set_scroll_top(120.0);
    let messages = host.flush_frames(&mut widget);
    let values = widget.values();
    assert_eq!(values.scroll_top, 120.0);
    assert_eq!(
        messages,
        vec![
            Msg::Update(values),
            Msg::Custom(1, values),
            Msg::Custom(2, values),
            Msg::Custom(3, values),
        ]
    );
    assert!(host.pending_frames().is_empty());
}

#[test]
fn test_resize_and_mutation_request_sync() {
    let (mut host, mut widget, _parts) = mounted(ScrollbarsConfig::default());
    widget.dispatch(&mut host, HostEvent::WindowResize);
    widget.dispatch(&mut host, HostEvent::Mutation);
    assert_eq!(host.pending_frames().len(), 1);
    let messages = host.flush_frames(&mut widget);
    assert_eq!(messages.len(), 1);
}

#[test]
fn test_scroll_start_then_stop_at_first_poll() {
    let (mut host, mut widget, parts) = mounted(ScrollbarsConfig::default());
    parts.view.set_scroll_top(40.0);

    let outcome = widget.dispatch(&mut host, HostEvent::Scroll);
    let values = widget.values();
    assert_eq!(outcome.messages, vec![Msg::Scroll(values), Msg::Start]);
    assert!(widget.is_scrolling());

    let messages = without_updates(host.flush_frames(&mut widget));
    assert_eq!(messages, vec![Msg::Frame(values)]);

    assert!(host.advance(&mut widget, 99).is_empty());
    assert_eq!(host.advance(&mut widget, 1), vec![Msg::Stop]);
    assert_eq!(host.now_ms(), 100);
    assert!(!widget.is_scrolling());
    assert!(host.advance(&mut widget, 1000).is_empty());
    assert!(host.active_timers().is_empty());
}

#[test]
fn test_continued_scrolling_defers_stop() {
    let (mut host, mut widget, parts) = mounted(ScrollbarsConfig::default());

    widget.dispatch(&mut host, HostEvent::Scroll);
    host.flush_frames(&mut widget);
    host.advance(&mut widget, 50);

    parts.view.set_scroll_top(60.0);
    let outcome = widget.dispatch(&mut host, HostEvent::Scroll);
    assert!(!outcome.messages.contains(&Msg::Start));
    host.flush_frames(&mut widget);

    // Offsets moved since the scroll began, so the first poll keeps going.
    assert!(host.advance(&mut widget, 50).is_empty());
    assert_eq!(host.advance(&mut widget, 100), vec![Msg::Stop]);
    assert_eq!(host.now_ms(), 200);
}

#[test]
fn test_hide_tracks_when_not_needed() {
    let config = ScrollbarsConfig::new().hide_tracks_when_not_needed(true);
    let (mut host, mut widget, parts) = mounted(config);
    assert_eq!(parts.track_horizontal.style("visibility"), "visible");
    assert_eq!(parts.track_vertical.style("visibility"), "visible");

    parts.view.set_scroll_size(Size::new(500.0, 800.0));
    widget.request_sync(&mut host);
    host.flush_frames(&mut widget);
    assert_eq!(parts.track_horizontal.style("visibility"), "hidden");
    assert_eq!(parts.track_vertical.style("visibility"), "visible");
}

#[test]
fn test_unchanged_geometry_skips_style_writes() {
    let (mut host, mut widget, parts) = mounted(ScrollbarsConfig::default());
    let writes = parts.thumb_vertical.style_writes();
    widget.request_sync(&mut host);
    host.flush_frames(&mut widget);
    assert_eq!(parts.thumb_vertical.style_writes(), writes);
}

#[test]
fn test_fixed_thumb_size() {
    let (_host, widget, _parts) = mounted(ScrollbarsConfig::new().thumb_size(24.0));
    assert_eq!(widget.thumb_vertical_height(), 24.0);
    assert_eq!(widget.thumb_horizontal_width(), 24.0);
}

#[test]
fn test_sync_resumes_after_refused_frame() {
    let (mut host, mut widget, parts) = mounted(ScrollbarsConfig::default());
    parts.view.set_scroll_top(200.0);

    host.set_frames_available(false);
    widget.request_sync(&mut host);
    assert!(host.pending_frames().is_empty());
    assert_eq!(parts.thumb_vertical.style("transform"), "translateY(0px)");

    host.set_frames_available(true);
    widget.request_sync(&mut host);
    assert_eq!(host.pending_frames().len(), 1);
    host.flush_frames(&mut widget);
    assert_eq!(parts.thumb_vertical.style("transform"), "translateY(50px)");
}
