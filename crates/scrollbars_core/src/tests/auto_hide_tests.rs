//! Track fading: shown on scroll and hover, hidden after the idle timeout.

use super::mounted;
use crate::config::ScrollbarsConfig;
use crate::event::HostEvent;
use crate::host::Node;
use crate::layout::{Axis, Point};

fn auto_hide() -> ScrollbarsConfig {
    ScrollbarsConfig::new().auto_hide(1000, 200)
}

fn thumb_press() -> HostEvent {
    HostEvent::ThumbMouseDown {
        axis: Axis::Vertical,
        client: Point::new(503.0, 10.0),
    }
}

#[test]
fn test_scroll_shows_then_fades() {
    let (mut host, mut widget, parts) = mounted(auto_hide());
    parts.view.set_scroll_top(10.0);

    widget.dispatch(&mut host, HostEvent::Scroll);
    assert_eq!(parts.track_horizontal.style("opacity"), "1");
    assert_eq!(parts.track_vertical.style("opacity"), "1");
    host.flush_frames(&mut widget);

    host.advance(&mut widget, 100);
    assert!(!widget.is_scrolling());
    host.advance(&mut widget, 999);
    assert_eq!(parts.track_vertical.style("opacity"), "1");
    host.advance(&mut widget, 1);
    assert_eq!(parts.track_horizontal.style("opacity"), "0");
    assert_eq!(parts.track_vertical.style("opacity"), "0");
    assert!(host.active_timers().is_empty());
}

#[test]
fn test_hover_keeps_tracks_visible() {
    let (mut host, mut widget, parts) = mounted(auto_hide());

    widget.dispatch(&mut host, HostEvent::TrackMouseEnter(Axis::Vertical));
    assert!(widget.is_pointer_over_track());
    assert_eq!(parts.track_vertical.style("opacity"), "1");

    widget.dispatch(&mut host, HostEvent::Scroll);
    host.flush_frames(&mut widget);
    host.advance(&mut widget, 5000);
    assert!(!widget.is_scrolling());
    assert_eq!(parts.track_vertical.style("opacity"), "1");
    assert!(host.active_timers().is_empty());

    widget.dispatch(&mut host, HostEvent::TrackMouseLeave(Axis::Vertical));
    assert!(!widget.is_pointer_over_track());
    assert_eq!(host.active_timers().len(), 1);
    host.advance(&mut widget, 1000);
    assert_eq!(parts.track_vertical.style("opacity"), "0");
}

#[test]
fn test_drag_keeps_tracks_visible() {
    let (mut host, mut widget, parts) = mounted(auto_hide());

    widget.dispatch(&mut host, HostEvent::TrackMouseEnter(Axis::Vertical));
    widget.dispatch(&mut host, thumb_press());
    widget.dispatch(&mut host, HostEvent::TrackMouseLeave(Axis::Vertical));
    assert!(host.active_timers().is_empty());
    host.advance(&mut widget, 5000);
    assert_eq!(parts.track_vertical.style("opacity"), "1");

    widget.dispatch(&mut host, HostEvent::DragEnd);
    host.advance(&mut widget, 999);
    assert_eq!(parts.track_vertical.style("opacity"), "1");
    host.advance(&mut widget, 1);
    assert_eq!(parts.track_vertical.style("opacity"), "0");
}

#[test]
fn test_fade_rechecks_gate_when_timer_fires() {
    let (mut host, mut widget, parts) = mounted(auto_hide());

    widget.dispatch(&mut host, HostEvent::TrackMouseEnter(Axis::Vertical));
    widget.dispatch(&mut host, HostEvent::TrackMouseLeave(Axis::Vertical));
    assert_eq!(host.active_timers().len(), 1);

    // A drag that starts while the fade is armed cancels it at fire time.
    widget.dispatch(&mut host, thumb_press());
    host.advance(&mut widget, 1000);
    assert_eq!(parts.track_vertical.style("opacity"), "1");
    assert!(host.active_timers().is_empty());

    widget.dispatch(&mut host, HostEvent::DragEnd);
    host.advance(&mut widget, 1000);
    assert_eq!(parts.track_vertical.style("opacity"), "0");
}

#[test]
fn test_leave_rearms_timer() {
    let (mut host, mut widget, parts) = mounted(auto_hide());

    widget.dispatch(&mut host, HostEvent::TrackMouseEnter(Axis::Horizontal));
    widget.dispatch(&mut host, HostEvent::TrackMouseLeave(Axis::Horizontal));
    host.advance(&mut widget, 600);
    widget.dispatch(&mut host, HostEvent::TrackMouseEnter(Axis::Horizontal));
    widget.dispatch(&mut host, HostEvent::TrackMouseLeave(Axis::Horizontal));
    assert_eq!(host.active_timers().len(), 1);

    host.advance(&mut widget, 600);
    assert_eq!(parts.track_horizontal.style("opacity"), "1");
    host.advance(&mut widget, 400);
    assert_eq!(parts.track_horizontal.style("opacity"), "0");
}

#[test]
fn test_redundant_opacity_writes_skipped() {
    let (mut host, mut widget, parts) = mounted(auto_hide());
    widget.show_tracks(&mut host);
    let writes = parts.track_vertical.style_writes();
    widget.show_tracks(&mut host);
    widget.dispatch(&mut host, HostEvent::TrackMouseEnter(Axis::Vertical));
    assert_eq!(parts.track_vertical.style_writes(), writes);
}

#[test]
fn test_without_auto_hide_opacity_untouched() {
    let (mut host, mut widget, parts) = mounted(ScrollbarsConfig::default());
    widget.dispatch(&mut host, HostEvent::TrackMouseEnter(Axis::Vertical));
    widget.dispatch(&mut host, HostEvent::Scroll);
    host.flush_frames(&mut widget);
    host.advance(&mut widget, 5000);
    widget.dispatch(&mut host, HostEvent::TrackMouseLeave(Axis::Vertical));
    assert_eq!(parts.track_vertical.style("opacity"), "");
    assert!(host.active_timers().is_empty());
}
