#[cfg(not(target_arch = "wasm32"))]
use scrollbars::headless::{self, HeadlessHost, HeadlessNode};
#[cfg(not(target_arch = "wasm32"))]
use scrollbars::{
    Axis, Bounds, ConfigFile, FixedWidth, HostEvent, Node, Point, ScrollValues, Scrollbars,
    ScrollbarsConfig, Size,
};

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
enum Event {
    Scroll(ScrollValues),
    Start,
    Stop,
    Update(ScrollValues),
}

#[cfg(not(target_arch = "wasm32"))]
fn report(messages: Vec<Event>) -> usize {
    let count = messages.len();
    for message in messages {
        match message {
            Event::Scroll(values) => log::debug!(
                "scroll to {}/{} ({:.2})",
                values.scroll_top,
                values.scroll_height,
                values.top
            ),
            Event::Update(values) => log::trace!("update {:?}", values),
            other => log::info!("{:?}", other),
        }
    }
    count
}

/// What the walkthrough left behind.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
struct Summary {
    messages: usize,
    final_values: ScrollValues,
    listeners_left: usize,
    timers_left: usize,
}

/// Drive one widget over a 400x300 view of 1200x3000 content.
#[cfg(not(target_arch = "wasm32"))]
fn walkthrough(config: ScrollbarsConfig) -> Summary {
    let mut messages = 0;
    let mut host = HeadlessHost::new();
    let mut widget = Scrollbars::new(config, FixedWidth(17.0))
        .on_scroll(Event::Scroll)
        .on_scroll_start(|| Event::Start)
        .on_scroll_stop(|| Event::Stop)
        .on_update(Event::Update);

    // Tracks along the right and bottom edges.
    let view = HeadlessNode::view(Size::new(1200.0, 3000.0), Size::new(400.0, 300.0));
    let parts = headless::parts(
        view,
        Bounds::new(0.0, 294.0, 400.0, 6.0),
        Bounds::new(394.0, 0.0, 6.0, 300.0),
    );
    widget.mount(&mut host, parts.clone());
    messages += report(host.flush_frames(&mut widget));
    log::info!(
        "Thumbs: {}px wide, {}px tall",
        widget.thumb_horizontal_width(),
        widget.thumb_vertical_height()
    );

    for step in 1..=5 {
        parts.view.set_scroll_top(f64::from(step) * 120.0);
        messages += report(widget.dispatch(&mut host, HostEvent::Scroll).messages);
        messages += report(host.flush_frames(&mut widget));
        messages += report(host.advance(&mut widget, 16));
    }
    messages += report(host.advance(&mut widget, 200));

    let outcome = widget.dispatch(
        &mut host,
        HostEvent::TrackWheel {
            axis: Axis::Horizontal,
            delta: Point::new(80.0, 0.0),
        },
    );
    messages += report(outcome.messages);
    log::info!("Wheel over the horizontal track: scroll left {}", widget.scroll_left());

    // Grab the vertical thumb 10px below its top edge and pull it down.
    let thumb_height = widget.thumb_vertical_height();
    let thumb_top = widget.scroll_top() / (3000.0 - 300.0) * (300.0 - thumb_height);
    parts
        .thumb_vertical
        .set_bounds(Bounds::new(394.0, thumb_top, 6.0, thumb_height));
    let grab = Point::new(397.0, thumb_top + 10.0);
    messages += report(
        widget
            .dispatch(&mut host, HostEvent::ThumbMouseDown { axis: Axis::Vertical, client: grab })
            .messages,
    );
    for step in 1..=3 {
        let client = Point::new(397.0, grab.y + f64::from(step) * 20.0);
        messages += report(widget.dispatch(&mut host, HostEvent::DragMove { client }).messages);
        log::info!("Dragged to y={}: scroll top {}", client.y, widget.scroll_top());
    }
    messages += report(widget.dispatch(&mut host, HostEvent::DragEnd).messages);
    messages += report(host.flush_frames(&mut widget));

    widget.scroll_to_bottom();
    let final_values = widget.values();
    log::info!("Scrolled to bottom: {:?}", final_values);

    widget.unmount(&mut host);
    Summary {
        messages,
        final_values,
        listeners_left: host.listeners().len(),
        timers_left: host.active_timers().len(),
    }
}

/// Headless walkthrough of the scrollbars widget for native builds.
///
/// Usage: `scrollbars-demo [config.json] [--save]`. Loads the config file
/// (`scrollbars.json` by default), then drives a widget through scrolling, a
/// wheel turn over a track and a thumb drag on the in-memory host, logging
/// what the widget reports. `--save` writes the options in effect back to
/// the file, which creates a default one when it is missing.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    let mut path = PathBuf::from(ConfigFile::default_filename());
    let mut save = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--save" => save = true,
            _ => path = PathBuf::from(arg),
        }
    }
    let config = ConfigFile::load_or_default(&path);

    env_logger::Builder::new()
        .filter_level(config.log_level.into())
        .parse_default_env()
        .init();
    log::info!("Using options from {:?}", path);

    if save {
        if let Err(e) = config.save(&path) {
            log::error!("{}", e);
        }
    }

    let summary = walkthrough(config.scrollbars);
    log::info!(
        "Unmounted after {} messages: {} listeners, {} timers left",
        summary.messages,
        summary.listeners_left,
        summary.timers_left
    );
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_walkthrough_releases_everything() {
        let summary = walkthrough(ScrollbarsConfig::default());
        assert!(summary.messages > 0);
        assert_eq!(summary.final_values.scroll_top, 3000.0);
        assert_eq!(summary.final_values.scroll_height, 3000.0);
        assert_eq!(summary.listeners_left, 0);
        assert_eq!(summary.timers_left, 0);
    }
}
