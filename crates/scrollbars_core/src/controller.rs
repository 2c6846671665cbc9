//! The scrollbars widget controller.
//!
//! `Scrollbars` keeps the rendered tracks and thumbs in step with the view's
//! native scroll position. The host routes native events and timer/frame
//! callbacks into [`Scrollbars::dispatch`]; geometry is recomputed at most once
//! per animation frame, and observer messages are returned to the caller.

use web_time::Instant;

use crate::callback::{Callback, Callback0, Observers, SyncCallback};
use crate::config::{format_px, ScrollbarsConfig};
use crate::constants::{OPACITY_HIDDEN, OPACITY_VISIBLE};
use crate::detector::{ScrollEndStrategy, ScrollingDetector};
use crate::event::{HostEvent, Outcome};
use crate::geometry::{AxisGeometry, ScrollValues, ThumbSizing};
use crate::host::{Host, Node, TimerHandle};
use crate::layout::{Axis, Point};
use crate::probe::ScrollbarWidthProbe;
use crate::render::{self, Customizer, PartProps, RenderCustomizers, RenderInputs, RenderOutput};
use crate::scheduler::FrameScheduler;
use crate::state::{DragSession, Parts, Subscriptions, TrackHover};
use crate::styles::{Style, Styles};

/// Work queued for the next frame sync.
enum FrameTask<M> {
    /// Record the frame's offsets for the scrolling detector and report them.
    RecordScroll,
    /// Start the drag deferred by a track press, once the thumb has moved.
    StartTrackDrag { axis: Axis, client: Point },
    Callback(SyncCallback<M>),
}

/// Custom scrollbars around a natively scrolling view.
///
/// `N` is the host's element handle, `M` the embedding application's message
/// type.
pub struct Scrollbars<N, M> {
    config: ScrollbarsConfig,
    styles: Styles,
    observers: Observers<M>,
    customizers: RenderCustomizers,
    container_style: Style,
    id: Option<String>,
    probe: Box<dyn ScrollbarWidthProbe>,

    parts: Option<Parts<N>>,
    subscriptions: Subscriptions,
    scheduler: FrameScheduler<FrameTask<M>>,
    detector: ScrollingDetector,
    drag: Option<DragSession>,
    hover: TrackHover,
    hide_timer: Option<TimerHandle>,
    scrollbar_width: f64,
    did_mount_universal: bool,
}

impl<N: Node, M> Scrollbars<N, M> {
    /// Create an unmounted widget. `probe` is queried right away so the
    /// first render already knows the native scrollbar width.
    pub fn new(config: ScrollbarsConfig, probe: impl ScrollbarWidthProbe + 'static) -> Self {
        let mut probe: Box<dyn ScrollbarWidthProbe> = Box::new(probe);
        let scrollbar_width = probe.scrollbar_width();
        Self {
            styles: Styles::new(config.disable_default_styles),
            config,
            observers: Observers::default(),
            customizers: RenderCustomizers::default(),
            container_style: Style::new(),
            id: None,
            probe,
            parts: None,
            subscriptions: Subscriptions::default(),
            scheduler: FrameScheduler::new(),
            detector: ScrollingDetector::default(),
            drag: None,
            hover: TrackHover::default(),
            hide_timer: None,
            scrollbar_width,
            did_mount_universal: false,
        }
    }

    // -------------------------------------------------------------------------
    // Builder
    // -------------------------------------------------------------------------

    pub fn on_scroll<F>(mut self, f: F) -> Self
    where
        F: Fn(ScrollValues) -> M + 'static,
    {
        self.observers.on_scroll = Callback::new(f);
        self
    }

    pub fn on_scroll_frame<F>(mut self, f: F) -> Self
    where
        F: Fn(ScrollValues) -> M + 'static,
    {
        self.observers.on_scroll_frame = Callback::new(f);
        self
    }

    pub fn on_scroll_start<F>(mut self, f: F) -> Self
    where
        F: Fn() -> M + 'static,
    {
        self.observers.on_scroll_start = Callback0::new(move |()| f());
        self
    }

    pub fn on_scroll_stop<F>(mut self, f: F) -> Self
    where
        F: Fn() -> M + 'static,
    {
        self.observers.on_scroll_stop = Callback0::new(move |()| f());
        self
    }

    pub fn on_update<F>(mut self, f: F) -> Self
    where
        F: Fn(ScrollValues) -> M + 'static,
    {
        self.observers.on_update = Callback::new(f);
        self
    }

    pub fn render_view(mut self, f: impl Fn(PartProps) -> PartProps + 'static) -> Self {
        self.customizers.view = Some(Box::new(f) as Customizer);
        self
    }

    pub fn render_track(mut self, axis: Axis, f: impl Fn(PartProps) -> PartProps + 'static) -> Self {
        let customizer = Some(Box::new(f) as Customizer);
        match axis {
            Axis::Horizontal => self.customizers.track_horizontal = customizer,
            Axis::Vertical => self.customizers.track_vertical = customizer,
        }
        self
    }

    pub fn render_thumb(mut self, axis: Axis, f: impl Fn(PartProps) -> PartProps + 'static) -> Self {
        let customizer = Some(Box::new(f) as Customizer);
        match axis {
            Axis::Horizontal => self.customizers.thumb_horizontal = customizer,
            Axis::Vertical => self.customizers.thumb_vertical = customizer,
        }
        self
    }

    /// Extra container declarations, applied over the defaults.
    pub fn style(mut self, style: Style) -> Self {
        self.container_style = style;
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Replace the default 100 ms polling scroll-end detection.
    pub fn scroll_end_strategy(mut self, strategy: impl ScrollEndStrategy + 'static) -> Self {
        self.detector = ScrollingDetector::new(Box::new(strategy));
        self
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &ScrollbarsConfig {
        &self.config
    }

    pub fn is_mounted(&self) -> bool {
        self.parts.is_some()
    }

    /// Attach to freshly mounted nodes and schedule the first sync.
    ///
    /// Track and thumb interaction is only wired when the platform reserves
    /// space for scrollbars; with overlay scrollbars only the view's scroll
    /// listener and the mutation observer are attached. Mounting again
    /// replaces the previous nodes.
    pub fn mount<H: Host>(&mut self, host: &mut H, parts: Parts<N>) -> Outcome<M> {
        if self.parts.is_some() {
            self.unmount(host);
        }
        let interactive = self.scrollbar_width > 0.0;
        self.subscriptions = Subscriptions::attach(host, interactive);
        self.parts = Some(parts);
        log::debug!(
            "Scrollbars mounted (scrollbar width {}px, interactive: {})",
            self.scrollbar_width,
            interactive
        );

        let mut outcome = Outcome::new();
        self.schedule(host, None);
        if self.config.universal && !self.did_mount_universal {
            self.did_mount_universal = true;
            outcome.needs_render = true;
        }
        outcome
    }

    /// Swap in new nodes after the embedding tree replaced any of them.
    pub fn replace_nodes<H: Host>(&mut self, host: &mut H, parts: Parts<N>) -> Outcome<M> {
        self.mount(host, parts)
    }

    /// Release every listener, timer, frame request and drag session.
    /// Safe to call at any time, any number of times.
    pub fn unmount<H: Host>(&mut self, host: &mut H) {
        self.subscriptions.detach(host);
        if let Some(session) = self.drag.take() {
            session.release(host);
        }
        self.scheduler.cancel(host);
        if let Some(timer) = self.hide_timer.take() {
            host.clear_timer(timer);
        }
        self.detector.cancel(host);
        self.hover = TrackHover::default();
        if self.parts.take().is_some() {
            log::debug!("Scrollbars unmounted");
        }
    }

    /// Props of every part for the embedding tree.
    pub fn render(&self) -> RenderOutput {
        let inputs = RenderInputs {
            config: &self.config,
            styles: &self.styles,
            container_style: &self.container_style,
            id: self.id.as_deref(),
            scrollbar_width: self.scrollbar_width,
            did_mount_universal: self.did_mount_universal,
        };
        render::render(&inputs, &self.customizers)
    }

    // -------------------------------------------------------------------------
    // Frame sync
    // -------------------------------------------------------------------------

    /// Recompute thumb geometry on the next frame.
    pub fn request_sync<H: Host>(&mut self, host: &mut H) {
        self.schedule(host, None);
    }

    /// Like [`request_sync`](Self::request_sync), also running `callback`
    /// with the metrics read when that frame is flushed.
    pub fn request_sync_with<H, F>(&mut self, host: &mut H, callback: F)
    where
        H: Host,
        F: FnOnce(&ScrollValues) -> Option<M> + 'static,
    {
        self.schedule(host, Some(FrameTask::Callback(Box::new(callback))));
    }

    fn schedule<H: Host>(&mut self, host: &mut H, task: Option<FrameTask<M>>) {
        self.scheduler.request(host, task);
    }

    fn sync<H: Host>(&mut self, host: &mut H, tasks: Vec<FrameTask<M>>, outcome: &mut Outcome<M>) {
        let started = Instant::now();
        let values = self.values();

        let fresh_width = self.probe.scrollbar_width();
        if fresh_width != self.scrollbar_width {
            log::debug!(
                "Scrollbar width changed from {}px to {}px",
                self.scrollbar_width,
                fresh_width
            );
            let was_interactive = self.scrollbar_width > 0.0;
            self.scrollbar_width = fresh_width;
            outcome.needs_render = true;
            if self.parts.is_some() && was_interactive != (fresh_width > 0.0) {
                self.subscriptions.detach(host);
                self.subscriptions = Subscriptions::attach(host, fresh_width > 0.0);
            }
        }

        if self.scrollbar_width > 0.0 {
            self.apply_thumbs(&values);
        }

        outcome.push(self.observers.on_update.call(values));

        for task in tasks {
            match task {
                FrameTask::RecordScroll => {
                    self.detector
                        .record(Point::new(values.scroll_left, values.scroll_top));
                    outcome.push(self.observers.on_scroll_frame.call(values));
                }
                FrameTask::StartTrackDrag { axis, client } => {
                    self.start_track_drag(host, axis, client);
                }
                FrameTask::Callback(callback) => outcome.push(callback(&values)),
            }
        }

        log::trace!("Scrollbars synced in {:?}", started.elapsed());
    }

    fn apply_thumbs(&self, values: &ScrollValues) {
        let Some(parts) = &self.parts else {
            return;
        };
        let sizing = self.sizing();
        for axis in Axis::ALL {
            let track = parts.track(axis);
            let thumb = parts.thumb(axis);
            let geometry = AxisGeometry::new(
                values.scroll_length(axis),
                values.client_length(axis),
                track.inner_size().along(axis),
            );
            let length = geometry.thumb_length(&sizing);
            let translation = geometry.thumb_translation(values.offset(axis), &sizing);
            let (size_property, translate) = match axis {
                Axis::Horizontal => ("width", "translateX"),
                Axis::Vertical => ("height", "translateY"),
            };
            write_style(thumb, size_property, &format_px(length));
            write_style(thumb, "transform", &format!("{translate}({translation}px)"));

            if self.config.hide_tracks_when_not_needed {
                let visibility = if values.overflows(axis) {
                    "visible"
                } else {
                    "hidden"
                };
                write_style(track, "visibility", visibility);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Handle one host event.
    pub fn dispatch<H: Host>(&mut self, host: &mut H, event: HostEvent) -> Outcome<M> {
        let mut outcome = Outcome::new();
        match event {
            HostEvent::Scroll => self.handle_scroll(host, &mut outcome),
            HostEvent::TrackMouseEnter(axis) => {
                self.hover.set(axis, true);
                if self.config.auto_hide {
                    self.show_tracks(host);
                }
            }
            HostEvent::TrackMouseLeave(axis) => {
                self.hover.set(axis, false);
                if self.config.auto_hide {
                    self.hide_tracks(host);
                }
            }
            HostEvent::TrackMouseDown { axis, client } => {
                self.handle_track_mouse_down(host, axis, client, &mut outcome);
            }
            HostEvent::ThumbMouseDown { axis, client } => {
                self.handle_thumb_mouse_down(host, axis, client, &mut outcome);
            }
            HostEvent::TrackWheel { axis, delta } => {
                if self.parts.is_some() {
                    outcome.prevent_default = true;
                    self.set_scroll_offset(axis, self.scroll_offset(axis) + delta.along(axis));
                }
            }
            HostEvent::DragMove { client } => self.handle_drag(client),
            HostEvent::DragEnd => self.handle_drag_end(host),
            HostEvent::WindowResize | HostEvent::Mutation => self.schedule(host, None),
            HostEvent::Frame(handle) => {
                if let Some(tasks) = self.scheduler.take_frame(handle) {
                    self.sync(host, tasks, &mut outcome);
                }
            }
            HostEvent::Timer(handle) => self.handle_timer(host, handle, &mut outcome),
            HostEvent::ScrollEnd => {
                if self.detector.native_end(host) {
                    self.handle_scroll_stop(host, &mut outcome);
                }
            }
        }
        outcome
    }

    fn handle_scroll<H: Host>(&mut self, host: &mut H, outcome: &mut Outcome<M>) {
        let values = self.values();
        outcome.push(self.observers.on_scroll.call(values));
        self.schedule(host, Some(FrameTask::RecordScroll));

        let current = Point::new(values.scroll_left, values.scroll_top);
        if self.detector.begin(host, current) {
            outcome.push(self.observers.on_scroll_start.emit());
            if self.config.auto_hide {
                self.show_tracks(host);
            }
        }
    }

    fn handle_scroll_stop<H: Host>(&mut self, host: &mut H, outcome: &mut Outcome<M>) {
        outcome.push(self.observers.on_scroll_stop.emit());
        if self.config.auto_hide {
            self.hide_tracks(host);
        }
    }

    fn handle_timer<H: Host>(&mut self, host: &mut H, handle: TimerHandle, outcome: &mut Outcome<M>) {
        if self.detector.owns_timer(handle) {
            if self.detector.tick(host) {
                self.handle_scroll_stop(host, outcome);
            }
        } else if self.hide_timer == Some(handle) {
            self.hide_timer = None;
            if !self.hide_suppressed() {
                self.set_track_opacity(OPACITY_HIDDEN);
            }
        }
    }

    fn handle_track_mouse_down<H: Host>(
        &mut self,
        host: &mut H,
        axis: Axis,
        client: Point,
        outcome: &mut Outcome<M>,
    ) {
        let (Some(parts), Some(geometry)) = (&self.parts, self.geometry(axis)) else {
            return;
        };
        outcome.prevent_default = true;
        let sizing = self.sizing();
        let track_edge = parts.track(axis).bounding_rect().leading_edge(axis);
        let thumb_length = geometry.thumb_length(&sizing);
        // Center the thumb under the pointer.
        let offset = (track_edge - client.along(axis)).abs() - thumb_length / 2.0;
        let scroll = geometry.scroll_offset_for_track_offset(offset, &sizing);
        self.set_scroll_offset(axis, scroll);
        self.schedule(host, Some(FrameTask::StartTrackDrag { axis, client }));
    }

    fn start_track_drag<H: Host>(&mut self, host: &mut H, axis: Axis, client: Point) {
        let Some(parts) = &self.parts else {
            return;
        };
        let rect = parts.thumb(axis).bounding_rect();
        let anchor = rect.size().along(axis) - (client.along(axis) - rect.leading_edge(axis));
        self.begin_drag(host, axis, anchor);
    }

    fn handle_thumb_mouse_down<H: Host>(
        &mut self,
        host: &mut H,
        axis: Axis,
        client: Point,
        outcome: &mut Outcome<M>,
    ) {
        let Some(parts) = &self.parts else {
            return;
        };
        outcome.prevent_default = true;
        outcome.stop_immediate_propagation = true;
        let thumb = parts.thumb(axis);
        let anchor = thumb.offset_size().along(axis)
            - (client.along(axis) - thumb.bounding_rect().leading_edge(axis));
        self.begin_drag(host, axis, anchor);
    }

    fn begin_drag<H: Host>(&mut self, host: &mut H, axis: Axis, anchor: f64) {
        if let Some(previous) = self.drag.take() {
            previous.release(host);
        }
        let mut session = DragSession::acquire(host);
        session.set_anchor(axis, anchor);
        self.drag = Some(session);
        log::debug!("Drag started on {axis:?} axis, anchor {anchor}px");
    }

    fn handle_drag(&self, client: Point) {
        let (Some(session), Some(parts)) = (&self.drag, &self.parts) else {
            return;
        };
        let sizing = self.sizing();
        for axis in Axis::ALL {
            let Some(anchor) = session.anchor(axis) else {
                continue;
            };
            let Some(geometry) = self.geometry(axis) else {
                continue;
            };
            let track_edge = parts.track(axis).bounding_rect().leading_edge(axis);
            let grab_point = geometry.thumb_length(&sizing) - anchor;
            let offset = client.along(axis) - track_edge - grab_point;
            let scroll = geometry.scroll_offset_for_track_offset(offset, &sizing);
            self.set_scroll_offset(axis, scroll);
        }
    }

    fn handle_drag_end<H: Host>(&mut self, host: &mut H) {
        if let Some(session) = self.drag.take() {
            session.release(host);
            log::debug!("Drag ended");
        }
        if self.config.auto_hide {
            self.hide_tracks(host);
        }
    }

    // -------------------------------------------------------------------------
    // Auto-hide
    // -------------------------------------------------------------------------

    fn hide_suppressed(&self) -> bool {
        self.drag.is_some() || self.detector.is_scrolling() || self.hover.any()
    }

    /// Cancel a pending fade and make both tracks fully visible.
    pub fn show_tracks<H: Host>(&mut self, host: &mut H) {
        if let Some(timer) = self.hide_timer.take() {
            host.clear_timer(timer);
        }
        self.set_track_opacity(OPACITY_VISIBLE);
    }

    /// (Re)arm the fade-out timer, unless a drag, a scroll or a hovering
    /// pointer keeps the tracks up.
    pub fn hide_tracks<H: Host>(&mut self, host: &mut H) {
        if self.hide_suppressed() {
            return;
        }
        if let Some(timer) = self.hide_timer.take() {
            host.clear_timer(timer);
        }
        self.hide_timer = Some(host.set_timeout(self.config.auto_hide_timeout));
    }

    fn set_track_opacity(&self, opacity: &str) {
        if let Some(parts) = &self.parts {
            for axis in Axis::ALL {
                write_style(parts.track(axis), "opacity", opacity);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Geometry and programmatic scrolling
    // -------------------------------------------------------------------------

    fn sizing(&self) -> ThumbSizing {
        self.config.thumb_sizing()
    }

    fn view(&self) -> Option<&N> {
        self.parts.as_ref().map(|parts| &parts.view)
    }

    fn geometry(&self, axis: Axis) -> Option<AxisGeometry> {
        let parts = self.parts.as_ref()?;
        AxisGeometry::read(axis, Some(&parts.view), Some(parts.track(axis)))
    }

    fn scroll_offset(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.scroll_left(),
            Axis::Vertical => self.scroll_top(),
        }
    }

    fn set_scroll_offset(&self, axis: Axis, value: f64) {
        match axis {
            Axis::Horizontal => self.set_scroll_left(value),
            Axis::Vertical => self.set_scroll_top(value),
        }
    }

    /// Current metrics of the view, zeros when unmounted.
    pub fn values(&self) -> ScrollValues {
        ScrollValues::read(self.view())
    }

    pub fn scroll_left(&self) -> f64 {
        self.view().map_or(0.0, |view| view.scroll_left())
    }

    pub fn scroll_top(&self) -> f64 {
        self.view().map_or(0.0, |view| view.scroll_top())
    }

    pub fn scroll_width(&self) -> f64 {
        self.view().map_or(0.0, |view| view.scroll_size().width)
    }

    pub fn scroll_height(&self) -> f64 {
        self.view().map_or(0.0, |view| view.scroll_size().height)
    }

    pub fn client_width(&self) -> f64 {
        self.view().map_or(0.0, |view| view.client_size().width)
    }

    pub fn client_height(&self) -> f64 {
        self.view().map_or(0.0, |view| view.client_size().height)
    }

    pub fn set_scroll_left(&self, left: f64) {
        if let Some(view) = self.view() {
            view.set_scroll_left(left);
        }
    }

    pub fn set_scroll_top(&self, top: f64) {
        if let Some(view) = self.view() {
            view.set_scroll_top(top);
        }
    }

    pub fn scroll_to_left(&self) {
        self.set_scroll_left(0.0);
    }

    pub fn scroll_to_top(&self) {
        self.set_scroll_top(0.0);
    }

    pub fn scroll_to_right(&self) {
        self.set_scroll_left(self.scroll_width());
    }

    pub fn scroll_to_bottom(&self) {
        self.set_scroll_top(self.scroll_height());
    }

    /// Same as [`set_scroll_top`](Self::set_scroll_top).
    pub fn scroll_to_y(&self, y: f64) {
        self.set_scroll_top(y);
    }

    /// Horizontal thumb width, 0 when unmounted or nothing overflows.
    pub fn thumb_horizontal_width(&self) -> f64 {
        self.geometry(Axis::Horizontal)
            .map_or(0.0, |geometry| geometry.thumb_length(&self.sizing()))
    }

    /// Vertical thumb height, 0 when unmounted or nothing overflows.
    pub fn thumb_vertical_height(&self) -> f64 {
        self.geometry(Axis::Vertical)
            .map_or(0.0, |geometry| geometry.thumb_length(&self.sizing()))
    }

    /// Scroll left matching a horizontal thumb offset.
    pub fn scroll_left_for_offset(&self, offset: f64) -> f64 {
        self.geometry(Axis::Horizontal).map_or(0.0, |geometry| {
            geometry.scroll_offset_for_track_offset(offset, &self.sizing())
        })
    }

    /// Scroll top matching a vertical thumb offset.
    pub fn scroll_top_for_offset(&self, offset: f64) -> f64 {
        self.geometry(Axis::Vertical).map_or(0.0, |geometry| {
            geometry.scroll_offset_for_track_offset(offset, &self.sizing())
        })
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_scrolling(&self) -> bool {
        self.detector.is_scrolling()
    }

    pub fn is_pointer_over_track(&self) -> bool {
        self.hover.any()
    }

    /// Last probed native scrollbar width.
    pub fn scrollbar_width(&self) -> f64 {
        self.scrollbar_width
    }

    /// Drag anchor of `axis` in the active session.
    pub fn drag_anchor(&self, axis: Axis) -> Option<f64> {
        self.drag.as_ref().and_then(|session| session.anchor(axis))
    }
}

/// Write an inline style unless it already has that value.
fn write_style<N: Node>(node: &N, property: &str, value: &str) {
    if node.style(property) != value {
        node.set_style(property, value);
    }
}
