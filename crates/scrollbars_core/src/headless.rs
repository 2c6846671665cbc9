//! In-memory host with a virtual clock.
//!
//! Used to run the widget without a browser: frames are delivered when asked
//! for, timers fire as the clock is advanced, and every listener, observer and
//! style write is recorded for inspection. Nodes have no layout engine; their
//! metrics are whatever was last set.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use crate::controller::Scrollbars;
use crate::event::{HostEvent, Outcome};
use crate::host::{
    EventKind, FrameHandle, Host, ListenTarget, ListenerHandle, Node, ObserverHandle, TimerHandle,
};
use crate::layout::{Bounds, Size};
use crate::state::Parts;

#[derive(Debug, Default)]
struct NodeState {
    scroll_left: f64,
    scroll_top: f64,
    scroll_size: Size,
    client_size: Size,
    padding: f64,
    bounds: Bounds,
    styles: HashMap<String, String>,
    style_writes: usize,
}

/// Shared handle to an in-memory element.
#[derive(Debug, Clone, Default)]
pub struct HeadlessNode {
    state: Rc<RefCell<NodeState>>,
}

impl HeadlessNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scrollable view with the given content and viewport sizes.
    pub fn view(scroll: Size, client: Size) -> Self {
        let node = Self::new();
        node.set_scroll_size(scroll);
        node.set_client_size(client);
        node.set_bounds(Bounds::new(0.0, 0.0, client.width, client.height));
        node
    }

    /// A plain element occupying `bounds`, with a matching client size.
    pub fn element(bounds: Bounds) -> Self {
        let node = Self::new();
        node.set_bounds(bounds);
        node.set_client_size(bounds.size());
        node
    }

    pub fn set_scroll_size(&self, size: Size) {
        self.state.borrow_mut().scroll_size = size;
    }

    pub fn set_client_size(&self, size: Size) {
        self.state.borrow_mut().client_size = size;
    }

    pub fn set_bounds(&self, bounds: Bounds) {
        self.state.borrow_mut().bounds = bounds;
    }

    /// Uniform padding subtracted from the client size for `inner_size`.
    pub fn set_padding(&self, padding: f64) {
        self.state.borrow_mut().padding = padding;
    }

    /// Number of inline style writes so far.
    pub fn style_writes(&self) -> usize {
        self.state.borrow().style_writes
    }
}

impl Node for HeadlessNode {
    fn scroll_left(&self) -> f64 {
        self.state.borrow().scroll_left
    }

    fn scroll_top(&self) -> f64 {
        self.state.borrow().scroll_top
    }

    fn set_scroll_left(&self, value: f64) {
        self.state.borrow_mut().scroll_left = value;
    }

    fn set_scroll_top(&self, value: f64) {
        self.state.borrow_mut().scroll_top = value;
    }

    fn scroll_size(&self) -> Size {
        self.state.borrow().scroll_size
    }

    fn client_size(&self) -> Size {
        self.state.borrow().client_size
    }

    fn inner_size(&self) -> Size {
        let state = self.state.borrow();
        Size::new(
            (state.client_size.width - state.padding * 2.0).max(0.0),
            (state.client_size.height - state.padding * 2.0).max(0.0),
        )
    }

    fn offset_size(&self) -> Size {
        self.state.borrow().bounds.size()
    }

    fn bounding_rect(&self) -> Bounds {
        self.state.borrow().bounds
    }

    fn style(&self, property: &str) -> String {
        self.state
            .borrow()
            .styles
            .get(property)
            .cloned()
            .unwrap_or_default()
    }

    fn set_style(&self, property: &str, value: &str) {
        let mut state = self.state.borrow_mut();
        state.style_writes += 1;
        if value.is_empty() {
            state.styles.remove(property);
        } else {
            state.styles.insert(property.to_string(), value.to_string());
        }
    }
}

/// Build the five parts from a view and two track rectangles. Thumbs start
/// at their track's leading edge with zero size.
pub fn parts(view: HeadlessNode, track_horizontal: Bounds, track_vertical: Bounds) -> Parts<HeadlessNode> {
    Parts {
        view,
        track_horizontal: HeadlessNode::element(track_horizontal),
        track_vertical: HeadlessNode::element(track_vertical),
        thumb_horizontal: HeadlessNode::element(Bounds::new(
            track_horizontal.x,
            track_horizontal.y,
            0.0,
            track_horizontal.height,
        )),
        thumb_vertical: HeadlessNode::element(Bounds::new(
            track_vertical.x,
            track_vertical.y,
            track_vertical.width,
            0.0,
        )),
    }
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    due_ms: u64,
    period_ms: Option<u32>,
}

/// Host whose services are plain bookkeeping.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    now_ms: u64,
    next_id: u64,
    frames: Vec<FrameHandle>,
    frames_unavailable: bool,
    timers: BTreeMap<u64, Timer>,
    listeners: BTreeMap<u64, (ListenTarget, EventKind)>,
    observer: Option<ObserverHandle>,
    selection_disabled: bool,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Make `request_frame` fail (`false`) or succeed again.
    pub fn set_frames_available(&mut self, available: bool) {
        self.frames_unavailable = !available;
    }

    pub fn pending_frames(&self) -> &[FrameHandle] {
        &self.frames
    }

    pub fn active_timers(&self) -> Vec<TimerHandle> {
        self.timers.keys().map(|id| TimerHandle(*id)).collect()
    }

    pub fn listeners(&self) -> Vec<(ListenTarget, EventKind)> {
        self.listeners.values().copied().collect()
    }

    pub fn has_listener(&self, target: ListenTarget, kind: EventKind) -> bool {
        self.listeners.values().any(|entry| *entry == (target, kind))
    }

    pub fn is_observing(&self) -> bool {
        self.observer.is_some()
    }

    pub fn selection_disabled(&self) -> bool {
        self.selection_disabled
    }

    /// Deliver the oldest pending frame. A frame fires once, so its handle
    /// leaves the queue before the widget sees it.
    pub fn fire_frame<N: Node, M>(&mut self, widget: &mut Scrollbars<N, M>) -> Option<Outcome<M>> {
        if self.frames.is_empty() {
            return None;
        }
        let handle = self.frames.remove(0);
        Some(widget.dispatch(self, HostEvent::Frame(handle)))
    }

    /// Deliver pending frames until none are left.
    pub fn flush_frames<N: Node, M>(&mut self, widget: &mut Scrollbars<N, M>) -> Vec<M> {
        let mut messages = Vec::new();
        while let Some(outcome) = self.fire_frame(widget) {
            messages.extend(outcome.messages);
        }
        messages
    }

    /// Move the clock forward by `ms`, firing timers in due order.
    pub fn advance<N: Node, M>(&mut self, widget: &mut Scrollbars<N, M>, ms: u64) -> Vec<M> {
        let target = self.now_ms + ms;
        let mut messages = Vec::new();
        while let Some(handle) = self.pop_due(target) {
            messages.extend(widget.dispatch(self, HostEvent::Timer(handle)).messages);
        }
        self.now_ms = target;
        messages
    }

    fn pop_due(&mut self, target: u64) -> Option<TimerHandle> {
        let (id, timer) = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.due_ms <= target)
            .min_by_key(|(id, timer)| (timer.due_ms, **id))
            .map(|(id, timer)| (*id, *timer))?;
        self.now_ms = timer.due_ms;
        match timer.period_ms {
            Some(period) => {
                self.timers.insert(
                    id,
                    Timer {
                        due_ms: timer.due_ms + u64::from(period.max(1)),
                        period_ms: Some(period),
                    },
                );
            }
            None => {
                self.timers.remove(&id);
            }
        }
        Some(TimerHandle(id))
    }
}

impl Host for HeadlessHost {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        if self.frames_unavailable {
            return None;
        }
        let handle = FrameHandle(self.next_id());
        self.frames.push(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.retain(|frame| *frame != handle);
    }

    fn set_timeout(&mut self, delay_ms: u32) -> TimerHandle {
        let id = self.next_id();
        self.timers.insert(
            id,
            Timer {
                due_ms: self.now_ms + u64::from(delay_ms),
                period_ms: None,
            },
        );
        TimerHandle(id)
    }

    fn set_interval(&mut self, period_ms: u32) -> TimerHandle {
        let id = self.next_id();
        self.timers.insert(
            id,
            Timer {
                due_ms: self.now_ms + u64::from(period_ms.max(1)),
                period_ms: Some(period_ms),
            },
        );
        TimerHandle(id)
    }

    fn clear_timer(&mut self, handle: TimerHandle) {
        self.timers.remove(&handle.0);
    }

    fn listen(&mut self, target: ListenTarget, kind: EventKind) -> ListenerHandle {
        let id = self.next_id();
        self.listeners.insert(id, (target, kind));
        ListenerHandle(id)
    }

    fn unlisten(&mut self, handle: ListenerHandle) {
        self.listeners.remove(&handle.0);
    }

    fn observe_mutations(&mut self) -> ObserverHandle {
        let handle = ObserverHandle(self.next_id());
        self.observer = Some(handle);
        handle
    }

    fn disconnect(&mut self, handle: ObserverHandle) {
        if self.observer == Some(handle) {
            self.observer = None;
        }
    }

    fn set_selection_disabled(&mut self, disabled: bool) {
        self.selection_disabled = disabled;
    }
}
