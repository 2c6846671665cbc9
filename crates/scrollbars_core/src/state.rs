//! Runtime state owned by a mounted widget: its nodes, listener
//! subscriptions and the drag session resource.

use crate::host::{EventKind, Host, ListenTarget, ListenerHandle, Node, ObserverHandle};
use crate::layout::Axis;

/// The five elements the widget drives.
#[derive(Debug, Clone)]
pub struct Parts<N> {
    pub view: N,
    pub track_horizontal: N,
    pub track_vertical: N,
    pub thumb_horizontal: N,
    pub thumb_vertical: N,
}

impl<N: Node> Parts<N> {
    pub fn track(&self, axis: Axis) -> &N {
        match axis {
            Axis::Horizontal => &self.track_horizontal,
            Axis::Vertical => &self.track_vertical,
        }
    }

    pub fn thumb(&self, axis: Axis) -> &N {
        match axis {
            Axis::Horizontal => &self.thumb_horizontal,
            Axis::Vertical => &self.thumb_vertical,
        }
    }
}

/// Listeners and the mutation observer attached at mount.
#[derive(Debug, Default)]
pub struct Subscriptions {
    listeners: Vec<ListenerHandle>,
    observer: Option<ObserverHandle>,
}

impl Subscriptions {
    /// Attach the view's scroll listener and mutation observer, plus the
    /// track/thumb/window listeners when `interactive`.
    pub fn attach<H: Host>(host: &mut H, interactive: bool) -> Self {
        let mut listeners = vec![host.listen(ListenTarget::View, EventKind::Scroll)];
        if interactive {
            for axis in Axis::ALL {
                let track = ListenTarget::Track(axis);
                listeners.push(host.listen(track, EventKind::MouseEnter));
                listeners.push(host.listen(track, EventKind::MouseLeave));
                listeners.push(host.listen(track, EventKind::MouseDown));
                listeners.push(host.listen(track, EventKind::Wheel));
                listeners.push(host.listen(ListenTarget::Thumb(axis), EventKind::MouseDown));
            }
            listeners.push(host.listen(ListenTarget::Window, EventKind::Resize));
        }
        Self {
            listeners,
            observer: Some(host.observe_mutations()),
        }
    }

    /// Remove everything attached. Safe to call repeatedly.
    pub fn detach<H: Host>(&mut self, host: &mut H) {
        for handle in self.listeners.drain(..) {
            host.unlisten(handle);
        }
        if let Some(observer) = self.observer.take() {
            host.disconnect(observer);
        }
    }
}

/// An active drag: the document-level move/up listeners, the selection
/// block, and the pointer's distance from each thumb's trailing edge.
///
/// Acquired at drag start and released on every exit path.
#[derive(Debug)]
pub struct DragSession {
    horizontal: Option<f64>,
    vertical: Option<f64>,
    move_listener: ListenerHandle,
    up_listener: ListenerHandle,
}

impl DragSession {
    pub fn acquire<H: Host>(host: &mut H) -> Self {
        host.set_selection_disabled(true);
        Self {
            horizontal: None,
            vertical: None,
            move_listener: host.listen(ListenTarget::Document, EventKind::MouseMove),
            up_listener: host.listen(ListenTarget::Document, EventKind::MouseUp),
        }
    }

    /// Anchor for `axis`, `None` when that axis is not being dragged.
    pub fn anchor(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }

    /// Anchor the drag on `axis`. The other axis stops following the pointer.
    pub fn set_anchor(&mut self, axis: Axis, distance: f64) {
        let (anchored, other) = match axis {
            Axis::Horizontal => (&mut self.horizontal, &mut self.vertical),
            Axis::Vertical => (&mut self.vertical, &mut self.horizontal),
        };
        *anchored = Some(distance);
        *other = None;
    }

    pub fn release<H: Host>(self, host: &mut H) {
        host.unlisten(self.move_listener);
        host.unlisten(self.up_listener);
        host.set_selection_disabled(false);
    }
}

/// Which tracks the pointer is over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackHover {
    horizontal: bool,
    vertical: bool,
}

impl TrackHover {
    pub fn set(&mut self, axis: Axis, over: bool) {
        match axis {
            Axis::Horizontal => self.horizontal = over,
            Axis::Vertical => self.vertical = over,
        }
    }

    pub fn any(&self) -> bool {
        self.horizontal || self.vertical
    }
}
