//! `Host` over the browser event loop.
//!
//! Every callback handed to the browser routes into one dispatcher that
//! re-enters the widget. Frame and timer callbacks are single long-lived
//! closures; listeners get one closure each, kept alive until they are
//! removed and the next event arrives.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use scrollbars_core::{
    EventKind, FrameHandle, Host, HostEvent, ListenTarget, ListenerHandle, ObserverHandle,
    Parts, Point, TimerHandle,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Event, EventTarget, MouseEvent, MutationObserver, MutationObserverInit, WheelEvent,
    Window,
};

use super::DomNode;

/// What the native event should do after the widget handled it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventFlags {
    pub prevent_default: bool,
    pub stop_immediate_propagation: bool,
}

/// Routes a host event into the widget.
pub type Dispatcher = Rc<dyn Fn(HostEvent) -> EventFlags>;

struct Listener {
    target: EventTarget,
    kind: EventKind,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn remove(&self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.kind.name(), self.callback.as_ref().unchecked_ref())
        {
            log::warn!("Failed to remove {} listener: {:?}", self.kind.name(), e);
        }
    }
}

/// Browser request behind a frame handle.
#[derive(Debug, Clone, Copy)]
enum FrameSource {
    Animation(i32),
    /// Zero-delay timeout standing in when `requestAnimationFrame` fails.
    Timeout(i32),
}

#[derive(Debug, Clone, Copy)]
struct TimerEntry {
    browser_id: i32,
    repeating: bool,
}

/// Browser services for one widget.
pub struct DomHost {
    window: Window,
    document: Document,
    parts: Parts<DomNode>,
    dispatch: Dispatcher,
    next_id: u64,

    frames: Rc<RefCell<VecDeque<(FrameHandle, FrameSource)>>>,
    frame_callback: Closure<dyn FnMut(f64)>,

    timers: Rc<RefCell<HashMap<u64, TimerEntry>>>,
    timer_callback: Closure<dyn FnMut(JsValue)>,

    listeners: HashMap<u64, Listener>,
    /// Removed listeners whose closures may still be on the call stack.
    detached: Vec<Listener>,

    observer: Option<MutationObserver>,
    observer_callback: Closure<dyn FnMut(js_sys::Array, MutationObserver)>,
    observing: Option<ObserverHandle>,

    select_blocker: Closure<dyn FnMut() -> bool>,
    selection_disabled: bool,
}

impl DomHost {
    pub fn new(window: Window, document: Document, parts: Parts<DomNode>, dispatch: Dispatcher) -> Self {
        let frames: Rc<RefCell<VecDeque<(FrameHandle, FrameSource)>>> =
            Rc::new(RefCell::new(VecDeque::new()));
        let frame_callback = {
            let frames = Rc::clone(&frames);
            let dispatch = Rc::clone(&dispatch);
            Closure::wrap(Box::new(move |_timestamp: f64| {
                let frame = frames.borrow_mut().pop_front();
                if let Some((handle, _)) = frame {
                    dispatch(HostEvent::Frame(handle));
                }
            }) as Box<dyn FnMut(f64)>)
        };

        let timers: Rc<RefCell<HashMap<u64, TimerEntry>>> = Rc::new(RefCell::new(HashMap::new()));
        let timer_callback = {
            let timers = Rc::clone(&timers);
            let dispatch = Rc::clone(&dispatch);
            Closure::wrap(Box::new(move |id: JsValue| {
                let Some(id) = id.as_f64().map(|id| id as u64) else {
                    return;
                };
                let live = {
                    let mut timers = timers.borrow_mut();
                    match timers.get(&id).copied() {
                        Some(entry) if !entry.repeating => timers.remove(&id).is_some(),
                        Some(_) => true,
                        None => false,
                    }
                };
                if live {
                    dispatch(HostEvent::Timer(TimerHandle(id)));
                }
            }) as Box<dyn FnMut(JsValue)>)
        };

        let observer_callback = {
            let dispatch = Rc::clone(&dispatch);
            Closure::wrap(Box::new(move |_records: js_sys::Array, _observer: MutationObserver| {
                dispatch(HostEvent::Mutation);
            }) as Box<dyn FnMut(js_sys::Array, MutationObserver)>)
        };

        Self {
            window,
            document,
            parts,
            dispatch,
            next_id: 0,
            frames,
            frame_callback,
            timers,
            timer_callback,
            listeners: HashMap::new(),
            detached: Vec::new(),
            observer: None,
            observer_callback,
            observing: None,
            select_blocker: Closure::wrap(Box::new(|| false) as Box<dyn FnMut() -> bool>),
            selection_disabled: false,
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Drop closures of listeners removed during earlier events.
    pub fn release_detached(&mut self) {
        self.detached.clear();
    }

    fn event_target(&self, target: ListenTarget) -> EventTarget {
        match target {
            ListenTarget::View => self.parts.view.element().clone().into(),
            ListenTarget::Track(axis) => self.parts.track(axis).element().clone().into(),
            ListenTarget::Thumb(axis) => self.parts.thumb(axis).element().clone().into(),
            ListenTarget::Window => self.window.clone().into(),
            ListenTarget::Document => self.document.clone().into(),
        }
    }

    fn arm_timer(&mut self, delay_ms: u32, repeating: bool) -> TimerHandle {
        let id = self.next_id();
        let callback = self.timer_callback.as_ref().unchecked_ref();
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        let argument = JsValue::from_f64(id as f64);
        let result = if repeating {
            self.window
                .set_interval_with_callback_and_timeout_and_arguments_1(callback, delay, &argument)
        } else {
            self.window
                .set_timeout_with_callback_and_timeout_and_arguments_1(callback, delay, &argument)
        };
        match result {
            Ok(browser_id) => {
                self.timers.borrow_mut().insert(
                    id,
                    TimerEntry {
                        browser_id,
                        repeating,
                    },
                );
            }
            Err(e) => log::error!("Failed to arm timer: {:?}", e),
        }
        TimerHandle(id)
    }
}

/// Translate a native event into the widget's vocabulary.
fn translate(target: ListenTarget, kind: EventKind, event: &Event) -> Option<HostEvent> {
    let client = || {
        event
            .dyn_ref::<MouseEvent>()
            .map(|mouse| Point::new(f64::from(mouse.client_x()), f64::from(mouse.client_y())))
    };
    let host_event = match (target, kind) {
        (ListenTarget::View, EventKind::Scroll) => HostEvent::Scroll,
        (ListenTarget::Track(axis), EventKind::MouseEnter) => HostEvent::TrackMouseEnter(axis),
        (ListenTarget::Track(axis), EventKind::MouseLeave) => HostEvent::TrackMouseLeave(axis),
        (ListenTarget::Track(axis), EventKind::MouseDown) => HostEvent::TrackMouseDown {
            axis,
            client: client()?,
        },
        (ListenTarget::Thumb(axis), EventKind::MouseDown) => HostEvent::ThumbMouseDown {
            axis,
            client: client()?,
        },
        (ListenTarget::Track(axis), EventKind::Wheel) => {
            let wheel = event.dyn_ref::<WheelEvent>()?;
            HostEvent::TrackWheel {
                axis,
                delta: Point::new(wheel.delta_x(), wheel.delta_y()),
            }
        }
        (ListenTarget::Document, EventKind::MouseMove) => HostEvent::DragMove { client: client()? },
        (ListenTarget::Document, EventKind::MouseUp) => HostEvent::DragEnd,
        (ListenTarget::Window, EventKind::Resize) => HostEvent::WindowResize,
        _ => return None,
    };
    Some(host_event)
}

impl Host for DomHost {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let callback = self.frame_callback.as_ref().unchecked_ref();
        let source = match self.window.request_animation_frame(callback) {
            Ok(id) => FrameSource::Animation(id),
            Err(e) => {
                log::warn!("requestAnimationFrame failed, using a timeout: {:?}", e);
                match self
                    .window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(callback, 0)
                {
                    Ok(id) => FrameSource::Timeout(id),
                    Err(e) => {
                        log::error!("Failed to schedule a frame: {:?}", e);
                        return None;
                    }
                }
            }
        };
        let handle = FrameHandle(self.next_id());
        self.frames.borrow_mut().push_back((handle, source));
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let source = {
            let mut frames = self.frames.borrow_mut();
            let Some(index) = frames.iter().position(|(frame, _)| *frame == handle) else {
                return;
            };
            frames.remove(index).map(|(_, source)| source)
        };
        let result = match source {
            Some(FrameSource::Animation(id)) => self.window.cancel_animation_frame(id),
            Some(FrameSource::Timeout(id)) => {
                self.window.clear_timeout_with_handle(id);
                Ok(())
            }
            None => Ok(()),
        };
        if let Err(e) = result {
            log::warn!("Failed to cancel animation frame: {:?}", e);
        }
    }

    fn set_timeout(&mut self, delay_ms: u32) -> TimerHandle {
        self.arm_timer(delay_ms, false)
    }

    fn set_interval(&mut self, period_ms: u32) -> TimerHandle {
        self.arm_timer(period_ms, true)
    }

    fn clear_timer(&mut self, handle: TimerHandle) {
        let Some(entry) = self.timers.borrow_mut().remove(&handle.0) else {
            return;
        };
        if entry.repeating {
            self.window.clear_interval_with_handle(entry.browser_id);
        } else {
            self.window.clear_timeout_with_handle(entry.browser_id);
        }
    }

    fn listen(&mut self, target: ListenTarget, kind: EventKind) -> ListenerHandle {
        let id = self.next_id();
        let dispatch = Rc::clone(&self.dispatch);
        let callback = Closure::wrap(Box::new(move |event: Event| {
            let Some(host_event) = translate(target, kind, &event) else {
                return;
            };
            let flags = dispatch(host_event);
            if flags.prevent_default {
                event.prevent_default();
            }
            if flags.stop_immediate_propagation {
                event.stop_immediate_propagation();
            }
        }) as Box<dyn FnMut(Event)>);

        let event_target = self.event_target(target);
        match event_target.add_event_listener_with_callback(kind.name(), callback.as_ref().unchecked_ref()) {
            Ok(()) => {
                self.listeners.insert(
                    id,
                    Listener {
                        target: event_target,
                        kind,
                        callback,
                    },
                );
            }
            Err(e) => log::error!("Failed to add {} listener: {:?}", kind.name(), e),
        }
        ListenerHandle(id)
    }

    fn unlisten(&mut self, handle: ListenerHandle) {
        if let Some(listener) = self.listeners.remove(&handle.0) {
            listener.remove();
            self.detached.push(listener);
        }
    }

    fn observe_mutations(&mut self) -> ObserverHandle {
        let id = ObserverHandle(self.next_id());
        if self.observer.is_none() {
            match MutationObserver::new(self.observer_callback.as_ref().unchecked_ref()) {
                Ok(observer) => self.observer = Some(observer),
                Err(e) => {
                    log::error!("Failed to create mutation observer: {:?}", e);
                    return id;
                }
            }
        }
        if let Some(observer) = &self.observer {
            let init = MutationObserverInit::new();
            init.set_attributes(true);
            init.set_child_list(true);
            init.set_subtree(true);
            match observer.observe_with_options(self.parts.view.element(), &init) {
                Ok(()) => self.observing = Some(id),
                Err(e) => log::error!("Failed to observe view mutations: {:?}", e),
            }
        }
        id
    }

    fn disconnect(&mut self, handle: ObserverHandle) {
        if self.observing != Some(handle) {
            return;
        }
        if let Some(observer) = &self.observer {
            observer.disconnect();
        }
        self.observing = None;
    }

    fn set_selection_disabled(&mut self, disabled: bool) {
        if self.selection_disabled == disabled {
            return;
        }
        self.selection_disabled = disabled;
        let Some(body) = self.document.body() else {
            return;
        };
        let style = body.style();
        let result = if disabled {
            self.document
                .set_onselectstart(Some(self.select_blocker.as_ref().unchecked_ref()));
            style
                .set_property("user-select", "none")
                .and_then(|()| style.set_property("-webkit-user-select", "none"))
        } else {
            self.document.set_onselectstart(None);
            style
                .remove_property("user-select")
                .and_then(|_| style.remove_property("-webkit-user-select"))
                .map(|_| ())
        };
        if let Err(e) = result {
            log::warn!("Failed to toggle text selection: {:?}", e);
        }
    }
}

impl Drop for DomHost {
    fn drop(&mut self) {
        // The widget releases everything on unmount; this covers a host
        // dropped while still mounted.
        for (_, listener) in self.listeners.drain() {
            listener.remove();
        }
        let frames: Vec<FrameHandle> = self.frames.borrow().iter().map(|(frame, _)| *frame).collect();
        for frame in frames {
            self.cancel_frame(frame);
        }
        let timers: Vec<u64> = self.timers.borrow().keys().copied().collect();
        for id in timers {
            self.clear_timer(TimerHandle(id));
        }
        if let Some(observer) = &self.observer {
            observer.disconnect();
        }
        self.set_selection_disabled(false);
    }
}

