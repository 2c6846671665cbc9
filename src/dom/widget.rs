//! A widget attached to a live container element.

use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

use scrollbars_core::{HostEvent, PartProps, Parts, RenderOutput, ScrollValues, Scrollbars, Style};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use super::host::{Dispatcher, EventFlags};
use super::{DomError, DomHost, DomNode};

type Sink<M> = Rc<RefCell<Box<dyn FnMut(M)>>>;

/// Container plus the five driven parts, in render order.
struct Elements {
    container: HtmlElement,
    parts: Parts<DomNode>,
}

impl Elements {
    /// Wrap the container's current children in a view and append the
    /// tracks and thumbs.
    ///
    /// `mount` becomes the container when it already is a `tag_name`
    /// element; otherwise a `tag_name` element is created inside it and
    /// takes over its children.
    fn build(document: &Document, mount: HtmlElement, tag_name: &str) -> Result<Self, DomError> {
        let element = |tag: &str| -> Result<HtmlElement, DomError> {
            document
                .create_element(tag)?
                .dyn_into::<HtmlElement>()
                .map_err(|_| DomError::Cast("HtmlElement"))
        };
        let div = || element("div");
        let view = div()?;
        while let Some(child) = mount.first_child() {
            view.append_child(&child)?;
        }
        let container = if mount.tag_name().eq_ignore_ascii_case(tag_name) {
            mount
        } else {
            let container = element(tag_name)?;
            mount.append_child(&container)?;
            log::debug!("Created <{}> container inside <{}>", tag_name, mount.tag_name());
            container
        };
        let track_horizontal = div()?;
        let track_vertical = div()?;
        let thumb_horizontal = div()?;
        let thumb_vertical = div()?;
        track_horizontal.append_child(&thumb_horizontal)?;
        track_vertical.append_child(&thumb_vertical)?;
        container.append_child(&view)?;
        container.append_child(&track_horizontal)?;
        container.append_child(&track_vertical)?;

        Ok(Self {
            container,
            parts: Parts {
                view: DomNode::new(view),
                track_horizontal: DomNode::new(track_horizontal),
                track_vertical: DomNode::new(track_vertical),
                thumb_horizontal: DomNode::new(thumb_horizontal),
                thumb_vertical: DomNode::new(thumb_vertical),
            },
        })
    }

    fn with_props<'a>(&'a self, output: &'a RenderOutput) -> [(&'a HtmlElement, &'a PartProps); 6] {
        [
            (&self.container, &output.container),
            (self.parts.view.element(), &output.view),
            (self.parts.track_horizontal.element(), &output.track_horizontal),
            (self.parts.track_vertical.element(), &output.track_vertical),
            (self.parts.thumb_horizontal.element(), &output.thumb_horizontal),
            (self.parts.thumb_vertical.element(), &output.thumb_vertical),
        ]
    }
}

struct Shared<M> {
    widget: Scrollbars<DomNode, M>,
    host: DomHost,
    elements: Elements,
    /// Declarations written by the last render, per part.
    applied: [Style; 6],
}

impl<M> Shared<M> {
    /// Write the render output as a diff against the previous one, leaving
    /// properties the widget writes itself (thumb geometry, track opacity)
    /// alone unless the render output changed them.
    fn apply_render(&mut self) {
        let output = self.widget.render();
        if let Some(id) = &output.id {
            self.elements.container.set_id(id);
        }
        for ((element, props), previous) in self
            .elements
            .with_props(&output)
            .into_iter()
            .zip(self.applied.iter_mut())
        {
            element.set_class_name(&props.class_name);
            let style = element.style();
            for (property, _) in previous.iter() {
                if props.style.get(property).is_none() {
                    if let Err(e) = style.remove_property(property) {
                        log::warn!("Failed to remove {}: {:?}", property, e);
                    }
                }
            }
            for (property, value) in props.style.iter() {
                if previous.get(property) != Some(value) {
                    if let Err(e) = style.set_property(property, value) {
                        log::warn!("Failed to set {}: {} ({:?})", property, value, e);
                    }
                }
            }
            *previous = props.style.clone();
        }
    }
}

fn route<M>(shared: &Weak<RefCell<Shared<M>>>, sink: &Sink<M>, event: HostEvent) -> EventFlags {
    let Some(shared) = shared.upgrade() else {
        return EventFlags::default();
    };
    let outcome = {
        let Ok(mut guard) = shared.try_borrow_mut() else {
            log::warn!("Dropped {:?} delivered during another dispatch", event);
            return EventFlags::default();
        };
        let inner = &mut *guard;
        inner.host.release_detached();
        let outcome = inner.widget.dispatch(&mut inner.host, event);
        if outcome.needs_render {
            inner.apply_render();
        }
        outcome
    };
    let flags = EventFlags {
        prevent_default: outcome.prevent_default,
        stop_immediate_propagation: outcome.stop_immediate_propagation,
    };
    deliver(sink, outcome.messages);
    flags
}

/// Hand messages to the sink outside of any widget borrow, so the sink may
/// call back into the widget.
fn deliver<M>(sink: &Sink<M>, messages: Vec<M>) {
    if messages.is_empty() {
        return;
    }
    match sink.try_borrow_mut() {
        Ok(mut sink) => {
            for message in messages {
                (*sink)(message);
            }
        }
        Err(_) => log::warn!("Dropped {} messages sent while the sink was busy", messages.len()),
    }
}

/// Custom scrollbars mounted into a container element.
///
/// The container's children move into a generated view element; the tracks
/// and thumbs are appended next to it. The container is the element passed
/// to [`attach`](Self::attach) when its tag matches the configured
/// `tag_name`, else a new element of that tag inside it. Observer messages
/// go to `sink`.
pub struct DomScrollbars<M: 'static> {
    shared: Rc<RefCell<Shared<M>>>,
}

impl<M: 'static> DomScrollbars<M> {
    pub fn attach(
        container: HtmlElement,
        widget: Scrollbars<DomNode, M>,
        sink: impl FnMut(M) + 'static,
    ) -> Result<Self, DomError> {
        let window = web_sys::window().ok_or(DomError::NoWindow)?;
        let document = window.document().ok_or(DomError::NoDocument)?;
        let elements = Elements::build(&document, container, &widget.config().tag_name)?;
        let parts = elements.parts.clone();
        let sink: Sink<M> = Rc::new(RefCell::new(Box::new(sink)));

        let shared = Rc::new_cyclic(|weak: &Weak<RefCell<Shared<M>>>| {
            let weak = weak.clone();
            let route_sink = Rc::clone(&sink);
            let dispatch: Dispatcher = Rc::new(move |event| route(&weak, &route_sink, event));
            RefCell::new(Shared {
                widget,
                host: DomHost::new(window, document, parts.clone(), dispatch),
                elements,
                applied: Default::default(),
            })
        });

        let messages = {
            let mut guard = shared.borrow_mut();
            let inner = &mut *guard;
            inner.apply_render();
            let outcome = inner.widget.mount(&mut inner.host, parts);
            if outcome.needs_render {
                inner.apply_render();
            }
            outcome.messages
        };
        deliver(&sink, messages);

        Ok(Self { shared })
    }

    /// The widget, for reads and programmatic scrolling. `None` while an
    /// event is being dispatched.
    pub fn widget(&self) -> Option<Ref<'_, Scrollbars<DomNode, M>>> {
        self.shared
            .try_borrow()
            .ok()
            .map(|shared| Ref::map(shared, |shared| &shared.widget))
    }

    /// Current metrics, zeros while busy.
    pub fn values(&self) -> ScrollValues {
        self.widget().map(|widget| widget.values()).unwrap_or_default()
    }

    /// Recompute thumb geometry on the next frame.
    pub fn update(&self) {
        self.with_host(|widget, host| widget.request_sync(host));
    }

    /// Like [`update`](Self::update), also running `callback` with the
    /// metrics read at that frame.
    pub fn update_with(&self, callback: impl FnOnce(&ScrollValues) -> Option<M> + 'static) {
        self.with_host(|widget, host| widget.request_sync_with(host, callback));
    }

    /// Release listeners, timers and frames. The generated elements stay.
    pub fn detach(&self) {
        self.with_host(|widget, host| widget.unmount(host));
    }

    fn with_host(&self, f: impl FnOnce(&mut Scrollbars<DomNode, M>, &mut DomHost)) {
        match self.shared.try_borrow_mut() {
            Ok(mut guard) => {
                let inner = &mut *guard;
                f(&mut inner.widget, &mut inner.host);
            }
            Err(_) => log::warn!("Scrollbars busy, request dropped"),
        }
    }
}

impl<M: 'static> Drop for DomScrollbars<M> {
    fn drop(&mut self) {
        self.detach();
    }
}
