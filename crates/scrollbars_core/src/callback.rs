//! Message-producing observer callbacks.
//!
//! Observers never run against widget internals: they map a value to an
//! application message, and the widget hands the messages back to the caller
//! of [`Scrollbars::dispatch`](crate::Scrollbars::dispatch) once it is done
//! mutating its own state.
//!
//! ```
//! use scrollbars_core::{Callback, ScrollValues};
//!
//! enum Message {
//!     Scrolled(f64),
//! }
//!
//! let on_frame: Callback<ScrollValues, Message> =
//!     Callback::new(|values: ScrollValues| Message::Scrolled(values.top));
//! assert!(on_frame.is_some());
//! assert!(matches!(
//!     on_frame.call(ScrollValues::default()),
//!     Some(Message::Scrolled(_))
//! ));
//! ```

use std::fmt;

use crate::geometry::ScrollValues;

/// Optional `Fn(T) -> M` observer.
pub struct Callback<T, M> {
    f: Option<Box<dyn Fn(T) -> M>>,
}

impl<T, M> Callback<T, M> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T) -> M + 'static,
    {
        Self {
            f: Some(Box::new(f)),
        }
    }

    /// An unset observer.
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Run the observer, `None` when unset.
    pub fn call(&self, value: T) -> Option<M> {
        self.f.as_ref().map(|f| f(value))
    }

    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }

    pub fn is_none(&self) -> bool {
        self.f.is_none()
    }
}

impl<T, M> Default for Callback<T, M> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T, M> fmt::Debug for Callback<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("set", &self.is_some())
            .finish()
    }
}

/// Observer without an input value.
pub type Callback0<M> = Callback<(), M>;

impl<M> Callback0<M> {
    /// Equivalent to `call(())`.
    pub fn emit(&self) -> Option<M> {
        self.call(())
    }
}

/// One-shot callback queued by
/// [`Scrollbars::request_sync_with`](crate::Scrollbars::request_sync_with),
/// run with the metrics read when the frame is flushed.
pub type SyncCallback<M> = Box<dyn FnOnce(&ScrollValues) -> Option<M>>;

/// Observers of the scroll lifecycle.
pub struct Observers<M> {
    /// Every native scroll event, with metrics read at event time.
    pub on_scroll: Callback<ScrollValues, M>,
    /// The first frame after each scroll event.
    pub on_scroll_frame: Callback<ScrollValues, M>,
    /// Transition into the scrolling state.
    pub on_scroll_start: Callback0<M>,
    /// Transition back to idle.
    pub on_scroll_stop: Callback0<M>,
    /// Every completed frame sync.
    pub on_update: Callback<ScrollValues, M>,
}

impl<M> Default for Observers<M> {
    fn default() -> Self {
        Self {
            on_scroll: Callback::none(),
            on_scroll_frame: Callback::none(),
            on_scroll_start: Callback::none(),
            on_scroll_stop: Callback::none(),
            on_update: Callback::none(),
        }
    }
}

impl<M> fmt::Debug for Observers<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("on_scroll", &self.on_scroll)
            .field("on_scroll_frame", &self.on_scroll_frame)
            .field("on_scroll_start", &self.on_scroll_start)
            .field("on_scroll_stop", &self.on_scroll_stop)
            .field("on_update", &self.on_update)
            .finish()
    }
}
