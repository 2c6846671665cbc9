//! Browser embedding of the scrollbars widget (WASM only).
//!
//! [`DomScrollbars::attach`] turns an existing element into a scrollbars
//! container: it generates the view, track and thumb elements, applies the
//! widget's render output and routes browser events, frames and timers into
//! the widget.

mod error;
mod host;
mod node;
mod probe;
mod widget;

pub use error::DomError;
pub use host::{Dispatcher, DomHost, EventFlags};
pub use node::DomNode;
pub use probe::{DomProbe, measure, scrollbar_width};
pub use widget::DomScrollbars;
