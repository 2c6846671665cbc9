//! Native scrollbar width measurement.

use std::cell::RefCell;

use scrollbars_core::{finite_ratio, PixelRatioCache, ScrollbarWidthProbe};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

use super::DomError;

thread_local! {
    /// One measurement per page, redone when the zoom level changes.
    static WIDTH_CACHE: RefCell<PixelRatioCache> = RefCell::new(PixelRatioCache::new());
}

/// Probe backed by the page-wide cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomProbe;

impl ScrollbarWidthProbe for DomProbe {
    fn scrollbar_width(&mut self) -> f64 {
        scrollbar_width()
    }
}

/// Width of the native scrollbar gutter, 0 without a document.
pub fn scrollbar_width() -> f64 {
    let Some(window) = web_sys::window() else {
        return 0.0;
    };
    let Some(document) = window.document() else {
        return 0.0;
    };
    let ratio = pixel_ratio(&window, &document);
    WIDTH_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_measure(ratio, || match measure(&document) {
                Ok(width) => width,
                Err(e) => {
                    log::warn!("Failed to measure scrollbar width: {}", e);
                    0.0
                }
            })
    })
}

fn pixel_ratio(window: &Window, document: &Document) -> f64 {
    let available = window
        .screen()
        .ok()
        .and_then(|screen| screen.avail_width().ok())
        .map_or(0.0, f64::from);
    let client = document
        .document_element()
        .map_or(0.0, |root| f64::from(root.client_width()));
    finite_ratio(available, client)
}

/// Mount an off-screen scrolling box and read its gutter.
pub fn measure(document: &Document) -> Result<f64, DomError> {
    let body = document.body().ok_or(DomError::NoBody)?;
    let probe: HtmlElement = document
        .create_element("div")?
        .dyn_into()
        .map_err(|_| DomError::Cast("HtmlElement"))?;
    let style = probe.style();
    for (property, value) in [
        ("width", "100px"),
        ("height", "100px"),
        ("position", "absolute"),
        ("top", "-9999px"),
        ("overflow", "scroll"),
        ("-ms-overflow-style", "scrollbar"),
    ] {
        style.set_property(property, value)?;
    }
    body.append_child(&probe)?;
    let width = f64::from(probe.offset_width() - probe.client_width());
    body.remove_child(&probe)?;
    Ok(width)
}
