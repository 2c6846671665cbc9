//! `Node` over a live `HtmlElement`.

use scrollbars_core::{Bounds, Node, Size};
use web_sys::HtmlElement;

/// Handle to one element of the widget.
#[derive(Debug, Clone, PartialEq)]
pub struct DomNode {
    element: HtmlElement,
}

impl DomNode {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    /// Summed horizontal and vertical padding from the computed style.
    fn padding(&self) -> Size {
        let Some(style) = web_sys::window()
            .and_then(|window| window.get_computed_style(&self.element).ok().flatten())
        else {
            return Size::default();
        };
        let px = |property: &str| {
            style
                .get_property_value(property)
                .ok()
                .as_deref()
                .and_then(parse_px)
                .unwrap_or(0.0)
        };
        Size::new(
            px("padding-left") + px("padding-right"),
            px("padding-top") + px("padding-bottom"),
        )
    }
}

fn parse_px(value: &str) -> Option<f64> {
    let value = value.trim();
    value.strip_suffix("px").unwrap_or(value).parse().ok()
}

impl Node for DomNode {
    fn scroll_left(&self) -> f64 {
        f64::from(self.element.scroll_left())
    }

    fn scroll_top(&self) -> f64 {
        f64::from(self.element.scroll_top())
    }

    fn set_scroll_left(&self, value: f64) {
        self.element.set_scroll_left(value.round() as i32);
    }

    fn set_scroll_top(&self, value: f64) {
        self.element.set_scroll_top(value.round() as i32);
    }

    fn scroll_size(&self) -> Size {
        Size::new(
            f64::from(self.element.scroll_width()),
            f64::from(self.element.scroll_height()),
        )
    }

    fn client_size(&self) -> Size {
        Size::new(
            f64::from(self.element.client_width()),
            f64::from(self.element.client_height()),
        )
    }

    fn inner_size(&self) -> Size {
        let client = self.client_size();
        let padding = self.padding();
        Size::new(
            (client.width - padding.width).max(0.0),
            (client.height - padding.height).max(0.0),
        )
    }

    fn offset_size(&self) -> Size {
        Size::new(
            f64::from(self.element.offset_width()),
            f64::from(self.element.offset_height()),
        )
    }

    fn bounding_rect(&self) -> Bounds {
        let rect = self.element.get_bounding_client_rect();
        Bounds::new(rect.x(), rect.y(), rect.width(), rect.height())
    }

    fn style(&self, property: &str) -> String {
        self.element
            .style()
            .get_property_value(property)
            .unwrap_or_default()
    }

    fn set_style(&self, property: &str, value: &str) {
        let style = self.element.style();
        let result = if value.is_empty() {
            style.remove_property(property).map(|_| ())
        } else {
            style.set_property(property, value)
        };
        if let Err(e) = result {
            log::warn!("Failed to set {}: {} ({:?})", property, value, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_px() {
        assert_eq!(parse_px("4px"), Some(4.0));
        assert_eq!(parse_px(" 2.5px "), Some(2.5));
        assert_eq!(parse_px("0"), Some(0.0));
        assert_eq!(parse_px("auto"), None);
    }
}
