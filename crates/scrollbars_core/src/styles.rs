//! Inline style blocks and the built-in style set.

use std::fmt;

use crate::config::format_px;
use crate::constants::{THUMB_COLOR, TRACK_INSET_PX, TRACK_RADIUS_PX, TRACK_THICKNESS_PX};

/// Ordered CSS declarations. Later writes to a property replace earlier ones
/// in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    declarations: Vec<(String, String)>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Style::set`].
    pub fn with(mut self, property: &str, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    pub fn set(&mut self, property: &str, value: impl Into<String>) {
        let value = value.into();
        match self.declarations.iter_mut().find(|(name, _)| name == property) {
            Some((_, existing)) => *existing = value,
            None => self.declarations.push((property.to_string(), value)),
        }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    pub fn remove(&mut self, property: &str) {
        self.declarations.retain(|(name, _)| name != property);
    }

    /// Apply every declaration of `other` on top of this one.
    pub fn merge(&mut self, other: &Style) {
        for (property, value) in &other.declarations {
            self.set(property, value.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(property, value)| (property.as_str(), value.as_str()))
    }
}

impl fmt::Display for Style {
    /// Renders as a `style` attribute value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (property, value)) in self.declarations.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{property}: {value};")?;
        }
        Ok(())
    }
}

/// The style blocks the widget composes its parts from.
#[derive(Debug, Clone)]
pub struct Styles {
    pub container_default: Style,
    pub container_auto_height: Style,
    pub view_default: Style,
    pub view_auto_height: Style,
    pub view_universal_initial: Style,
    pub track_horizontal_default: Style,
    pub track_vertical_default: Style,
    pub thumb_horizontal_default: Style,
    pub thumb_vertical_default: Style,
}

impl Styles {
    /// Built-in styles. With `disable_default_styles` only the structural
    /// declarations remain and the track/thumb look is left to the embedder.
    pub fn new(disable_default_styles: bool) -> Self {
        let mut track_horizontal = Style::new()
            .with("position", "absolute")
            .with("height", format_px(TRACK_THICKNESS_PX));
        let mut track_vertical = Style::new()
            .with("position", "absolute")
            .with("width", format_px(TRACK_THICKNESS_PX));
        let mut thumb_horizontal = Style::new()
            .with("position", "relative")
            .with("display", "block")
            .with("height", "100%");
        let mut thumb_vertical = Style::new()
            .with("position", "relative")
            .with("display", "block")
            .with("width", "100%");

        if !disable_default_styles {
            let inset = format_px(TRACK_INSET_PX);
            for (track, edges) in [
                (&mut track_horizontal, ["right", "bottom", "left"]),
                (&mut track_vertical, ["right", "bottom", "top"]),
            ] {
                for edge in edges {
                    track.set(edge, inset.clone());
                }
                track.set("border-radius", format_px(TRACK_RADIUS_PX));
            }
            for thumb in [&mut thumb_horizontal, &mut thumb_vertical] {
                thumb.set("cursor", "pointer");
                thumb.set("border-radius", "inherit");
                thumb.set("background-color", THUMB_COLOR);
            }
        }

        Self {
            container_default: Style::new()
                .with("position", "relative")
                .with("overflow", "hidden")
                .with("width", "100%")
                .with("height", "100%"),
            container_auto_height: Style::new().with("height", "auto"),
            view_default: Style::new()
                .with("position", "absolute")
                .with("top", "0px")
                .with("left", "0px")
                .with("right", "0px")
                .with("bottom", "0px")
                .with("overflow", "scroll")
                .with("-webkit-overflow-scrolling", "touch"),
            view_auto_height: Style::new().with("position", "relative"),
            view_universal_initial: Style::new()
                .with("overflow", "hidden")
                .with("margin-right", "0px")
                .with("margin-bottom", "0px"),
            track_horizontal_default: track_horizontal,
            track_vertical_default: track_vertical,
            thumb_horizontal_default: thumb_horizontal,
            thumb_vertical_default: thumb_vertical,
        }
    }
}
