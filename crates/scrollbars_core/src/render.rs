//! Declarative render output: the class name and inline style of each part.
//!
//! The embedding tree mounts the parts from this output and calls
//! [`Scrollbars::render`](crate::Scrollbars::render) again whenever a dispatch
//! reports `needs_render`. Thumb geometry and track opacity are not part of
//! it; the widget writes those directly on every frame.

use std::fmt;

use crate::config::{format_px, ScrollbarsConfig};
use crate::layout::Axis;
use crate::styles::{Style, Styles};

/// Class name and inline style of one part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartProps {
    pub class_name: String,
    pub style: Style,
}

impl PartProps {
    pub fn new(class_name: impl Into<String>, style: Style) -> Self {
        Self {
            class_name: class_name.into(),
            style,
        }
    }
}

/// Props for the whole widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    pub id: Option<String>,
    pub container: PartProps,
    pub view: PartProps,
    pub track_horizontal: PartProps,
    pub track_vertical: PartProps,
    pub thumb_horizontal: PartProps,
    pub thumb_vertical: PartProps,
}

impl RenderOutput {
    pub fn track(&self, axis: Axis) -> &PartProps {
        match axis {
            Axis::Horizontal => &self.track_horizontal,
            Axis::Vertical => &self.track_vertical,
        }
    }

    pub fn thumb(&self, axis: Axis) -> &PartProps {
        match axis {
            Axis::Horizontal => &self.thumb_horizontal,
            Axis::Vertical => &self.thumb_vertical,
        }
    }
}

/// Rewrites the computed props of one part.
pub type Customizer = Box<dyn Fn(PartProps) -> PartProps>;

/// Optional per-part customizers.
#[derive(Default)]
pub struct RenderCustomizers {
    pub view: Option<Customizer>,
    pub track_horizontal: Option<Customizer>,
    pub track_vertical: Option<Customizer>,
    pub thumb_horizontal: Option<Customizer>,
    pub thumb_vertical: Option<Customizer>,
}

impl fmt::Debug for RenderCustomizers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderCustomizers")
            .field("view", &self.view.is_some())
            .field("track_horizontal", &self.track_horizontal.is_some())
            .field("track_vertical", &self.track_vertical.is_some())
            .field("thumb_horizontal", &self.thumb_horizontal.is_some())
            .field("thumb_vertical", &self.thumb_vertical.is_some())
            .finish()
    }
}

fn customize(customizer: &Option<Customizer>, props: PartProps) -> PartProps {
    match customizer {
        Some(customizer) => customizer(props),
        None => props,
    }
}

/// Everything a render depends on.
#[derive(Debug, Clone, Copy)]
pub struct RenderInputs<'a> {
    pub config: &'a ScrollbarsConfig,
    pub styles: &'a Styles,
    /// Extra container declarations supplied by the embedder.
    pub container_style: &'a Style,
    pub id: Option<&'a str>,
    pub scrollbar_width: f64,
    /// False until the first mount of a universal widget.
    pub did_mount_universal: bool,
}

impl RenderInputs<'_> {
    fn universal_initial(&self) -> bool {
        self.config.universal && !self.did_mount_universal
    }
}

/// Compute the props of every part.
pub fn render(inputs: &RenderInputs<'_>, customizers: &RenderCustomizers) -> RenderOutput {
    let RenderInputs {
        config,
        styles,
        scrollbar_width,
        ..
    } = *inputs;

    let mut container = styles.container_default.clone();
    if config.auto_height {
        container.merge(&styles.container_auto_height);
        container.set("min-height", config.auto_height_min.to_css());
        container.set("max-height", config.auto_height_max.to_css());
    }
    container.merge(inputs.container_style);

    let mut view = styles.view_default.clone();
    // Push the native scrollbars out of the clipped container.
    let margin = if scrollbar_width > 0.0 {
        format_px(-scrollbar_width)
    } else {
        format_px(0.0)
    };
    view.set("margin-right", margin.clone());
    view.set("margin-bottom", margin);
    if config.auto_height {
        view.merge(&styles.view_auto_height);
        for edge in ["top", "left", "right", "bottom"] {
            view.remove(edge);
        }
        if inputs.universal_initial() {
            view.set("min-height", config.auto_height_min.to_css());
            view.set("max-height", config.auto_height_max.to_css());
        } else {
            // The negative margins eat into the view; give the height back.
            view.set("min-height", config.auto_height_min.plus_px(scrollbar_width));
            view.set("max-height", config.auto_height_max.plus_px(scrollbar_width));
        }
    }
    if inputs.universal_initial() {
        view.merge(&styles.view_universal_initial);
    }

    let mut track_horizontal = styles.track_horizontal_default.clone();
    let mut track_vertical = styles.track_vertical_default.clone();
    for track in [&mut track_horizontal, &mut track_vertical] {
        if config.auto_hide {
            track.set("transition", format!("opacity {}ms", config.auto_hide_duration));
            track.set("opacity", "0");
        }
        if scrollbar_width == 0.0 || inputs.universal_initial() {
            track.set("display", "none");
        }
    }

    RenderOutput {
        id: inputs.id.map(str::to_string),
        container: PartProps::new("scrollbars-container", container),
        view: customize(&customizers.view, PartProps::new("scrollbars-view", view)),
        track_horizontal: customize(
            &customizers.track_horizontal,
            PartProps::new(track_class(Axis::Horizontal), track_horizontal),
        ),
        track_vertical: customize(
            &customizers.track_vertical,
            PartProps::new(track_class(Axis::Vertical), track_vertical),
        ),
        thumb_horizontal: customize(
            &customizers.thumb_horizontal,
            PartProps::new(
                thumb_class(Axis::Horizontal),
                styles.thumb_horizontal_default.clone(),
            ),
        ),
        thumb_vertical: customize(
            &customizers.thumb_vertical,
            PartProps::new(
                thumb_class(Axis::Vertical),
                styles.thumb_vertical_default.clone(),
            ),
        ),
    }
}

fn track_class(axis: Axis) -> String {
    format!("scrollbars-track scrollbars-track-{}", axis.suffix())
}

fn thumb_class(axis: Axis) -> String {
    format!("scrollbars-thumb scrollbars-thumb-{}", axis.suffix())
}
