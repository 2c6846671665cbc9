//! Conversions between scroll position, thumb size and thumb/track offsets.
//!
//! Nothing here is cached: callers read fresh metrics from the nodes on every
//! frame and hand them to these functions.

use crate::host::Node;
use crate::layout::Axis;

/// Snapshot of the view's scroll metrics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollValues {
    /// Horizontal scroll progress in `0.0..=1.0`, 0 when there is no range.
    pub left: f64,
    /// Vertical scroll progress in `0.0..=1.0`, 0 when there is no range.
    pub top: f64,
    pub scroll_left: f64,
    pub scroll_top: f64,
    pub scroll_width: f64,
    pub scroll_height: f64,
    pub client_width: f64,
    pub client_height: f64,
}

impl ScrollValues {
    /// Read the metrics of `view`, or all zeros when it is not mounted.
    pub fn read<N: Node>(view: Option<&N>) -> Self {
        let Some(view) = view else {
            return Self::default();
        };
        let scroll = view.scroll_size();
        let client = view.client_size();
        let scroll_left = view.scroll_left();
        let scroll_top = view.scroll_top();
        Self {
            left: finite_ratio(scroll_left, scroll.width - client.width),
            top: finite_ratio(scroll_top, scroll.height - client.height),
            scroll_left,
            scroll_top,
            scroll_width: scroll.width,
            scroll_height: scroll.height,
            client_width: client.width,
            client_height: client.height,
        }
    }

    /// Scroll offset along `axis`.
    pub fn offset(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.scroll_left,
            Axis::Vertical => self.scroll_top,
        }
    }

    /// Content length along `axis`.
    pub fn scroll_length(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.scroll_width,
            Axis::Vertical => self.scroll_height,
        }
    }

    /// Viewport length along `axis`.
    pub fn client_length(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.client_width,
            Axis::Vertical => self.client_height,
        }
    }

    /// Whether content overflows the viewport along `axis`.
    pub fn overflows(&self, axis: Axis) -> bool {
        self.scroll_length(axis) > self.client_length(axis)
    }
}

/// `numerator / denominator`, or 0 when that is not a finite number.
pub fn finite_ratio(numerator: f64, denominator: f64) -> f64 {
    let ratio = numerator / denominator;
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}

/// Thumb sizing options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbSizing {
    /// Lower bound for a proportional thumb.
    pub min_size: f64,
    /// Fixed thumb length overriding the proportional one.
    pub fixed_size: Option<f64>,
}

impl Default for ThumbSizing {
    fn default() -> Self {
        Self {
            min_size: crate::constants::THUMB_MIN_SIZE,
            fixed_size: None,
        }
    }
}

/// Metrics of one axis: the view's content/viewport lengths and the inner
/// length of the track drawn for that axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisGeometry {
    pub scroll_length: f64,
    pub client_length: f64,
    pub track_length: f64,
}

impl AxisGeometry {
    pub fn new(scroll_length: f64, client_length: f64, track_length: f64) -> Self {
        Self {
            scroll_length,
            client_length,
            track_length,
        }
    }

    /// Read the geometry of `axis` from live nodes.
    ///
    /// Returns `None` while either node is missing.
    pub fn read<N: Node>(axis: Axis, view: Option<&N>, track: Option<&N>) -> Option<Self> {
        let (view, track) = (view?, track?);
        Some(Self {
            scroll_length: view.scroll_size().along(axis),
            client_length: view.client_size().along(axis),
            track_length: track.inner_size().along(axis),
        })
    }

    /// Scrollable range (`scrollLength - clientLength`).
    pub fn range(&self) -> f64 {
        self.scroll_length - self.client_length
    }

    /// Thumb length in pixels, 0 when the content fits the viewport.
    pub fn thumb_length(&self, sizing: &ThumbSizing) -> f64 {
        let proportional = (self.client_length / self.scroll_length * self.track_length).ceil();
        // A thumb as long as its track means there is nothing to scroll.
        if !proportional.is_finite() || proportional >= self.track_length {
            return 0.0;
        }
        if let Some(fixed) = sizing.fixed_size {
            return fixed;
        }
        proportional.max(sizing.min_size)
    }

    /// Distance the thumb can travel inside the track.
    pub fn travel(&self, sizing: &ThumbSizing) -> f64 {
        self.track_length - self.thumb_length(sizing)
    }

    /// Map a thumb offset inside the track to a scroll offset.
    pub fn scroll_offset_for_track_offset(&self, track_offset: f64, sizing: &ThumbSizing) -> f64 {
        finite_ratio(track_offset, self.travel(sizing)) * self.range()
    }

    /// Pixel translation that positions the thumb for `scroll_offset`.
    pub fn thumb_translation(&self, scroll_offset: f64, sizing: &ThumbSizing) -> f64 {
        if self.thumb_length(sizing) == 0.0 {
            return 0.0;
        }
        finite_ratio(scroll_offset, self.range()) * self.travel(sizing)
    }
}
