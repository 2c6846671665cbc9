//! Native scrollbar width probing.
//!
//! The width depends on platform, theme and zoom level, so it is re-queried on
//! every frame sync. Measuring touches the layout engine, which is why
//! [`PixelRatioCache`] keeps the last measurement until the pixel ratio moves.

/// Source of the native scrollbar gutter width in pixels.
///
/// A width of 0 means the platform overlays its scrollbars and there is no
/// room to grab a custom track.
pub trait ScrollbarWidthProbe {
    fn scrollbar_width(&mut self) -> f64;
}

impl<F> ScrollbarWidthProbe for F
where
    F: FnMut() -> f64,
{
    fn scrollbar_width(&mut self) -> f64 {
        self()
    }
}

/// Caches a measured width, re-measuring whenever the pixel ratio changes.
#[derive(Debug, Clone, Default)]
pub struct PixelRatioCache {
    width: Option<f64>,
    pixel_ratio: Option<f64>,
}

impl PixelRatioCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached width, calling `measure` when nothing is cached yet or
    /// `pixel_ratio` differs from the ratio seen last time.
    pub fn get_or_measure(&mut self, pixel_ratio: f64, measure: impl FnOnce() -> f64) -> f64 {
        let ratio_changed = self.pixel_ratio.is_some_and(|previous| previous != pixel_ratio);
        self.pixel_ratio = Some(pixel_ratio);
        match self.width {
            Some(width) if !ratio_changed => width,
            _ => {
                let width = measure();
                let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
                if ratio_changed {
                    log::debug!("Pixel ratio changed to {pixel_ratio}, scrollbar width now {width}px");
                }
                self.width = Some(width);
                width
            }
        }
    }
}

/// A probe that always reports the same width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWidth(pub f64);

impl ScrollbarWidthProbe for FixedWidth {
    fn scrollbar_width(&mut self) -> f64 {
        self.0
    }
}
