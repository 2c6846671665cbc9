//! Geometry primitives shared by the engine and the hosts.
//!
//! Coordinates are CSS pixels in the host's client (viewport) space.

/// Scroll axis, also used to name the track/thumb pair living on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Both axes, horizontal first.
    pub const ALL: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

    /// Short suffix used in class names ("h" / "v").
    pub fn suffix(self) -> &'static str {
        match self {
            Axis::Horizontal => "h",
            Axis::Vertical => "v",
        }
    }
}

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Coordinate along `axis`.
    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }
}

/// A 2D size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Length along `axis` (width for horizontal, height for vertical).
    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// A client-space rectangle, as returned by `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Leading edge along `axis` (left or top).
    pub fn leading_edge(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_leading_edge() {
        let bounds = Bounds::new(10.0, 20.0, 100.0, 6.0);
        assert_eq!(bounds.leading_edge(Axis::Horizontal), 10.0);
        assert_eq!(bounds.leading_edge(Axis::Vertical), 20.0);
        assert_eq!(bounds.size().along(Axis::Horizontal), 100.0);
        assert_eq!(Point::new(3.0, 4.0).along(Axis::Vertical), 4.0);
    }
}
