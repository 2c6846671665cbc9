//! Centralized constants for scrollbars_core
//!
//! Defaults for the configuration surface and the built-in styles live here.

// =============================================================================
// Container
// =============================================================================

/// Element type of the container
pub const CONTAINER_TAG_NAME: &str = "div";

// =============================================================================
// Thumb
// =============================================================================

/// Minimum thumb length in pixels
pub const THUMB_MIN_SIZE: f64 = 30.0;

// =============================================================================
// Auto-hide
// =============================================================================

/// Idle delay before tracks fade out
pub const AUTO_HIDE_TIMEOUT_MS: u32 = 1000;

/// Duration of the fade transition
pub const AUTO_HIDE_DURATION_MS: u32 = 200;

// =============================================================================
// Auto-height
// =============================================================================

/// Default minimum container height with auto-height
pub const AUTO_HEIGHT_MIN: f64 = 0.0;

/// Default maximum container height with auto-height
pub const AUTO_HEIGHT_MAX: f64 = 200.0;

// =============================================================================
// Scrolling detection
// =============================================================================

/// Poll period of the scroll-end detector
pub const SCROLL_POLL_INTERVAL_MS: u32 = 100;

// =============================================================================
// Default styles
// =============================================================================

/// Track thickness (height of the horizontal track, width of the vertical one)
pub const TRACK_THICKNESS_PX: f64 = 6.0;

/// Inset of a track from the container edges
pub const TRACK_INSET_PX: f64 = 2.0;

/// Track corner radius
pub const TRACK_RADIUS_PX: f64 = 3.0;

/// Thumb fill
pub const THUMB_COLOR: &str = "rgba(0,0,0,.2)";

// =============================================================================
// Style values
// =============================================================================

/// Opacity of a visible track
pub const OPACITY_VISIBLE: &str = "1";

/// Opacity of a hidden track
pub const OPACITY_HIDDEN: &str = "0";
