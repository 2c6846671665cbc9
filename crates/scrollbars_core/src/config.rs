//! Widget configuration.
//!
//! Every field is optional when deserializing; missing fields take the
//! defaults below.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    AUTO_HEIGHT_MAX, AUTO_HEIGHT_MIN, AUTO_HIDE_DURATION_MS, AUTO_HIDE_TIMEOUT_MS,
    CONTAINER_TAG_NAME, THUMB_MIN_SIZE,
};
use crate::geometry::ThumbSizing;

/// A length given either in pixels or as a raw CSS expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Px(f64),
    Css(String),
}

impl Dimension {
    /// CSS value for this length grown by `extra_px` pixels.
    pub fn plus_px(&self, extra_px: f64) -> String {
        match self {
            Dimension::Px(px) => format_px(px + extra_px),
            Dimension::Css(css) => format!("calc({} + {}px)", css, extra_px),
        }
    }

    /// CSS value for this length.
    pub fn to_css(&self) -> String {
        match self {
            Dimension::Px(px) => format_px(*px),
            Dimension::Css(css) => css.clone(),
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Dimension::Px(0.0)
    }
}

impl From<f64> for Dimension {
    fn from(px: f64) -> Self {
        Dimension::Px(px)
    }
}

impl From<&str> for Dimension {
    fn from(css: &str) -> Self {
        Dimension::Css(css.to_string())
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Format a pixel length without a trailing `.0`.
pub fn format_px(px: f64) -> String {
    format!("{}px", px)
}

/// Behaviour and appearance switches of a scrollbars widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollbarsConfig {
    /// Element type of the container
    pub tag_name: String,
    /// Grow the container with its content between the two bounds below
    pub auto_height: bool,
    pub auto_height_min: Dimension,
    pub auto_height_max: Dimension,
    /// Fade tracks out after a period without interaction
    pub auto_hide: bool,
    /// Idle time before tracks fade out
    pub auto_hide_timeout: u32,
    /// Fade transition length (CSS only)
    pub auto_hide_duration: u32,
    /// Minimum proportional thumb length
    pub thumb_min_size: f64,
    /// Fixed thumb length, overrides the proportional one
    pub thumb_size: Option<f64>,
    /// Hide a track whose axis does not overflow
    pub hide_tracks_when_not_needed: bool,
    /// Render placeholder geometry until the first mount
    pub universal: bool,
    /// Skip the built-in track/thumb look
    pub disable_default_styles: bool,
}

impl Default for ScrollbarsConfig {
    fn default() -> Self {
        Self {
            tag_name: CONTAINER_TAG_NAME.to_string(),
            auto_height: false,
            auto_height_min: Dimension::Px(AUTO_HEIGHT_MIN),
            auto_height_max: Dimension::Px(AUTO_HEIGHT_MAX),
            auto_hide: false,
            auto_hide_timeout: AUTO_HIDE_TIMEOUT_MS,
            auto_hide_duration: AUTO_HIDE_DURATION_MS,
            thumb_min_size: THUMB_MIN_SIZE,
            thumb_size: None,
            hide_tracks_when_not_needed: false,
            universal: false,
            disable_default_styles: false,
        }
    }
}

impl ScrollbarsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Thumb sizing derived from `thumb_min_size`/`thumb_size`.
    pub fn thumb_sizing(&self) -> ThumbSizing {
        ThumbSizing {
            min_size: self.thumb_min_size,
            fixed_size: self.thumb_size.filter(|size| *size > 0.0),
        }
    }

    pub fn tag_name(mut self, tag_name: impl Into<String>) -> Self {
        self.tag_name = tag_name.into();
        self
    }

    pub fn auto_height(mut self, min: impl Into<Dimension>, max: impl Into<Dimension>) -> Self {
        self.auto_height = true;
        self.auto_height_min = min.into();
        self.auto_height_max = max.into();
        self
    }

    pub fn auto_hide(mut self, timeout_ms: u32, duration_ms: u32) -> Self {
        self.auto_hide = true;
        self.auto_hide_timeout = timeout_ms;
        self.auto_hide_duration = duration_ms;
        self
    }

    pub fn thumb_min_size(mut self, size: f64) -> Self {
        self.thumb_min_size = size;
        self
    }

    pub fn thumb_size(mut self, size: f64) -> Self {
        self.thumb_size = Some(size);
        self
    }

    pub fn hide_tracks_when_not_needed(mut self, hide: bool) -> Self {
        self.hide_tracks_when_not_needed = hide;
        self
    }

    pub fn universal(mut self, universal: bool) -> Self {
        self.universal = universal;
        self
    }

    pub fn disable_default_styles(mut self, disable: bool) -> Self {
        self.disable_default_styles = disable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScrollbarsConfig::default();
        assert!(!config.auto_hide);
        assert_eq!(config.auto_hide_timeout, 1000);
        assert_eq!(config.auto_hide_duration, 200);
        assert_eq!(config.thumb_min_size, 30.0);
        assert_eq!(config.auto_height_max, Dimension::Px(200.0));
        assert_eq!(config.thumb_sizing().fixed_size, None);
        assert_eq!(config.tag_name, "div");
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ScrollbarsConfig =
            serde_json::from_str(r#"{"autoHide": true, "autoHeightMax": "50vh", "thumbSize": 20}"#)
                .unwrap();
        assert!(config.auto_hide);
        assert_eq!(config.auto_hide_timeout, 1000);
        assert_eq!(config.auto_height_max, Dimension::Css("50vh".to_string()));
        assert_eq!(config.thumb_sizing().fixed_size, Some(20.0));
        assert_eq!(config.tag_name, "div");

        let config: ScrollbarsConfig = serde_json::from_str(r#"{"tagName": "section"}"#).unwrap();
        assert_eq!(config.tag_name, "section");
    }

    #[test]
    fn test_dimension_plus_px() {
        assert_eq!(Dimension::Px(200.0).plus_px(17.0), "217px");
        assert_eq!(
            Dimension::Css("50vh".to_string()).plus_px(17.0),
            "calc(50vh + 17px)"
        );
    }

    #[test]
    fn test_zero_thumb_size_is_unset() {
        let config = ScrollbarsConfig::new().thumb_size(0.0);
        assert_eq!(config.thumb_sizing().fixed_size, None);
    }
}
