//! Timeline view configuration.
//!
//! # Responsibility
//! - Hold the scale, zoom and hit-test constants used by view-state.
//! - Load overrides from JSON and validate them before use.
//!
//! # Invariants
//! - All widths and scales are strictly positive.
//! - `min_zoom <= 1.0 <= max_zoom`, so reset zoom is always reachable.
//! - `zoom_step > 1.0`.

use crate::lanes::assign::LaneStrategy;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Horizontal pixels covered by one day at zoom 1.0.
pub const DEFAULT_PIXELS_PER_DAY: f64 = 100.0;
/// Bars never render narrower than this, even for single-day items.
pub const DEFAULT_MIN_ITEM_WIDTH: f64 = 80.0;
pub const DEFAULT_ZOOM_STEP: f64 = 1.2;
pub const DEFAULT_MIN_ZOOM: f64 = 0.3;
pub const DEFAULT_MAX_ZOOM: f64 = 3.0;
/// Grab zone at each bar edge that turns a drag into a resize.
pub const DEFAULT_RESIZE_HANDLE_WIDTH: f64 = 16.0;
/// Target number of labelled marks on the time scale.
pub const DEFAULT_SCALE_TARGET_MARKS: u32 = 20;
/// Extra scrollable space after the last day.
pub const DEFAULT_CONTENT_PADDING: f64 = 200.0;

/// Configuration errors.
#[derive(Debug)]
pub enum ViewConfigError {
    /// JSON could not be decoded.
    Parse(serde_json::Error),
    /// A field is outside its allowed range.
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
}

impl Display for ViewConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid view config json: {err}"),
            Self::OutOfRange {
                field,
                value,
                expected,
            } => write!(f, "view config `{field}` = {value}; expected {expected}"),
        }
    }
}

impl Error for ViewConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::OutOfRange { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ViewConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Scale, zoom and interaction settings for one timeline view.
///
/// Missing JSON fields fall back to the defaults above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub pixels_per_day: f64,
    pub min_item_width: f64,
    pub zoom_step: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub resize_handle_width: f64,
    pub scale_target_marks: u32,
    pub content_padding: f64,
    pub strategy: LaneStrategy,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            pixels_per_day: DEFAULT_PIXELS_PER_DAY,
            min_item_width: DEFAULT_MIN_ITEM_WIDTH,
            zoom_step: DEFAULT_ZOOM_STEP,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            resize_handle_width: DEFAULT_RESIZE_HANDLE_WIDTH,
            scale_target_marks: DEFAULT_SCALE_TARGET_MARKS,
            content_padding: DEFAULT_CONTENT_PADDING,
            strategy: LaneStrategy::default(),
        }
    }
}

impl ViewConfig {
    /// Decodes and validates a JSON config document.
    pub fn from_json(raw: &str) -> Result<Self, ViewConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ViewConfigError> {
        require_positive("pixels_per_day", self.pixels_per_day)?;
        require_positive("min_item_width", self.min_item_width)?;
        require_positive("resize_handle_width", self.resize_handle_width)?;
        require(
            "content_padding",
            self.content_padding,
            self.content_padding >= 0.0,
            "a value >= 0",
        )?;
        require(
            "zoom_step",
            self.zoom_step,
            self.zoom_step > 1.0,
            "a value > 1",
        )?;
        require(
            "min_zoom",
            self.min_zoom,
            self.min_zoom > 0.0 && self.min_zoom <= 1.0,
            "a value in (0, 1]",
        )?;
        require(
            "max_zoom",
            self.max_zoom,
            self.max_zoom >= 1.0,
            "a value >= 1",
        )?;
        require(
            "scale_target_marks",
            f64::from(self.scale_target_marks),
            self.scale_target_marks > 0,
            "a value > 0",
        )?;
        Ok(())
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ViewConfigError> {
    require(field, value, value > 0.0, "a value > 0")
}

fn require(
    field: &'static str,
    value: f64,
    ok: bool,
    expected: &'static str,
) -> Result<(), ViewConfigError> {
    // NaN fails every comparison above, so it lands here too.
    if ok && value.is_finite() {
        Ok(())
    } else {
        Err(ViewConfigError::OutOfRange {
            field,
            value,
            expected,
        })
    }
}
