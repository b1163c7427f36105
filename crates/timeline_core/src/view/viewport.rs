//! Zoom/pan viewport and date <-> pixel geometry.
//!
//! # Responsibility
//! - Own zoom and pan as plain values changed through small transitions.
//! - Map calendar days to horizontal pixel offsets and back.
//! - Produce grid lines and time-scale marks for the rendering layer.
//!
//! # Invariants
//! - `zoom` stays within `[min_zoom, max_zoom]` of the active config.
//! - Day 0 is the earliest date of any item; positions include `pan_offset`.

use crate::config::ViewConfig;
use crate::model::item::{inclusive_days, TimelineItem};
use chrono::{Days, NaiveDate};

/// Zoom factor and horizontal pan offset for one timeline view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub zoom: f64,
    pub pan_offset: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_offset: 0.0,
        }
    }
}

impl Viewport {
    pub fn zoom_in(&mut self, config: &ViewConfig) {
        self.zoom = (self.zoom * config.zoom_step).min(config.max_zoom);
    }

    pub fn zoom_out(&mut self, config: &ViewConfig) {
        self.zoom = (self.zoom / config.zoom_step).max(config.min_zoom);
    }

    /// Back to 100% zoom with no pan.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn pan_to(&mut self, offset: f64) {
        self.pan_offset = offset;
    }

    /// Zoom as a rounded percentage, e.g. `120`.
    pub fn zoom_percent(&self) -> i64 {
        (self.zoom * 100.0).round() as i64
    }
}

/// Date span covered by a set of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineBounds {
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
    /// Inclusive number of days from `min_date` to `max_date`.
    pub total_days: i64,
}

impl TimelineBounds {
    /// Returns `None` for an empty item set.
    pub fn from_items(items: &[TimelineItem]) -> Option<Self> {
        let min_date = items.iter().map(|item| item.start.min(item.end)).min()?;
        let max_date = items.iter().map(|item| item.start.max(item.end)).max()?;
        Some(Self {
            min_date,
            max_date,
            total_days: inclusive_days(min_date, max_date),
        })
    }
}

/// Vertical day separator.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    pub date: NaiveDate,
    pub position: f64,
    pub is_today: bool,
}

/// Labelled tick on the time scale.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleMark {
    pub date: NaiveDate,
    pub position: f64,
    /// Short month/day label, e.g. `Jan 5`.
    pub label: String,
    pub is_today: bool,
}

/// Pixel mapping for one bounds/viewport/config combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub bounds: TimelineBounds,
    pub viewport: Viewport,
    pixels_per_day: f64,
    min_item_width: f64,
    content_padding: f64,
    scale_target_marks: u32,
}

impl Geometry {
    pub fn new(bounds: TimelineBounds, viewport: Viewport, config: &ViewConfig) -> Self {
        Self {
            bounds,
            viewport,
            pixels_per_day: config.pixels_per_day,
            min_item_width: config.min_item_width,
            content_padding: config.content_padding,
            scale_target_marks: config.scale_target_marks,
        }
    }

    /// Pixels per day at the current zoom.
    pub fn day_width(&self) -> f64 {
        self.pixels_per_day * self.viewport.zoom
    }

    /// Left offset of a date's bar edge.
    pub fn date_to_position(&self, date: NaiveDate) -> f64 {
        let days = (date - self.bounds.min_date).num_days() as f64;
        days * self.day_width() + self.viewport.pan_offset
    }

    /// Bar width for a date span, never below the configured minimum.
    pub fn item_width(&self, start: NaiveDate, end: NaiveDate) -> f64 {
        let days = (end - start).num_days() as f64;
        (days * self.day_width()).max(self.min_item_width)
    }

    /// Nearest whole day under a pixel offset.
    ///
    /// Returns `None` only when the result falls outside the calendar range
    /// chrono can represent.
    pub fn position_to_date(&self, position: f64) -> Option<NaiveDate> {
        let days = ((position - self.viewport.pan_offset) / self.day_width()).round() as i64;
        offset_date(self.bounds.min_date, days)
    }

    /// Scrollable content width including trailing padding.
    pub fn content_width(&self) -> f64 {
        self.bounds.total_days as f64 * self.day_width() + self.content_padding
    }

    /// One line per day boundary, `0..=total_days`.
    pub fn grid_lines(&self, today: NaiveDate) -> Vec<GridLine> {
        (0..=self.bounds.total_days)
            .filter_map(|index| {
                let date = offset_date(self.bounds.min_date, index)?;
                Some(GridLine {
                    date,
                    position: self.day_offset(index),
                    is_today: date == today,
                })
            })
            .collect()
    }

    /// Scale marks spaced so roughly `scale_target_marks` fit the span.
    pub fn scale_marks(&self, today: NaiveDate) -> Vec<ScaleMark> {
        let step = self.scale_step();
        (0..=self.bounds.total_days)
            .step_by(step)
            .filter_map(|index| {
                let date = offset_date(self.bounds.min_date, index)?;
                Some(ScaleMark {
                    date,
                    position: self.day_offset(index),
                    label: date.format("%b %-d").to_string(),
                    is_today: date == today,
                })
            })
            .collect()
    }

    fn scale_step(&self) -> usize {
        let target = i64::from(self.scale_target_marks.max(1));
        let step = (self.bounds.total_days + target - 1) / target;
        step.max(1) as usize
    }

    fn day_offset(&self, index: i64) -> f64 {
        index as f64 * self.day_width() + self.viewport.pan_offset
    }
}

pub(crate) fn offset_date(base: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        base.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        base.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}
