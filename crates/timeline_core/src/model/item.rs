//! Timeline item domain model.
//!
//! # Responsibility
//! - Define the calendar-bound record packed into lanes and rendered as a bar.
//! - Provide validation and day-granularity helpers shared by lanes and views.
//!
//! # Invariants
//! - `id` is stable, non-nil and never reused for another item.
//! - `start <= end`; a single-day item has `start == end`.
//! - Dates are whole days with no timezone attached.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every timeline item.
pub type ItemId = Uuid;

/// Validation failures for item invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    /// `id` is the nil UUID.
    NilId,
    /// `name` is empty after trim.
    BlankName,
    /// `end` falls before `start`.
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "item id must not be nil"),
            Self::BlankName => write!(f, "item name must not be blank"),
            Self::InvalidDateRange { start, end } => {
                write!(f, "end ({end}) must be >= start ({start})")
            }
        }
    }
}

impl Error for ItemValidationError {}

/// One bar on the timeline.
///
/// Serialized as `{"id", "name", "start", "end"}` with ISO `YYYY-MM-DD` dates.
/// Deserialization runs [`TimelineItem::validate`], so a decoded item always
/// satisfies the invariants above.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TimelineItemRecord")]
pub struct TimelineItem {
    pub id: ItemId,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Deserialize)]
struct TimelineItemRecord {
    id: ItemId,
    name: String,
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<TimelineItemRecord> for TimelineItem {
    type Error = ItemValidationError;

    fn try_from(value: TimelineItemRecord) -> Result<Self, Self::Error> {
        Self::with_id(value.id, value.name, value.start, value.end)
    }
}

impl TimelineItem {
    /// Creates a validated item with a generated stable ID.
    pub fn new(
        name: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, ItemValidationError> {
        Self::with_id(Uuid::new_v4(), name, start, end)
    }

    /// Creates a validated item with a caller-provided stable ID.
    ///
    /// Used by seed loading and edit paths where identity already exists.
    pub fn with_id(
        id: ItemId,
        name: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, ItemValidationError> {
        let item = Self {
            id,
            name: name.into(),
            start,
            end,
        };
        item.validate()?;
        Ok(item)
    }

    /// Checks all item invariants.
    ///
    /// Fields are public, so callers mutating them directly must re-validate.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if self.id.is_nil() {
            return Err(ItemValidationError::NilId);
        }
        if self.name.trim().is_empty() {
            return Err(ItemValidationError::BlankName);
        }
        self.validate_dates()
    }

    /// Checks only `start <= end`, the one invariant lane packing depends on.
    pub fn validate_dates(&self) -> Result<(), ItemValidationError> {
        if self.start > self.end {
            return Err(ItemValidationError::InvalidDateRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Inclusive length in days; a single-day item lasts one day.
    pub fn duration_days(&self) -> i64 {
        inclusive_days(self.start, self.end)
    }

    /// Human label such as `1 day` or `14 days`.
    pub fn duration_label(&self) -> String {
        duration_label(self.duration_days())
    }

    /// Short `MM/DD - MM/DD` range shown inside the bar.
    pub fn date_range_label(&self) -> String {
        format!("{} - {}", self.start.format("%m/%d"), self.end.format("%m/%d"))
    }

    /// Returns a copy shifted to new dates, keeping identity and name.
    pub fn with_dates(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, ItemValidationError> {
        Self::with_id(self.id, self.name.clone(), start, end)
    }
}

/// Inclusive day count between two dates.
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Pluralized day label for an inclusive day count.
pub fn duration_label(days: i64) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{days} days")
    }
}
