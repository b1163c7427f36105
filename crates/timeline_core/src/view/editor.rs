//! Item edit form state.
//!
//! # Responsibility
//! - Hold in-progress name/date text for one item while the edit dialog is open.
//! - Turn the raw form text into a validated item on submit.
//!
//! # Invariants
//! - The form never changes the edited item's id.
//! - Dates are accepted only in strict `YYYY-MM-DD` form.
//! - A submitted item always satisfies `start <= end` and a non-blank name.

use crate::model::item::{
    duration_label, inclusive_days, ItemId, ItemValidationError, TimelineItem,
};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid iso date regex"));

/// Which date input a form error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Start,
    End,
}

impl Display for DateField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

/// Submit-time validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Name is empty after trim.
    EmptyName,
    /// Date text is not a real `YYYY-MM-DD` day.
    InvalidDate { field: DateField, value: String },
    /// Start falls after end.
    StartAfterEnd { start: NaiveDate, end: NaiveDate },
    /// Rebuilt item failed model validation.
    Item(ItemValidationError),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "item name is required"),
            Self::InvalidDate { field, value } => {
                write!(f, "invalid {field} date `{value}`; expected YYYY-MM-DD")
            }
            Self::StartAfterEnd { start, end } => {
                write!(f, "start date {start} cannot be after end date {end}")
            }
            Self::Item(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FormError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Item(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ItemValidationError> for FormError {
    fn from(value: ItemValidationError) -> Self {
        Self::Item(value)
    }
}

/// Parses a strict ISO calendar date (`2021-01-05`).
///
/// Unpadded input such as `2021-1-5` is rejected even though chrono alone
/// would accept it.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if !ISO_DATE_RE.is_match(trimmed) {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// Editable snapshot of one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    item_id: ItemId,
    pub name: String,
    pub start: String,
    pub end: String,
}

impl EditForm {
    /// Opens a form pre-filled from the item.
    pub fn open(item: &TimelineItem) -> Self {
        Self {
            item_id: item.id,
            name: item.name.clone(),
            start: item.start.format("%Y-%m-%d").to_string(),
            end: item.end.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
    }

    pub fn set_start(&mut self, value: impl Into<String>) {
        self.start = value.into();
    }

    pub fn set_end(&mut self, value: impl Into<String>) {
        self.end = value.into();
    }

    /// Live duration preview, `None` while either date does not parse.
    pub fn duration_label(&self) -> Option<String> {
        let start = parse_iso_date(&self.start)?;
        let end = parse_iso_date(&self.end)?;
        Some(duration_label(inclusive_days(start, end)))
    }

    /// Validates the form and builds the updated item.
    ///
    /// Checks run in dialog order: name, start, end, then range.
    pub fn submit(&self) -> Result<TimelineItem, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::EmptyName);
        }
        let start = parse_field(DateField::Start, &self.start)?;
        let end = parse_field(DateField::End, &self.end)?;
        if start > end {
            return Err(FormError::StartAfterEnd { start, end });
        }
        Ok(TimelineItem::with_id(self.item_id, name, start, end)?)
    }
}

fn parse_field(field: DateField, value: &str) -> Result<NaiveDate, FormError> {
    parse_iso_date(value).ok_or_else(|| FormError::InvalidDate {
        field,
        value: value.to_string(),
    })
}
