//! Seed item loading.
//!
//! # Responsibility
//! - Decode item lists from JSON arrays of `{id, name, start, end}` records.
//! - Ship a bundled sample set for demos and smoke checks.
//!
//! # Invariants
//! - Every returned item passed model validation during decoding.
//! - Returned ids are unique within one list.

use crate::model::item::{ItemId, TimelineItem};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

const DEFAULT_SEED_JSON: &str = include_str!("../data/seed_items.json");

/// Errors from seed decoding.
#[derive(Debug)]
pub enum SeedError {
    /// Malformed JSON or an item that failed validation.
    Parse(serde_json::Error),
    /// Two records share an id.
    DuplicateId(ItemId),
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid seed items: {err}"),
            Self::DuplicateId(id) => write!(f, "duplicate seed item id: {id}"),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Decodes a JSON array of items.
pub fn parse_items(raw: &str) -> Result<Vec<TimelineItem>, SeedError> {
    let items: Vec<TimelineItem> = serde_json::from_str(raw)?;
    let mut seen = HashSet::with_capacity(items.len());
    for item in &items {
        if !seen.insert(item.id) {
            return Err(SeedError::DuplicateId(item.id));
        }
    }
    Ok(items)
}

/// Bundled sample items.
pub fn default_items() -> Result<Vec<TimelineItem>, SeedError> {
    parse_items(DEFAULT_SEED_JSON)
}
