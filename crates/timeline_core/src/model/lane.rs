//! Lane and lane partition model.
//!
//! # Invariants
//! - Items inside a lane are in assignment order.
//! - Each item starts on or after the end of the item placed before it.
//! - Lane 0 is the topmost track.

use crate::model::item::{ItemId, TimelineItem};
use chrono::NaiveDate;
use serde::Serialize;

/// One horizontal track of non-overlapping items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Lane {
    items: Vec<TimelineItem>,
}

impl Lane {
    pub(crate) fn push(&mut self, item: TimelineItem) {
        self.items.push(item);
    }

    /// Items in assignment order.
    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    /// End date of the most recently added item.
    pub fn end(&self) -> Option<NaiveDate> {
        self.items.last().map(|item| item.end)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Ordered set of lanes produced by the lane assigner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LanePartition {
    lanes: Vec<Lane>,
}

impl LanePartition {
    pub(crate) fn from_lanes(lanes: Vec<Lane>) -> Self {
        Self { lanes }
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    /// Total number of items across all lanes.
    pub fn item_count(&self) -> usize {
        self.lanes.iter().map(Lane::len).sum()
    }

    /// Lane index holding the given item, if any.
    pub fn lane_of(&self, id: ItemId) -> Option<usize> {
        self.lanes
            .iter()
            .position(|lane| lane.items.iter().any(|item| item.id == id))
    }

    /// Flattened `(lane_index, item)` pairs in lane-major order.
    pub fn iter_items(&self) -> impl Iterator<Item = (usize, &TimelineItem)> + '_ {
        self.lanes
            .iter()
            .enumerate()
            .flat_map(|(index, lane)| lane.items.iter().map(move |item| (index, item)))
    }

    /// Item ids per lane, handy for compact comparisons.
    pub fn id_layout(&self) -> Vec<Vec<ItemId>> {
        self.lanes
            .iter()
            .map(|lane| lane.items.iter().map(|item| item.id).collect())
            .collect()
    }
}
