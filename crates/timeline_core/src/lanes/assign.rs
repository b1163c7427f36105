//! Greedy interval packing of timeline items into lanes.
//!
//! # Responsibility
//! - Partition items into lanes so that no two items in a lane overlap.
//! - Keep the partition deterministic for a given input order.
//!
//! # Invariants
//! - An item fits a lane iff the lane's end date is `<=` the item's start date,
//!   so same-day adjacency shares a lane.
//! - When several lanes fit, first-fit strategies take the lowest index.
//! - Sorting is stable: equal start dates keep their input order.
//! - Assignment is pure and never logs; input items are cloned into lanes.

use crate::model::item::{ItemId, ItemValidationError, TimelineItem};
use crate::model::lane::{Lane, LanePartition};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Lane assignment variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LaneStrategy {
    /// Stable sort by start date, then first-fit. Produces the minimum number
    /// of lanes for items with a positive span.
    #[default]
    SortedFirstFit,
    /// First-fit in the caller's order. Lanes stay overlap-free, but the lane
    /// count is only minimal when the input is already sorted by start date.
    InputOrderFirstFit,
    /// Stable sort by start date, then pick the fitting lane that ended most
    /// recently, leaving the smallest idle gap.
    BestGap,
}

impl LaneStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SortedFirstFit => "sorted",
            Self::InputOrderFirstFit => "input-order",
            Self::BestGap => "best-gap",
        }
    }
}

impl Display for LaneStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown strategy name passed to [`LaneStrategy::from_str`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStrategyError(pub String);

impl Display for ParseStrategyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported lane strategy `{}`; expected sorted|input-order|best-gap",
            self.0
        )
    }
}

impl Error for ParseStrategyError {}

impl FromStr for LaneStrategy {
    type Err = ParseStrategyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sorted" | "sorted-first-fit" => Ok(Self::SortedFirstFit),
            "input-order" | "input-order-first-fit" => Ok(Self::InputOrderFirstFit),
            "best-gap" => Ok(Self::BestGap),
            other => Err(ParseStrategyError(other.to_string())),
        }
    }
}

/// Errors for malformed assigner input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaneError {
    /// Item at `index` breaks an item invariant.
    InvalidItem {
        index: usize,
        source: ItemValidationError,
    },
    /// Two input items share one id.
    DuplicateId(ItemId),
}

impl Display for LaneError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidItem { index, source } => write!(f, "invalid item at {index}: {source}"),
            Self::DuplicateId(id) => write!(f, "duplicate item id: {id}"),
        }
    }
}

impl Error for LaneError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidItem { source, .. } => Some(source),
            Self::DuplicateId(_) => None,
        }
    }
}

/// Assigns lanes with the default [`LaneStrategy::SortedFirstFit`].
///
/// # Errors
/// - [`LaneError::InvalidItem`] when any item ends before it starts.
/// - [`LaneError::DuplicateId`] when two items share an id.
pub fn assign_lanes(items: &[TimelineItem]) -> Result<LanePartition, LaneError> {
    assign_lanes_with(items, LaneStrategy::SortedFirstFit)
}

/// Assigns lanes with an explicit strategy.
///
/// Empty input yields an empty partition. The same input slice always yields
/// the same partition, so callers may memoize on the item sequence.
pub fn assign_lanes_with(
    items: &[TimelineItem],
    strategy: LaneStrategy,
) -> Result<LanePartition, LaneError> {
    validate_items(items)?;

    let partition = match strategy {
        LaneStrategy::SortedFirstFit => sorted_first_fit(&sort_by_start(items)),
        LaneStrategy::InputOrderFirstFit => first_fit_scan(items.iter()),
        LaneStrategy::BestGap => best_gap(&sort_by_start(items)),
    };
    Ok(partition)
}

fn validate_items(items: &[TimelineItem]) -> Result<(), LaneError> {
    let mut seen = HashSet::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        item.validate_dates()
            .map_err(|source| LaneError::InvalidItem { index, source })?;
        if !seen.insert(item.id) {
            return Err(LaneError::DuplicateId(item.id));
        }
    }
    Ok(())
}

fn sort_by_start(items: &[TimelineItem]) -> Vec<&TimelineItem> {
    let mut ordered = items.iter().collect::<Vec<_>>();
    // `sort_by_key` is stable: equal starts keep input order.
    ordered.sort_by_key(|item| item.start);
    ordered
}

/// Linear first-fit: scan lanes from 0 and take the first whose end fits.
///
/// O(n * lanes). Used directly for the input-order variant.
pub(crate) fn first_fit_scan<'a>(
    items: impl IntoIterator<Item = &'a TimelineItem>,
) -> LanePartition {
    let mut lanes: Vec<Lane> = Vec::new();
    let mut lane_ends: Vec<NaiveDate> = Vec::new();

    for item in items {
        match lane_ends.iter().position(|end| *end <= item.start) {
            Some(index) => {
                lane_ends[index] = item.end;
                lanes[index].push(item.clone());
            }
            None => {
                lane_ends.push(item.end);
                let mut lane = Lane::default();
                lane.push(item.clone());
                lanes.push(lane);
            }
        }
    }

    LanePartition::from_lanes(lanes)
}

/// First-fit over start-sorted items in O(n log n).
///
/// Busy lanes sit in a min-heap keyed by end date. Because starts never
/// decrease, a lane released for one item stays eligible for every later item,
/// so the free set is exactly the set of lanes a linear scan would accept and
/// taking its smallest index reproduces the scan.
fn sorted_first_fit(sorted: &[&TimelineItem]) -> LanePartition {
    let mut lanes: Vec<Lane> = Vec::new();
    let mut busy: BinaryHeap<Reverse<(NaiveDate, usize)>> = BinaryHeap::new();
    let mut free: BTreeSet<usize> = BTreeSet::new();

    for item in sorted {
        while let Some(Reverse((end, index))) = busy.peek().copied() {
            if end > item.start {
                break;
            }
            busy.pop();
            free.insert(index);
        }

        let index = match free.pop_first() {
            Some(index) => index,
            None => {
                lanes.push(Lane::default());
                lanes.len() - 1
            }
        };
        lanes[index].push((*item).clone());
        busy.push(Reverse((item.end, index)));
    }

    LanePartition::from_lanes(lanes)
}

fn best_gap(sorted: &[&TimelineItem]) -> LanePartition {
    let mut lanes: Vec<Lane> = Vec::new();
    let mut lane_ends: Vec<NaiveDate> = Vec::new();

    for item in sorted {
        let mut best: Option<usize> = None;
        for (index, end) in lane_ends.iter().enumerate() {
            if *end > item.start {
                continue;
            }
            // Strict comparison keeps the lowest index on equal ends.
            if best.map_or(true, |current| *end > lane_ends[current]) {
                best = Some(index);
            }
        }

        let index = match best {
            Some(index) => index,
            None => {
                lanes.push(Lane::default());
                lane_ends.push(item.end);
                lanes.len() - 1
            }
        };
        lane_ends[index] = item.end;
        lanes[index].push((*item).clone());
    }

    LanePartition::from_lanes(lanes)
}
