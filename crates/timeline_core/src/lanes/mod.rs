//! Lane assignment for timeline items.
//!
//! # Responsibility
//! - Pack calendar-bound items into the fewest non-overlapping horizontal lanes.
//! - Expose the three packing variants behind one [`LaneStrategy`] switch.
//!
//! # See also
//! - `crate::view::timeline` for the state object that re-runs assignment on edits.

pub mod assign;
