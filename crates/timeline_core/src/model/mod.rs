//! Timeline domain model.
//!
//! # Responsibility
//! - Define the item record shared by lane assignment and view-state.
//! - Define the lane partition returned to rendering callers.
//!
//! # Invariants
//! - Every item is identified by a stable `ItemId`.
//! - Items are plain values; lanes hold copies, never aliases into caller data.

pub mod item;
pub mod lane;
