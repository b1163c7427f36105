//! Pointer drag gestures over the timeline.
//!
//! Pointer positions are interpreted against the geometry captured at
//! pointer-down, so a bar that moves the timeline's first day mid-gesture does
//! not shift the mapping under the pointer.

use crate::model::item::TimelineItem;
use crate::view::viewport::{offset_date, Geometry};
use chrono::NaiveDate;

/// What a pointer-down on a bar turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Move,
    ResizeStart,
    ResizeEnd,
}

/// Classifies a grab by its offset from the bar's left edge.
pub fn hit_test(offset_in_item: f64, item_width: f64, handle_width: f64) -> DragKind {
    if offset_in_item < handle_width {
        DragKind::ResizeStart
    } else if offset_in_item > item_width - handle_width {
        DragKind::ResizeEnd
    } else {
        DragKind::Move
    }
}

/// Bar drag captured at pointer-down.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDrag {
    pub kind: DragKind,
    original: TimelineItem,
    grab_offset: f64,
    width_at_grab: f64,
    geometry: Geometry,
}

impl ItemDrag {
    pub(crate) fn grab(
        item: &TimelineItem,
        pointer_x: f64,
        geometry: Geometry,
        handle_width: f64,
    ) -> Self {
        let left = geometry.date_to_position(item.start);
        let width = geometry.item_width(item.start, item.end);
        let grab_offset = pointer_x - left;
        Self {
            kind: hit_test(grab_offset, width, handle_width),
            original: item.clone(),
            grab_offset,
            width_at_grab: width,
            geometry,
        }
    }

    pub fn item(&self) -> &TimelineItem {
        &self.original
    }

    /// Dates the bar would take with the pointer at `pointer_x`.
    ///
    /// Returns `None` when the gesture would invert the item (resize past the
    /// opposite edge) or leave the representable calendar.
    pub fn proposed_dates(&self, pointer_x: f64) -> Option<(NaiveDate, NaiveDate)> {
        let left = pointer_x - self.grab_offset;
        match self.kind {
            DragKind::Move => {
                let start = self.geometry.position_to_date(left)?;
                let span = (self.original.end - self.original.start).num_days();
                Some((start, offset_date(start, span)?))
            }
            DragKind::ResizeStart => {
                let start = self.geometry.position_to_date(left)?;
                (start < self.original.end).then_some((start, self.original.end))
            }
            DragKind::ResizeEnd => {
                let end = self.geometry.position_to_date(left + self.width_at_grab)?;
                (end > self.original.start).then_some((self.original.start, end))
            }
        }
    }
}

/// Background pan drag captured at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanDrag {
    anchor: f64,
}

impl PanDrag {
    pub(crate) fn grab(pointer_x: f64, pan_offset: f64) -> Self {
        Self {
            anchor: pointer_x - pan_offset,
        }
    }

    pub fn pan_offset(&self, pointer_x: f64) -> f64 {
        pointer_x - self.anchor
    }
}
