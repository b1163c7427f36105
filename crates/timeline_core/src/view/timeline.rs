//! Timeline view-state.
//!
//! # Responsibility
//! - Own the item set, its lane partition, the viewport and the edit form.
//! - Apply user intents (zoom, pan, drag, edit, add, remove) as transitions.
//! - Scope drag gestures to a session guard that holds pointer capture.
//!
//! # Invariants
//! - `lanes` always equals lane assignment of `items` under `config.strategy`.
//! - A failed transition leaves items and lanes untouched.
//! - At most one gesture holds capture; it is released on `finish` or drop.
//! - At most one edit form is open.

use crate::config::{ViewConfig, ViewConfigError};
use crate::lanes::assign::{assign_lanes_with, LaneError};
use crate::model::item::{ItemId, ItemValidationError, TimelineItem};
use crate::model::lane::LanePartition;
use crate::view::drag::{DragKind, ItemDrag, PanDrag};
use crate::view::editor::{EditForm, FormError};
use crate::view::viewport::{Geometry, TimelineBounds, Viewport};
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from timeline state transitions.
#[derive(Debug)]
pub enum TimelineError {
    /// No item with this id.
    ItemNotFound(ItemId),
    /// An item with this id already exists.
    DuplicateId(ItemId),
    /// Item invariants violated.
    Validation(ItemValidationError),
    /// Lane assignment rejected the item set.
    Lanes(LaneError),
    /// Edit form failed validation.
    Form(FormError),
    /// View configuration rejected.
    Config(ViewConfigError),
    /// `save_edit` without an open form.
    EditorClosed,
}

impl Display for TimelineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ItemNotFound(id) => write!(f, "timeline item not found: {id}"),
            Self::DuplicateId(id) => write!(f, "timeline item already exists: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Lanes(err) => write!(f, "{err}"),
            Self::Form(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::EditorClosed => write!(f, "no item is being edited"),
        }
    }
}

impl Error for TimelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Lanes(err) => Some(err),
            Self::Form(err) => Some(err),
            Self::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ItemValidationError> for TimelineError {
    fn from(value: ItemValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<LaneError> for TimelineError {
    fn from(value: LaneError) -> Self {
        match value {
            LaneError::DuplicateId(id) => Self::DuplicateId(id),
            other => Self::Lanes(other),
        }
    }
}

impl From<FormError> for TimelineError {
    fn from(value: FormError) -> Self {
        Self::Form(value)
    }
}

impl From<ViewConfigError> for TimelineError {
    fn from(value: ViewConfigError) -> Self {
        Self::Config(value)
    }
}

/// Gesture currently holding pointer capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    Item { id: ItemId, kind: DragKind },
    Pan,
}

/// Headless state behind one interactive timeline.
#[derive(Debug, Clone)]
pub struct TimelineState {
    config: ViewConfig,
    items: Vec<TimelineItem>,
    lanes: LanePartition,
    viewport: Viewport,
    editor: Option<EditForm>,
    capture: Option<Capture>,
}

impl TimelineState {
    /// Builds state from an initial item set.
    ///
    /// # Errors
    /// - `Config` when `config` fails validation.
    /// - `Validation`/`Lanes`/`DuplicateId` when the items are malformed.
    pub fn new(items: Vec<TimelineItem>, config: ViewConfig) -> Result<Self, TimelineError> {
        config.validate()?;
        let lanes = assign_lanes_with(&items, config.strategy)?;
        info!(
            "event=timeline_init module=timeline status=ok items={} lanes={} strategy={}",
            items.len(),
            lanes.lane_count(),
            config.strategy
        );
        Ok(Self {
            config,
            items,
            lanes,
            viewport: Viewport::default(),
            editor: None,
            capture: None,
        })
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&TimelineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn lanes(&self) -> &LanePartition {
        &self.lanes
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Date span of all items, `None` when empty.
    pub fn bounds(&self) -> Option<TimelineBounds> {
        TimelineBounds::from_items(&self.items)
    }

    /// Pixel mapping for the current items and viewport.
    pub fn geometry(&self) -> Option<Geometry> {
        self.bounds()
            .map(|bounds| Geometry::new(bounds, self.viewport, &self.config))
    }

    pub fn capture(&self) -> Option<Capture> {
        self.capture
    }

    /// `grabbing` while any gesture holds the pointer, `grab` otherwise.
    pub fn cursor(&self) -> &'static str {
        match self.capture {
            None => "grab",
            Some(_) => "grabbing",
        }
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in(&self.config);
        debug!(
            "event=zoom module=timeline zoom_percent={}",
            self.viewport.zoom_percent()
        );
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out(&self.config);
        debug!(
            "event=zoom module=timeline zoom_percent={}",
            self.viewport.zoom_percent()
        );
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    /// Adds a new item and re-packs lanes.
    pub fn add_item(&mut self, item: TimelineItem) -> Result<(), TimelineError> {
        if self.item(item.id).is_some() {
            return Err(TimelineError::DuplicateId(item.id));
        }
        item.validate()?;
        let id = item.id;
        let mut next = self.items.clone();
        next.push(item);
        self.commit(next)?;
        info!("event=item_added module=timeline status=ok item={id}");
        Ok(())
    }

    /// Removes an item, closing its edit form if open.
    pub fn remove_item(&mut self, id: ItemId) -> Result<TimelineItem, TimelineError> {
        let index = self.index_of(id)?;
        let mut next = self.items.clone();
        let removed = next.remove(index);
        self.commit(next)?;
        if self.editor.as_ref().is_some_and(|form| form.item_id() == id) {
            self.editor = None;
        }
        info!("event=item_removed module=timeline status=ok item={id}");
        Ok(removed)
    }

    /// Replaces an item's dates.
    ///
    /// Returns `false` when the dates are unchanged and nothing was re-packed.
    pub fn update_item_dates(
        &mut self,
        id: ItemId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<bool, TimelineError> {
        let index = self.index_of(id)?;
        let current = &self.items[index];
        if current.start == start && current.end == end {
            return Ok(false);
        }
        let updated = current.with_dates(start, end)?;
        self.replace_at(index, updated)?;
        debug!("event=item_dates_updated module=timeline item={id} start={start} end={end}");
        Ok(true)
    }

    /// Replaces an item wholesale, keyed by its id.
    pub fn replace_item(&mut self, item: TimelineItem) -> Result<(), TimelineError> {
        let index = self.index_of(item.id)?;
        item.validate()?;
        self.replace_at(index, item)
    }

    /// Opens the edit form for an item, replacing any open form.
    pub fn open_editor(&mut self, id: ItemId) -> Result<&mut EditForm, TimelineError> {
        let item = self.item(id).ok_or(TimelineError::ItemNotFound(id))?;
        let form = EditForm::open(item);
        Ok(self.editor.insert(form))
    }

    pub fn editor(&self) -> Option<&EditForm> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut EditForm> {
        self.editor.as_mut()
    }

    /// Validates and applies the open form, then closes it.
    ///
    /// On validation failure the form stays open with its text intact.
    pub fn save_edit(&mut self) -> Result<TimelineItem, TimelineError> {
        let form = self.editor.as_ref().ok_or(TimelineError::EditorClosed)?;
        let updated = match form.submit() {
            Ok(item) => item,
            Err(err) => {
                warn!(
                    "event=edit_rejected module=timeline status=error item={} reason={err}",
                    form.item_id()
                );
                return Err(err.into());
            }
        };
        self.replace_item(updated.clone())?;
        self.editor = None;
        info!(
            "event=item_edited module=timeline status=ok item={}",
            updated.id
        );
        Ok(updated)
    }

    pub fn cancel_edit(&mut self) {
        self.editor = None;
    }

    /// Starts dragging a bar. Capture lasts until the session ends.
    pub fn begin_item_drag(
        &mut self,
        id: ItemId,
        pointer_x: f64,
    ) -> Result<ItemDragSession<'_>, TimelineError> {
        let item = self.item(id).ok_or(TimelineError::ItemNotFound(id))?;
        let geometry = self.geometry().ok_or(TimelineError::ItemNotFound(id))?;
        let drag = ItemDrag::grab(item, pointer_x, geometry, self.config.resize_handle_width);
        self.capture = Some(Capture::Item {
            id,
            kind: drag.kind,
        });
        debug!(
            "event=drag_start module=timeline item={id} kind={:?}",
            drag.kind
        );
        Ok(ItemDragSession { state: self, drag })
    }

    /// Starts panning the background. Capture lasts until the session ends.
    pub fn begin_pan(&mut self, pointer_x: f64) -> PanSession<'_> {
        let drag = PanDrag::grab(pointer_x, self.viewport.pan_offset);
        self.capture = Some(Capture::Pan);
        PanSession { state: self, drag }
    }

    fn index_of(&self, id: ItemId) -> Result<usize, TimelineError> {
        self.items
            .iter()
            .position(|item| item.id == id)
            .ok_or(TimelineError::ItemNotFound(id))
    }

    fn replace_at(&mut self, index: usize, item: TimelineItem) -> Result<(), TimelineError> {
        let mut next = self.items.clone();
        next[index] = item;
        self.commit(next)
    }

    fn commit(&mut self, items: Vec<TimelineItem>) -> Result<(), TimelineError> {
        let lanes = assign_lanes_with(&items, self.config.strategy)?;
        self.items = items;
        self.lanes = lanes;
        Ok(())
    }

    fn release_capture(&mut self) {
        if let Some(capture) = self.capture.take() {
            debug!("event=capture_released module=timeline capture={capture:?}");
        }
    }
}

/// Live bar drag. Dropping the session releases pointer capture.
#[derive(Debug)]
pub struct ItemDragSession<'t> {
    state: &'t mut TimelineState,
    drag: ItemDrag,
}

impl ItemDragSession<'_> {
    pub fn kind(&self) -> DragKind {
        self.drag.kind
    }

    /// Read access for rendering mid-gesture.
    pub fn state(&self) -> &TimelineState {
        self.state
    }

    /// Applies the pointer position; returns whether the item changed.
    ///
    /// Positions that would invert the item are ignored.
    pub fn pointer_move(&mut self, pointer_x: f64) -> Result<bool, TimelineError> {
        match self.drag.proposed_dates(pointer_x) {
            Some((start, end)) => self
                .state
                .update_item_dates(self.drag.item().id, start, end),
            None => Ok(false),
        }
    }

    /// Pointer-up.
    pub fn finish(self) {}
}

impl Drop for ItemDragSession<'_> {
    fn drop(&mut self) {
        self.state.release_capture();
    }
}

/// Live background pan. Dropping the session releases pointer capture.
#[derive(Debug)]
pub struct PanSession<'t> {
    state: &'t mut TimelineState,
    drag: PanDrag,
}

impl PanSession<'_> {
    pub fn state(&self) -> &TimelineState {
        self.state
    }

    pub fn pointer_move(&mut self, pointer_x: f64) {
        let offset = self.drag.pan_offset(pointer_x);
        self.state.viewport.pan_to(offset);
    }

    /// Pointer-up or pointer leaving the scroll area.
    pub fn finish(self) {}
}

impl Drop for PanSession<'_> {
    fn drop(&mut self) {
        self.state.release_capture();
    }
}
