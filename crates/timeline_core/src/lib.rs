//! Core domain logic for the timeline.
//! Lane packing and headless view-state live here; rendering stays with callers.

pub mod config;
pub mod lanes;
pub mod logging;
pub mod model;
pub mod seed;
pub mod view;

pub use config::{ViewConfig, ViewConfigError};
pub use lanes::assign::{
    assign_lanes, assign_lanes_with, LaneError, LaneStrategy, ParseStrategyError,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::item::{ItemId, ItemValidationError, TimelineItem};
pub use model::lane::{Lane, LanePartition};
pub use seed::{default_items, parse_items, SeedError};
pub use view::drag::DragKind;
pub use view::editor::{parse_iso_date, DateField, EditForm, FormError};
pub use view::timeline::{Capture, ItemDragSession, PanSession, TimelineError, TimelineState};
pub use view::viewport::{Geometry, GridLine, ScaleMark, TimelineBounds, Viewport};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
