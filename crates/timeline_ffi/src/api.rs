//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose lane packing and edit validation to Dart via FRB.
//! - Keep error semantics simple: envelopes with `ok` plus a message.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Dates cross the boundary as `YYYY-MM-DD` strings, ids as UUID strings.

use log::warn;
use timeline_core::{
    assign_lanes_with, core_version as core_version_inner, init_logging as init_logging_inner,
    parse_iso_date, ping as ping_inner, EditForm, LanePartition, LaneStrategy, TimelineItem,
};
use uuid::Uuid;

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Item record as seen by Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfiTimelineItem {
    /// Stable item ID in string form.
    pub id: String,
    pub name: String,
    /// `YYYY-MM-DD`.
    pub start: String,
    /// `YYYY-MM-DD`.
    pub end: String,
}

impl From<&TimelineItem> for FfiTimelineItem {
    fn from(item: &TimelineItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            start: item.start.format("%Y-%m-%d").to_string(),
            end: item.end.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Lane packing response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneAssignmentResponse {
    pub ok: bool,
    /// Lanes top to bottom; empty on failure.
    pub lanes: Vec<Vec<FfiTimelineItem>>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl LaneAssignmentResponse {
    fn success(partition: &LanePartition) -> Self {
        let lanes = partition
            .lanes()
            .iter()
            .map(|lane| lane.items().iter().map(FfiTimelineItem::from).collect())
            .collect::<Vec<Vec<_>>>();
        let message = format!("Packed into {} lane(s).", lanes.len());
        Self {
            ok: true,
            lanes,
            message,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            lanes: Vec::new(),
            message: message.into(),
        }
    }
}

/// Edit validation response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditValidationResponse {
    pub ok: bool,
    /// Normalized item on success.
    pub item: Option<FfiTimelineItem>,
    pub message: String,
}

/// Packs items into lanes.
///
/// `strategy` accepts `sorted|input-order|best-gap`; empty means `sorted`.
///
/// # FFI contract
/// - Sync call, pure computation.
/// - Never panics; malformed items produce `ok = false` with a message.
#[flutter_rust_bridge::frb(sync)]
pub fn assign_lanes(items: Vec<FfiTimelineItem>, strategy: String) -> LaneAssignmentResponse {
    let strategy = if strategy.trim().is_empty() {
        LaneStrategy::default()
    } else {
        match strategy.parse::<LaneStrategy>() {
            Ok(value) => value,
            Err(err) => {
                return LaneAssignmentResponse::failure(format!("assign_lanes failed: {err}"))
            }
        }
    };

    let items = match items
        .iter()
        .enumerate()
        .map(|(index, item)| to_core_item(item).map_err(|err| format!("item {index}: {err}")))
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(items) => items,
        Err(err) => {
            return LaneAssignmentResponse::failure(format!("assign_lanes failed: {err}"))
        }
    };

    match assign_lanes_with(&items, strategy) {
        Ok(partition) => LaneAssignmentResponse::success(&partition),
        Err(err) => {
            warn!("event=ffi_call module=ffi op=assign_lanes status=error reason={err}");
            LaneAssignmentResponse::failure(format!("assign_lanes failed: {err}"))
        }
    }
}

/// Validates edit-dialog input for one item.
///
/// # FFI contract
/// - Sync call, pure computation.
/// - Never panics; returns the trimmed, validated item on success.
#[flutter_rust_bridge::frb(sync)]
pub fn validate_edit(
    item: FfiTimelineItem,
    name: String,
    start: String,
    end: String,
) -> EditValidationResponse {
    let original = match to_core_item(&item) {
        Ok(value) => value,
        Err(err) => {
            return EditValidationResponse {
                ok: false,
                item: None,
                message: format!("validate_edit failed: {err}"),
            }
        }
    };

    let mut form = EditForm::open(&original);
    form.set_name(name);
    form.set_start(start);
    form.set_end(end);
    match form.submit() {
        Ok(updated) => EditValidationResponse {
            ok: true,
            item: Some(FfiTimelineItem::from(&updated)),
            message: "Item updated.".to_string(),
        },
        Err(err) => EditValidationResponse {
            ok: false,
            item: None,
            message: err.to_string(),
        },
    }
}

fn to_core_item(item: &FfiTimelineItem) -> Result<TimelineItem, String> {
    let id = Uuid::parse_str(item.id.trim())
        .map_err(|err| format!("invalid id `{}`: {err}", item.id))?;
    let start = parse_iso_date(&item.start)
        .ok_or_else(|| format!("invalid start date `{}`", item.start))?;
    let end =
        parse_iso_date(&item.end).ok_or_else(|| format!("invalid end date `{}`", item.end))?;
    // Only the date range is checked; names and nil ids pass through to packing.
    let item = TimelineItem {
        id,
        name: item.name.clone(),
        start,
        end,
    };
    item.validate_dates().map_err(|err| err.to_string())?;
    Ok(item)
}
