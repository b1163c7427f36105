use chrono::NaiveDate;
use timeline_core::{
    Capture, DragKind, FormError, LaneStrategy, TimelineError, TimelineItem, TimelineState,
    ViewConfig, ViewConfigError,
};
use uuid::Uuid;

fn jan(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 1, d).expect("valid date")
}

fn item(name: &str, start: u32, end: u32) -> TimelineItem {
    TimelineItem::new(name, jan(start), jan(end)).expect("valid item")
}

/// A[Jan1-Jan3] and B[Jan2-Jan4]: two lanes, day 0 is Jan 1, A spans 0..200px.
fn two_overlapping() -> (TimelineState, TimelineItem, TimelineItem) {
    let a = item("A", 1, 3);
    let b = item("B", 2, 4);
    let state = TimelineState::new(vec![a.clone(), b.clone()], ViewConfig::default())
        .expect("state should build");
    (state, a, b)
}

#[test]
fn new_state_packs_initial_items() {
    let (state, a, b) = two_overlapping();
    assert_eq!(state.lanes().id_layout(), vec![vec![a.id], vec![b.id]]);
    assert_eq!(state.bounds().map(|b| b.total_days), Some(4));
    assert_eq!(state.cursor(), "grab");
}

#[test]
fn invalid_config_is_rejected() {
    let config = ViewConfig {
        pixels_per_day: 0.0,
        ..ViewConfig::default()
    };
    let err = TimelineState::new(Vec::new(), config).unwrap_err();
    assert!(matches!(
        err,
        TimelineError::Config(ViewConfigError::OutOfRange {
            field: "pixels_per_day",
            ..
        })
    ));
}

#[test]
fn configured_strategy_drives_packing() {
    let items = vec![item("A", 5, 6), item("B", 1, 2), item("C", 3, 4)];
    let config = ViewConfig {
        strategy: LaneStrategy::InputOrderFirstFit,
        ..ViewConfig::default()
    };
    let state = TimelineState::new(items, config).expect("state should build");
    assert_eq!(state.lanes().lane_count(), 2);
}

#[test]
fn move_drag_shifts_item_and_repacks_lanes() {
    let (mut state, a, _) = two_overlapping();

    let mut session = state.begin_item_drag(a.id, 100.0).expect("drag should start");
    assert_eq!(session.kind(), DragKind::Move);
    assert_eq!(
        session.state().capture(),
        Some(Capture::Item {
            id: a.id,
            kind: DragKind::Move,
        })
    );
    assert_eq!(session.state().cursor(), "grabbing");

    assert!(session.pointer_move(400.0).expect("move should apply"));
    // Geometry is frozen at grab time, so the same pointer maps to the same dates.
    assert!(!session.pointer_move(400.0).expect("no-op move"));
    session.finish();

    let moved = state.item(a.id).expect("item still present");
    assert_eq!((moved.start, moved.end), (jan(4), jan(6)));
    assert_eq!(state.lanes().lane_count(), 1);
    assert_eq!(state.capture(), None);
}

#[test]
fn resize_end_extends_item_but_never_inverts_it() {
    let (mut state, a, _) = two_overlapping();
    {
        let mut session = state.begin_item_drag(a.id, 190.0).expect("drag should start");
        assert_eq!(session.kind(), DragKind::ResizeEnd);
        assert_eq!(session.state().cursor(), "grabbing");
        assert!(session.pointer_move(390.0).expect("resize should apply"));
        assert!(!session.pointer_move(-100.0).expect("inverting resize is ignored"));
    }
    let resized = state.item(a.id).expect("item still present");
    assert_eq!((resized.start, resized.end), (jan(1), jan(5)));
    assert_eq!(state.capture(), None);
}

#[test]
fn resize_start_stops_before_end() {
    let (mut state, a, _) = two_overlapping();
    let mut session = state.begin_item_drag(a.id, 5.0).expect("drag should start");
    assert_eq!(session.kind(), DragKind::ResizeStart);
    assert!(session.pointer_move(105.0).expect("resize should apply"));
    assert!(!session.pointer_move(305.0).expect("crossing end is ignored"));
    drop(session);

    let resized = state.item(a.id).expect("item still present");
    assert_eq!((resized.start, resized.end), (jan(2), jan(3)));
}

#[test]
fn drag_of_unknown_item_fails_without_capture() {
    let (mut state, _, _) = two_overlapping();
    let err = state.begin_item_drag(Uuid::new_v4(), 0.0).unwrap_err();
    assert!(matches!(err, TimelineError::ItemNotFound(_)));
    assert_eq!(state.capture(), None);
}

#[test]
fn pan_session_moves_viewport_and_releases_on_drop() {
    let (mut state, _, _) = two_overlapping();
    {
        let mut pan = state.begin_pan(500.0);
        assert_eq!(pan.state().capture(), Some(Capture::Pan));
        pan.pointer_move(350.0);
        pan.pointer_move(320.0);
    }
    assert_eq!(state.viewport().pan_offset, -180.0);
    assert_eq!(state.capture(), None);

    let mut pan = state.begin_pan(0.0);
    pan.pointer_move(30.0);
    pan.finish();
    assert_eq!(state.viewport().pan_offset, -150.0);
}

#[test]
fn zoom_controls_clamp_and_reset() {
    let (mut state, _, _) = two_overlapping();
    state.zoom_in();
    assert_eq!(state.viewport().zoom_percent(), 120);
    for _ in 0..10 {
        state.zoom_out();
    }
    assert_eq!(state.viewport().zoom_percent(), 30);
    state.reset_view();
    assert_eq!(state.viewport().zoom_percent(), 100);
}

#[test]
fn save_edit_applies_trimmed_form_and_closes_it() {
    let (mut state, a, _) = two_overlapping();
    let form = state.open_editor(a.id).expect("editor should open");
    assert_eq!(form.start, "2021-01-01");
    form.set_name("  Renamed  ");
    form.set_end("2021-01-09");
    assert_eq!(form.duration_label().as_deref(), Some("9 days"));

    let saved = state.save_edit().expect("edit should save");
    assert_eq!(saved.id, a.id);
    assert_eq!(saved.name, "Renamed");
    assert_eq!(state.item(a.id), Some(&saved));
    assert!(state.editor().is_none());
    assert_eq!(state.lanes().lane_count(), 2);
}

#[test]
fn rejected_edit_keeps_form_open_and_item_unchanged() {
    let (mut state, a, _) = two_overlapping();
    state.open_editor(a.id).expect("editor should open");
    state
        .editor_mut()
        .expect("editor is open")
        .set_start("2021-02-01");

    let err = state.save_edit().unwrap_err();
    assert!(matches!(
        err,
        TimelineError::Form(FormError::StartAfterEnd { .. })
    ));
    assert!(state.editor().is_some());
    assert_eq!(state.item(a.id), Some(&a));

    state.cancel_edit();
    assert!(matches!(
        state.save_edit().unwrap_err(),
        TimelineError::EditorClosed
    ));
}

#[test]
fn add_and_remove_items_repack_lanes() {
    let (mut state, a, b) = two_overlapping();

    let c = item("C", 3, 6);
    state.add_item(c.clone()).expect("add should succeed");
    // C starts when A ends, so it follows A in lane 0.
    assert_eq!(state.lanes().lane_of(c.id), Some(0));

    assert!(matches!(
        state.add_item(c.clone()).unwrap_err(),
        TimelineError::DuplicateId(id) if id == c.id
    ));

    state.open_editor(b.id).expect("editor should open");
    let removed = state.remove_item(b.id).expect("remove should succeed");
    assert_eq!(removed, b);
    assert!(state.editor().is_none());
    assert_eq!(state.lanes().id_layout(), vec![vec![a.id, c.id]]);
}

#[test]
fn update_with_same_dates_is_a_no_op() {
    let (mut state, a, _) = two_overlapping();
    assert!(!state
        .update_item_dates(a.id, a.start, a.end)
        .expect("update should succeed"));
    let err = state.update_item_dates(a.id, jan(5), jan(4)).unwrap_err();
    assert!(matches!(err, TimelineError::Validation(_)));
    assert_eq!(state.item(a.id), Some(&a));
}

#[test]
fn geometry_follows_items_and_viewport() {
    let (mut state, a, _) = two_overlapping();
    state.zoom_in();
    let geometry = state.geometry().expect("non-empty timeline");
    assert_eq!(geometry.date_to_position(a.start), 0.0);
    assert_eq!(geometry.item_width(a.start, a.end), 2.0 * 120.0);

    let empty = TimelineState::new(Vec::new(), ViewConfig::default()).expect("empty is valid");
    assert!(empty.geometry().is_none());
    assert!(empty.lanes().is_empty());
}
