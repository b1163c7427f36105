use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use timeline_core::{
    assign_lanes, assign_lanes_with, ItemValidationError, LaneError, LanePartition, LaneStrategy,
    TimelineItem,
};
use uuid::Uuid;

const ALL_STRATEGIES: [LaneStrategy; 3] = [
    LaneStrategy::SortedFirstFit,
    LaneStrategy::InputOrderFirstFit,
    LaneStrategy::BestGap,
];

fn jan(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 1, d).expect("valid date")
}

fn item(name: &str, start: u32, end: u32) -> TimelineItem {
    TimelineItem::new(name, jan(start), jan(end)).expect("valid item")
}

fn names(partition: &LanePartition) -> Vec<Vec<&str>> {
    partition
        .lanes()
        .iter()
        .map(|lane| lane.items().iter().map(|i| i.name.as_str()).collect())
        .collect()
}

#[test]
fn empty_input_yields_empty_partition() {
    for strategy in ALL_STRATEGIES {
        let partition = assign_lanes_with(&[], strategy).expect("empty input is valid");
        assert!(partition.is_empty());
        assert_eq!(partition.item_count(), 0);
    }
}

#[test]
fn single_item_gets_one_lane() {
    let partition = assign_lanes(&[item("solo", 4, 4)]).expect("assign");
    assert_eq!(names(&partition), vec![vec!["solo"]]);
}

#[test]
fn overlapping_items_split_into_two_lanes() {
    let partition = assign_lanes(&[item("A", 1, 3), item("B", 2, 4)]).expect("assign");
    assert_eq!(names(&partition), vec![vec!["A"], vec!["B"]]);
}

#[test]
fn disjoint_items_share_one_lane() {
    let partition = assign_lanes(&[item("A", 1, 3), item("B", 4, 6)]).expect("assign");
    assert_eq!(names(&partition), vec![vec!["A", "B"]]);
}

#[test]
fn same_day_adjacency_shares_a_lane() {
    let partition = assign_lanes(&[item("A", 1, 3), item("B", 3, 5)]).expect("assign");
    assert_eq!(names(&partition), vec![vec!["A", "B"]]);
}

#[test]
fn short_items_stack_sequentially_beside_a_long_one() {
    let items = [item("A", 1, 10), item("B", 2, 3), item("C", 4, 5)];
    let partition = assign_lanes(&items).expect("assign");
    assert_eq!(names(&partition), vec![vec!["A"], vec!["B", "C"]]);
}

#[test]
fn three_items_covering_one_day_need_three_lanes() {
    let items = [item("A", 1, 3), item("B", 2, 4), item("C", 2, 5)];
    let partition = assign_lanes(&items).expect("assign");
    assert_eq!(names(&partition), vec![vec!["A"], vec!["B"], vec!["C"]]);
}

#[test]
fn equal_starts_keep_input_order() {
    let items = [item("late", 5, 6), item("first", 1, 8), item("second", 1, 2)];
    let partition = assign_lanes(&items).expect("assign");
    assert_eq!(
        names(&partition),
        vec![vec!["first"], vec!["second", "late"]]
    );
}

#[test]
fn input_order_variant_is_not_minimal_on_unsorted_input() {
    let items = [item("A", 5, 6), item("B", 1, 2), item("C", 3, 4)];

    let in_order = assign_lanes_with(&items, LaneStrategy::InputOrderFirstFit).expect("assign");
    assert_eq!(names(&in_order), vec![vec!["A"], vec!["B", "C"]]);

    let sorted = assign_lanes(&items).expect("assign");
    assert_eq!(names(&sorted), vec![vec!["B", "C", "A"]]);
}

#[test]
fn lane_of_reports_assigned_lane() {
    let items = [item("A", 1, 3), item("B", 2, 4)];
    let partition = assign_lanes(&items).expect("assign");
    assert_eq!(partition.lane_of(items[0].id), Some(0));
    assert_eq!(partition.lane_of(items[1].id), Some(1));
    assert_eq!(partition.lane_of(Uuid::new_v4()), None);
    assert_eq!(partition.lanes()[1].end(), Some(jan(4)));
}

#[test]
fn reversed_item_is_rejected_with_its_index() {
    let mut bad = item("bad", 1, 2);
    bad.start = jan(9);
    let err = assign_lanes(&[item("ok", 1, 2), bad]).unwrap_err();
    assert_eq!(
        err,
        LaneError::InvalidItem {
            index: 1,
            source: ItemValidationError::InvalidDateRange {
                start: jan(9),
                end: jan(2),
            },
        }
    );
    assert!(err.to_string().contains("invalid item at 1"));
}

#[test]
fn blank_names_and_nil_ids_do_not_block_packing() {
    let mut unnamed = item("A", 1, 3);
    unnamed.name = String::new();
    let mut nil = item("C", 6, 7);
    nil.id = Uuid::nil();
    let partition = assign_lanes(&[unnamed.clone(), item("B", 4, 5), nil])
        .expect("blank names and nil ids are packable");
    assert_eq!(partition.lane_count(), 1);
    assert_eq!(partition.lane_of(unnamed.id), Some(0));
    assert_eq!(names(&partition), vec![vec!["", "B", "C"]]);
}

#[test]
fn duplicate_ids_are_rejected() {
    let a = item("A", 1, 2);
    let mut b = item("B", 3, 4);
    b.id = a.id;
    let err = assign_lanes(&[a.clone(), b]).unwrap_err();
    assert_eq!(err, LaneError::DuplicateId(a.id));
}

fn arbitrary_items(min_span: u64) -> impl Strategy<Value = Vec<TimelineItem>> {
    proptest::collection::vec((0u64..60, min_span..15), 0..40).prop_map(|spans| {
        let base = jan(1);
        spans
            .into_iter()
            .enumerate()
            .map(|(index, (offset, span))| {
                let start = base + Days::new(offset);
                let end = start + Days::new(span);
                TimelineItem::new(format!("item-{index}"), start, end).expect("valid item")
            })
            .collect()
    })
}

/// Deepest stack of items covering one instant, treating each item as the
/// half-open day range `[start, end)`.
fn max_overlap(items: &[TimelineItem]) -> usize {
    items
        .iter()
        .map(|probe| {
            items
                .iter()
                .filter(|other| other.start <= probe.start && probe.start < other.end)
                .count()
        })
        .max()
        .unwrap_or(0)
}

fn sorted_ids(mut ids: Vec<Uuid>) -> Vec<Uuid> {
    ids.sort();
    ids
}

proptest! {
    #[test]
    fn lanes_never_hold_overlapping_items(items in arbitrary_items(0)) {
        for strategy in ALL_STRATEGIES {
            let partition = assign_lanes_with(&items, strategy).expect("assign");
            for lane in partition.lanes() {
                for pair in lane.items().windows(2) {
                    prop_assert!(pair[0].end <= pair[1].start);
                }
            }
        }
    }

    #[test]
    fn lanes_hold_every_item_exactly_once(items in arbitrary_items(0)) {
        let expected = sorted_ids(items.iter().map(|i| i.id).collect());
        for strategy in ALL_STRATEGIES {
            let partition = assign_lanes_with(&items, strategy).expect("assign");
            let actual = sorted_ids(partition.iter_items().map(|(_, i)| i.id).collect());
            prop_assert_eq!(&actual, &expected);
        }
    }

    #[test]
    fn sorted_strategies_use_minimum_lane_count(items in arbitrary_items(1)) {
        let depth = max_overlap(&items);
        let first_fit = assign_lanes(&items).expect("assign");
        prop_assert_eq!(first_fit.lane_count(), depth);
        let best = assign_lanes_with(&items, LaneStrategy::BestGap).expect("assign");
        prop_assert_eq!(best.lane_count(), depth);
    }

    #[test]
    fn assignment_is_deterministic(items in arbitrary_items(0)) {
        for strategy in ALL_STRATEGIES {
            let first = assign_lanes_with(&items, strategy).expect("assign");
            let second = assign_lanes_with(&items, strategy).expect("assign");
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn input_order_matches_sorted_on_presorted_input(items in arbitrary_items(0)) {
        let mut presorted = items;
        presorted.sort_by_key(|item| item.start);
        let in_order = assign_lanes_with(&presorted, LaneStrategy::InputOrderFirstFit)
            .expect("assign");
        let sorted = assign_lanes(&presorted).expect("assign");
        prop_assert_eq!(in_order, sorted);
    }
}
