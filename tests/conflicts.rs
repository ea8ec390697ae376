use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use running_order::model::{Event, find_conflicts, overlaps};
use running_order::selection::Selection;

fn ev(name: &str, stage: &str, day: u32, start: (u32, u32), end: (u32, u32)) -> Event {
    let date = NaiveDate::from_ymd_opt(2023, 8, day).unwrap();
    Event::new(
        name,
        stage,
        date.and_hms_opt(start.0, start.1, 0).unwrap(),
        date.and_hms_opt(end.0, end.1, 0).unwrap(),
    )
}

fn names(selection: &Selection) -> Vec<&str> {
    selection.iter().map(|e| e.name.as_str()).collect()
}

#[test]
fn test_overlap_on_different_stages_is_a_clash() {
    let a = ev("A", "Main", 8, (10, 0), (11, 0));
    let b = ev("B", "Side", 8, (10, 30), (11, 30));
    let selection: Selection = [a, b].into_iter().collect();

    let clashes = find_conflicts(&selection);
    assert_eq!(names(&clashes), ["A", "B"]);
}

#[test]
fn test_touching_sets_do_not_clash() {
    let a = ev("A", "Main", 8, (10, 0), (11, 0));
    let b = ev("B", "Side", 8, (11, 0), (12, 0));
    assert!(!overlaps(&a, &b));

    let selection: Selection = [a, b].into_iter().collect();
    assert!(find_conflicts(&selection).is_empty());
}

#[test]
fn test_past_midnight_end_is_shifted() {
    let late = ev("Late", "Main", 8, (23, 30), (0, 45));
    assert_eq!(late.end_hour(), 24.75);

    let after = ev("After", "Side", 8, (0, 15), (1, 0));
    let before = ev("Before", "Side", 8, (22, 0), (23, 30));
    assert!(overlaps(&late, &after));
    assert!(!overlaps(&late, &before));

    let selection: Selection = [late, after, before].into_iter().collect();
    assert_eq!(names(&find_conflicts(&selection)), ["After", "Late"]);
}

#[test]
fn test_same_time_on_different_days_is_fine() {
    let a = ev("A", "Main", 8, (20, 0), (21, 0));
    let b = ev("B", "Main", 9, (20, 0), (21, 0));
    let selection: Selection = [a, b].into_iter().collect();
    assert!(find_conflicts(&selection).is_empty());
}

#[test]
fn test_event_with_many_clashes_is_listed_once() {
    let long = ev("Long", "Main", 8, (14, 0), (18, 0));
    let selection: Selection = [
        long.clone(),
        ev("B", "Side", 8, (14, 30), (15, 0)),
        ev("C", "Tent", 8, (16, 0), (16, 30)),
        ev("D", "Side", 8, (17, 0), (19, 0)),
    ]
    .into_iter()
    .collect();

    let clashes = find_conflicts(&selection);
    assert_eq!(clashes.len(), 4);
    assert!(clashes.contains(&long));
}

#[test]
fn test_identical_slots_are_not_flagged() {
    // Strict comparisons only: equal start and end never fall strictly inside.
    let a = ev("A", "Main", 8, (10, 0), (11, 0));
    let b = ev("B", "Side", 8, (10, 0), (11, 0));
    assert!(!overlaps(&a, &b));
}

#[test]
fn test_single_event_never_clashes_with_itself() {
    let a = ev("A", "Main", 8, (10, 0), (11, 0));
    let selection: Selection = [a].into_iter().collect();
    assert!(find_conflicts(&selection).is_empty());
}

fn arb_event() -> impl Strategy<Value = Event> {
    (0u32..3, 0u32..4, 120u32..168, 1u32..30).prop_map(|(day, stage, start_slot, len)| {
        // 5-minute slots from 10:00 onward; ends may wrap past midnight.
        let date = NaiveDate::from_ymd_opt(2023, 8, 8 + day).unwrap();
        let start = date.and_hms_opt(0, 0, 0).unwrap() + Duration::minutes(start_slot as i64 * 5);
        let end_time = (start + Duration::minutes(len as i64 * 5)).time();
        Event::new(
            format!("act-{}-{}", day, start_slot),
            format!("stage-{}", stage),
            start,
            date.and_time(end_time),
        )
    })
}

proptest! {
    #[test]
    fn prop_overlap_is_symmetric(a in arb_event(), b in arb_event()) {
        prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
    }

    #[test]
    fn prop_conflicts_are_selected_and_justified(events in prop::collection::vec(arb_event(), 0..12)) {
        let selection: Selection = events.into_iter().collect();
        let clashes = find_conflicts(&selection);

        prop_assert!(clashes.is_subset(&selection));
        for event in &clashes {
            let partner = selection.iter().any(|other| {
                other != event && other.day_key() == event.day_key() && overlaps(event, other)
            });
            prop_assert!(partner, "{} has no clashing partner", event);
        }
        for a in &selection {
            for b in &selection {
                if a != b && a.day_key() == b.day_key() && overlaps(a, b) {
                    prop_assert!(clashes.contains(a) && clashes.contains(b));
                }
            }
        }
    }
}
