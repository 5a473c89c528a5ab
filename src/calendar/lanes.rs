use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use chrono::Datelike;

use super::month::{clip_to_month, month_bounds};
use super::{Event, MonthLanes, Placement};
use crate::error::Result;

/// Assign every event visible in `year-month` a lane (slot).
///
/// Events are processed by start date, longer events first among equal
/// starts. Each takes the lowest slot not used on any of its visible days and
/// keeps it for its whole visible span. Events outside the month produce no
/// placements. Any event with `start > end` fails the whole call.
pub fn allocate_calendar_lanes(
    events: &[Event],
    year: i32,
    month: u32,
) -> Result<MonthLanes<'_>> {
    let (first, last) = month_bounds(year, month)?;
    for event in events {
        event.validate()?;
    }

    let mut order: Vec<usize> = (0..events.len()).collect();
    order.sort_by_key(|&i| (events[i].start, Reverse(events[i].duration_days())));

    // used[d] = slots taken on day d + 1
    let mut used: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); last.day() as usize];
    let mut days: BTreeMap<u32, Vec<Placement<'_>>> = BTreeMap::new();
    let mut slots: BTreeMap<usize, usize> = BTreeMap::new();

    for index in order {
        let event = &events[index];
        let Some((lo, hi)) = clip_to_month(event.start, event.end, first, last) else {
            continue;
        };
        let (lo_day, hi_day) = (lo.day(), hi.day());
        let span = (lo_day as usize - 1)..hi_day as usize;

        let taken: BTreeSet<usize> = used[span.clone()]
            .iter()
            .flat_map(|day| day.iter().copied())
            .collect();
        let slot = (0..).find(|s| !taken.contains(s)).unwrap_or_default();

        tracing::debug!(
            "Event '{}' ({} ~ {}) -> slot {} on days {}..={}",
            event.name,
            event.start,
            event.end,
            slot,
            lo_day,
            hi_day
        );

        for day_slots in &mut used[span] {
            day_slots.insert(slot);
        }
        slots.insert(index, slot);

        for day in lo_day..=hi_day {
            days.entry(day).or_default().push(Placement {
                event,
                event_index: index,
                day,
                slot,
                is_range_start: day == lo_day && lo == event.start,
                is_range_end: day == hi_day && hi == event.end,
                is_first_visible: day == lo_day,
                is_last_visible: day == hi_day,
            });
        }
    }

    for placements in days.values_mut() {
        placements.sort_by_key(|p| p.slot);
    }

    let lanes = MonthLanes::new(year, month, days, slots);
    tracing::info!(
        "Allocated {} of {} events into {} lanes for {}-{:02}",
        lanes.visible_events(),
        events.len(),
        lanes.lane_count(),
        year,
        month
    );
    Ok(lanes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::EventKind;
    use crate::error::Error;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn may(name: &str, start: u32, end: u32) -> Event {
        Event::subscription(name, date(2025, 5, start), date(2025, 5, end))
    }

    #[test]
    fn three_day_event_keeps_its_slot() {
        let events = vec![may("A", 7, 9)];
        let lanes = allocate_calendar_lanes(&events, 2025, 5).unwrap();
        assert_eq!(lanes.days().keys().copied().collect::<Vec<_>>(), [7, 8, 9]);

        let cells: Vec<&Placement> = (7..=9).map(|d| &lanes.placements_on(d)[0]).collect();
        assert!(cells.iter().all(|p| p.slot == 0 && p.event_index == 0));
        assert_eq!(
            cells.iter().map(|p| p.is_range_start).collect::<Vec<_>>(),
            [true, false, false]
        );
        assert_eq!(
            cells.iter().map(|p| p.is_range_end).collect::<Vec<_>>(),
            [false, false, true]
        );
        assert_eq!(lanes.lane_count(), 1);
    }

    #[test]
    fn identical_ranges_get_distinct_slots() {
        let events = vec![may("A", 7, 9), may("B", 7, 9)];
        let lanes = allocate_calendar_lanes(&events, 2025, 5).unwrap();
        for day in 7..=9 {
            let slots: Vec<usize> = lanes.placements_on(day).iter().map(|p| p.slot).collect();
            assert_eq!(slots, [0, 1]);
        }
        // Stable tie: input order decides.
        assert_eq!(lanes.slot_of(0), Some(0));
        assert_eq!(lanes.slot_of(1), Some(1));
        assert_eq!(lanes.lane_count(), 2);
    }

    #[test]
    fn event_from_previous_month_is_clipped() {
        let events = vec![Event::subscription(
            "A",
            date(2025, 4, 28),
            date(2025, 5, 2),
        )];
        let lanes = allocate_calendar_lanes(&events, 2025, 5).unwrap();
        assert_eq!(lanes.days().keys().copied().collect::<Vec<_>>(), [1, 2]);

        let first = lanes.placements_on(1)[0];
        assert!(!first.is_range_start);
        assert!(first.is_first_visible);
        assert!(!first.is_range_end);

        let second = lanes.placements_on(2)[0];
        assert!(second.is_range_end);
        assert!(second.is_last_visible);
        assert_eq!(second.event.start, date(2025, 4, 28));
    }

    #[test]
    fn event_running_into_next_month_is_clipped() {
        let events = vec![Event::subscription(
            "A",
            date(2025, 5, 30),
            date(2025, 6, 3),
        )];
        let lanes = allocate_calendar_lanes(&events, 2025, 5).unwrap();
        let last = lanes.placements_on(31)[0];
        assert!(last.is_last_visible);
        assert!(!last.is_range_end);
        assert!(lanes.placements_on(30)[0].is_range_start);
    }

    #[test]
    fn chain_of_boundary_overlaps() {
        // A and C never share a day; B touches both.
        let events = vec![may("A", 1, 3), may("B", 3, 5), may("C", 5, 7)];
        let lanes = allocate_calendar_lanes(&events, 2025, 5).unwrap();
        assert_eq!(lanes.slot_of(0), Some(0));
        assert_eq!(lanes.slot_of(1), Some(1));
        assert_eq!(lanes.slot_of(2), Some(0));
        assert_eq!(lanes.lane_count(), 2);
    }

    #[test]
    fn disjoint_events_reuse_lane_zero() {
        let events = vec![may("A", 1, 2), may("B", 4, 6), may("C", 10, 10)];
        let lanes = allocate_calendar_lanes(&events, 2025, 5).unwrap();
        assert!((0..3).all(|i| lanes.slot_of(i) == Some(0)));
    }

    #[test]
    fn longer_event_wins_same_start_tie() {
        let events = vec![
            Event::listing("short", date(2025, 5, 7)),
            may("long", 7, 10),
        ];
        let lanes = allocate_calendar_lanes(&events, 2025, 5).unwrap();
        assert_eq!(lanes.slot_of(1), Some(0));
        assert_eq!(lanes.slot_of(0), Some(1));
        assert_eq!(lanes.at(8, 0).map(|p| p.event.name.as_str()), Some("long"));
        assert_eq!(lanes.at(8, 1), None);
    }

    #[test]
    fn earlier_start_claims_lower_slot() {
        let events = vec![may("later", 8, 9), may("earlier", 5, 8)];
        let lanes = allocate_calendar_lanes(&events, 2025, 5).unwrap();
        assert_eq!(lanes.slot_of(1), Some(0));
        assert_eq!(lanes.slot_of(0), Some(1));
    }

    #[test]
    fn outside_events_are_invisible() {
        let events = vec![may("A", 1, 2), Event::listing("june", date(2025, 6, 1))];
        let lanes = allocate_calendar_lanes(&events, 2025, 5).unwrap();
        assert_eq!(lanes.slot_of(1), None);
        assert_eq!(lanes.visible_events(), 1);

        let empty = allocate_calendar_lanes(&events, 2025, 7).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.lane_count(), 0);
    }

    #[test]
    fn listing_kind_is_not_special() {
        // A multi-day range is accepted regardless of kind.
        let events = vec![Event::new(
            "odd",
            EventKind::Listing,
            date(2025, 5, 3),
            date(2025, 5, 4),
        )];
        let lanes = allocate_calendar_lanes(&events, 2025, 5).unwrap();
        assert_eq!(lanes.days().len(), 2);
    }

    #[test]
    fn reversed_range_fails_fast() {
        let events = vec![may("ok", 1, 2), may("bad", 9, 7)];
        assert!(matches!(
            allocate_calendar_lanes(&events, 2025, 5),
            Err(Error::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn invalid_month_fails() {
        assert_eq!(
            allocate_calendar_lanes(&[], 2025, 0).unwrap_err(),
            Error::InvalidMonth { year: 2025, month: 0 }
        );
    }

    #[test]
    fn lane_count_uses_highest_slot() {
        // B (longer) takes slot 0 before A. Day 3 only holds slots 0 and 2,
        // but the grid still needs three rows.
        let events = vec![may("A", 1, 2), may("B", 1, 3), may("C", 2, 3)];
        let lanes = allocate_calendar_lanes(&events, 2025, 5).unwrap();
        assert_eq!(lanes.slot_of(2), Some(2));
        assert_eq!(lanes.placements_on(3).len(), 2);
        assert_eq!(lanes.lane_count(), 3);
    }

    #[test]
    fn allocation_is_deterministic() {
        let events = vec![may("A", 3, 9), may("B", 1, 4), may("C", 4, 4), may("D", 9, 12)];
        let a = allocate_calendar_lanes(&events, 2025, 5).unwrap();
        let b = allocate_calendar_lanes(&events, 2025, 5).unwrap();
        assert_eq!(a.days(), b.days());
    }

    fn arb_events() -> impl Strategy<Value = Vec<Event>> {
        prop::collection::vec((-10i64..40, 0i64..12), 0..30).prop_map(|ranges| {
            let base = date(2025, 5, 1);
            ranges
                .into_iter()
                .enumerate()
                .map(|(i, (offset, len))| {
                    let start = base + chrono::Duration::days(offset);
                    let end = start + chrono::Duration::days(len);
                    Event::subscription(format!("e{i}"), start, end)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_no_shared_slot_on_any_day(events in arb_events()) {
            let lanes = allocate_calendar_lanes(&events, 2025, 5).unwrap();
            for placements in lanes.days().values() {
                let mut seen = BTreeSet::new();
                for p in placements {
                    prop_assert!(seen.insert(p.slot), "slot {} reused on day {}", p.slot, p.day);
                }
            }
        }

        #[test]
        fn prop_each_visible_event_once_per_day_with_one_slot(events in arb_events()) {
            let lanes = allocate_calendar_lanes(&events, 2025, 5).unwrap();
            let (first, last) = month_bounds(2025, 5).unwrap();
            for (index, event) in events.iter().enumerate() {
                for day in 1..=31u32 {
                    let d = date(2025, 5, day);
                    let hits: Vec<&Placement> = lanes
                        .placements_on(day)
                        .iter()
                        .filter(|p| p.event_index == index)
                        .collect();
                    let expected = usize::from(event.start <= d && d <= event.end);
                    prop_assert_eq!(hits.len(), expected);
                    if let Some(p) = hits.first() {
                        prop_assert_eq!(Some(p.slot), lanes.slot_of(index));
                    }
                }
                prop_assert_eq!(lanes.slot_of(index).is_some(), event.overlaps(first, last));
            }
        }
    }
}
