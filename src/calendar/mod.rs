pub mod lanes;
pub mod month;

use std::collections::BTreeMap;

use chrono::{NaiveDate, Weekday};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use lanes::allocate_calendar_lanes;
pub use month::{days_in_month, month_weeks};

/// Schedule type of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Multi-day subscription window
    #[serde(alias = "청약")]
    Subscription,
    /// Single-day listing
    #[serde(alias = "상장")]
    Listing,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Subscription => "subscription",
            EventKind::Listing => "listing",
        }
    }
}

/// A named, inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub name: CompactString,
    pub kind: EventKind,
    #[serde(rename = "start_date")]
    pub start: NaiveDate,
    #[serde(rename = "end_date")]
    pub end: NaiveDate,
}

impl Event {
    pub fn new(
        name: impl Into<CompactString>,
        kind: EventKind,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            start,
            end,
        }
    }

    /// A single-day listing event.
    pub fn listing(name: impl Into<CompactString>, date: NaiveDate) -> Self {
        Self::new(name, EventKind::Listing, date, date)
    }

    pub fn subscription(name: impl Into<CompactString>, start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(name, EventKind::Subscription, start, end)
    }

    /// Length of the range in days minus one (0 for a single-day event).
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn validate(&self) -> Result<()> {
        if self.start > self.end {
            return Err(Error::InvalidDateRange {
                name: self.name.clone(),
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Whether the event shares at least one day with `[start, end]`.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start <= end && start <= self.end
    }

    /// `2025-05-07` or `2025-05-07 ~ 2025-05-09`.
    pub fn date_range_label(&self) -> String {
        if self.start == self.end {
            self.start.format("%Y-%m-%d").to_string()
        } else {
            format!(
                "{} ~ {}",
                self.start.format("%Y-%m-%d"),
                self.end.format("%Y-%m-%d")
            )
        }
    }
}

/// One event drawn in one day cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement<'a> {
    pub event: &'a Event,
    /// Position of `event` in the list passed to the allocator
    pub event_index: usize,
    pub day: u32,
    pub slot: usize,
    /// The event's real start date is this day
    pub is_range_start: bool,
    /// The event's real end date is this day
    pub is_range_end: bool,
    /// First day of the event inside the month (where its label goes)
    pub is_first_visible: bool,
    /// Last day of the event inside the month
    pub is_last_visible: bool,
}

/// Lane assignment for one month: day → placements ordered by slot.
#[derive(Debug, Clone)]
pub struct MonthLanes<'a> {
    pub year: i32,
    pub month: u32,
    days: BTreeMap<u32, Vec<Placement<'a>>>,
    slots: BTreeMap<usize, usize>,
    lane_count: usize,
}

impl<'a> MonthLanes<'a> {
    pub(crate) fn new(
        year: i32,
        month: u32,
        days: BTreeMap<u32, Vec<Placement<'a>>>,
        slots: BTreeMap<usize, usize>,
    ) -> Self {
        let lane_count = slots.values().max().map_or(0, |max| max + 1);
        Self {
            year,
            month,
            days,
            slots,
            lane_count,
        }
    }

    /// Days that have at least one placement.
    pub fn days(&self) -> &BTreeMap<u32, Vec<Placement<'a>>> {
        &self.days
    }

    pub fn into_days(self) -> BTreeMap<u32, Vec<Placement<'a>>> {
        self.days
    }

    pub fn placements_on(&self, day: u32) -> &[Placement<'a>] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Placement in a given lane on a given day.
    pub fn at(&self, day: u32, slot: usize) -> Option<&Placement<'a>> {
        self.placements_on(day).iter().find(|p| p.slot == slot)
    }

    /// Lane rows each day cell must reserve (highest slot + 1).
    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    /// Slot of the event at `event_index`, if it is visible this month.
    pub fn slot_of(&self, event_index: usize) -> Option<usize> {
        self.slots.get(&event_index).copied()
    }

    /// Number of events visible this month.
    pub fn visible_events(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Calendar grid settings.
#[derive(Debug, Clone)]
pub struct CalendarConfig {
    /// Leftmost column of the grid
    pub first_weekday: Weekday,
    /// Character width of a day cell in text output
    pub cell_width: usize,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            first_weekday: Weekday::Sun,
            cell_width: 12,
        }
    }
}

/// Events sharing at least one day with `year-month`, sorted by start date.
pub fn events_in_month(events: &[Event], year: i32, month: u32) -> Result<Vec<&Event>> {
    let (first, last) = month::month_bounds(year, month)?;
    let mut visible: Vec<&Event> = events
        .iter()
        .filter(|event| event.overlaps(first, last))
        .collect();
    visible.sort_by_key(|event| event.start);
    Ok(visible)
}
