use chrono::NaiveDate;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use super::sample;
use crate::calendar::{allocate_calendar_lanes, Event, EventKind, MonthLanes};
use crate::error::{Error, Result};

/// A loosely-filled event row as it arrives from manual entry or import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub name: CompactString,
    pub kind: EventKind,
    #[serde(default, rename = "start_date")]
    pub start: Option<NaiveDate>,
    #[serde(default, rename = "end_date")]
    pub end: Option<NaiveDate>,
}

impl EventRecord {
    /// Fill in defaults: listings end on their start date, subscriptions
    /// without an end date last one day. Records without a start are dropped.
    pub fn into_event(self) -> Option<Event> {
        let start = self.start?;
        let end = match self.kind {
            EventKind::Listing => start,
            EventKind::Subscription => self.end.unwrap_or(start),
        };
        Some(Event::new(self.name, self.kind, start, end))
    }
}

/// The editable event list owned by the application layer.
#[derive(Debug, Clone, Default)]
pub struct EventBook {
    events: Vec<Event>,
}

impl EventBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Append a validated event; returns its row index.
    pub fn add(&mut self, event: Event) -> Result<usize> {
        event.validate()?;
        self.events.push(event);
        Ok(self.events.len() - 1)
    }

    /// Replace the row at `index`.
    pub fn update(&mut self, index: usize, event: Event) -> Result<Event> {
        event.validate()?;
        let slot = self
            .events
            .get_mut(index)
            .ok_or(Error::UnknownEvent { index })?;
        Ok(std::mem::replace(slot, event))
    }

    pub fn remove(&mut self, index: usize) -> Result<Event> {
        if index >= self.events.len() {
            return Err(Error::UnknownEvent { index });
        }
        Ok(self.events.remove(index))
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Replace the whole list with imported rows. Rows without a start date or
    /// with an inverted range are skipped. Returns the number kept.
    pub fn import(&mut self, records: impl IntoIterator<Item = EventRecord>) -> usize {
        let mut events = Vec::new();
        for record in records {
            let name = record.name.clone();
            match record.into_event() {
                Some(event) => match event.validate() {
                    Ok(()) => events.push(event),
                    Err(err) => tracing::warn!("Skipping imported row '{}': {}", name, err),
                },
                None => tracing::warn!("Skipping imported row '{}': missing start date", name),
            }
        }
        tracing::info!("Imported {} events", events.len());
        self.events = events;
        self.events.len()
    }

    /// Replace the list with the sample schedule placed in `year-month`.
    pub fn seed_sample(&mut self, year: i32, month: u32) -> Result<usize> {
        self.events = sample::sample_events(year, month)?;
        Ok(self.events.len())
    }

    pub fn allocate(&self, year: i32, month: u32) -> Result<MonthLanes<'_>> {
        allocate_calendar_lanes(&self.events, year, month)
    }
}
