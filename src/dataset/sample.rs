//! Demo data for both views.

use chrono::NaiveDate;

use super::WeightedItems;
use crate::calendar::{month::days_in_month, Event, EventKind};
use crate::error::{Error, Result};
use crate::layout::WeightedItem;

/// Weekly gain (%) per market theme.
const THEMES: &[(&str, f64)] = &[
    ("Semiconductor materials", 12.91),
    ("Cosmetics", 12.05),
    ("Pharma/Bio", 10.53),
    ("Semiconductor equipment", 10.27),
    ("Aerospace", 9.13),
    ("Defense", 9.12),
    ("AI", 9.04),
    ("AI (GPU supply chain)", 8.99),
    ("Food & beverage", 8.97),
    ("Solar", 8.73),
    ("Retail", 8.47),
    ("Policy beneficiaries", 8.26),
];

/// (name, kind, first day, last day) within one month.
const SCHEDULE: &[(&str, EventKind, u32, u32)] = &[
    ("Number One", EventKind::Subscription, 7, 10),
    ("E&D System", EventKind::Subscription, 7, 9),
    ("Biovitu", EventKind::Subscription, 8, 10),
    ("Doctor Robotics", EventKind::Listing, 8, 8),
    ("Care Therapy", EventKind::Listing, 9, 9),
    ("Chata Fintech", EventKind::Subscription, 11, 15),
    ("Lotte Global", EventKind::Listing, 16, 16),
    ("Intocell", EventKind::Subscription, 14, 15),
    ("Power One", EventKind::Subscription, 14, 16),
    ("Lotte Development", EventKind::Subscription, 12, 13),
    ("Lotte Accelerator", EventKind::Listing, 12, 12),
    ("KIS No.16 SPAC", EventKind::Subscription, 19, 20),
    ("E&D System", EventKind::Listing, 19, 19),
    ("Genesis Global", EventKind::Listing, 21, 21),
    ("Keystron", EventKind::Subscription, 22, 23),
    ("Molba Global", EventKind::Listing, 22, 22),
    ("Jung Cruise", EventKind::Subscription, 27, 28),
    ("Youngjin Tong", EventKind::Subscription, 29, 30),
];

pub fn sample_themes() -> Result<WeightedItems> {
    WeightedItems::from_items(sample_theme_items())
}

pub fn sample_theme_items() -> Vec<WeightedItem> {
    THEMES
        .iter()
        .map(|&(label, value)| WeightedItem::new(label, value))
        .collect()
}

/// The sample schedule placed in `year-month`. Days past the end of a short
/// month are pulled back to its last day.
pub fn sample_events(year: i32, month: u32) -> Result<Vec<Event>> {
    let last = days_in_month(year, month)?;
    let date = |day: u32| {
        NaiveDate::from_ymd_opt(year, month, day.min(last))
            .ok_or(Error::InvalidMonth { year, month })
    };

    SCHEDULE
        .iter()
        .map(|&(name, kind, start, end)| Ok(Event::new(name, kind, date(start)?, date(end)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn themes_are_distinct() {
        assert_eq!(sample_themes().unwrap().len(), THEMES.len());
        assert_eq!(sample_theme_items().len(), THEMES.len());
    }

    #[test]
    fn schedule_fits_february() {
        let events = sample_events(2025, 2).unwrap();
        assert_eq!(events.len(), SCHEDULE.len());
        let last = events.last().unwrap();
        assert_eq!(last.start, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
        assert!(events.iter().all(|e| e.validate().is_ok()));
    }

    #[test]
    fn schedule_rejects_bad_month() {
        assert!(sample_events(2025, 13).is_err());
    }
}
