use chrono::{Datelike, Months, NaiveDate, Weekday};

use crate::error::{Error, Result};

/// First and last date of `year-month`.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let invalid = || Error::InvalidMonth { year, month };
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(invalid)?;
    Ok((first, last))
}

/// Number of days in `year-month` (28..=31).
pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    month_bounds(year, month).map(|(_, last)| last.day())
}

/// Intersect `[start, end]` with the month; `None` when they don't overlap.
pub fn clip_to_month(
    start: NaiveDate,
    end: NaiveDate,
    month_first: NaiveDate,
    month_last: NaiveDate,
) -> Option<(NaiveDate, NaiveDate)> {
    let lo = start.max(month_first);
    let hi = end.min(month_last);
    (lo <= hi).then_some((lo, hi))
}

/// Week rows of the month grid, each starting on `first_weekday`.
/// Cells belonging to the neighbouring months are `None`.
pub fn month_weeks(
    year: i32,
    month: u32,
    first_weekday: Weekday,
) -> Result<Vec<[Option<u32>; 7]>> {
    let (first, last) = month_bounds(year, month)?;
    let lead = (first.weekday().num_days_from_sunday() + 7
        - first_weekday.num_days_from_sunday())
        % 7;
    let lead = lead as usize;

    let mut weeks = Vec::with_capacity(6);
    let mut week = [None; 7];
    let mut col = lead;
    for day in 1..=last.day() {
        week[col] = Some(day);
        col += 1;
        if col == 7 {
            weeks.push(week);
            week = [None; 7];
            col = 0;
        }
    }
    if col > 0 {
        weeks.push(week);
    }
    Ok(weeks)
}
