use std::fmt::Write;

use chrono::Weekday;

use crate::calendar::{month_weeks, CalendarConfig, EventKind, MonthLanes, Placement};
use crate::error::Result;
use crate::layout::Tile;

/// Draw the month grid: a weekday header, then for each week a row of day
/// numbers followed by one row per lane.
///
/// A bar opens with `[` on the event's real start day and closes with `]` on
/// its real end day; clipped ends stay open so the bar reads as continuing.
/// The event name is printed on its first visible day only.
pub fn render_calendar(lanes: &MonthLanes<'_>, config: &CalendarConfig) -> Result<String> {
    let width = config.cell_width.max(3);
    let weeks = month_weeks(lanes.year, lanes.month, config.first_weekday)?;
    let mut out = String::new();

    let _ = writeln!(out, "{}-{:02}", lanes.year, lanes.month);

    let mut weekday = config.first_weekday;
    let mut header = Vec::with_capacity(7);
    for _ in 0..7 {
        header.push(format!("{:<width$}", weekday_label(weekday)));
        weekday = weekday.succ();
    }
    let _ = writeln!(out, "|{}|", header.join("|"));

    for week in &weeks {
        let numbers: Vec<String> = week
            .iter()
            .map(|&day| match day {
                Some(day) => format!("{:<width$}", day),
                None => " ".repeat(width),
            })
            .collect();
        let _ = writeln!(out, "|{}|", numbers.join("|"));

        for slot in 0..lanes.lane_count() {
            let cells: Vec<String> = week
                .iter()
                .map(|&day| match day.and_then(|day| lanes.at(day, slot)) {
                    Some(placement) => bar_cell(placement, width),
                    None => " ".repeat(width),
                })
                .collect();
            let _ = writeln!(out, "|{}|", cells.join("|"));
        }
    }

    Ok(out)
}

/// One line per tile: label, value, share and rectangle.
/// Zero-weight tiles have no visible area and are left out.
pub fn render_tiles(tiles: &[Tile]) -> String {
    let mut out = String::new();
    for tile in tiles.iter().filter(|t| t.value > 0.0 && t.rect.area() > 0.0) {
        let r = tile.rect;
        let _ = writeln!(
            out,
            "{:<28} {:>8.2} {:>6.2}%  x={:.4} y={:.4} w={:.4} h={:.4}",
            tile.label,
            tile.value,
            tile.share * 100.0,
            r.x,
            r.y,
            r.w,
            r.h
        );
    }
    out
}

fn bar_cell(placement: &Placement<'_>, width: usize) -> String {
    let fill = match placement.event.kind {
        EventKind::Subscription => '=',
        EventKind::Listing => '#',
    };
    let inner = width - 2;

    let mut cell = String::with_capacity(width);
    cell.push(if placement.is_range_start { '[' } else { fill });

    let mut used = 0;
    if placement.is_first_visible {
        for ch in placement.event.name.chars().take(inner) {
            cell.push(ch);
            used += 1;
        }
    }
    cell.extend(std::iter::repeat(fill).take(inner - used));

    cell.push(if placement.is_range_end { ']' } else { fill });
    cell
}

fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}
