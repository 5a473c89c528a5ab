use chrono::NaiveDate;
use compact_str::CompactString;

pub type Result<T> = std::result::Result<T, Error>;

/// Contract violations reported by the layout and calendar cores.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Invalid weight at index {index}: {value} (weights must be finite and non-negative)")]
    InvalidWeight { index: usize, value: f64 },

    #[error("Weights sum to zero; nothing to lay out")]
    ZeroTotalWeight,

    #[error("Invalid date range for '{name}': start {start} is after end {end}")]
    InvalidDateRange {
        name: CompactString,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Invalid calendar month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("No event at index {index}")]
    UnknownEvent { index: usize },
}
