// Public library interface for squarecal-rs
// The binaries drive these modules; the layout and calendar cores are pure.

pub mod calendar;
pub mod dataset;
pub mod error;
pub mod layout;
pub mod render;

pub use calendar::{allocate_calendar_lanes, Event, EventKind, MonthLanes, Placement};
pub use error::{Error, Result};
pub use layout::{layout_treemap, Rect, WeightedItem};
