pub mod text;

pub use text::{render_calendar, render_tiles};
