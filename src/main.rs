use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use squarecal_rs::calendar::{events_in_month, CalendarConfig};
use squarecal_rs::dataset::{sample, EventBook, EventRecord, WeightedItems};
use squarecal_rs::layout::{LayoutConfig, WeightedItem};
use squarecal_rs::render;

const USAGE: &str = "usage:\n  squarecal-rs treemap [items.json]\n  squarecal-rs calendar YEAR MONTH [events.json]";

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("squarecal_rs=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("treemap") => run_treemap(args.get(1).map(PathBuf::from)),
        Some("calendar") => {
            let year: i32 = args
                .get(1)
                .context(USAGE)?
                .parse()
                .context("YEAR must be an integer")?;
            let month: u32 = args
                .get(2)
                .context(USAGE)?
                .parse()
                .context("MONTH must be an integer")?;
            run_calendar(year, month, args.get(3).map(PathBuf::from))
        }
        _ => bail!(USAGE),
    }
}

fn run_treemap(path: Option<PathBuf>) -> Result<()> {
    let table = match path {
        Some(path) => {
            let items: Vec<WeightedItem> = read_json(&path)?;
            WeightedItems::from_items(items)?
        }
        None => {
            tracing::info!("No input file, using sample themes");
            sample::sample_themes()?
        }
    };

    let tiles = table.tiles(&LayoutConfig::default())?;
    print!("{}", render::render_tiles(&tiles));
    Ok(())
}

fn run_calendar(year: i32, month: u32, path: Option<PathBuf>) -> Result<()> {
    let mut book = EventBook::new();
    match path {
        Some(path) => {
            let records: Vec<EventRecord> = read_json(&path)?;
            let total = records.len();
            let kept = book.import(records);
            if kept < total {
                tracing::warn!("{} of {} rows skipped", total - kept, total);
            }
        }
        None => {
            tracing::info!("No input file, using the sample schedule");
            book.seed_sample(year, month)?;
        }
    }

    let config = CalendarConfig::default();
    let lanes = book.allocate(year, month)?;
    print!("{}", render::render_calendar(&lanes, &config)?);

    println!();
    let visible = events_in_month(book.events(), year, month)?;
    if visible.is_empty() {
        println!("No events this month.");
    }
    for event in visible {
        println!(
            "{} ({}) {}",
            event.name,
            event.kind.as_str(),
            event.date_range_label()
        );
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}
