/// Diagnostic tool to verify items → normalized weights → treemap rectangles
use squarecal_rs::dataset::{sample, WeightedItems};
use squarecal_rs::layout::{layout_items, LayoutConfig, Rect, WeightedItem};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("squarecal_rs=debug".parse()?),
        )
        .init();

    let items: Vec<WeightedItem> = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => {
            println!("Loading: {}", path.display());
            serde_json::from_str(&std::fs::read_to_string(&path)?)?
        }
        None => {
            println!("Using sample themes");
            sample::sample_theme_items()
        }
    };

    println!("=== DIAGNOSTIC: Items → Layout Pipeline ===");

    let table = WeightedItems::from_items(items.iter().cloned())?;
    println!("\n[1] {} items ({} distinct labels)", items.len(), table.len());

    let weights = table.normalized_weights()?;
    let weight_sum: f64 = weights.iter().sum();
    println!("\n[2] Normalized weights sum: {:.12}", weight_sum);
    for (i, (item, w)) in table.sorted().iter().zip(&weights).enumerate().take(10) {
        println!("    [{}] '{}' - value {:.2} → weight {:.4}", i, item.label, item.value, w);
    }

    // Lay out in a 16:9 viewport so aspect ratios are meaningful
    let config = LayoutConfig {
        bounds: Rect::new(0.0, 0.0, 1920.0, 1080.0),
    };
    let tiles = layout_items(&table.iter().cloned().collect::<Vec<_>>(), &config)?;
    println!("\n[3] Layout computed: {} rectangles", tiles.len());

    for (i, tile) in tiles.iter().enumerate().take(10) {
        let r = tile.rect;
        println!(
            "    [{}] '{}' - rect: {:.1}x{:.1} ({:.0}px²) at ({:.1}, {:.1}) - aspect {:.2}",
            i,
            tile.label,
            r.w,
            r.h,
            r.area(),
            r.x,
            r.y,
            r.aspect_ratio()
        );
    }

    // Check for anomalies
    println!("\n[4] Checking for anomalies:");

    let viewport_area = config.bounds.area();
    let area_sum: f64 = tiles.iter().map(|t| t.rect.area()).sum();
    println!("    Total rect area: {:.0}px²", area_sum);
    println!("    Viewport area:   {:.0}px²", viewport_area);
    println!("    Coverage: {:.4}%", (area_sum / viewport_area) * 100.0);

    let mut overlaps = 0;
    for (i, a) in tiles.iter().enumerate() {
        for b in &tiles[i + 1..] {
            if a.rect.intersection_area(&b.rect) > 1e-6 {
                overlaps += 1;
                println!("    OVERLAP: '{}' and '{}'", a.label, b.label);
            }
        }
    }
    println!("    Overlapping pairs: {}", overlaps);

    let area_errors = tiles
        .iter()
        .filter(|t| (t.rect.area() - t.share * viewport_area).abs() > 1e-6 * viewport_area)
        .count();
    println!("    Area mismatches: {}", area_errors);

    let worst = tiles
        .iter()
        .filter(|t| t.value > 0.0)
        .map(|t| t.rect.aspect_ratio())
        .fold(0.0, f64::max);
    println!("\n[5] Worst aspect ratio: {:.2}", worst);

    Ok(())
}
