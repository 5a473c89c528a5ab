use super::Rect;

/// Squarified layout (Bruls, Huizing & van Wijk 2000).
///
/// `areas` must already be scaled to the bounds (they should sum to
/// `bounds.area()`) and sorted descending by the caller. The output has the
/// same length and order as `areas`.
pub(crate) fn squarify(areas: &[f64], bounds: Rect) -> Vec<Rect> {
    let mut result = Vec::with_capacity(areas.len());
    let Rect {
        mut x,
        mut y,
        mut w,
        mut h,
    } = bounds;
    let mut start = 0;

    while start < areas.len() {
        let remaining = &areas[start..];

        // A single leftover item takes the whole free rectangle.
        if remaining.len() == 1 {
            result.push(Rect { x, y, w, h });
            break;
        }

        let row_len = row_length(remaining, w.min(h));
        let row = &remaining[..row_len];
        let row_sum: f64 = row.iter().sum();

        if row_sum <= 0.0 || w <= 0.0 || h <= 0.0 {
            tracing::debug!(
                "Squarify: {} zero-area items left at ({:.4}, {:.4})",
                remaining.len(),
                x,
                y
            );
            result.extend(remaining.iter().map(|_| Rect { x, y, w: 0.0, h: 0.0 }));
            break;
        }

        // Wide free space: the row is a vertical strip at the left edge.
        // Tall free space: a horizontal strip along the top.
        let vertical_strip = w >= h;
        let thickness = if vertical_strip { row_sum / h } else { row_sum / w };

        let mut offset = 0.0;
        for &area in row {
            let length = area / thickness;
            let rect = if vertical_strip {
                Rect {
                    x,
                    y: y + offset,
                    w: thickness,
                    h: length,
                }
            } else {
                Rect {
                    x: x + offset,
                    y,
                    w: length,
                    h: thickness,
                }
            };
            result.push(rect);
            offset += length;
        }

        tracing::debug!(
            "Squarify: committed row of {} (sum={:.4}, thickness={:.4}, vertical={})",
            row_len,
            row_sum,
            thickness,
            vertical_strip
        );

        // Shrink remaining space
        if vertical_strip {
            x += thickness;
            w = (w - thickness).max(0.0);
        } else {
            y += thickness;
            h = (h - thickness).max(0.0);
        }

        start += row_len;
    }

    result
}

/// Number of leading items to commit as the next row.
///
/// Grows the row one item at a time and stops as soon as the next item would
/// make the worst aspect ratio strictly larger.
fn row_length(remaining: &[f64], side: f64) -> usize {
    let mut len = 1;
    let mut sum = remaining[0];
    let mut current = worst_aspect_ratio(&remaining[..1], sum, side);

    while len < remaining.len() {
        let next_sum = sum + remaining[len];
        let next = worst_aspect_ratio(&remaining[..=len], next_sum, side);
        if next > current {
            break;
        }
        len += 1;
        sum = next_sum;
        current = next;
    }

    len
}

/// Worst aspect ratio of `row` laid out as a strip of length `side`.
///
/// The strip is `sum / side` thick and each item gets `area / thickness` of
/// its length. Zero-area items make the row infinitely bad.
fn worst_aspect_ratio(row: &[f64], sum: f64, side: f64) -> f64 {
    if row.is_empty() || sum <= 0.0 || side <= 0.0 {
        return f64::INFINITY;
    }
    let thickness = sum / side;
    row.iter().fold(0.0, |worst: f64, &area| {
        if area <= 0.0 {
            return f64::INFINITY;
        }
        let length = area / thickness;
        worst.max((length / thickness).max(thickness / length))
    })
}
