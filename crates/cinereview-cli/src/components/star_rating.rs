// Star widget and the textual rating shown next to it

use cinereview_core::Aggregate;
use cinereview_models::MAX_RATING;
use owo_colors::OwoColorize;

const FILLED: &str = "★";
const EMPTY: &str = "☆";

/// Stars to fill for a mean rating: nearest integer, halves round up
pub fn filled_stars(mean: f64) -> u8 {
    mean.round().clamp(0.0, f64::from(MAX_RATING)) as u8
}

/// Plain widget, e.g. `★★★☆☆`
pub fn stars(filled: u8) -> String {
    let filled = filled.min(MAX_RATING);
    format!(
        "{}{}",
        FILLED.repeat(usize::from(filled)),
        EMPTY.repeat(usize::from(MAX_RATING - filled))
    )
}

/// Widget with gold filled stars and dimmed empty ones
pub fn colored_stars(filled: u8) -> String {
    let filled = filled.min(MAX_RATING);
    format!(
        "{}{}",
        FILLED.repeat(usize::from(filled)).yellow(),
        EMPTY.repeat(usize::from(MAX_RATING - filled)).dimmed()
    )
}

/// Unrounded mean to one decimal, or "N/A" for a movie without reviews
pub fn rating_label(aggregate: &Aggregate) -> String {
    if aggregate.mean > 0.0 {
        format!("{:.1}", aggregate.mean)
    } else {
        "N/A".to_string()
    }
}

pub fn review_count_label(count: usize) -> String {
    if count == 1 {
        "1 review".to_string()
    } else {
        format!("{} reviews", count)
    }
}
