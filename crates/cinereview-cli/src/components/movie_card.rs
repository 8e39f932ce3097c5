use super::star_rating::{colored_stars, filled_stars, rating_label, review_count_label};
use cinereview_core::ListEntry;
use comfy_table::{Cell, Table};

/// One card per movie, laid out as table rows
pub fn movie_table(entries: &[ListEntry]) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Year").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Rating").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Reviews").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("ID").add_attribute(comfy_table::Attribute::Bold),
    ]);

    for entry in entries {
        table.add_row(movie_card_row(entry));
    }
    table
}

pub fn movie_card_row(entry: &ListEntry) -> Vec<Cell> {
    let aggregate = &entry.aggregate;
    vec![
        Cell::new(&entry.movie.title),
        Cell::new(entry.movie.release_year),
        Cell::new(format!(
            "{} {}",
            colored_stars(filled_stars(aggregate.mean)),
            rating_label(aggregate)
        )),
        Cell::new(review_count_label(aggregate.count)),
        Cell::new(&entry.movie.id).fg(comfy_table::Color::DarkGrey),
    ]
}
