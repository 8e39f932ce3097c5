use super::star_rating::colored_stars;
use chrono::{DateTime, Utc};
use cinereview_models::Review;
use owo_colors::OwoColorize;

/// Long US-style date, e.g. "March 5, 2024"
pub fn format_review_date(created_at: &DateTime<Utc>) -> String {
    created_at.format("%B %-d, %Y").to_string()
}

pub fn review_card(review: &Review) -> String {
    format!(
        "{}  {}\n{}\n{}",
        review.user_name.bold(),
        colored_stars(review.rating),
        format_review_date(&review.created_at).dimmed(),
        review.review_text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_date_is_long_form() {
        let date = Utc.with_ymd_and_hms(2024, 3, 5, 18, 21, 9).unwrap();
        assert_eq!(format_review_date(&date), "March 5, 2024");
    }

    #[test]
    fn test_card_shows_author_and_text() {
        let review = Review {
            id: "r1".to_string(),
            movie_id: "m1".to_string(),
            movie_title: None,
            movie_poster: None,
            user_name: "Sam".to_string(),
            rating: 4,
            review_text: "Tense and gorgeous.".to_string(),
            created_at: Utc.with_ymd_and_hms(2023, 12, 25, 0, 0, 0).unwrap(),
        };
        let card = review_card(&review);
        assert!(card.contains("Sam"));
        assert!(card.contains("December 25, 2023"));
        assert!(card.contains("Tense and gorgeous."));
    }
}
