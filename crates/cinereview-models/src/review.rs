use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::rating::Rated;

/// Author name stored when the reviewer leaves the name blank
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// A row of the `reviews` table. Reviews are insert-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: String,
    pub movie_id: String,
    // Denormalized copies written at insert time; older rows may lack them
    #[serde(default)]
    pub movie_title: Option<String>,
    #[serde(default)]
    pub movie_poster: Option<String>,
    pub user_name: String,
    pub rating: u8,
    pub review_text: String,
    pub created_at: DateTime<Utc>,
}

impl Rated for Review {
    fn rating(&self) -> u8 {
        self.rating
    }
}

/// A normalized review ready for insertion. The store assigns `id` and
/// `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewReview {
    pub movie_id: String,
    pub movie_title: String,
    pub movie_poster: Option<String>,
    pub user_name: String,
    pub rating: u8,
    pub review_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_parses_postgrest_timestamp() {
        let json = r#"{
            "id": "r1",
            "movie_id": "m1",
            "movie_title": "Heat",
            "movie_poster": null,
            "user_name": "Anonymous",
            "rating": 4,
            "review_text": "A tense, gorgeous film.",
            "created_at": "2024-03-05T18:21:09.123456+00:00"
        }"#;
        let review: Review = serde_json::from_str(json).unwrap();
        assert_eq!(review.rating(), 4);
        assert_eq!(review.created_at.to_rfc3339(), "2024-03-05T18:21:09.123456+00:00");
    }

    #[test]
    fn test_review_without_denormalized_fields() {
        let json = r#"{
            "id": "r1",
            "movie_id": "m1",
            "user_name": "Sam",
            "rating": 2,
            "review_text": "Not for me at all.",
            "created_at": "2024-03-05T18:21:09Z"
        }"#;
        let review: Review = serde_json::from_str(json).unwrap();
        assert_eq!(review.movie_title, None);
        assert_eq!(review.movie_poster, None);
    }

    #[test]
    fn test_new_review_serializes_null_poster() {
        let review = NewReview {
            movie_id: "m1".to_string(),
            movie_title: "Heat".to_string(),
            movie_poster: None,
            user_name: ANONYMOUS_AUTHOR.to_string(),
            rating: 5,
            review_text: "Best heist movie.".to_string(),
        };
        let value = serde_json::to_value(&review).unwrap();
        assert!(value["movie_poster"].is_null());
        assert_eq!(value["user_name"], "Anonymous");
    }
}
