//! Review submission rules.
//!
//! Length caps are applied while the draft is edited; `ReviewDraft::validate`
//! only checks the rules that block a submission.

use cinereview_models::{Movie, NewReview, ANONYMOUS_AUTHOR, MAX_RATING, MIN_RATING};
use thiserror::Error;

pub const MIN_TEXT_LEN: usize = 10;
pub const MAX_TEXT_LEN: usize = 1000;
pub const MAX_NAME_LEN: usize = 50;

/// Client-side rule violation. Never reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a rating")]
    MissingRating,

    #[error("Rating must be between 1 and 5")]
    RatingOutOfRange(u8),

    #[error("Review must be at least {min} characters long")]
    TextTooShort { min: usize, actual: usize },
}

/// Review after trimming and defaulting, ready to be attached to a movie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedReview {
    pub user_name: String,
    pub rating: u8,
    pub review_text: String,
}

impl NormalizedReview {
    /// Attach the movie, copying its title and poster for denormalized display
    pub fn for_movie(self, movie: &Movie) -> NewReview {
        NewReview {
            movie_id: movie.id.clone(),
            movie_title: movie.title.clone(),
            movie_poster: movie.poster().map(str::to_string),
            user_name: self.user_name,
            rating: self.rating,
            review_text: self.review_text,
        }
    }
}

/// Form state of a review being written. A rating of 0 means unselected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    user_name: String,
    rating: u8,
    review_text: String,
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

impl ReviewDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input is cut at `MAX_NAME_LEN` characters
    pub fn set_user_name(&mut self, name: &str) {
        self.user_name = truncate_chars(name, MAX_NAME_LEN);
    }

    pub fn set_rating(&mut self, rating: u8) {
        self.rating = rating;
    }

    /// Input is cut at `MAX_TEXT_LEN` characters
    pub fn set_review_text(&mut self, text: &str) {
        self.review_text = truncate_chars(text, MAX_TEXT_LEN);
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn review_text(&self) -> &str {
        &self.review_text
    }

    /// Untrimmed character count, as shown next to the text field
    pub fn text_len(&self) -> usize {
        self.review_text.chars().count()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn validate(&self) -> Result<NormalizedReview, ValidationError> {
        if self.rating == 0 {
            return Err(ValidationError::MissingRating);
        }
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(ValidationError::RatingOutOfRange(self.rating));
        }

        let review_text = self.review_text.trim();
        let actual = review_text.chars().count();
        if actual < MIN_TEXT_LEN {
            return Err(ValidationError::TextTooShort { min: MIN_TEXT_LEN, actual });
        }

        let user_name = match self.user_name.trim() {
            "" => ANONYMOUS_AUTHOR.to_string(),
            name => name.to_string(),
        };

        Ok(NormalizedReview {
            user_name,
            rating: self.rating,
            review_text: review_text.to_string(),
        })
    }
}
