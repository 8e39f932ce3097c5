use serde::{Deserialize, Serialize};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Anything that carries a star rating
pub trait Rated {
    fn rating(&self) -> u8;
}

/// `{movie_id, rating}` projection of a review, used to aggregate every
/// movie on the list page with a single query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RatingEntry {
    pub movie_id: String,
    pub rating: u8,
}

impl Rated for RatingEntry {
    fn rating(&self) -> u8 {
        self.rating
    }
}
