pub mod movie;
pub mod rating;
pub mod review;

pub use movie::Movie;
pub use rating::{Rated, RatingEntry, MAX_RATING, MIN_RATING};
pub use review::{NewReview, Review, ANONYMOUS_AUTHOR};
