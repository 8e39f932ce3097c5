use async_trait::async_trait;
use cinereview_models::{Movie, NewReview, RatingEntry, Review};
use crate::error::StoreError;

/// Access to the hosted movie/review tables.
///
/// Implementations perform no retries and no caching; every call goes to the
/// backing store.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    // Store metadata, used in log lines
    fn store_name(&self) -> &str;

    // Reads
    /// All movies, newest release year first
    async fn list_movies(&self) -> Result<Vec<Movie>, StoreError>;
    /// A single movie, `None` when no row has this id
    async fn get_movie(&self, movie_id: &str) -> Result<Option<Movie>, StoreError>;
    /// Reviews of one movie, newest first
    async fn list_reviews_for_movie(&self, movie_id: &str) -> Result<Vec<Review>, StoreError>;
    /// `{movie_id, rating}` for every review in the store
    async fn list_all_ratings(&self) -> Result<Vec<RatingEntry>, StoreError>;

    // Writes
    /// Insert one review; the store assigns `id` and `created_at`
    async fn insert_review(&self, review: &NewReview) -> Result<Review, StoreError>;
}
