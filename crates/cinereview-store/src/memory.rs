use crate::error::StoreError;
use crate::traits::ReviewStore;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use cinereview_models::{Movie, NewReview, RatingEntry, Review, MAX_RATING, MIN_RATING};
use std::sync::{Mutex, MutexGuard};

const MOVIES: &str = "movies";
const REVIEWS: &str = "reviews";

#[derive(Default)]
struct State {
    movies: Vec<Movie>,
    reviews: Vec<Review>,
    next_id: u64,
    last_created_at: Option<DateTime<Utc>>,
    fail_reads: bool,
    fail_writes: bool,
    insert_calls: usize,
}

/// Process-local `ReviewStore` with the same ordering and constraint rules as
/// the hosted tables. Failures can be switched on to exercise degraded paths.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movies(movies: Vec<Movie>) -> Self {
        let store = Self::new();
        store.lock().movies = movies;
        store
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Seed a review directly, bypassing constraints and the insert counter
    pub fn seed_review(&self, movie_id: &str, user_name: &str, rating: u8, review_text: &str) -> Review {
        let mut state = self.lock();
        let review = Review {
            id: next_review_id(&mut state),
            movie_id: movie_id.to_string(),
            movie_title: None,
            movie_poster: None,
            user_name: user_name.to_string(),
            rating,
            review_text: review_text.to_string(),
            created_at: next_timestamp(&mut state),
        };
        state.reviews.push(review.clone());
        review
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.lock().fail_reads = fail;
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Number of times `insert_review` was called, successful or not
    pub fn insert_calls(&self) -> usize {
        self.lock().insert_calls
    }

    pub fn reviews(&self) -> Vec<Review> {
        self.lock().reviews.clone()
    }

    fn check_reads(&self, table: &str) -> Result<(), StoreError> {
        if self.lock().fail_reads {
            return Err(StoreError::fetch(table, "store unavailable"));
        }
        Ok(())
    }
}

fn next_review_id(state: &mut State) -> String {
    state.next_id += 1;
    format!("review-{}", state.next_id)
}

// Strictly increasing so that newest-first ordering is deterministic
fn next_timestamp(state: &mut State) -> DateTime<Utc> {
    let now = Utc::now();
    let created_at = match state.last_created_at {
        Some(last) if now <= last => last + Duration::microseconds(1),
        _ => now,
    };
    state.last_created_at = Some(created_at);
    created_at
}

#[async_trait]
impl ReviewStore for InMemoryStore {
    fn store_name(&self) -> &str {
        "memory"
    }

    async fn list_movies(&self) -> Result<Vec<Movie>, StoreError> {
        self.check_reads(MOVIES)?;
        let mut movies = self.lock().movies.clone();
        movies.sort_by(|a, b| b.release_year.cmp(&a.release_year));
        Ok(movies)
    }

    async fn get_movie(&self, movie_id: &str) -> Result<Option<Movie>, StoreError> {
        self.check_reads(MOVIES)?;
        Ok(self.lock().movies.iter().find(|m| m.id == movie_id).cloned())
    }

    async fn list_reviews_for_movie(&self, movie_id: &str) -> Result<Vec<Review>, StoreError> {
        self.check_reads(REVIEWS)?;
        let mut reviews: Vec<Review> = self
            .lock()
            .reviews
            .iter()
            .filter(|r| r.movie_id == movie_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }

    async fn list_all_ratings(&self) -> Result<Vec<RatingEntry>, StoreError> {
        self.check_reads(REVIEWS)?;
        Ok(self
            .lock()
            .reviews
            .iter()
            .map(|r| RatingEntry {
                movie_id: r.movie_id.clone(),
                rating: r.rating,
            })
            .collect())
    }

    async fn insert_review(&self, review: &NewReview) -> Result<Review, StoreError> {
        let mut state = self.lock();
        state.insert_calls += 1;

        if state.fail_writes {
            return Err(StoreError::write(REVIEWS, "store unavailable"));
        }
        if !state.movies.iter().any(|m| m.id == review.movie_id) {
            return Err(StoreError::write(
                REVIEWS,
                format!("movie_id {} violates foreign key constraint", review.movie_id),
            ));
        }
        if !(MIN_RATING..=MAX_RATING).contains(&review.rating) {
            return Err(StoreError::write(REVIEWS, "rating violates check constraint"));
        }
        if review.review_text.trim().is_empty() {
            return Err(StoreError::write(REVIEWS, "review_text violates not-null constraint"));
        }

        let stored = Review {
            id: next_review_id(&mut state),
            movie_id: review.movie_id.clone(),
            movie_title: Some(review.movie_title.clone()),
            movie_poster: review.movie_poster.clone(),
            user_name: review.user_name.clone(),
            rating: review.rating,
            review_text: review.review_text.clone(),
            created_at: next_timestamp(&mut state),
        };
        state.reviews.push(stored.clone());
        Ok(stored)
    }
}
