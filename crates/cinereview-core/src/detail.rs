use crate::aggregate::{aggregate, Aggregate};
use crate::notify::Notifier;
use crate::validate::{ReviewDraft, ValidationError};
use cinereview_models::{Movie, Review};
use cinereview_store::{ReviewStore, StoreError};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, warn};

const SUBMIT_SUCCESS: &str = "Review submitted successfully!";
const SUBMIT_FAILURE: &str = "Failed to submit review. Please try again.";

#[derive(Debug, Clone, Serialize)]
pub struct DetailPage {
    pub movie: Movie,
    /// Newest first
    pub reviews: Vec<Review>,
    pub aggregate: Aggregate,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DetailState {
    Loading,
    Ready(DetailPage),
    /// Terminal: the only way out is navigating elsewhere
    NotFound,
    Error { message: String },
}

/// Result of a submission attempt. Notifications have already been emitted
/// by the time the caller sees this.
#[derive(Debug)]
pub enum SubmitOutcome {
    Submitted(Review),
    Rejected(ValidationError),
    Failed(StoreError),
    /// The page is not showing a movie, so there is nothing to review
    NotReady,
}

/// State machine behind a movie's page: the movie, its reviews, their
/// aggregate, and the review form.
pub struct DetailController {
    store: Arc<dyn ReviewStore>,
    notifier: Arc<dyn Notifier>,
    movie_id: String,
    state: DetailState,
    draft: ReviewDraft,
}

impl DetailController {
    pub fn new(store: Arc<dyn ReviewStore>, notifier: Arc<dyn Notifier>, movie_id: impl Into<String>) -> Self {
        Self {
            store,
            notifier,
            movie_id: movie_id.into(),
            state: DetailState::Loading,
            draft: ReviewDraft::new(),
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn draft(&self) -> &ReviewDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ReviewDraft {
        &mut self.draft
    }

    /// Fetch the movie and its reviews and recompute the aggregate.
    ///
    /// Used both on entry and after every successful submission.
    pub async fn load(&mut self) -> &DetailState {
        if matches!(self.state, DetailState::NotFound) {
            return &self.state;
        }

        let fetched = futures::try_join!(
            self.store.get_movie(&self.movie_id),
            self.store.list_reviews_for_movie(&self.movie_id)
        );

        self.state = match fetched {
            Ok((Some(movie), reviews)) => {
                let aggregate = aggregate(&reviews);
                debug!(movie_id = %movie.id, reviews = aggregate.count, mean = aggregate.mean, "Loaded movie details");
                DetailState::Ready(DetailPage { movie, reviews, aggregate })
            }
            Ok((None, _)) => {
                warn!(movie_id = %self.movie_id, "Movie not found");
                DetailState::NotFound
            }
            Err(e) => {
                error!("Error fetching movie data: {}", e);
                DetailState::Error { message: e.to_string() }
            }
        };
        &self.state
    }

    /// Validate the draft, insert it, and refresh the page.
    ///
    /// Validation failures never reach the store. A failed write leaves the
    /// draft untouched so it can be resubmitted.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let movie = match &self.state {
            DetailState::Ready(page) => page.movie.clone(),
            _ => return SubmitOutcome::NotReady,
        };

        let normalized = match self.draft.validate() {
            Ok(normalized) => normalized,
            Err(e) => {
                self.notifier.error(&e.to_string());
                return SubmitOutcome::Rejected(e);
            }
        };

        let result = self.store.insert_review(&normalized.for_movie(&movie)).await;

        match result {
            Ok(review) => {
                self.notifier.success(SUBMIT_SUCCESS);
                self.draft.reset();
                self.load().await;
                SubmitOutcome::Submitted(review)
            }
            Err(e) => {
                error!("Error submitting review: {}", e);
                self.notifier.error(SUBMIT_FAILURE);
                SubmitOutcome::Failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::SilentNotifier;
    use cinereview_store::InMemoryStore;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNotifier {
        messages: Mutex<Vec<(bool, String)>>,
    }

    impl Notifier for RecordingNotifier {
        fn success(&self, message: &str) {
            self.messages.lock().unwrap().push((true, message.to_string()));
        }

        fn error(&self, message: &str) {
            self.messages.lock().unwrap().push((false, message.to_string()));
        }
    }

    impl RecordingNotifier {
        fn last(&self) -> Option<(bool, String)> {
            self.messages.lock().unwrap().last().cloned()
        }
    }

    fn heat() -> Movie {
        Movie {
            id: "m1".to_string(),
            title: "Heat".to_string(),
            release_year: 1995,
            description: "A group of professional bank robbers...".to_string(),
            poster_url: Some("https://img.example/heat.jpg".to_string()),
        }
    }

    fn setup() -> (Arc<InMemoryStore>, Arc<RecordingNotifier>, DetailController) {
        let store = Arc::new(InMemoryStore::with_movies(vec![heat()]));
        let notifier = Arc::new(RecordingNotifier::default());
        let controller = DetailController::new(store.clone(), notifier.clone(), "m1");
        (store, notifier, controller)
    }

    fn page(state: &DetailState) -> &DetailPage {
        match state {
            DetailState::Ready(page) => page,
            other => panic!("expected ready state, got {:?}", other),
        }
    }

    fn fill(controller: &mut DetailController, name: &str, rating: u8, text: &str) {
        let draft = controller.draft_mut();
        draft.set_user_name(name);
        draft.set_rating(rating);
        draft.set_review_text(text);
    }

    #[tokio::test]
    async fn test_load_computes_aggregate() {
        let (store, _, mut controller) = setup();
        assert!(matches!(controller.state(), DetailState::Loading));

        store.seed_review("m1", "A", 4, "pretty good overall");
        store.seed_review("m1", "B", 2, "not really my taste");

        let page = page(controller.load().await);
        assert_eq!(page.aggregate, Aggregate { count: 2, mean: 3.0 });
        assert_eq!(page.reviews[0].user_name, "B");
    }

    #[tokio::test]
    async fn test_unknown_movie_is_not_found() {
        let store = Arc::new(InMemoryStore::with_movies(vec![heat()]));
        let mut controller = DetailController::new(store, Arc::new(SilentNotifier), "nope");
        assert!(matches!(controller.load().await, DetailState::NotFound));
        assert!(matches!(controller.load().await, DetailState::NotFound));
    }

    #[tokio::test]
    async fn test_fetch_failure_is_error_state() {
        let (store, _, mut controller) = setup();
        store.set_fail_reads(true);
        assert!(matches!(controller.load().await, DetailState::Error { .. }));
    }

    #[tokio::test]
    async fn test_submit_before_load_is_not_ready() {
        let (store, _, mut controller) = setup();
        fill(&mut controller, "", 4, "A tense, gorgeous film.");
        assert!(matches!(controller.submit().await, SubmitOutcome::NotReady));
        assert_eq!(store.insert_calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_rating_never_writes() {
        let (store, notifier, mut controller) = setup();
        controller.load().await;
        fill(&mut controller, "Sam", 0, "A tense, gorgeous film.");

        let outcome = controller.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Rejected(ValidationError::MissingRating)));
        assert_eq!(store.insert_calls(), 0);
        assert_eq!(notifier.last(), Some((false, "Please select a rating".to_string())));
    }

    #[tokio::test]
    async fn test_short_text_never_writes() {
        for rating in 1..=5 {
            let (store, _, mut controller) = setup();
            controller.load().await;
            fill(&mut controller, "Sam", rating, "  too short ");

            let outcome = controller.submit().await;
            assert!(matches!(outcome, SubmitOutcome::Rejected(ValidationError::TextTooShort { .. })));
            assert_eq!(store.insert_calls(), 0);
        }
    }

    #[tokio::test]
    async fn test_successful_submit_refreshes_page() {
        let (store, notifier, mut controller) = setup();
        store.seed_review("m1", "A", 4, "pretty good overall");
        store.seed_review("m1", "B", 2, "not really my taste");
        controller.load().await;
        let before = page(controller.state()).aggregate;

        fill(&mut controller, "   ", 5, "  Best heist movie ever made.  ");
        let outcome = controller.submit().await;

        let stored = match outcome {
            SubmitOutcome::Submitted(review) => review,
            other => panic!("expected submission, got {:?}", other),
        };
        assert_eq!(stored.user_name, "Anonymous");
        assert_eq!(stored.review_text, "Best heist movie ever made.");
        assert_eq!(stored.movie_title.as_deref(), Some("Heat"));
        assert_eq!(stored.movie_poster.as_deref(), Some("https://img.example/heat.jpg"));

        let after = page(controller.state()).aggregate;
        assert_eq!(after.count, before.count + 1);
        assert!((after.mean - 11.0 / 3.0).abs() < 1e-9);
        assert_eq!(page(controller.state()).reviews[0].id, stored.id);

        assert_eq!(controller.draft(), &ReviewDraft::default());
        assert_eq!(notifier.last(), Some((true, "Review submitted successfully!".to_string())));
    }

    #[tokio::test]
    async fn test_failed_write_keeps_draft() {
        let (store, notifier, mut controller) = setup();
        controller.load().await;
        store.set_fail_writes(true);
        fill(&mut controller, "Sam", 3, "Middle of the road for me.");
        let draft_before = controller.draft().clone();

        let outcome = controller.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Failed(ref e) if e.is_write()));
        assert_eq!(store.insert_calls(), 1);
        assert_eq!(controller.draft(), &draft_before);
        assert_eq!(page(controller.state()).aggregate.count, 0);
        assert_eq!(
            notifier.last(),
            Some((false, "Failed to submit review. Please try again.".to_string()))
        );
    }
}
