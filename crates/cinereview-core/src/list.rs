use crate::aggregate::{aggregate_by_movie, Aggregate};
use cinereview_models::Movie;
use cinereview_store::ReviewStore;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error};

/// A movie together with the aggregate of all its reviews
#[derive(Debug, Clone, Serialize)]
pub struct ListEntry {
    pub movie: Movie,
    pub aggregate: Aggregate,
}

/// Materialized list page. `load_failed` separates a failed fetch from an
/// empty catalogue; both carry no entries.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListPage {
    pub entries: Vec<ListEntry>,
    pub load_failed: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ListState {
    Loading,
    Ready(ListPage),
}

/// State machine behind the movie list: `Loading -> Ready`
pub struct ListController {
    store: Arc<dyn ReviewStore>,
    state: ListState,
}

impl ListController {
    pub fn new(store: Arc<dyn ReviewStore>) -> Self {
        Self {
            store,
            state: ListState::Loading,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ListState::Loading)
    }

    /// Fetch movies and every rating, then join them by movie id.
    ///
    /// Any fetch failure is logged and lands in an empty `Ready` page.
    pub async fn load(&mut self) -> &ListState {
        let fetched = futures::try_join!(self.store.list_movies(), self.store.list_all_ratings());

        let page = match fetched {
            Ok((movies, ratings)) => {
                debug!(
                    store = self.store.store_name(),
                    movies = movies.len(),
                    ratings = ratings.len(),
                    "Loaded movie list"
                );
                let by_movie = aggregate_by_movie(&ratings);
                let entries = movies
                    .into_iter()
                    .map(|movie| {
                        let aggregate = by_movie.get(&movie.id).copied().unwrap_or_default();
                        ListEntry { movie, aggregate }
                    })
                    .collect();
                ListPage {
                    entries,
                    load_failed: false,
                }
            }
            Err(e) => {
                error!("Error fetching data: {}", e);
                ListPage {
                    entries: Vec::new(),
                    load_failed: true,
                }
            }
        };

        self.state = ListState::Ready(page);
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinereview_store::InMemoryStore;

    fn movie(id: &str, year: i32) -> Movie {
        Movie {
            id: id.to_string(),
            title: format!("Movie {}", id),
            release_year: year,
            description: String::new(),
            poster_url: None,
        }
    }

    fn ready_page(state: &ListState) -> &ListPage {
        match state {
            ListState::Ready(page) => page,
            ListState::Loading => panic!("list is still loading"),
        }
    }

    #[tokio::test]
    async fn test_starts_loading() {
        let controller = ListController::new(Arc::new(InMemoryStore::new()));
        assert!(controller.is_loading());
    }

    #[tokio::test]
    async fn test_joins_ratings_to_movies() {
        let store = Arc::new(InMemoryStore::with_movies(vec![movie("m1", 2010), movie("m2", 2020)]));
        store.seed_review("m1", "A", 4, "pretty good overall");
        store.seed_review("m1", "B", 2, "not really my taste");

        let mut controller = ListController::new(store);
        let page = ready_page(controller.load().await);

        assert!(!page.load_failed);
        let ids: Vec<&str> = page.entries.iter().map(|e| e.movie.id.as_str()).collect();
        assert_eq!(ids, vec!["m2", "m1"]);
        assert_eq!(page.entries[0].aggregate, Aggregate::default());
        assert_eq!(page.entries[1].aggregate, Aggregate { count: 2, mean: 3.0 });
    }

    #[tokio::test]
    async fn test_fetch_failure_lands_in_empty_ready() {
        let store = Arc::new(InMemoryStore::with_movies(vec![movie("m1", 2010)]));
        store.set_fail_reads(true);

        let mut controller = ListController::new(store);
        let page = ready_page(controller.load().await);

        assert!(page.entries.is_empty());
        assert!(page.load_failed);
    }

    #[tokio::test]
    async fn test_empty_catalogue_is_not_a_failure() {
        let mut controller = ListController::new(Arc::new(InMemoryStore::new()));
        let page = ready_page(controller.load().await);
        assert!(page.entries.is_empty());
        assert!(!page.load_failed);
    }
}
