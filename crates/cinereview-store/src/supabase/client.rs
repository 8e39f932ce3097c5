use crate::error::StoreError;
use crate::supabase::api;
use crate::traits::ReviewStore;
use anyhow::Result;
use async_trait::async_trait;
use cinereview_config::{Config, CredentialStore, ANON_KEY_ENV};
use cinereview_models::{Movie, NewReview, RatingEntry, Review};
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, info};

/// `ReviewStore` backed by a hosted PostgREST endpoint, authenticated with
/// the project's anonymous key.
#[derive(Clone)]
pub struct SupabaseClient {
    client: Arc<Client>,
    base_url: String,
    anon_key: String,
    movies_table: String,
    reviews_table: String,
}

impl SupabaseClient {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Arc::new(api::create_store_client()),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            movies_table: "movies".to_string(),
            reviews_table: "reviews".to_string(),
        }
    }

    pub fn with_tables(mut self, movies_table: impl Into<String>, reviews_table: impl Into<String>) -> Self {
        self.movies_table = movies_table.into();
        self.reviews_table = reviews_table.into();
        self
    }

    /// Build a client from the validated config and the stored (or env) anon key
    pub fn from_config(config: &Config, credentials: &CredentialStore) -> Result<Self> {
        config.validate()?;
        let anon_key = credentials.resolve_store_anon_key().ok_or_else(|| {
            anyhow::anyhow!(
                "store anon key is not configured (run `cinereview config store` or set {})",
                ANON_KEY_ENV
            )
        })?;

        info!("Using store at {}", config.store.base_url());
        Ok(Self::new(config.store.base_url(), anon_key)
            .with_tables(config.store.movies_table.clone(), config.store.reviews_table.clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ReviewStore for SupabaseClient {
    fn store_name(&self) -> &str {
        "supabase"
    }

    async fn list_movies(&self) -> Result<Vec<Movie>, StoreError> {
        let movies = api::list_movies(&self.client, &self.base_url, &self.anon_key, &self.movies_table)
            .await
            .map_err(|e| StoreError::fetch(&self.movies_table, e))?;
        debug!("Fetched {} movies", movies.len());
        Ok(movies)
    }

    async fn get_movie(&self, movie_id: &str) -> Result<Option<Movie>, StoreError> {
        api::get_movie(&self.client, &self.base_url, &self.anon_key, &self.movies_table, movie_id)
            .await
            .map_err(|e| StoreError::fetch(&self.movies_table, e))
    }

    async fn list_reviews_for_movie(&self, movie_id: &str) -> Result<Vec<Review>, StoreError> {
        let reviews = api::list_reviews_for_movie(&self.client, &self.base_url, &self.anon_key, &self.reviews_table, movie_id)
            .await
            .map_err(|e| StoreError::fetch(&self.reviews_table, e))?;
        debug!("Fetched {} reviews for movie {}", reviews.len(), movie_id);
        Ok(reviews)
    }

    async fn list_all_ratings(&self) -> Result<Vec<RatingEntry>, StoreError> {
        api::list_all_ratings(&self.client, &self.base_url, &self.anon_key, &self.reviews_table)
            .await
            .map_err(|e| StoreError::fetch(&self.reviews_table, e))
    }

    async fn insert_review(&self, review: &NewReview) -> Result<Review, StoreError> {
        let stored = api::insert_review(&self.client, &self.base_url, &self.anon_key, &self.reviews_table, review)
            .await
            .map_err(|e| StoreError::write(&self.reviews_table, e))?;
        info!(review_id = %stored.id, movie_id = %stored.movie_id, "Inserted review");
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinereview_config::StoreConfig;

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = SupabaseClient::new("https://demo.supabase.co/", "key");
        assert_eq!(client.base_url(), "https://demo.supabase.co");
    }

    #[test]
    fn test_from_config_uses_table_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut credentials = CredentialStore::new(dir.path().join("credentials.toml"));
        credentials.set_store_anon_key("anon".to_string());
        let config = Config {
            store: StoreConfig {
                url: "https://demo.supabase.co".to_string(),
                movies_table: "films".to_string(),
                reviews_table: "film_reviews".to_string(),
            },
        };

        let client = SupabaseClient::from_config(&config, &credentials).unwrap();
        assert_eq!(client.movies_table, "films");
        assert_eq!(client.reviews_table, "film_reviews");
    }

    #[test]
    fn test_from_config_rejects_unconfigured_url() {
        let dir = tempfile::tempdir().unwrap();
        let credentials = CredentialStore::new(dir.path().join("credentials.toml"));
        assert!(SupabaseClient::from_config(&Config::default(), &credentials).is_err());
    }
}
