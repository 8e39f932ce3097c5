use anyhow::{anyhow, Result};
use cinereview_models::{Movie, NewReview, RatingEntry, Review};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

// PostgREST is mounted under this prefix on hosted projects
const REST_PATH: &str = "/rest/v1";

pub fn create_store_client() -> Client {
    Client::builder()
        .user_agent(concat!("cinereview/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Error body returned by PostgREST on rejected queries
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
    code: Option<String>,
}

fn table_url(base_url: &str, table: &str) -> String {
    format!("{}{}/{}", base_url, REST_PATH, table)
}

pub fn movies_url(base_url: &str, table: &str) -> String {
    format!("{}?select=*&order=release_year.desc", table_url(base_url, table))
}

pub fn movie_by_id_url(base_url: &str, table: &str, movie_id: &str) -> String {
    format!(
        "{}?select=*&id=eq.{}",
        table_url(base_url, table),
        urlencoding::encode(movie_id)
    )
}

pub fn reviews_for_movie_url(base_url: &str, table: &str, movie_id: &str) -> String {
    format!(
        "{}?select=*&movie_id=eq.{}&order=created_at.desc",
        table_url(base_url, table),
        urlencoding::encode(movie_id)
    )
}

pub fn all_ratings_url(base_url: &str, table: &str) -> String {
    format!("{}?select=movie_id,rating", table_url(base_url, table))
}

pub fn insert_url(base_url: &str, table: &str) -> String {
    table_url(base_url, table)
}

/// Turn a PostgREST error body into a single line, falling back to the raw text
pub fn describe_error_body(body: &str) -> String {
    match serde_json::from_str::<PostgrestError>(body) {
        Ok(err) => {
            let mut parts = Vec::new();
            if let Some(code) = err.code.filter(|c| !c.is_empty()) {
                parts.push(format!("[{}]", code));
            }
            if let Some(message) = err.message.filter(|m| !m.is_empty()) {
                parts.push(message);
            }
            if let Some(details) = err.details.filter(|d| !d.is_empty()) {
                parts.push(format!("({})", details));
            }
            if let Some(hint) = err.hint.filter(|h| !h.is_empty()) {
                parts.push(format!("hint: {}", hint));
            }
            if parts.is_empty() {
                body.trim().to_string()
            } else {
                parts.join(" ")
            }
        }
        Err(_) => body.trim().to_string(),
    }
}

fn authorized(builder: RequestBuilder, anon_key: &str) -> RequestBuilder {
    builder
        .header("apikey", anon_key)
        .header("Authorization", format!("Bearer {}", anon_key))
        .header("Accept", "application/json")
}

async fn get_rows<T: DeserializeOwned>(client: &Client, url: &str, anon_key: &str) -> Result<Vec<T>> {
    debug!("GET {}", url);
    let response = authorized(client.get(url), anon_key).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(anyhow!("{} - {}", status, describe_error_body(&error_text)));
    }

    let rows: Vec<T> = response.json().await?;
    Ok(rows)
}

pub async fn list_movies(client: &Client, base_url: &str, anon_key: &str, table: &str) -> Result<Vec<Movie>> {
    get_rows(client, &movies_url(base_url, table), anon_key).await
}

pub async fn get_movie(
    client: &Client,
    base_url: &str,
    anon_key: &str,
    table: &str,
    movie_id: &str,
) -> Result<Option<Movie>> {
    let rows: Vec<Movie> = get_rows(client, &movie_by_id_url(base_url, table, movie_id), anon_key).await?;
    Ok(rows.into_iter().next())
}

pub async fn list_reviews_for_movie(
    client: &Client,
    base_url: &str,
    anon_key: &str,
    table: &str,
    movie_id: &str,
) -> Result<Vec<Review>> {
    get_rows(client, &reviews_for_movie_url(base_url, table, movie_id), anon_key).await
}

pub async fn list_all_ratings(client: &Client, base_url: &str, anon_key: &str, table: &str) -> Result<Vec<RatingEntry>> {
    get_rows(client, &all_ratings_url(base_url, table), anon_key).await
}

pub async fn insert_review(
    client: &Client,
    base_url: &str,
    anon_key: &str,
    table: &str,
    review: &NewReview,
) -> Result<Review> {
    let url = insert_url(base_url, table);
    debug!("POST {}", url);

    let response = authorized(client.post(&url), anon_key)
        .header("Content-Type", "application/json")
        .header("Prefer", "return=representation")
        .json(review)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(anyhow!("{} - {}", status, describe_error_body(&error_text)));
    }

    let rows: Vec<Review> = response.json().await?;
    rows.into_iter()
        .next()
        .ok_or_else(|| anyhow!("insert returned no rows"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://demo.supabase.co";

    #[test]
    fn test_movies_url_orders_by_release_year() {
        assert_eq!(
            movies_url(BASE, "movies"),
            "https://demo.supabase.co/rest/v1/movies?select=*&order=release_year.desc"
        );
    }

    #[test]
    fn test_reviews_url_filters_and_orders() {
        assert_eq!(
            reviews_for_movie_url(BASE, "reviews", "m1"),
            "https://demo.supabase.co/rest/v1/reviews?select=*&movie_id=eq.m1&order=created_at.desc"
        );
    }

    #[test]
    fn test_movie_id_is_encoded() {
        assert_eq!(
            movie_by_id_url(BASE, "movies", "a&b=c"),
            "https://demo.supabase.co/rest/v1/movies?select=*&id=eq.a%26b%3Dc"
        );
    }

    #[test]
    fn test_all_ratings_selects_projection() {
        assert_eq!(
            all_ratings_url(BASE, "reviews"),
            "https://demo.supabase.co/rest/v1/reviews?select=movie_id,rating"
        );
    }

    #[test]
    fn test_describe_postgrest_error() {
        let body = r#"{"code":"23514","details":"Failing row contains (...)","hint":null,"message":"new row for relation \"reviews\" violates check constraint \"reviews_rating_check\""}"#;
        assert_eq!(
            describe_error_body(body),
            "[23514] new row for relation \"reviews\" violates check constraint \"reviews_rating_check\" (Failing row contains (...))"
        );
    }

    #[test]
    fn test_describe_non_json_error() {
        assert_eq!(describe_error_body("  Bad Gateway \n"), "Bad Gateway");
    }
}
