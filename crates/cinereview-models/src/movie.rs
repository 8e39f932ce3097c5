use serde::{Deserialize, Deserializer, Serialize};

/// A row of the `movies` table.
///
/// Movies are seeded outside of this application, so the client never
/// creates or mutates them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub release_year: i32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default)]
    pub poster_url: Option<String>,
}

/// Seeded rows may carry `null` where the column has no text
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Movie {
    /// Poster URL, treating an empty string the same as a missing one
    pub fn poster(&self) -> Option<&str> {
        self.poster_url.as_deref().filter(|url| !url.trim().is_empty())
    }
}
