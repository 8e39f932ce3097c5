use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Overrides `[store] url` when set
pub const STORE_URL_ENV: &str = "CINEREVIEW_STORE_URL";
/// Overrides the anon key from `credentials.toml` when set
pub const ANON_KEY_ENV: &str = "CINEREVIEW_ANON_KEY";

const PLACEHOLDER_URL: &str = "YOUR_PROJECT_URL";

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
}

/// Connection settings for the hosted store (a PostgREST endpoint)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StoreConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_movies_table")]
    pub movies_table: String,
    #[serde(default = "default_reviews_table")]
    pub reviews_table: String,
}

fn default_movies_table() -> String {
    "movies".to_string()
}

fn default_reviews_table() -> String {
    "reviews".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            movies_table: default_movies_table(),
            reviews_table: default_reviews_table(),
        }
    }
}

impl StoreConfig {
    /// Base URL without trailing slashes
    pub fn base_url(&self) -> &str {
        self.url.trim().trim_end_matches('/')
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise start from defaults; then apply env overrides
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            Self::load_from_file(path)?
        } else {
            Self::default()
        };
        if let Ok(url) = std::env::var(STORE_URL_ENV) {
            if !url.trim().is_empty() {
                config.store.url = url;
            }
        }
        Ok(config)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let url = self.store.base_url();
        if url.is_empty() || url == PLACEHOLDER_URL {
            return Err(anyhow::anyhow!(
                "store url is not configured (run `cinereview config store` or set {})",
                STORE_URL_ENV
            ));
        }
        if !url.starts_with("https://") && !url.starts_with("http://") {
            return Err(anyhow::anyhow!("store url must start with http:// or https://: {}", url));
        }
        if self.store.movies_table.trim().is_empty() {
            return Err(anyhow::anyhow!("movies_table cannot be empty"));
        }
        if self.store.reviews_table.trim().is_empty() {
            return Err(anyhow::anyhow!("reviews_table cannot be empty"));
        }
        Ok(())
    }

    pub fn is_store_configured(&self) -> bool {
        self.validate().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let config = Config {
            store: StoreConfig {
                url: "https://demo.supabase.co".to_string(),
                ..StoreConfig::default()
            },
        };

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.store.url, "https://demo.supabase.co");
        assert_eq!(loaded.store.movies_table, "movies");
        assert_eq!(loaded.store.reviews_table, "reviews");
    }

    #[test]
    fn test_table_names_default_when_missing() {
        let config: Config = toml::from_str("[store]\nurl = \"https://x.supabase.co\"\n").unwrap();
        assert_eq!(config.store.movies_table, "movies");
        assert_eq!(config.store.reviews_table, "reviews");
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_err());
        assert!(!config.is_store_configured());

        config.store.url = PLACEHOLDER_URL.to_string();
        assert!(config.validate().is_err());

        config.store.url = "demo.supabase.co".to_string();
        assert!(config.validate().is_err());

        config.store.url = "https://demo.supabase.co/".to_string();
        assert!(config.validate().is_ok());
        assert_eq!(config.store.base_url(), "https://demo.supabase.co");

        config.store.reviews_table = " ".to_string();
        assert!(config.validate().is_err());
    }
}
