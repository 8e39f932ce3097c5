pub mod config;
pub mod movie;
pub mod movies;
pub mod prompts;

use cinereview_config::{Config, CredentialStore, PathManager};
use cinereview_store::{ReviewStore, SupabaseClient};
use color_eyre::Result;
use std::sync::Arc;

/// Build the store client from `config.toml`, `credentials.toml` and env overrides
pub fn connect_store() -> Result<Arc<dyn ReviewStore>> {
    let path_manager = PathManager::new()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to locate the configuration directory: {}", e))?;
    let config_file = path_manager.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    let credentials_file = path_manager.credentials_file();
    let mut cred_store = CredentialStore::new(credentials_file.clone());
    cred_store.load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

    let client = SupabaseClient::from_config(&config, &cred_store)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    Ok(Arc::new(client))
}
