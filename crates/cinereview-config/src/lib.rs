pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, StoreConfig, ANON_KEY_ENV, STORE_URL_ENV};
pub use credentials::CredentialStore;
pub use paths::{base_path_override, PathManager, BASE_PATH_ENV};
