use anyhow::Result;
use std::path::{Path, PathBuf};

pub const BASE_PATH_ENV: &str = "CINEREVIEW_BASE_PATH";

/// `CINEREVIEW_BASE_PATH`, only when it names an existing directory
pub fn base_path_override() -> Option<PathBuf> {
    std::env::var_os(BASE_PATH_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .filter(|path| path.is_dir())
}

pub struct PathManager {
    config_dir: PathBuf,
}

impl PathManager {
    /// `$CINEREVIEW_BASE_PATH` when it exists, otherwise `~/.config/cinereview`
    pub fn new() -> Result<Self> {
        Self::resolve(base_path_override())
    }

    fn resolve(base_override: Option<PathBuf>) -> Result<Self> {
        match base_override {
            Some(base) => Ok(Self::with_base(base)),
            None => {
                let config_dir = dirs::config_dir()
                    .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
                    .join("cinereview");
                Ok(Self::with_base(config_dir))
            }
        }
    }

    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self { config_dir: base.into() }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir.join("credentials.toml")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        Ok(())
    }
}
