use super::prompts;
use crate::output::Output;
use cinereview_config::{Config, CredentialStore, PathManager};
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;

/// Values passed to `cinereview config store`
pub struct StoreArgs {
    pub url: Option<String>,
    pub anon_key: Option<String>,
    pub movies_table: Option<String>,
    pub reviews_table: Option<String>,
}

pub async fn run_config(cmd: crate::ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show { full } => show_config(full, output).await,
        crate::ConfigCommands::Store { url, anon_key, movies_table, reviews_table } => {
            configure_store(StoreArgs { url, anon_key, movies_table, reviews_table }, output).await
        }
    }
}

async fn show_config(full: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::new()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to locate the configuration directory: {}", e))?;
    let config_file = path_manager.config_file();

    if !config_file.exists() {
        output.warn(format!("Configuration file not found at: {}", config_file.display()));
        output.info("Run `cinereview config store` to create it.");
    }

    let config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    let mut cred_store = CredentialStore::new(path_manager.credentials_file());
    cred_store.load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials: {}", e))?;
    let anon_key = cred_store.resolve_store_anon_key().unwrap_or_default();
    let anon_key_display = if full { anon_key.clone() } else { mask_string(&anon_key) };
    let status = config.validate().err().map(|e| e.to_string());

    match output.format() {
        crate::output::OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            table.set_header(vec![
                Cell::new("Store Configuration").fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold),
                Cell::new(""),
            ]);
            table.add_row(vec![Cell::new("Config File"), Cell::new(config_file.display().to_string())]);
            table.add_row(vec![Cell::new("URL"), Cell::new(if config.store.url.is_empty() { "<not set>" } else { config.store.base_url() })]);
            table.add_row(vec![Cell::new("Movies Table"), Cell::new(&config.store.movies_table)]);
            table.add_row(vec![Cell::new("Reviews Table"), Cell::new(&config.store.reviews_table)]);
            table.add_row(vec![Cell::new("Anon Key"), Cell::new(anon_key_display)]);
            table.add_row(vec![
                Cell::new("Status"),
                Cell::new(match &status {
                    None if !anon_key.is_empty() => "✓ ready".green().to_string(),
                    None => "✗ anon key not set".red().to_string(),
                    Some(reason) => format!("{} {}", "✗".red(), reason),
                }),
            ]);
            println!("{}", table);
        }
        crate::output::OutputFormat::Json | crate::output::OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": config_file.display().to_string(),
                "store": {
                    "url": config.store.base_url(),
                    "movies_table": config.store.movies_table,
                    "reviews_table": config.store.reviews_table,
                    "anon_key": anon_key_display,
                },
                "valid": status.is_none() && !anon_key.is_empty(),
                "error": status,
            }));
        }
    }

    Ok(())
}

async fn configure_store(args: StoreArgs, output: &Output) -> Result<()> {
    let path_manager = PathManager::new()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to locate the configuration directory: {}", e))?;
    path_manager.ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create configuration directories: {}", e))?;

    let config_file = path_manager.config_file();
    let mut config = if config_file.exists() {
        Config::load_from_file(&config_file)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?
    } else {
        output.info("Configuration file not found. Creating default configuration...");
        Config::default()
    };

    if let Some(table) = args.movies_table {
        config.store.movies_table = table;
    }
    if let Some(table) = args.reviews_table {
        config.store.reviews_table = table;
    }

    match args.url {
        Some(url) => {
            config.store.url = url;
            config.validate().map_err(|e| color_eyre::eyre::eyre!("Invalid store settings: {}", e))?;
        }
        None => loop {
            let existing = config.store.url.clone();
            config.store.url = prompts::prompt_string("Store URL (e.g. https://<project>.supabase.co)", Some(&existing))?;
            match config.validate() {
                Ok(()) => break,
                Err(e) => output.error(e.to_string()),
            }
        },
    }

    let credentials_file = path_manager.credentials_file();
    let mut cred_store = CredentialStore::new(credentials_file.clone());
    cred_store.load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

    let anon_key = match args.anon_key {
        Some(key) => Some(key),
        None => {
            let keep_existing = cred_store.get_store_anon_key().is_some()
                && prompts::prompt_yes_no("Keep the existing anon key?", Some(true))?;
            if keep_existing {
                None
            } else {
                Some(prompts::prompt_password("Anon key")?)
            }
        }
    };

    if let Some(key) = anon_key {
        let key = key.trim().to_string();
        if key.is_empty() {
            return Err(color_eyre::eyre::eyre!("Anon key cannot be empty"));
        }
        cred_store.set_store_anon_key(key);
        cred_store.save()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials: {}", e))?;
    }

    config.save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    output.success(format!("Store configured: {}", config.store.base_url()));
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string(""), "<not set>");
        assert_eq!(mask_string("abc"), "***");
        assert_eq!(mask_string("eyJhbGciOiJIUzI1NiJ9"), "ey***J9");
    }
}
