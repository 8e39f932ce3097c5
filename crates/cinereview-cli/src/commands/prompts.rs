use color_eyre::Result;
use cinereview_models::MAX_RATING;
use dialoguer::{Confirm, Input, Password, Select};

use crate::components::star_rating::stars;

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true);

    if let Some(default_value) = default.filter(|d| !d.is_empty()) {
        input_builder = input_builder.default(default_value.to_string());
    }

    input_builder.interact_text().map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Prompt for a secret (masked input)
pub fn prompt_password(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read password: {}", e))
}

/// Prompt for yes/no with optional default
pub fn prompt_yes_no(prompt: &str, default: Option<bool>) -> Result<bool> {
    let mut confirm_builder = Confirm::new().with_prompt(prompt);

    if let Some(default_value) = default {
        confirm_builder = confirm_builder.default(default_value);
    }

    confirm_builder.interact().map_err(|e| color_eyre::eyre::eyre!("Failed to read confirmation: {}", e))
}

/// Pick 1..=5 stars; `current` of 0 means nothing selected yet
pub fn prompt_rating(prompt: &str, current: u8) -> Result<u8> {
    let items: Vec<String> = (1..=MAX_RATING)
        .map(|value| format!("{}  {}", stars(value), value))
        .collect();
    let default_index = usize::from(current.clamp(1, MAX_RATING) - 1);

    let index = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(default_index)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read rating: {}", e))?;

    Ok(index as u8 + 1)
}
