use anyhow::Result;
use dialoguer::{Confirm, Input};

use crate::config::{self, Config};
use crate::output;

const DEFAULT_API_URL: &str = "http://localhost:8000";

pub fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        let overwrite = Confirm::new()
            .with_prompt(format!(
                "Config file already exists at {}. Overwrite?",
                config_path.display()
            ))
            .default(false)
            .interact()?;

        if !overwrite {
            output::print_message("Aborted.");
            return Ok(());
        }
    }

    let api_url: String = Input::new()
        .with_prompt("API base URL")
        .default(DEFAULT_API_URL.to_string())
        .validate_with(|input: &String| match config::parse_base_url(input) {
            Ok(_) => Ok(()),
            Err(e) => Err(e.to_string()),
        })
        .interact_text()?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let config_content = format!("api_url = \"{}\"\n", api_url.trim());
    std::fs::write(&config_path, config_content)?;

    output::print_message(&format!("Config saved to {}", config_path.display()));
    output::print_message(
        "Log in with 'taskboard login' or create an account with 'taskboard signup'.",
    );

    Ok(())
}
