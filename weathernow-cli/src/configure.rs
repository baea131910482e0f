use anyhow::{Context, Result};
use inquire::{Confirm, CustomType, Password, PasswordDisplayMode, Select};
use weathernow_core::{Config, LocationConfig, UnitSystem};

/// Interactive configuration. Existing values are offered as defaults.
///
/// Reads the file directly so an API key from the environment is never persisted.
pub fn run() -> Result<()> {
    let path = Config::config_file_path()?;
    let mut config = Config::load_from(&path).context("Failed to load existing configuration")?;

    let key_prompt = if config.api_key.is_some() {
        "OpenWeather API key (leave empty to keep current):"
    } else {
        "OpenWeather API key:"
    };
    let api_key = Password::new(key_prompt)
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;
    if !api_key.trim().is_empty() {
        config.api_key = Some(api_key.trim().to_string());
    }

    let current = UnitSystem::ALL
        .iter()
        .position(|u| *u == config.units)
        .unwrap_or_default();
    config.units = Select::new("Default units:", UnitSystem::ALL.to_vec())
        .with_starting_cursor(current)
        .prompt()?;

    let share = Confirm::new("Allow lookups by your location?")
        .with_default(config.location.as_ref().is_none_or(|loc| loc.enabled))
        .prompt()?;

    config.location = Some(if share {
        let latitude = CustomType::<f64>::new("Latitude:")
            .with_error_message("Please type a number, e.g. 48.85")
            .prompt()?;
        let longitude = CustomType::<f64>::new("Longitude:")
            .with_error_message("Please type a number, e.g. 2.35")
            .prompt()?;

        LocationConfig {
            latitude: Some(latitude),
            longitude: Some(longitude),
            enabled: true,
        }
    } else {
        LocationConfig {
            latitude: None,
            longitude: None,
            enabled: false,
        }
    });

    config.save_to(&path)?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}
