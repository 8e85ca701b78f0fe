use std::path::PathBuf;

use derive_more::From;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use theme::Theme;

pub mod theme;

/// A named demo text selectable from the input page
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Sample {
    pub name: String,
    pub text: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    pub theme: Theme,
    /// Passed through to the resolver; currently inert there
    pub locale: String,
    pub samples: Vec<Sample>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            locale: "en".to_string(),
            samples: default_samples(),
        }
    }
}

fn default_samples() -> Vec<Sample> {
    let samples = [
        ("Mixed greeting", "Hello عالم 123 !مرحبا"),
        ("Arabic with Latin phrase", "مرحبا LTR text 123 !؟"),
        ("Hebrew and numbers", "שלום world 45%"),
        ("Prices and discounts", "price: $100, خصم ٥٠%"),
        ("Numbers only", "123,456.78"),
    ];

    samples
        .into_iter()
        .map(|(name, text)| Sample {
            name: name.to_string(),
            text: text.to_string(),
        })
        .collect()
}

#[derive(Debug, From, Error)]
pub enum ConfigError {
    #[error(
        "Failed to get configuration directory. Please specify the location using the `--config <path>` flag"
    )]
    NoDirectory,

    #[error("Failed to access config directory: {0}")]
    Io(std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(Box<figment::Error>),
}

#[derive(Debug, Default)]
pub struct Config {
    pub settings: Settings,
}

impl Config {
    pub fn get(override_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Grab default configuration
        let mut settings = Figment::from(Serialized::defaults(Settings::default()));

        // Check for toml file location
        let config_dir = override_path
            .or_else(|| {
                ProjectDirs::from("com", "Bidiscope", "Bidiscope")
                    .map(|dirs| dirs.config_dir().to_path_buf())
            })
            .ok_or(ConfigError::NoDirectory)?;

        // Ensure path exists
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir)?;
        }

        let settings_toml = config_dir.join("settings.toml");

        if settings_toml.exists() {
            settings = settings.merge(Toml::file(settings_toml));
        } else if let Ok(defaults) = toml::to_string_pretty(&Settings::default()) {
            // Seed an editable settings file on first run; failure to write
            // it is not fatal
            let _ = std::fs::write(&settings_toml, defaults);
        }

        let settings: Settings = settings.extract().map_err(Box::new)?;

        Ok(Self { settings })
    }
}
