//! Settings loading from the process environment.

use crate::config::schema::Settings;
use crate::config::validation::{validate_settings, ValidationError};

/// Error type for settings loading.
#[derive(Debug)]
pub enum ConfigError {
    Env(envy::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Env(e) => write!(f, "Environment error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<envy::Error> for ConfigError {
    fn from(e: envy::Error) -> Self {
        ConfigError::Env(e)
    }
}

/// Load and validate settings from the process environment.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let settings: Settings = envy::from_env()?;

    validate_settings(&settings).map_err(ConfigError::Validation)?;

    Ok(settings)
}

/// Load and validate settings from an explicit variable set.
///
/// Used by tests to exercise the full load path without touching the real
/// process environment.
pub fn load_settings_from<I>(vars: I) -> Result<Settings, ConfigError>
where
    I: IntoIterator<Item = (String, String)>,
{
    let settings: Settings = envy::from_iter(vars)?;

    validate_settings(&settings).map_err(ConfigError::Validation)?;

    Ok(settings)
}
