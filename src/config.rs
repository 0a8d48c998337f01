use crate::i18n::{DEFAULT_LANGUAGE, DEFAULT_PATH};
use anyhow::Result;

/// Settings for the `lang-lookup` binary, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // Directory holding <language>.json files
    pub i18n_path: String,

    // Fallback language code
    pub default_language: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            i18n_path: DEFAULT_PATH.to_string(),
            default_language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            i18n_path: env_or("I18N_PATH", DEFAULT_PATH),
            default_language: env_or("I18N_DEFAULT_LANGUAGE", DEFAULT_LANGUAGE),
        })
    }
}

/// Read an environment variable, treating unset or blank as `default`.
fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var("I18N_PATH");
        std::env::remove_var("I18N_DEFAULT_LANGUAGE");
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = Config::from_env().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.i18n_path, "i18n");
        assert_eq!(config.default_language, "ru");
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("I18N_PATH", "/srv/locales");
        std::env::set_var("I18N_DEFAULT_LANGUAGE", "en");

        let config = Config::from_env().unwrap();
        assert_eq!(config.i18n_path, "/srv/locales");
        assert_eq!(config.default_language, "en");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_blank_values_use_defaults() {
        clear_env();
        std::env::set_var("I18N_PATH", "  ");
        std::env::set_var("I18N_DEFAULT_LANGUAGE", "");

        let config = Config::from_env().unwrap();
        assert_eq!(config, Config::default());

        clear_env();
    }
}
