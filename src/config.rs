use serde::Deserialize;
use std::path::Path;

use crate::error::FareError;

pub const DEFAULT_CONFIG_PATH: &str = "config.cfg";
pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/qpxExpress/v1/trips/search";
pub const DEFAULT_ORIGIN: &str = "NYC";
pub const DEFAULT_OPTIONS_PER_WEEKEND: usize = 3;

/// Settings read once at start-up and handed to the fetcher and the monitor.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub key: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SearchConfig {
    #[serde(default = "default_origin")]
    pub origin: String,
    #[serde(default = "default_options_per_weekend")]
    pub options_per_weekend: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            options_per_weekend: DEFAULT_OPTIONS_PER_WEEKEND,
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_origin() -> String {
    DEFAULT_ORIGIN.to_string()
}

fn default_options_per_weekend() -> usize {
    DEFAULT_OPTIONS_PER_WEEKEND
}

impl Settings {
    pub fn load() -> Result<Self, FareError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_PATH))
    }

    pub fn load_from(path: &Path) -> Result<Self, FareError> {
        let s = ::config::Config::builder()
            // INI file with an [api] section, e.g. `key = ...`
            // Optional: the key may come from the environment instead
            .add_source(
                ::config::File::new(&path.to_string_lossy(), ::config::FileFormat::Ini)
                    .required(false),
            )
            // Eg.. `FARES_API__KEY=abc` sets `api.key`
            .add_source(
                ::config::Environment::with_prefix("FARES")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(s.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn write_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "weekend_fares_{}_{}.cfg",
            name,
            std::process::id()
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_key_with_defaults() {
        let path = write_config("defaults", "[api]\nkey = abc123\n");

        let settings = Settings::load_from(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(settings.api.key, "abc123");
        assert_eq!(settings.api.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.search, SearchConfig::default());
        assert_eq!(settings.search.origin, "NYC");
        assert_eq!(settings.search.options_per_weekend, 3);
    }

    #[test]
    fn test_load_search_overrides() {
        let path = write_config(
            "overrides",
            "[api]\nkey = abc123\nendpoint = http://localhost:8080/search\n\n[search]\norigin = BOS\noptions_per_weekend = 5\n",
        );

        let settings = Settings::load_from(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(settings.api.endpoint, "http://localhost:8080/search");
        assert_eq!(settings.search.origin, "BOS");
        assert_eq!(settings.search.options_per_weekend, 5);
    }

    #[test]
    fn test_legacy_google_api_section_is_not_read() {
        let path = write_config("legacy", "[Google API]\nkey = abc123\n");

        let result = Settings::load_from(&path);
        fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(FareError::Config(_))));
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let path = write_config("missing_key", "[search]\norigin = BOS\n");

        let result = Settings::load_from(&path);
        fs::remove_file(&path).unwrap();

        match result {
            Err(FareError::Config(_)) => {}
            other => panic!("Expected configuration error, got {:?}", other),
        }
    }
}
